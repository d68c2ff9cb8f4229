//! Query construction for the annotation search endpoints.
//!
//! [`Query`] is a consuming builder: every method takes the query by value
//! and hands back the updated value, so a query has one owner and a shared
//! query can never be mutated behind another holder's back. Filter clauses
//! combine as a logical AND and keep their append order.

use serde_json::{Map, Value, json};

use crate::consts::SOURCE_FIELDS_KEY;
use crate::errors::{AnnoqError, Result};
use crate::fields::FieldSpec;

/// One filter clause of a query. Clauses AND together.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The field must be present with a non-null value.
    Exists { field: String },
    /// The field must equal the value.
    Term { field: String, value: String },
    /// The field must lie strictly inside the open interval.
    Range {
        field: String,
        gt: Option<f64>,
        lt: Option<f64>,
    },
}

impl Filter {
    /// Presence filter: the field carries a value.
    pub fn exists(field: impl Into<String>) -> Filter {
        Filter::Exists {
            field: field.into(),
        }
    }

    /// Equality filter. The backend indexes terms case-folded, so the value
    /// is lower-cased here and equal inputs of any case build equal clauses.
    pub fn term(field: impl Into<String>, value: impl AsRef<str>) -> Filter {
        Filter::Term {
            field: field.into(),
            value: value.as_ref().to_lowercase(),
        }
    }

    /// Open-interval filter over a numeric field. At least one bound is
    /// required: a bound-less range matches everything, which is never what
    /// the caller meant, so it is rejected instead of passed through.
    pub fn range(field: impl Into<String>, gt: Option<f64>, lt: Option<f64>) -> Result<Filter> {
        if gt.is_none() && lt.is_none() {
            return Err(AnnoqError::InvalidArgument(
                "range filter needs at least one of `gt` / `lt`".to_string(),
            ));
        }
        Ok(Filter::Range {
            field: field.into(),
            gt,
            lt,
        })
    }

    /// The clause in the backend's nested-object encoding.
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Exists { field } => json!({ "exists": { "field": field } }),
            Filter::Term { field, value } => {
                let mut term = Map::new();
                term.insert(field.clone(), Value::from(value.clone()));
                json!({ "term": term })
            }
            Filter::Range { field, gt, lt } => {
                let mut bounds = Map::new();
                if let Some(gt) = gt {
                    bounds.insert("gt".to_string(), json!(gt));
                }
                if let Some(lt) = lt {
                    bounds.insert("lt".to_string(), json!(lt));
                }
                let mut range = Map::new();
                range.insert(field.clone(), Value::Object(bounds));
                json!({ "range": range })
            }
        }
    }
}

/// A structured query against the annotation index.
///
/// An empty query matches every record. Adding filters narrows the match;
/// adding a source selection narrows the returned columns. Free-text search
/// and structured filters are mutually exclusive, checked at serialization
/// so the builder itself never fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    source_fields: Option<FieldSpec>,
    free_text: Option<String>,
}

impl Query {
    /// An empty query: no filters, no column selection, no free text.
    pub fn new() -> Query {
        Query::default()
    }

    /// Append a filter clause. Clauses AND together in append order.
    pub fn filter(mut self, filter: Filter) -> Query {
        self.filters.push(filter);
        self
    }

    /// Return only the selected columns, replacing any earlier selection.
    pub fn with_source(mut self, fields: FieldSpec) -> Query {
        self.source_fields = Some(fields);
        self
    }

    /// Free-text clause across all indexed columns.
    pub fn with_free_text(mut self, text: impl Into<String>) -> Query {
        self.free_text = Some(text.into());
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn source_fields(&self) -> Option<&FieldSpec> {
        self.source_fields.as_ref()
    }

    pub fn free_text(&self) -> Option<&str> {
        self.free_text.as_deref()
    }

    /// The query in the backend's nested-object encoding, without paging.
    ///
    /// Objects serialize with sorted keys, so one construction sequence
    /// always encodes to one wire form.
    pub fn to_value(&self) -> Result<Value> {
        if self.free_text.is_some() && !self.filters.is_empty() {
            return Err(AnnoqError::InvalidArgument(
                "free-text search and structured filters are mutually exclusive".to_string(),
            ));
        }
        let query = match &self.free_text {
            Some(text) => json!({ "query_string": { "query": text } }),
            None => {
                let clauses: Vec<Value> = self.filters.iter().map(Filter::to_value).collect();
                json!({ "bool": { "filter": clauses } })
            }
        };
        let mut body = Map::new();
        if let Some(fields) = &self.source_fields {
            body.insert(
                SOURCE_FIELDS_KEY.to_string(),
                Value::from(fields.names().to_vec()),
            );
        }
        body.insert("query".to_string(), query);
        Ok(Value::Object(body))
    }

    /// Serialized form of [`Query::to_value`].
    pub fn to_wire(&self) -> Result<String> {
        Ok(self.to_value()?.to_string())
    }
}
