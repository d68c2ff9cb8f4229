//! Search-engine passthrough: run a structured query against the annotation
//! index, one page at a time.

use serde_json::Value;

use annoq_core::{AnnoqError, PageWindow, Query, Result, SnpRecord};

use super::client::{AnnoqClient, extract_key};
use super::consts::{HIT_RECORD_KEY, SEARCH_HITS_KEY, SEARCH_PATH};

impl AnnoqClient {
    /// Execute one page of a structured query.
    ///
    /// The page window is validated and the query serialized before any
    /// network I/O, so a bad window or a conflicting query never leaves the
    /// process. Records come back unwrapped from the search-engine envelope,
    /// in ranking order.
    pub fn search(&self, query: &Query, window: &PageWindow) -> Result<Vec<SnpRecord>> {
        let body = search_body(query, window)?;
        let text = self.post_body(SEARCH_PATH, &body)?;
        let hits = extract_key(&text, SEARCH_HITS_KEY)?;
        let Value::Array(hits) = hits else {
            return Err(AnnoqError::Protocol {
                key: SEARCH_HITS_KEY.to_string(),
                body: text,
            });
        };
        Ok(unwrap_hits(hits))
    }
}

/// Full POST body for one page: the query DSL plus the paging keys.
pub(crate) fn search_body(query: &Query, window: &PageWindow) -> Result<Value> {
    window.validate()?;
    let mut body = query.to_value()?;
    body["from"] = Value::from(window.from);
    body["size"] = Value::from(window.size);
    Ok(body)
}

/// Pull each hit's record out of its `_source` wrapper. A hit the backend
/// serves without a `_source` object becomes an empty record rather than an
/// error; the hit itself is still real.
fn unwrap_hits(hits: Vec<Value>) -> Vec<SnpRecord> {
    hits.into_iter()
        .map(|mut hit| match hit.get_mut(HIT_RECORD_KEY).map(Value::take) {
            Some(Value::Object(record)) => record,
            _ => SnpRecord::new(),
        })
        .collect()
}
