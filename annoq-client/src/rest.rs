//! REST lookups: region, rsID and gene queries with their counting twins,
//! plus the attribute listing.

use serde_json::Value;

use annoq_core::{AnnoqError, FieldSpec, PageWindow, Result, SnpRecord};

use super::client::{AnnoqClient, extract_key, records_from};
use super::consts::{
    ATTRIBUTES_PATH, ATTRIBUTES_RESULTS_KEY, COUNT_KEY, COUNT_SUFFIX, GENE_PATH, REGION_PATH,
    REST_RESULTS_KEY, RSIDS_PATH,
};

impl AnnoqClient {
    /// Annotations for every SNP inside a chromosomal interval, one page at
    /// a time. `fields` narrows the returned columns and is capped per
    /// request; `None` returns every column.
    pub fn query_region(
        &self,
        chr: &str,
        start: u64,
        end: u64,
        fields: Option<&FieldSpec>,
        window: &PageWindow,
    ) -> Result<Vec<SnpRecord>> {
        let params = rest_params(region_params(chr, start, end), fields, window)?;
        self.rest_records(REGION_PATH, &params)
    }

    /// Annotations for a list of rsIDs, one page at a time.
    pub fn query_rsids(
        &self,
        ids: &[&str],
        fields: Option<&FieldSpec>,
        window: &PageWindow,
    ) -> Result<Vec<SnpRecord>> {
        let params = rest_params(rsids_params(ids)?, fields, window)?;
        self.rest_records(RSIDS_PATH, &params)
    }

    /// Annotation for a single rsID, if the backend knows it.
    pub fn query_rsid(&self, id: &str, fields: Option<&FieldSpec>) -> Result<Option<SnpRecord>> {
        let mut records = self.query_rsids(&[id], fields, &PageWindow::new(0, 1))?;
        if records.is_empty() {
            Ok(None)
        } else {
            Ok(Some(records.remove(0)))
        }
    }

    /// Annotations for every SNP the backend associates with a gene, one
    /// page at a time.
    pub fn query_gene(
        &self,
        gene: &str,
        fields: Option<&FieldSpec>,
        window: &PageWindow,
    ) -> Result<Vec<SnpRecord>> {
        let params = rest_params(gene_params(gene), fields, window)?;
        self.rest_records(GENE_PATH, &params)
    }

    /// Total SNP count inside a chromosomal interval.
    pub fn count_region(&self, chr: &str, start: u64, end: u64) -> Result<u64> {
        self.rest_count(REGION_PATH, &region_params(chr, start, end))
    }

    /// How many of the given rsIDs the backend knows.
    pub fn count_rsids(&self, ids: &[&str]) -> Result<u64> {
        self.rest_count(RSIDS_PATH, &rsids_params(ids)?)
    }

    /// Total SNP count associated with a gene.
    pub fn count_gene(&self, gene: &str) -> Result<u64> {
        self.rest_count(GENE_PATH, &gene_params(gene))
    }

    /// The annotation attributes (column names) the backend serves. Useful
    /// for building a field selection without guessing names.
    pub fn list_attributes(&self) -> Result<Vec<String>> {
        let body = self.get_body(ATTRIBUTES_PATH, &[])?;
        let missing = || AnnoqError::Protocol {
            key: ATTRIBUTES_RESULTS_KEY.to_string(),
            body: body.clone(),
        };
        let Value::Array(items) = extract_key(&body, ATTRIBUTES_RESULTS_KEY)? else {
            return Err(missing());
        };
        items
            .into_iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(missing))
            .collect()
    }

    fn rest_records(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<SnpRecord>> {
        let body = self.get_body(path, params)?;
        let container = extract_key(&body, REST_RESULTS_KEY)?;
        records_from(container, REST_RESULTS_KEY, &body)
    }

    fn rest_count(&self, base_path: &str, params: &[(&str, String)]) -> Result<u64> {
        let path = format!("{base_path}{COUNT_SUFFIX}");
        let body = self.get_body(&path, params)?;
        extract_key(&body, COUNT_KEY)?
            .as_u64()
            .ok_or_else(|| AnnoqError::Protocol {
                key: COUNT_KEY.to_string(),
                body,
            })
    }
}

pub(crate) fn region_params(chr: &str, start: u64, end: u64) -> Vec<(&'static str, String)> {
    vec![
        ("chr", chr.to_string()),
        ("start", start.to_string()),
        ("end", end.to_string()),
    ]
}

pub(crate) fn rsids_params(ids: &[&str]) -> Result<Vec<(&'static str, String)>> {
    if ids.is_empty() {
        return Err(AnnoqError::InvalidArgument(
            "rsID list is empty".to_string(),
        ));
    }
    Ok(vec![("ids", ids.join(","))])
}

pub(crate) fn gene_params(gene: &str) -> Vec<(&'static str, String)> {
    vec![("gene", gene.to_string())]
}

/// Shared parameter assembly for the paged REST endpoints: the lookup's own
/// parameters, then paging, then the optional field selection. Window and
/// field cap are both checked here, before any request exists.
fn rest_params(
    mut params: Vec<(&'static str, String)>,
    fields: Option<&FieldSpec>,
    window: &PageWindow,
) -> Result<Vec<(&'static str, String)>> {
    window.validate()?;
    params.push(("from", window.from.to_string()));
    params.push(("size", window.size.to_string()));
    if let Some(fields) = fields {
        fields.ensure_within_rest_limit()?;
        params.push(("fields", fields.as_query_param()));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spec(names: &[&str]) -> FieldSpec {
        FieldSpec::from_names(names.iter().map(|name| name.to_string()).collect())
    }

    #[test]
    fn region_parameters_cover_the_interval_and_page() {
        let params = rest_params(
            region_params("7", 1_000_000, 2_000_000),
            Some(&spec(&["chr", "pos"])),
            &PageWindow::new(20, 10),
        )
        .unwrap();
        assert_eq!(
            params,
            vec![
                ("chr", "7".to_string()),
                ("start", "1000000".to_string()),
                ("end", "2000000".to_string()),
                ("from", "20".to_string()),
                ("size", "10".to_string()),
                ("fields", "chr,pos".to_string()),
            ]
        );
    }

    #[test]
    fn no_selection_means_no_fields_parameter() {
        let params = rest_params(gene_params("BRCA1"), None, &PageWindow::default()).unwrap();
        assert!(params.iter().all(|(name, _)| *name != "fields"));
    }

    #[test]
    fn rsids_join_comma_separated() {
        let params = rsids_params(&["rs189126619", "rs373259203"]).unwrap();
        assert_eq!(
            params,
            vec![("ids", "rs189126619,rs373259203".to_string())]
        );
    }

    #[test]
    fn empty_rsid_list_is_rejected() {
        let err = rsids_params(&[]).unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }

    #[test]
    fn oversized_selection_is_rejected_before_any_request() {
        let names: Vec<String> = (0..21).map(|i| format!("field_{i}")).collect();
        let err = rest_params(
            gene_params("BRCA1"),
            Some(&FieldSpec::from_names(names)),
            &PageWindow::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }
}
