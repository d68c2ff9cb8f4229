//! GraphQL lookups: the same region, rsID and gene queries against the
//! GraphQL revision of the API.
//!
//! GraphQL has no wildcard selection, so these operations require an
//! explicit, non-empty field selection; the paged REST endpoints are the
//! ones that can return whole records.

use serde::Serialize;

use annoq_core::{AnnoqError, FieldSpec, Result, SnpRecord};

use super::client::{AnnoqClient, extract_key, records_from};
use super::consts::GRAPHQL_PATH;

const REGION_OP: &str = "snpsByRegion";
const RSIDS_OP: &str = "snpsByRsids";
const GENE_OP: &str = "snpsByGene";

/// POST body of a GraphQL request.
#[derive(Serialize)]
struct GraphqlRequest {
    query: String,
}

impl AnnoqClient {
    /// Annotations for every SNP inside a chromosomal interval, through the
    /// GraphQL endpoint.
    pub fn graphql_region(
        &self,
        chr: &str,
        start: u64,
        end: u64,
        fields: &FieldSpec,
    ) -> Result<Vec<SnpRecord>> {
        self.graphql(REGION_OP, &region_text(chr, start, end, fields)?)
    }

    /// Annotations for a list of rsIDs, through the GraphQL endpoint.
    pub fn graphql_rsids(&self, ids: &[&str], fields: &FieldSpec) -> Result<Vec<SnpRecord>> {
        self.graphql(RSIDS_OP, &rsids_text(ids, fields)?)
    }

    /// Annotations for a gene's SNPs, through the GraphQL endpoint.
    pub fn graphql_gene(&self, gene: &str, fields: &FieldSpec) -> Result<Vec<SnpRecord>> {
        self.graphql(GENE_OP, &gene_text(gene, fields)?)
    }

    fn graphql(&self, operation: &str, text: &str) -> Result<Vec<SnpRecord>> {
        let request = GraphqlRequest {
            query: text.to_string(),
        };
        let body = self.post_body(GRAPHQL_PATH, &request)?;
        let key = format!("data.{operation}");
        let container = extract_key(&body, &key)?;
        records_from(container, &key, &body)
    }
}

pub(crate) fn region_text(chr: &str, start: u64, end: u64, fields: &FieldSpec) -> Result<String> {
    let selection = selection_set(fields)?;
    Ok(format!(
        "{{ {REGION_OP}(chr: {}, start: {start}, end: {end}) {{ {selection} }} }}",
        quote(chr)
    ))
}

pub(crate) fn rsids_text(ids: &[&str], fields: &FieldSpec) -> Result<String> {
    if ids.is_empty() {
        return Err(AnnoqError::InvalidArgument(
            "rsID list is empty".to_string(),
        ));
    }
    let selection = selection_set(fields)?;
    let quoted: Vec<String> = ids.iter().map(|id| quote(id)).collect();
    Ok(format!(
        "{{ {RSIDS_OP}(ids: [{}]) {{ {selection} }} }}",
        quoted.join(", ")
    ))
}

pub(crate) fn gene_text(gene: &str, fields: &FieldSpec) -> Result<String> {
    let selection = selection_set(fields)?;
    Ok(format!(
        "{{ {GENE_OP}(gene: {}) {{ {selection} }} }}",
        quote(gene)
    ))
}

/// The selection set between the braces. GraphQL cannot express "all
/// columns", so an empty selection is a caller mistake, not a default.
fn selection_set(fields: &FieldSpec) -> Result<String> {
    if fields.is_empty() {
        return Err(AnnoqError::InvalidArgument(
            "GraphQL queries need an explicit, non-empty field selection".to_string(),
        ));
    }
    Ok(fields.names().join(" "))
}

/// A GraphQL string literal. GraphQL shares JSON's escape rules; the
/// arguments here are chromosome names, rsIDs and gene symbols, so only the
/// characters that break a literal need escaping.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn spec(names: &[&str]) -> FieldSpec {
        FieldSpec::from_names(names.iter().map(|name| name.to_string()).collect())
    }

    #[test]
    fn region_text_carries_interval_and_selection() {
        let text = region_text("7", 1_000_000, 2_000_000, &spec(&["chr", "pos", "ref"])).unwrap();
        assert_eq!(
            text,
            r#"{ snpsByRegion(chr: "7", start: 1000000, end: 2000000) { chr pos ref } }"#
        );
    }

    #[test]
    fn rsids_text_quotes_each_id() {
        let text = rsids_text(&["rs189126619", "rs373259203"], &spec(&["pos"])).unwrap();
        assert_eq!(
            text,
            r#"{ snpsByRsids(ids: ["rs189126619", "rs373259203"]) { pos } }"#
        );
    }

    #[test]
    fn gene_text_quotes_the_symbol() {
        let text = gene_text("BRCA1", &spec(&["chr", "pos"])).unwrap();
        assert_eq!(text, r#"{ snpsByGene(gene: "BRCA1") { chr pos } }"#);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = gene_text("BRCA1", &FieldSpec::default()).unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }

    #[test]
    fn empty_rsid_list_is_rejected() {
        let err = rsids_text(&[], &spec(&["pos"])).unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }

    #[rstest]
    #[case("plain", r#""plain""#)]
    #[case("with \"quotes\"", r#""with \"quotes\"""#)]
    #[case("back\\slash", r#""back\\slash""#)]
    #[case("line\nbreak", r#""line\nbreak""#)]
    fn literals_escape_what_breaks_them(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote(input), expected);
    }
}
