//! Download-mode lookups: stream every matching record, past the paged
//! window's reach.
//!
//! The paged endpoints stop addressing results at
//! [`MAX_RESULT_WINDOW`](annoq_core::MAX_RESULT_WINDOW). The download twins
//! of the REST lookups stream the complete result as newline-delimited JSON
//! instead, one record per line. The stream is decoded incrementally, so
//! the response never has to fit in one allocation; the record-count
//! ceiling, [`MAX_DOWNLOAD_RECORDS`](annoq_core::MAX_DOWNLOAD_RECORDS), is
//! the backend's to enforce.

use std::io::{BufRead, BufReader};

use log::info;

use annoq_core::{AnnoqError, FieldSpec, Result, SnpRecord};

use super::client::AnnoqClient;
use super::consts::{DOWNLOAD_SUFFIX, GENE_PATH, REGION_PATH, RSIDS_PATH};
use super::rest::{gene_params, region_params, rsids_params};

impl AnnoqClient {
    /// Every annotation record inside a chromosomal interval, in stream
    /// order.
    pub fn download_region(
        &self,
        chr: &str,
        start: u64,
        end: u64,
        fields: Option<&FieldSpec>,
    ) -> Result<Vec<SnpRecord>> {
        let params = download_params(region_params(chr, start, end), fields)?;
        self.download(REGION_PATH, &params)
    }

    /// Every annotation record for the given rsIDs, in stream order.
    pub fn download_rsids(
        &self,
        ids: &[&str],
        fields: Option<&FieldSpec>,
    ) -> Result<Vec<SnpRecord>> {
        let params = download_params(rsids_params(ids)?, fields)?;
        self.download(RSIDS_PATH, &params)
    }

    /// Every annotation record for a gene's SNPs, in stream order.
    pub fn download_gene(&self, gene: &str, fields: Option<&FieldSpec>) -> Result<Vec<SnpRecord>> {
        let params = download_params(gene_params(gene), fields)?;
        self.download(GENE_PATH, &params)
    }

    fn download(&self, base_path: &str, params: &[(&str, String)]) -> Result<Vec<SnpRecord>> {
        let path = format!("{base_path}{DOWNLOAD_SUFFIX}");
        let response = self.get_response(&path, params)?;
        let reader = BufReader::new(response.into_reader());
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            // blank lines pad the stream and carry no record
            if trimmed.is_empty() {
                continue;
            }
            let record: SnpRecord =
                serde_json::from_str(trimmed).map_err(|_| AnnoqError::Protocol {
                    key: "record".to_string(),
                    body: line.clone(),
                })?;
            records.push(record);
        }
        info!("downloaded {} records from {path}", records.len());
        Ok(records)
    }
}

/// Parameter assembly for the download endpoints: the lookup's own
/// parameters plus the optional field selection. No paging keys; the point
/// of download mode is the absence of a window.
fn download_params(
    mut params: Vec<(&'static str, String)>,
    fields: Option<&FieldSpec>,
) -> Result<Vec<(&'static str, String)>> {
    if let Some(fields) = fields {
        fields.ensure_within_rest_limit()?;
        params.push(("fields", fields.as_query_param()));
    }
    Ok(params)
}
