//! AnnoQ API client implementation.
//!
//! This module provides the core [`AnnoqClient`] type and its builder. The
//! client holds the API base URL and a blocking HTTP agent; the per-mode
//! operations live in [`search`](crate::search), [`rest`](crate::rest),
//! [`graphql`](crate::graphql) and [`download`](crate::download).

use std::io::Read;
use std::time::Duration;

use log::debug;
use serde_json::Value;

use annoq_core::{AnnoqError, Result, SnpRecord};

use super::utils::get_default_annoq_api;

/// Builder for constructing an [`AnnoqClient`] with custom configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use annoq_client::client::AnnoqClient;
///
/// let client = AnnoqClient::builder()
///     .with_api_url("http://localhost:8010".to_string())
///     .with_timeout(Duration::from_secs(30))
///     .finish();
/// ```
#[derive(Default)]
pub struct AnnoqClientBuilder {
    api_url: Option<String>,
    timeout: Option<Duration>,
}

impl AnnoqClientBuilder {
    /// Creates a new, empty AnnoqClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL for the AnnoqClient.
    pub fn with_api_url(mut self, api: String) -> Self {
        self.api_url = Some(api);
        self
    }

    /// Sets an overall per-request timeout on the underlying agent.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the builder and creates an AnnoqClient.
    pub fn finish(self) -> AnnoqClient {
        // handle the annoq api
        let api_url = self
            .api_url
            .unwrap_or_else(get_default_annoq_api)
            .trim_end_matches('/')
            .to_string();

        let mut agent = ureq::AgentBuilder::new();
        if let Some(timeout) = self.timeout {
            agent = agent.timeout(timeout);
        }

        AnnoqClient {
            api_url,
            agent: agent.build(),
        }
    }
}

/// Blocking client for the AnnoQ SNP annotation API.
///
/// Each client holds its own base URL, so clients pointed at different
/// deployments coexist in one process; nothing is global. Every operation is
/// a single synchronous round-trip, and every argument is validated before
/// the request leaves the process.
///
/// # Examples
///
/// ```rust,no_run
/// use annoq_client::client::AnnoqClient;
/// use annoq_core::{Filter, PageWindow, Query};
///
/// # fn main() -> annoq_core::Result<()> {
/// let client = AnnoqClient::new();
/// let query = Query::new().filter(Filter::exists("ANNOVAR_ensembl_Effect"));
/// let records = client.search(&query, &PageWindow::new(0, 10))?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
pub struct AnnoqClient {
    api_url: String,
    agent: ureq::Agent,
}

impl AnnoqClient {
    /// Creates a new builder for constructing an AnnoqClient.
    pub fn builder() -> AnnoqClientBuilder {
        AnnoqClientBuilder::default()
    }

    /// Client against the default endpoint: `ANNOQ_API` if set, otherwise
    /// the public API.
    pub fn new() -> AnnoqClient {
        Self::builder().finish()
    }

    /// The configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// One GET round-trip; query-string parameters in, response body out.
    pub(crate) fn get_body(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.endpoint(path);
        debug!("GET {url} {params:?}");
        let mut request = self.agent.get(&url);
        for (name, value) in params {
            request = request.query(name, value);
        }
        read_body(request.call())
    }

    /// One POST round-trip with a JSON body.
    pub(crate) fn post_body(&self, path: &str, body: &impl serde::Serialize) -> Result<String> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        read_body(self.agent.post(&url).send_json(body))
    }

    /// GET returning the raw response for streaming consumption.
    pub(crate) fn get_response(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ureq::Response> {
        let url = self.endpoint(path);
        debug!("GET {url} {params:?}");
        let mut request = self.agent.get(&url);
        for (name, value) in params {
            request = request.query(name, value);
        }
        into_response(request.call())
    }
}

impl Default for AnnoqClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the transport outcome onto the client's error kinds: non-success
/// statuses become [`AnnoqError::Remote`] with the body carried verbatim,
/// connection-level failures become [`AnnoqError::Transport`].
pub(crate) fn into_response(
    outcome: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response> {
    match outcome {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(AnnoqError::Remote { status, body })
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(AnnoqError::Transport(transport.to_string()))
        }
    }
}

/// Read a successful response body to a string, without the length cap that
/// `into_string` applies. Paged envelopes can run well past it.
fn read_body(outcome: std::result::Result<ureq::Response, ureq::Error>) -> Result<String> {
    let response = into_response(outcome)?;
    let mut body = String::new();
    response.into_reader().read_to_string(&mut body)?;
    Ok(body)
}

/// Parse a success body and pull out the designated results container.
///
/// The key is a dotted path walked through nested objects, e.g. `hits.hits`
/// or `data.GetSNPsByChromosome`. A body that is not JSON and a body missing
/// the container are the same defect, a broken response contract, so both
/// report [`AnnoqError::Protocol`] with the raw body attached.
pub(crate) fn extract_key(body: &str, key: &str) -> Result<Value> {
    let missing = || AnnoqError::Protocol {
        key: key.to_string(),
        body: body.to_string(),
    };
    let parsed: Value = serde_json::from_str(body).map_err(|_| missing())?;
    let mut current = &parsed;
    for part in key.split('.') {
        current = current.get(part).ok_or_else(missing)?;
    }
    Ok(current.clone())
}

/// Interpret a results container as a list of annotation records.
pub(crate) fn records_from(container: Value, key: &str, body: &str) -> Result<Vec<SnpRecord>> {
    let Value::Array(items) = container else {
        return Err(AnnoqError::Protocol {
            key: key.to_string(),
            body: body.to_string(),
        });
    };
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(record) => records.push(record),
            _ => {
                return Err(AnnoqError::Protocol {
                    key: key.to_string(),
                    body: body.to_string(),
                });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn local_client(api: &str) -> AnnoqClient {
        AnnoqClient::builder().with_api_url(api.to_string()).finish()
    }

    #[test]
    fn endpoint_joins_with_a_single_slash() {
        let client = local_client("http://localhost:8010");
        assert_eq!(
            client.endpoint("annotations/region"),
            "http://localhost:8010/annotations/region"
        );
    }

    #[test]
    fn trailing_slash_on_the_base_url_is_dropped() {
        let client = local_client("http://localhost:8010/");
        assert_eq!(client.api_url(), "http://localhost:8010");
        assert_eq!(client.endpoint("graphql"), "http://localhost:8010/graphql");
    }

    #[test]
    fn extract_key_walks_dotted_paths() {
        let body = r#"{"hits": {"total": 2, "hits": [{"_source": {"chr": "7"}}]}}"#;
        let container = extract_key(body, "hits.hits").unwrap();
        assert_eq!(container, json!([{"_source": {"chr": "7"}}]));
    }

    #[rstest]
    #[case(r#"{"details": []}"#, "results")]
    #[case(r#"{"hits": {"total": 0}}"#, "hits.hits")]
    #[case("not json at all", "details")]
    fn missing_container_is_a_protocol_error(#[case] body: &str, #[case] key: &str) {
        let err = extract_key(body, key).unwrap_err();
        match err {
            AnnoqError::Protocol { key: reported, .. } => assert_eq!(reported, key),
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn records_from_accepts_only_object_lists() {
        let records =
            records_from(json!([{"chr": "7"}, {"chr": "8"}]), "details", "{}").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["chr"], json!("7"));

        assert!(records_from(json!({"chr": "7"}), "details", "{}").is_err());
        assert!(records_from(json!([1, 2, 3]), "details", "{}").is_err());
    }
}
