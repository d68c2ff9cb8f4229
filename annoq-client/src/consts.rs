//! Endpoint layout and client configuration constants.

/// Environment variable overriding the default API endpoint.
pub const ANNOQ_API_ENV: &str = "ANNOQ_API";

/// Default AnnoQ API endpoint.
pub const DEFAULT_ANNOQ_API: &str = "https://api.annoq.org";

/// Search-engine passthrough endpoint: POST, query DSL body, paged.
pub const SEARCH_PATH: &str = "annoq-annotations/_search";

/// GraphQL endpoint: POST, `{"query": text}` body.
pub const GRAPHQL_PATH: &str = "graphql";

/// REST lookup endpoints: GET with query-string parameters, paged.
pub const REGION_PATH: &str = "annotations/region";
pub const RSIDS_PATH: &str = "annotations/rsids";
pub const GENE_PATH: &str = "annotations/gene";

/// Endpoint listing the annotation attributes the backend serves.
pub const ATTRIBUTES_PATH: &str = "annotations/attributes";

/// Suffixes turning a REST lookup path into its counting or download twin.
pub const COUNT_SUFFIX: &str = "/count";
pub const DOWNLOAD_SUFFIX: &str = "/download";

/// Results-container key of the paged REST envelope.
pub const REST_RESULTS_KEY: &str = "details";

/// Results-container key of the attribute-listing envelope.
pub const ATTRIBUTES_RESULTS_KEY: &str = "results";

/// Key carrying the total in a count envelope.
pub const COUNT_KEY: &str = "count";

/// Results container of the search-engine envelope, as a dotted path.
pub const SEARCH_HITS_KEY: &str = "hits.hits";

/// Key wrapping each record inside a search-engine hit.
pub const HIT_RECORD_KEY: &str = "_source";
