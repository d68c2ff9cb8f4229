//! Record types returned by the annotation backend.

/// One annotation record: a mapping from annotation field name to value.
///
/// The backend serves hundreds of annotation columns and adds more between
/// releases, so records stay schemaless. The only field names the client
/// ever interprets are the ones callers hand it as filter or projection
/// keys.
pub type SnpRecord = serde_json::Map<String, serde_json::Value>;
