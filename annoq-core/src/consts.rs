//! Backend limits and wire-format constants shared across the workspace.

/// Deepest result offset the paged endpoints will address: `from + size` of
/// any page must stay at or below this.
pub const MAX_RESULT_WINDOW: u64 = 10_000;

/// Largest field selection the REST endpoints accept per request.
pub const MAX_SOURCE_FIELDS: usize = 20;

/// Ceiling on the record count of a download-mode request. The backend
/// enforces it; clients only document it.
pub const MAX_DOWNLOAD_RECORDS: u64 = 1_000_000;

/// The single recognized key of a field-selection JSON object.
pub const SOURCE_FIELDS_KEY: &str = "_source";
