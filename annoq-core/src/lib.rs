//! # Core query model for the AnnoQ SNP annotation service.
//!
//! Everything needed to describe an annotation query before it touches the
//! network: filter clauses and the consuming query builder, field selection
//! in its three accepted input forms, the paging window with the backend's
//! limits, and the error type shared with the client crate.
//!
pub mod consts;
pub mod errors;
pub mod fields;
pub mod models;
pub mod page;
pub mod query;

// re-expose core types
pub use consts::*;
pub use errors::*;
pub use fields::*;
pub use models::*;
pub use page::*;
pub use query::*;
