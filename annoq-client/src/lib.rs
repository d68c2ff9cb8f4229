//! # Blocking client for the AnnoQ SNP annotation API.
//!
//! AnnoQ serves functional annotations for hundreds of millions of SNPs.
//! This crate talks to the three revisions of its HTTP API: the
//! search-engine passthrough that takes a query DSL body, the GraphQL
//! endpoint, and the REST lookups with their counting and download twins.
//! Query construction, field selection and paging live in `annoq-core`;
//! everything here is the wire side.
//!
pub mod client;
pub mod consts;
pub mod download;
pub mod graphql;
pub mod rest;
pub mod search;
pub mod utils;

// re-expose the client types
pub use client::{AnnoqClient, AnnoqClientBuilder};
