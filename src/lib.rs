//! Synchronous client for the NCI Genomic Data Commons (GDC) REST API.
//!
//! Covers TCGA project discovery, filter-based file queries, manifest
//! generation and parsing, sample-id resolution, and bulk file download.
//! Every operation is one blocking HTTP call; nothing is cached or retried.

pub mod domain;
pub mod error;
pub mod filters;
pub mod manifest;
pub mod portal;
