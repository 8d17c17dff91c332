//! Test-data and change-traffic generation for CDC pipelines.
//!
//! The binary creates sample schema objects from per-dialect table
//! definition files and issues batched or randomized INSERT/UPDATE/DELETE
//! workloads against them, so a downstream change-data-capture consumer has
//! realistic traffic to chew on.
//!
//! The library side is organized by concern: [`schema`] loads and caches
//! table definitions and drives DDL, [`generate`] turns sample data pools
//! into row values, [`dml`] owns commit-unit batching and the execution
//! summary, and [`workload`] drives the randomized mixed workload with its
//! run report.

pub mod config;
pub mod dml;
pub mod generate;
pub mod logging;
pub mod report;
pub mod schema;
pub mod workload;

pub use crate::dml::{DmlEngine, DmlKind, DmlOptions, ExecutionSummary};
pub use crate::schema::{SchemaModel, TableAttributes};
