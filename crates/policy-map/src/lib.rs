#![deny(unsafe_code)]

//! Auto-fill of policy form fields from scanned document text.
//!
//! The engine reconciles free-text attributes produced by the document
//! scanner (fuel type, usage, department, quality, category, coverage)
//! against the master-data catalogs of the policy system. Each empty form
//! field is resolved with a layered strategy: domain keyword tables first,
//! then generic string similarity, and for the tariff a category-derived
//! fallback and a deterministic default.

pub mod coverage;
pub mod engine;
pub mod patterns;
pub mod score;
pub mod utils;

pub use coverage::CoverageClass;
pub use engine::{
    FieldAssignment, MappingEngine, MappingOutcome, MatchStrategy, MatchThresholds, map_fields,
};
pub use score::{ScoredMatch, find_best_match, similarity};
