//! Result types for brand canonicalization.
//!
//! # Structure
//!
//! ```text
//! CanonicalListing
//! ├── document: serde_json::Value     # rewritten generator output
//! ├── canonical_brand: String         # the spelling every mention now uses
//! └── report: BrandReport             # per-pass replacement counts
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Replacement counts for the three rewrite passes.
///
/// A count is the number of brand occurrences rewritten, including ones that
/// were already spelled canonically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandReport {
    /// Canonical spelling resolved from the raw brand; empty means no-op.
    pub canonical_brand: String,
    /// Targeted pass over top-level fields, matching the caller's raw brand.
    pub raw_pass: usize,
    /// Targeted pass over top-level fields, matching the canonical brand.
    pub canonical_pass: usize,
    /// Deep sweep over the whole document, matching the canonical brand.
    pub sweep: usize,
}

impl BrandReport {
    pub fn total(&self) -> usize {
        self.raw_pass + self.canonical_pass + self.sweep
    }

    /// `true` when the raw brand resolved to nothing and no pass ran.
    pub fn is_noop(&self) -> bool {
        self.canonical_brand.is_empty()
    }
}

/// An owned, fully canonical document plus the brand it was normalized to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalListing {
    pub document: Value,
    pub canonical_brand: String,
    pub report: BrandReport,
}
