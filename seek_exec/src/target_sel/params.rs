//! Parameters structure for TargetSel

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for target selection.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSelParams {
    /// Highest candidate index scanned. Candidates are numbered from 1 up to and including this
    /// bound.
    pub pool_bound: usize,

    /// Prefix of every candidate name, the index is appended zero padded to two digits.
    pub name_prefix: String,

    /// Maximum length of a candidate name. Longer names are skipped.
    pub max_name_len: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TargetSelParams {
    fn default() -> Self {
        Self {
            pool_bound: 64,
            name_prefix: String::from("CAIXA"),
            max_name_len: 31,
        }
    }
}
