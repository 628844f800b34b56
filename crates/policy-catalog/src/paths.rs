//! Catalog directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the catalog directory.
pub const CATALOG_ENV_VAR: &str = "POLICY_CATALOG_DIR";

/// Get the catalog root directory.
///
/// Resolution order:
/// 1. `POLICY_CATALOG_DIR` environment variable
/// 2. `catalogs/` directory relative to workspace root
pub fn catalog_root() -> PathBuf {
    if let Ok(root) = std::env::var(CATALOG_ENV_VAR) {
        if !root.trim().is_empty() {
            return PathBuf::from(root);
        }
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalogs")
}
