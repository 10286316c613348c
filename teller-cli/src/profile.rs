//! Layout threshold profiles: TOML overrides of the extraction config,
//! so a new statement template is a data change.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use teller_core::ExtractConfig;

/// Load a profile, or the built-in template defaults when none is given.
/// A profile may override any subset of fields.
pub fn load(path: Option<&Path>) -> Result<ExtractConfig> {
    let Some(p) = path else {
        return Ok(ExtractConfig::default());
    };
    let raw = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse profile {}", p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_means_defaults() {
        assert_eq!(load(None).unwrap(), ExtractConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.toml");
        fs::write(&path, "default_type_column_x = 420.0\ncluster_gap_max = 40\n").unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.default_type_column_x, 420.0);
        assert_eq!(cfg.cluster_gap_max, 40);
        assert_eq!(cfg.footer_cutoff_y, ExtractConfig::default().footer_cutoff_y);
    }
}
