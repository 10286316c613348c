//! Layout thresholds for the observed statement template.
//!
//! Every empirical constant lives here so a different template is a data
//! change (TOML profile), not a code change. All fields default to the
//! values tuned against the single observed template.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Fragments whose rounded `y` falls below this are footer content
    /// and never grouped into lines.
    pub footer_cutoff_y: f64,
    /// Column boundary used when no "transaction type" header is found
    /// on a page.
    pub default_type_column_x: f64,
    /// Safety buffer subtracted from the column boundary before
    /// partitioning fragments into description vs. type.
    pub column_buffer: f64,
    /// Minimum horizontal gap between adjacent fragments that still
    /// separates description text from type text.
    pub gap_split_min: f64,
    /// Maximum vertical gap (quantized units) at which a top-of-page
    /// orphan prefers the anchor below it over the previous page's
    /// trailing anchor.
    pub cluster_gap_max: i64,
    /// Left zone where a fragment may be a split-off piece of the date.
    pub date_zone_max_x: f64,
    /// Right zone where a fragment may be a split-off piece of the amount.
    pub amount_zone_min_x: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            footer_cutoff_y: 50.0,
            default_type_column_x: 340.0,
            column_buffer: 50.0,
            gap_split_min: 40.0,
            cluster_gap_max: 25,
            date_zone_max_x: 100.0,
            amount_zone_min_x: 500.0,
        }
    }
}

impl ExtractConfig {
    /// Fragments at or past this x belong to the type column.
    pub fn split_threshold(&self, type_column_x: f64) -> f64 {
        type_column_x - self.column_buffer
    }
}
