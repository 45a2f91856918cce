use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One pipeline run whose catalog and genotypes are browsable together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// A sequenced individual belonging to a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub id: i64,
    pub batch_id: i64,
    pub file: String,
}

/// Raw genotype call for one sample at one catalog locus, as produced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedGenotype {
    pub sample_id: i64,
    pub file: String,
    pub genotype: String,
}

/// Manual override of one sample's call at a locus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub sample_id: i64,
    pub genotype: String,
}

/// One joined row from the data source: the observed call plus any correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleCall {
    pub sample_id: i64,
    pub file: String,
    pub genotype: String,
    pub correction: Option<String>,
}

/// Per-sample cell of the genotype grid, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub sample_id: i64,
    pub file: String,
    /// Effective genotype in its original case.
    pub genotype: String,
    /// True when `genotype` came from a manual correction.
    pub corrected: bool,
    /// Lower-cased effective code; the dropdown's pre-selected entry.
    pub selected: String,
    /// Legal dropdown contents for the effective code.
    pub alternatives: &'static [&'static str],
}

impl DisplayRow {
    /// Whether `alt` is the dropdown's pre-selected entry.
    pub fn is_selected(&self, alt: &str) -> bool {
        alt == self.selected
    }

    /// Sample label for the cell header: underscores become spaces, first
    /// letter upper-cased.
    pub fn title(&self) -> String {
        let spaced = self.file.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => spaced,
        }
    }
}
