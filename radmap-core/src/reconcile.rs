//! Reconciliation of raw genotype calls with manual corrections into
//! rendering-ready display rows.

use serde::Serialize;
use std::collections::HashMap;

use crate::catalog;
use crate::domain::{Correction, DisplayRow, ObservedGenotype, SampleCall};

/// Outcome of reconciling a locus: either cells to draw, or an explicit
/// "nothing to show" state the page explains to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GenotypeView {
    /// The locus has no observed genotypes, typically because the tag did
    /// not have enough mappable progeny.
    NoGenotypes,
    Rows(Vec<DisplayRow>),
}

/// Merge observed genotypes with corrections, preserving the input sample
/// order (callers supply rows in ascending sample id).
///
/// A non-empty correction wins over the raw call and marks the row
/// corrected; a present-but-blank correction counts as no correction at
/// all. Lookups into the catalog are lower-cased while the displayed
/// string keeps its original case.
pub fn build_display_rows(
    samples: &[ObservedGenotype],
    corrections: &HashMap<i64, Correction>,
) -> GenotypeView {
    if samples.is_empty() {
        return GenotypeView::NoGenotypes;
    }

    let rows = samples
        .iter()
        .map(|sample| {
            let correction = corrections
                .get(&sample.sample_id)
                .map(|c| c.genotype.trim())
                .filter(|g| !g.is_empty());

            let (genotype, corrected) = match correction {
                Some(genotype) => (genotype.to_string(), true),
                None => (sample.genotype.clone(), false),
            };

            let selected = genotype.to_ascii_lowercase();
            let alternatives = catalog::alternatives_for(&selected);

            DisplayRow {
                sample_id: sample.sample_id,
                file: sample.file.clone(),
                genotype,
                corrected,
                selected,
                alternatives,
            }
        })
        .collect();

    GenotypeView::Rows(rows)
}

/// Convenience over the joined rows a data source hands back.
pub fn reconcile_calls(calls: &[SampleCall]) -> GenotypeView {
    let samples: Vec<ObservedGenotype> = calls
        .iter()
        .map(|call| ObservedGenotype {
            sample_id: call.sample_id,
            file: call.file.clone(),
            genotype: call.genotype.clone(),
        })
        .collect();

    let corrections: HashMap<i64, Correction> = calls
        .iter()
        .filter_map(|call| {
            call.correction.as_ref().map(|genotype| {
                (
                    call.sample_id,
                    Correction {
                        sample_id: call.sample_id,
                        genotype: genotype.clone(),
                    },
                )
            })
        })
        .collect();

    build_display_rows(&samples, &corrections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(sample_id: i64, file: &str, genotype: &str) -> ObservedGenotype {
        ObservedGenotype {
            sample_id,
            file: file.to_string(),
            genotype: genotype.to_string(),
        }
    }

    fn correction(sample_id: i64, genotype: &str) -> (i64, Correction) {
        (
            sample_id,
            Correction {
                sample_id,
                genotype: genotype.to_string(),
            },
        )
    }

    #[test]
    fn corrections_win_and_are_flagged() {
        let samples = vec![
            observed(1, "progeny_01", "lm"),
            observed(2, "progeny_02", "LL"),
            observed(3, "progeny_03", "nn"),
        ];
        let corrections = HashMap::from([correction(2, "ll")]);

        let view = build_display_rows(&samples, &corrections);
        let rows = match view {
            GenotypeView::Rows(rows) => rows,
            GenotypeView::NoGenotypes => panic!("expected rows"),
        };

        assert_eq!(rows.len(), 3);
        let selected: Vec<&str> = rows.iter().map(|r| r.selected.as_str()).collect();
        assert_eq!(selected, vec!["lm", "ll", "nn"]);
        let flags: Vec<bool> = rows.iter().map(|r| r.corrected).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(rows[0].alternatives, &["ll", "lm", "--"]);
        assert_eq!(rows[1].alternatives, &["ll", "lm", "--"]);
        assert_eq!(rows[2].alternatives, &["nn", "np", "--"]);
    }

    #[test]
    fn raw_call_keeps_original_case_but_selects_lowercase() {
        let samples = vec![observed(7, "fry_07", "LL")];
        let view = build_display_rows(&samples, &HashMap::new());
        let rows = match view {
            GenotypeView::Rows(rows) => rows,
            GenotypeView::NoGenotypes => panic!("expected rows"),
        };
        assert_eq!(rows[0].genotype, "LL");
        assert_eq!(rows[0].selected, "ll");
        assert!(!rows[0].corrected);
    }

    #[test]
    fn blank_correction_falls_through_to_raw() {
        let samples = vec![observed(1, "progeny_01", "np")];
        let corrections = HashMap::from([correction(1, "  ")]);
        let view = build_display_rows(&samples, &corrections);
        let rows = match view {
            GenotypeView::Rows(rows) => rows,
            GenotypeView::NoGenotypes => panic!("expected rows"),
        };
        assert_eq!(rows[0].genotype, "np");
        assert!(!rows[0].corrected);
    }

    #[test]
    fn input_order_is_preserved() {
        let samples = vec![
            observed(3, "c", "lm"),
            observed(1, "a", "ll"),
            observed(2, "b", "lm"),
        ];
        let view = build_display_rows(&samples, &HashMap::new());
        let rows = match view {
            GenotypeView::Rows(rows) => rows,
            GenotypeView::NoGenotypes => panic!("expected rows"),
        };
        let ids: Vec<i64> = rows.iter().map(|r| r.sample_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let samples = vec![observed(1, "a", "hk"), observed(2, "b", "HH")];
        let corrections = HashMap::from([correction(2, "kk")]);
        let first = build_display_rows(&samples, &corrections);
        let second = build_display_rows(&samples, &corrections);
        assert_eq!(first, second);
    }

    #[test]
    fn no_samples_yields_the_explicit_empty_state() {
        let view = build_display_rows(&[], &HashMap::new());
        assert_eq!(view, GenotypeView::NoGenotypes);
    }

    #[test]
    fn joined_calls_reconcile_like_split_inputs() {
        let calls = vec![
            SampleCall {
                sample_id: 1,
                file: "progeny_01".to_string(),
                genotype: "lm".to_string(),
                correction: None,
            },
            SampleCall {
                sample_id: 2,
                file: "progeny_02".to_string(),
                genotype: "LL".to_string(),
                correction: Some("ll".to_string()),
            },
        ];
        let view = reconcile_calls(&calls);
        let rows = match view {
            GenotypeView::Rows(rows) => rows,
            GenotypeView::NoGenotypes => panic!("expected rows"),
        };
        assert!(rows[1].corrected);
        assert_eq!(rows[1].genotype, "ll");
    }
}
