//! Marker genotype catalog: which codes a sample can legally carry for
//! each marker segregation type, flattened into a per-code lookup.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The universal "no call" code, legal for every marker type.
pub const NO_CALL: &str = "--";

/// Marker segregation types recognized by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    Lmxll,
    Nnxnp,
    Hkxhk,
    Efxeg,
    Abxcd,
}

impl MarkerType {
    pub const ALL: [MarkerType; 5] = [
        MarkerType::Lmxll,
        MarkerType::Nnxnp,
        MarkerType::Hkxhk,
        MarkerType::Efxeg,
        MarkerType::Abxcd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerType::Lmxll => "lmxll",
            MarkerType::Nnxnp => "nnxnp",
            MarkerType::Hkxhk => "hkxhk",
            MarkerType::Efxeg => "efxeg",
            MarkerType::Abxcd => "abxcd",
        }
    }

    /// Genotype codes a progeny sample can legally carry for this marker
    /// type, in display order. `--` is implied and not listed here.
    pub fn legal_codes(&self) -> &'static [&'static str] {
        match self {
            MarkerType::Lmxll => &["ll", "lm"],
            MarkerType::Nnxnp => &["nn", "np"],
            MarkerType::Hkxhk => &["hh", "hk", "kk"],
            MarkerType::Efxeg => &["ee", "ef", "eg", "fg"],
            MarkerType::Abxcd => &["ac", "ad", "bc", "bd"],
        }
    }

    /// Marker type owning `code`, matched case-insensitively.
    pub fn of_code(code: &str) -> Option<MarkerType> {
        let code = code.trim().to_ascii_lowercase();
        MarkerType::ALL
            .into_iter()
            .find(|marker| marker.legal_codes().contains(&code.as_str()))
    }
}

// Flattened code -> alternatives table, derived once from the marker-type
// lists so the two can never drift apart.
static ALTERNATIVES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for marker in MarkerType::ALL {
        let mut list: Vec<&'static str> = marker.legal_codes().to_vec();
        list.push(NO_CALL);
        for code in marker.legal_codes() {
            table.insert(*code, list.clone());
        }
    }
    table
});

// Every known code in canonical marker-type order, `--` last. Serves both
// the `--` lookup key and any code the catalog does not recognize.
static UNIVERSAL: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut list: Vec<&'static str> = MarkerType::ALL
        .iter()
        .flat_map(|marker| marker.legal_codes().iter().copied())
        .collect();
    list.push(NO_CALL);
    list
});

/// Legal dropdown alternatives for `code`, `--` always last.
///
/// Matching is case-insensitive. Codes outside every marker type,
/// including `--` itself and malformed input, get the universal list so a
/// miscalled genotype can still be corrected to anything.
pub fn alternatives_for(code: &str) -> &'static [&'static str] {
    let key = code.trim().to_ascii_lowercase();
    match ALTERNATIVES.get(key.as_str()) {
        Some(list) => list.as_slice(),
        None => UNIVERSAL.as_slice(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_code_lists_itself_and_ends_with_no_call() {
        for marker in MarkerType::ALL {
            for code in marker.legal_codes() {
                let alternatives = alternatives_for(code);
                assert!(alternatives.contains(code), "{code} missing from its own list");
                assert_eq!(alternatives.last(), Some(&NO_CALL));
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(alternatives_for("LM"), alternatives_for("lm"));
        assert_eq!(alternatives_for(" Hk "), alternatives_for("hk"));
    }

    #[test]
    fn known_codes_resolve_to_their_marker_type() {
        assert_eq!(alternatives_for("lm"), &["ll", "lm", "--"]);
        assert_eq!(alternatives_for("nn"), &["nn", "np", "--"]);
        assert_eq!(alternatives_for("kk"), &["hh", "hk", "kk", "--"]);
        assert_eq!(MarkerType::of_code("FG"), Some(MarkerType::Efxeg));
        assert_eq!(MarkerType::of_code("zz"), None);
    }

    #[test]
    fn unknown_codes_fall_back_to_the_universal_list() {
        let fallback = alternatives_for("zz");
        assert_eq!(
            fallback,
            &["ll", "lm", "nn", "np", "hh", "hk", "kk", "ee", "ef", "eg", "fg", "ac", "ad", "bc", "bd", "--"]
        );
        // `--` and malformed input take the same path, and the list is
        // identical on repeated calls.
        assert_eq!(alternatives_for(NO_CALL), fallback);
        assert_eq!(alternatives_for(""), fallback);
        assert_eq!(alternatives_for("zz"), fallback);
    }
}
