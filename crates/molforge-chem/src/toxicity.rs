//! Rule-based toxicity classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::properties::Descriptors;

/// Serialised forms match the strings the results viewer filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToxicityClass {
    #[serde(rename = "High TPSA")]
    HighPolarity,
    #[serde(rename = "High logP/MW")]
    HighMassOrLipophilicity,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl fmt::Display for ToxicityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToxicityClass::HighPolarity => "High TPSA",
            ToxicityClass::HighMassOrLipophilicity => "High logP/MW",
            ToxicityClass::LowRisk => "Low Risk",
        };
        f.write_str(s)
    }
}

/// Classify in fixed priority order: polarity first, then mass/lipophilicity.
/// All comparisons are strict; a descriptor exactly at a threshold is safe.
pub fn classify(d: &Descriptors) -> ToxicityClass {
    if d.tpsa > 140.0 {
        ToxicityClass::HighPolarity
    } else if d.logp > 5.0 || d.mw > 500.0 {
        ToxicityClass::HighMassOrLipophilicity
    } else {
        ToxicityClass::LowRisk
    }
}
