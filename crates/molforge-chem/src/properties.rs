//! Physicochemical descriptor estimation.
//!
//! The `PropertyEvaluator` trait is the seam for a real descriptor engine
//! (RDKit behind FFI, a remote service, ...). The built-in
//! `HeuristicEvaluator` uses crude additive fragment contributions so the
//! pipeline runs with no external chemistry toolkit, the same stance the
//! docking step takes toward AutoDock Vina.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use molforge_common::{MolforgeError, Result};

use crate::smiles::{self, AtomTally};

/// The three descriptors the acceptance filter and toxicity classifier use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptors {
    /// Lipophilicity (octanol/water partition estimate).
    pub logp: f64,
    /// Molecular weight in g/mol.
    pub mw: f64,
    /// Topological polar surface area in Å².
    pub tpsa: f64,
}

#[async_trait]
pub trait PropertyEvaluator: Send + Sync {
    /// Compute descriptors for one structure, rounded to 2 decimal places.
    async fn evaluate(&self, smiles: &str) -> Result<Descriptors>;
}

/// Additive fragment-contribution estimator.
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn estimate(tally: &AtomTally) -> Descriptors {
        Descriptors {
            logp: round2(logp(tally)),
            mw: round2(molecular_weight(tally)),
            tpsa: round2(tpsa(tally)),
        }
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyEvaluator for HeuristicEvaluator {
    async fn evaluate(&self, smiles: &str) -> Result<Descriptors> {
        let tally = smiles::tally(smiles)
            .ok_or_else(|| MolforgeError::InvalidStructure(smiles.to_string()))?;
        Ok(Self::estimate(&tally))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Monoisotopic-ish average masses for the organic subset.
fn element_mass(symbol: &str) -> f64 {
    match symbol {
        "H" => 1.008,
        "B" => 10.81,
        "C" => 12.011,
        "N" => 14.007,
        "O" => 15.999,
        "F" => 18.998,
        "Na" => 22.99,
        "Mg" => 24.305,
        "Si" => 28.085,
        "P" => 30.974,
        "S" => 32.06,
        "Cl" => 35.45,
        "K" => 39.098,
        "Ca" => 40.078,
        "Fe" => 55.845,
        "Zn" => 65.38,
        "Se" => 78.971,
        "Br" => 79.904,
        "I" => 126.904,
        // Unknown bracket element: carbon-weight placeholder.
        _ => 12.011,
    }
}

fn molecular_weight(t: &AtomTally) -> f64 {
    let mut mass = f64::from(t.carbons) * element_mass("C")
        + f64::from(t.nitrogens) * element_mass("N")
        + f64::from(t.oxygens) * element_mass("O")
        + f64::from(t.sulfurs) * element_mass("S")
        + f64::from(t.phosphorus) * element_mass("P")
        + f64::from(t.fluorines) * element_mass("F")
        + f64::from(t.chlorines) * element_mass("Cl")
        + f64::from(t.bromines) * element_mass("Br")
        + f64::from(t.iodines) * element_mass("I");
    for other in &t.others {
        mass += element_mass(other);
    }
    mass + f64::from(implicit_hydrogens(t)) * element_mass("H")
}

/// Saturated-backbone hydrogen estimate: start from CnH(2n+2), then subtract
/// two H per ring and per double bond, four per triple bond, one per aromatic
/// atom and per halogen substituent. Exact for simple acyclic/aromatic
/// molecules (ethanol, benzene, pyridine), close enough elsewhere.
fn implicit_hydrogens(t: &AtomTally) -> u32 {
    let base = 2 * t.carbons + 2 + t.nitrogens;
    let sub = 2 * t.ring_closures + 2 * t.double_bonds + 4 * t.triple_bonds
        + t.aromatic_atoms
        + t.halogens();
    base.saturating_sub(sub)
}

/// Crippen-style additive logP.
fn logp(t: &AtomTally) -> f64 {
    let aliphatic_c = t.carbons.saturating_sub(t.aromatic_atoms.min(t.carbons));
    f64::from(aliphatic_c) * 0.5 + f64::from(t.aromatic_atoms) * 0.3
        - f64::from(t.nitrogens) * 0.9
        - f64::from(t.oxygens) * 1.0
        + f64::from(t.sulfurs) * 0.1
        - f64::from(t.phosphorus) * 0.5
        + f64::from(t.fluorines) * 0.2
        + f64::from(t.chlorines) * 0.6
        + f64::from(t.bromines) * 0.9
        + f64::from(t.iodines) * 1.2
}

/// Ertl-style polar surface contributions (N and O dominate).
fn tpsa(t: &AtomTally) -> f64 {
    f64::from(t.oxygens) * 20.23
        + f64::from(t.nitrogens) * 11.68
        + f64::from(t.sulfurs) * 25.30
        + f64::from(t.phosphorus) * 13.59
}
