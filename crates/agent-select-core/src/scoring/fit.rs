//! Requirement fit: mean coverage over the dimensions a requirement specifies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capability::{AgentCapabilities, Dimension};
use crate::requirement::RoleRequirement;

/// Coverage of one requested dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionFit {
    pub dimension: Dimension,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    /// `|matched| / |requested|`
    pub coverage: f64,
}

/// Fit of one candidate against one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Mean coverage in [0, 1]; 1.0 when no dimension is requested.
    pub score: f64,
    /// One entry per requested dimension, in [`Dimension::FIT`] order.
    pub dimensions: Vec<DimensionFit>,
    pub rationale: String,
}

impl FitResult {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionFit> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

/// Coverage of `requested` by `held`. `None` when nothing is requested.
pub fn coverage(
    dimension: Dimension,
    requested: &BTreeSet<String>,
    held: &BTreeSet<String>,
) -> Option<DimensionFit> {
    if requested.is_empty() {
        return None;
    }
    let (matched, missing): (BTreeSet<String>, BTreeSet<String>) = requested
        .iter()
        .cloned()
        .partition(|item| held.contains(item));
    let coverage = matched.len() as f64 / requested.len() as f64;
    Some(DimensionFit {
        dimension,
        matched,
        missing,
        coverage,
    })
}

/// Score `capabilities` against every fit dimension of `requirement`.
pub fn score_fit(requirement: &RoleRequirement, capabilities: &AgentCapabilities) -> FitResult {
    let dimensions: Vec<DimensionFit> = Dimension::FIT
        .iter()
        .filter_map(|&dimension| {
            coverage(
                dimension,
                requirement.preference(dimension),
                capabilities.get(dimension),
            )
        })
        .collect();

    let score = if dimensions.is_empty() {
        1.0
    } else {
        dimensions.iter().map(|d| d.coverage).sum::<f64>() / dimensions.len() as f64
    };

    let rationale = render_rationale(&dimensions);
    FitResult {
        score,
        dimensions,
        rationale,
    }
}

fn render_rationale(dimensions: &[DimensionFit]) -> String {
    if dimensions.is_empty() {
        return "no preference expressed".to_string();
    }
    dimensions
        .iter()
        .map(|d| {
            let requested = d.matched.len() + d.missing.len();
            let mut clause = format!("{} {}/{}", d.dimension, d.matched.len(), requested);
            if !d.missing.is_empty() {
                let missing: Vec<&str> = d.missing.iter().map(String::as_str).collect();
                clause.push_str(&format!(" (missing: {})", missing.join(", ")));
            }
            clause
        })
        .collect::<Vec<_>>()
        .join("; ")
}
