//! Capability sets carried by agent profiles and role requirements.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A named, set-valued capability dimension.
///
/// The first six variants are scored by the requirement fit scorer; they are
/// listed in [`Dimension::FIT`]. `Certifications` only takes part in hard
/// constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Skills,
    Tools,
    Domains,
    Languages,
    Regions,
    ComplianceTags,
    Certifications,
}

impl Dimension {
    /// Dimensions that contribute to the requirement fit score, in evaluation order.
    pub const FIT: [Dimension; 6] = [
        Dimension::Skills,
        Dimension::Tools,
        Dimension::Domains,
        Dimension::Languages,
        Dimension::Regions,
        Dimension::ComplianceTags,
    ];
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Dimension::Skills => "skills",
            Dimension::Tools => "tools",
            Dimension::Domains => "domains",
            Dimension::Languages => "languages",
            Dimension::Regions => "regions",
            Dimension::ComplianceTags => "compliance_tags",
            Dimension::Certifications => "certifications",
        };
        write!(f, "{s}")
    }
}

/// Everything an agent can offer, grouped by dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentCapabilities {
    pub skills: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub domains: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub compliance_tags: BTreeSet<String>,
    pub certifications: BTreeSet<String>,
}

impl AgentCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set held for `dimension`.
    pub fn get(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Skills => &self.skills,
            Dimension::Tools => &self.tools,
            Dimension::Domains => &self.domains,
            Dimension::Languages => &self.languages,
            Dimension::Regions => &self.regions,
            Dimension::ComplianceTags => &self.compliance_tags,
            Dimension::Certifications => &self.certifications,
        }
    }

    fn get_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Skills => &mut self.skills,
            Dimension::Tools => &mut self.tools,
            Dimension::Domains => &mut self.domains,
            Dimension::Languages => &mut self.languages,
            Dimension::Regions => &mut self.regions,
            Dimension::ComplianceTags => &mut self.compliance_tags,
            Dimension::Certifications => &mut self.certifications,
        }
    }

    /// Add `values` to `dimension`, builder style.
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get_mut(dimension)
            .extend(values.into_iter().map(Into::into));
        self
    }
}

/// Collect string-ish values into an ordered set.
pub fn set_of<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}
