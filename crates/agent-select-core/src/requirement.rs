//! Role requirements: soft preferences plus mandatory constraints.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capability::Dimension;

/// What a role asks of its candidates.
///
/// Each preference set may be empty, meaning "no preference" on that
/// dimension. `required_tools` and `required_certifications` are hard
/// constraints: a candidate must hold every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleRequirement {
    pub role: String,
    pub skills: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub domains: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub compliance_tags: BTreeSet<String>,
    pub required_tools: BTreeSet<String>,
    pub required_certifications: BTreeSet<String>,
}

impl RoleRequirement {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    /// The preference set for a fit dimension.
    ///
    /// `Certifications` has no preference set and always returns an empty set.
    pub fn preference(&self, dimension: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        match dimension {
            Dimension::Skills => &self.skills,
            Dimension::Tools => &self.tools,
            Dimension::Domains => &self.domains,
            Dimension::Languages => &self.languages,
            Dimension::Regions => &self.regions,
            Dimension::ComplianceTags => &self.compliance_tags,
            Dimension::Certifications => &EMPTY,
        }
    }

    /// Mandatory subsets, paired with the capability dimension they are checked against.
    pub fn mandatory(&self) -> [(Dimension, &BTreeSet<String>); 2] {
        [
            (Dimension::Tools, &self.required_tools),
            (Dimension::Certifications, &self.required_certifications),
        ]
    }

    /// Whether any fit dimension carries a preference.
    pub fn has_preferences(&self) -> bool {
        Dimension::FIT
            .iter()
            .any(|d| !self.preference(*d).is_empty())
    }

    pub fn with_skills<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_tools<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_domains<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_languages<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_regions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_compliance_tags<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_tags
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn require_tools<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tools
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn require_certifications<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_certifications
            .extend(values.into_iter().map(Into::into));
        self
    }
}
