//! Named criteria profiles.
//!
//! A profile is only a criterion name → priority map. Profiles never change
//! which code runs, only how much each criterion weighs:
//! - **default**: catalog priorities unchanged
//! - **strict**: naming heuristics and weak structural guesses demoted, package criteria off
//! - **annotation-only**: everything but explicit markers off
//! - **repository-aware**: persistence-shaped signatures outrank naming heuristics
//!
//! # Example
//!
//! ```rust
//! use rolemap::config::presets::{CriteriaProfile, ProfileName};
//!
//! let profile = CriteriaProfile::named(ProfileName::RepositoryAware);
//! assert_eq!(profile.priority("boundary.signature.persistence"), Some(82));
//! ```

use crate::classification::DISABLED_PRIORITY;
use crate::criteria;
use crate::errors::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileName {
    #[default]
    Default,
    Strict,
    AnnotationOnly,
    RepositoryAware,
}

impl ProfileName {
    pub const ALL: [ProfileName; 4] = [
        ProfileName::Default,
        ProfileName::Strict,
        ProfileName::AnnotationOnly,
        ProfileName::RepositoryAware,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "default" => Some(ProfileName::Default),
            "strict" => Some(ProfileName::Strict),
            "annotation-only" | "annotations" => Some(ProfileName::AnnotationOnly),
            "repository-aware" => Some(ProfileName::RepositoryAware),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileName::Default => "default",
            ProfileName::Strict => "strict",
            ProfileName::AnnotationOnly => "annotation-only",
            ProfileName::RepositoryAware => "repository-aware",
        }
    }

    pub fn profile(self) -> CriteriaProfile {
        CriteriaProfile::named(self)
    }

    fn priorities(self) -> BTreeMap<String, i32> {
        match self {
            ProfileName::Default => BTreeMap::new(),
            ProfileName::Strict => strict_priorities(),
            ProfileName::AnnotationOnly => criteria::boundary_names()
                .into_iter()
                .chain(criteria::domain_names())
                .filter(|name| !criteria::is_explicit_criterion(name))
                .map(|name| (name, DISABLED_PRIORITY))
                .collect(),
            ProfileName::RepositoryAware => {
                BTreeMap::from([("boundary.signature.persistence".to_string(), 82)])
            }
        }
    }
}

fn strict_priorities() -> BTreeMap<String, i32> {
    let mut priorities: BTreeMap<String, i32> = criteria::boundary_names()
        .into_iter()
        .chain(criteria::domain_names())
        .filter_map(|name| {
            if name.contains(".naming.") {
                Some((name, 40))
            } else if name.contains(".package.") {
                Some((name, DISABLED_PRIORITY))
            } else {
                None
            }
        })
        .collect();
    priorities.insert("domain.structural.repositoryDominant".to_string(), 60);
    priorities.insert("domain.structural.hasIdentity".to_string(), 60);
    priorities
}

impl std::fmt::Display for ProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProfileName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProfileName::parse(s).ok_or_else(|| ConfigurationError::UnknownProfile(s.to_string()))
    }
}

/// A named criterion → priority map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriteriaProfile {
    pub name: String,
    pub priorities: BTreeMap<String, i32>,
}

/// On-disk shape: `priorities: { criterion.name: 75 }`.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    priorities: Option<BTreeMap<String, serde_yaml::Value>>,
}

impl CriteriaProfile {
    pub fn named(name: ProfileName) -> Self {
        Self {
            name: name.as_str().to_string(),
            priorities: name.priorities(),
        }
    }

    /// Parses a YAML profile. Fractional priorities are truncated toward zero.
    pub fn from_yaml_str(name: impl Into<String>, contents: &str) -> Result<Self> {
        let name = name.into();
        let document: Option<ProfileDocument> = serde_yaml::from_str(contents)
            .map_err(|e| ConfigurationError::parse(format!("profile '{}'", name), e))?;

        let mut priorities = BTreeMap::new();
        for (criterion, value) in document.and_then(|d| d.priorities).unwrap_or_default() {
            let priority = yaml_priority(&value).ok_or_else(|| {
                ConfigurationError::parse(
                    format!("profile '{}'", name),
                    format!("priority for '{}' is not a number", criterion),
                )
            })?;
            priorities.insert(criterion, priority);
        }

        log::debug!("Loaded profile '{}' with {} priorities", name, priorities.len());
        Ok(Self { name, priorities })
    }

    /// Reads a YAML profile; the file stem becomes the profile name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = super::loader::read_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        Self::from_yaml_str(name, &contents)
    }

    pub fn priority(&self, criterion: &str) -> Option<i32> {
        self.priorities.get(criterion).copied()
    }

    /// Layers `overrides` on top; later entries win.
    pub fn merged_with(&self, overrides: &BTreeMap<String, i32>) -> BTreeMap<String, i32> {
        let mut merged = self.priorities.clone();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        merged
    }
}

fn yaml_priority(value: &serde_yaml::Value) -> Option<i32> {
    match value {
        serde_yaml::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|v| i32::try_from(v).ok()),
        _ => None,
    }
}
