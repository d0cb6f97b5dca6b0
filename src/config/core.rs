use super::presets::{CriteriaProfile, ProfileName};
use super::validation;
use crate::classification::secondary::DEFAULT_SECONDARY_MIN_SCORE;
use crate::classification::{Role, DEFAULT_PRIORITY_FLOOR};
use crate::errors::Result;
use crate::graph::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn default_min_priority() -> i32 {
    DEFAULT_PRIORITY_FLOOR
}

pub fn default_parallel() -> bool {
    true
}

pub fn default_expand_pivots() -> bool {
    true
}

pub fn default_secondary_classification() -> bool {
    true
}

pub fn default_secondary_min_score() -> u32 {
    DEFAULT_SECONDARY_MIN_SCORE
}

pub fn default_detect_anomalies() -> bool {
    true
}

/// Framework types whose presence marks an element as infrastructure.
pub fn default_infrastructure_prefixes() -> Vec<String> {
    [
        "org.springframework.jdbc.core.",
        "org.springframework.data.jpa.repository.",
        "org.springframework.data.mongodb.core.MongoTemplate",
        "org.springframework.data.mongodb.repository.",
        "org.springframework.data.redis.core.RedisTemplate",
        "jakarta.persistence.EntityManager",
        "javax.persistence.EntityManager",
        "org.springframework.web.client.RestTemplate",
        "org.springframework.web.reactive.function.client.WebClient",
        "feign.",
        "org.springframework.kafka.core.KafkaTemplate",
        "org.springframework.amqp.rabbit.core.RabbitTemplate",
        "org.springframework.jms.core.JmsTemplate",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// User-facing classification settings, as read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub profile: ProfileName,

    /// Criterion name → priority, applied on top of the profile
    #[serde(default)]
    pub priority_overrides: BTreeMap<String, i32>,

    /// Qualified name → role name; always wins
    #[serde(default)]
    pub explicit: BTreeMap<String, String>,

    /// Glob patterns over qualified names
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_min_priority")]
    pub min_priority: i32,

    #[serde(default = "default_parallel")]
    pub parallel: bool,

    #[serde(default = "default_expand_pivots")]
    pub expand_pivots: bool,

    #[serde(default = "default_infrastructure_prefixes")]
    pub infrastructure_prefixes: Vec<String>,

    /// Rescore elements the criteria left unclassified by weighted name and form signals
    #[serde(default = "default_secondary_classification")]
    pub secondary_classification: bool,

    #[serde(default = "default_secondary_min_score")]
    pub secondary_min_score: u32,

    #[serde(default = "default_detect_anomalies")]
    pub detect_anomalies: bool,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            profile: ProfileName::default(),
            priority_overrides: BTreeMap::new(),
            explicit: BTreeMap::new(),
            exclude: Vec::new(),
            min_priority: default_min_priority(),
            parallel: default_parallel(),
            expand_pivots: default_expand_pivots(),
            infrastructure_prefixes: default_infrastructure_prefixes(),
            secondary_classification: default_secondary_classification(),
            secondary_min_score: default_secondary_min_score(),
            detect_anomalies: default_detect_anomalies(),
        }
    }
}

impl ClassificationConfig {
    pub fn with_profile(mut self, profile: ProfileName) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_override(mut self, criterion: impl Into<String>, priority: i32) -> Self {
        self.priority_overrides.insert(criterion.into(), priority);
        self
    }

    pub fn with_explicit(mut self, element: impl Into<String>, role: Role) -> Self {
        self.explicit.insert(element.into(), role.as_str().to_string());
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validates against the named built-in profile.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        self.validate_with_profile(self.profile.profile())
    }

    /// Validates against an externally loaded profile instead of the named one.
    pub fn validate_with_profile(&self, profile: CriteriaProfile) -> Result<ValidatedConfig> {
        validation::validate_config(self, profile)
    }
}

/// Configuration that passed validation; the only form the classifier accepts.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub(crate) profile: CriteriaProfile,
    pub(crate) priorities: BTreeMap<String, i32>,
    pub(crate) explicit: BTreeMap<ElementId, Role>,
    pub(crate) exclude: Vec<glob::Pattern>,
    pub(crate) min_priority: i32,
    pub(crate) parallel: bool,
    pub(crate) expand_pivots: bool,
    pub(crate) infrastructure_prefixes: Vec<String>,
    pub(crate) secondary_min_score: Option<u32>,
    pub(crate) detect_anomalies: bool,
}

impl ValidatedConfig {
    pub fn profile_name(&self) -> &str {
        &self.profile.name
    }

    /// Profile priorities with config overrides applied
    pub fn priorities(&self) -> &BTreeMap<String, i32> {
        &self.priorities
    }

    pub fn explicit(&self) -> &BTreeMap<ElementId, Role> {
        &self.explicit
    }

    pub fn min_priority(&self) -> i32 {
        self.min_priority
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn expand_pivots(&self) -> bool {
        self.expand_pivots
    }

    pub fn infrastructure_prefixes(&self) -> &[String] {
        &self.infrastructure_prefixes
    }

    /// Threshold of the weighted fallback, `None` when it is switched off
    pub fn secondary_min_score(&self) -> Option<u32> {
        self.secondary_min_score
    }

    pub fn detect_anomalies(&self) -> bool {
        self.detect_anomalies
    }

    pub fn is_excluded(&self, id: &ElementId) -> bool {
        self.exclude.iter().any(|p| p.matches(id.as_str()))
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        // Built-in defaults always validate
        ValidatedConfig {
            profile: CriteriaProfile::named(ProfileName::Default),
            priorities: BTreeMap::new(),
            explicit: BTreeMap::new(),
            exclude: Vec::new(),
            min_priority: default_min_priority(),
            parallel: default_parallel(),
            expand_pivots: default_expand_pivots(),
            infrastructure_prefixes: default_infrastructure_prefixes(),
            secondary_min_score: Some(default_secondary_min_score()),
            detect_anomalies: default_detect_anomalies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassificationConfig::default();
        assert_eq!(config.profile, ProfileName::Default);
        assert_eq!(config.min_priority, 70);
        assert!(config.parallel);
        assert!(config.expand_pivots);
        assert!(!config.infrastructure_prefixes.is_empty());
        assert_eq!(config.secondary_min_score, 7);
        assert!(config.secondary_classification && config.detect_anomalies);
    }

    #[test]
    fn test_disabled_fallback_has_no_threshold() {
        let config = ClassificationConfig {
            secondary_classification: false,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap().secondary_min_score(), None);
        assert_eq!(
            ClassificationConfig::default().validate().unwrap().secondary_min_score(),
            Some(7)
        );
    }

    #[test]
    fn test_exclude_matching() {
        let validated = ClassificationConfig::default()
            .with_exclude("com.acme.generated.*")
            .validate()
            .unwrap();
        assert!(validated.is_excluded(&"com.acme.generated.OrderDto".into()));
        assert!(!validated.is_excluded(&"com.acme.order.Order".into()));
    }

    #[test]
    fn test_overrides_layer_on_profile() {
        let validated = ClassificationConfig::default()
            .with_profile(ProfileName::Strict)
            .with_override("domain.naming.domainEvent", 71)
            .validate()
            .unwrap();
        assert_eq!(validated.profile_name(), "strict");
        assert_eq!(validated.priorities().get("domain.naming.domainEvent"), Some(&71));
        assert_eq!(
            validated.priorities().get("domain.structural.repositoryDominant"),
            Some(&60)
        );
    }
}
