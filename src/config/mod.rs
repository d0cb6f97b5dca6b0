//! Classification configuration.
//!
//! [`ClassificationConfig`] is what users write (TOML); [`ValidatedConfig`] is
//! what the classifier accepts. Named profiles live in [`presets`]; YAML
//! profile files load through [`CriteriaProfile::from_path`].

mod core;
pub mod loader;
pub mod presets;
pub mod validation;

pub use self::core::{
    default_detect_anomalies, default_expand_pivots, default_infrastructure_prefixes,
    default_min_priority, default_parallel, default_secondary_classification,
    default_secondary_min_score, ClassificationConfig, ValidatedConfig,
};
pub use loader::{load_config, parse_config};
pub use presets::{CriteriaProfile, ProfileName};
