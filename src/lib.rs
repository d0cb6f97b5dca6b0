//! Deterministic, explainable architectural role classification.
//!
//! `rolemap` takes an immutable [`graph::TypeGraph`] produced by a source
//! frontend and assigns each element an architectural role (use case,
//! repository, aggregate root, value object, ...). Every decision carries the
//! criterion that produced it, its confidence, and the conflicts it overrode.
//!
//! Classification runs in two stages. Interfaces are classified as inbound or
//! outbound ports first; domain types are classified second, with the final
//! port roles available to their criteria. Domain types nothing could place
//! get a weighted second look, and the finished model is checked for
//! [`anomalies`].
//!
//! ```rust
//! use rolemap::graph::{ElementForm, ElementNode, RelationshipKind, TypeGraph};
//! use rolemap::{Classifier, Role, Status};
//!
//! let graph = TypeGraph::builder()
//!     .element(ElementNode::new("shop.order.OrderRepository", ElementForm::Interface))
//!     .element(ElementNode::new("shop.order.PlaceOrderService", ElementForm::Class))
//!     .relationship(
//!         "shop.order.PlaceOrderService",
//!         "shop.order.OrderRepository",
//!         RelationshipKind::ReferencesField,
//!     )
//!     .build();
//!
//! let results = Classifier::default().classify(&graph);
//! let repository = results.get(&"shop.order.OrderRepository".into()).unwrap();
//! assert_eq!(repository.winning_role, Some(Role::Repository));
//! assert_ne!(repository.status, Status::Unclassified);
//! ```

pub mod anomalies;
pub mod classification;
pub mod config;
pub mod criteria;
pub mod errors;
#[doc(hidden)]
pub mod fixtures;
pub mod graph;
pub mod pipeline;
pub mod semantic;

pub use crate::anomalies::{Anomaly, AnomalyCode};
pub use crate::classification::{
    ClassificationResults, ClassificationSummary, Confidence, Contribution, Criterion,
    DecisionPolicy, Outcome, Role, Status,
};
pub use crate::config::{ClassificationConfig, CriteriaProfile, ProfileName, ValidatedConfig};
pub use crate::errors::{ConfigurationError, CriterionFault, Result};
pub use crate::graph::{ElementId, ElementNode, TypeGraph};
pub use crate::pipeline::Classifier;
