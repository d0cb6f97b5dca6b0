//! Type graph model consumed by the classification engine.
//!
//! The graph is produced by an external source frontend and handed to the
//! engine as an immutable snapshot. This module only defines the model and
//! read-only queries over it; it never parses source text.

mod operations;
mod types;

pub use operations::{TypeGraph, TypeGraphBuilder};
pub use types::{
    ElementForm, ElementId, ElementNode, Marker, MethodSignature, Relationship, RelationshipKind,
    StructuralShape,
};
