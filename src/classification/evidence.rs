use crate::graph::ElementId;
use serde::Serialize;
use std::fmt;

/// What kind of observation backs a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceKind {
    Marker,
    Naming,
    Structure,
    Relationship,
    Package,
    Signature,
    Configuration,
}

/// One observation recorded by a criterion, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    pub kind: EvidenceKind,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<ElementId>,
}

impl Evidence {
    pub fn new(kind: EvidenceKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            related: Vec::new(),
        }
    }

    pub fn marker(description: impl Into<String>) -> Self {
        Self::new(EvidenceKind::Marker, description)
    }

    pub fn naming(description: impl Into<String>) -> Self {
        Self::new(EvidenceKind::Naming, description)
    }

    pub fn structure(description: impl Into<String>) -> Self {
        Self::new(EvidenceKind::Structure, description)
    }

    pub fn relationship(description: impl Into<String>) -> Self {
        Self::new(EvidenceKind::Relationship, description)
    }

    pub fn with_related<I: IntoIterator<Item = ElementId>>(mut self, related: I) -> Self {
        self.related.extend(related);
        self
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.description)?;
        if !self.related.is_empty() {
            let related: Vec<&str> = self.related.iter().map(ElementId::as_str).collect();
            write!(f, " ({})", related.join(", "))?;
        }
        Ok(())
    }
}
