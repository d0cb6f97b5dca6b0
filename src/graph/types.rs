use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Stable qualified identifier of a classifiable element, e.g. `com.acme.order.Order`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a dotted qualified name; nothing is validated
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self(qualified_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment (`Order` for `com.acme.order.Order`)
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dotted segment, empty for the default package
    pub fn package(&self) -> &str {
        self.0.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package().split('.').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source-level form of an element.
///
/// Interfaces are the boundary candidates and go through the boundary
/// stage. Every other form is classified in the domain stage; records are
/// treated as immutable whatever their shape flags say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementForm {
    Class,
    /// Immutable data carrier
    Record,
    Enum,
    Interface,
}

impl ElementForm {
    pub fn is_interface(self) -> bool {
        matches!(self, ElementForm::Interface)
    }
}

/// Structural shape flags reported by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralShape {
    /// Has an identity-like field (`id`, `orderId`, ...)
    pub has_identity_field: bool,
    /// All fields final / record-like
    pub is_immutable: bool,
    /// Exactly one field wrapping a primitive or another value
    pub is_single_field_wrapper: bool,
    /// Plain enumerable constant set
    pub is_enumeration: bool,
    /// Holds mutable non-dependency state
    pub has_mutable_state: bool,
}

impl StructuralShape {
    /// No mutable state, no identity, not an enumeration
    pub fn is_stateless(&self) -> bool {
        !self.has_mutable_state && !self.has_identity_field && !self.is_enumeration
    }
}

/// Explicit architectural marker attached directly to an element.
///
/// Frontends map their annotation vocabulary (jMolecules, custom
/// annotations, doc tags) onto this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Marker {
    AggregateRoot,
    Entity,
    ValueObject,
    Identity,
    DomainEvent,
    DomainService,
    ApplicationService,
    Repository,
    PrimaryPort,
    SecondaryPort,
    Infrastructure,
    DrivingAdapter,
}

impl Marker {
    /// Every marker in declaration order
    pub const ALL: [Marker; 12] = [
        Marker::AggregateRoot,
        Marker::Entity,
        Marker::ValueObject,
        Marker::Identity,
        Marker::DomainEvent,
        Marker::DomainService,
        Marker::ApplicationService,
        Marker::Repository,
        Marker::PrimaryPort,
        Marker::SecondaryPort,
        Marker::Infrastructure,
        Marker::DrivingAdapter,
    ];

    /// Canonical name without the leading `@`
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::AggregateRoot => "AggregateRoot",
            Marker::Entity => "Entity",
            Marker::ValueObject => "ValueObject",
            Marker::Identity => "Identity",
            Marker::DomainEvent => "DomainEvent",
            Marker::DomainService => "DomainService",
            Marker::ApplicationService => "ApplicationService",
            Marker::Repository => "Repository",
            Marker::PrimaryPort => "PrimaryPort",
            Marker::SecondaryPort => "SecondaryPort",
            Marker::Infrastructure => "Infrastructure",
            Marker::DrivingAdapter => "DrivingAdapter",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl FromStr for Marker {
    type Err = String;

    /// Accepts canonical names case-insensitively, with or without a leading
    /// `@`, and with `_`/`-` separators (`primary_port`, `@PrimaryPort`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_start_matches('@')
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        Marker::ALL
            .into_iter()
            .find(|m| m.as_str().to_lowercase() == normalized)
            .or(match normalized.as_str() {
                "identifier" | "id" => Some(Marker::Identity),
                "aggregate" => Some(Marker::AggregateRoot),
                "usecase" => Some(Marker::PrimaryPort),
                "adapter" => Some(Marker::Infrastructure),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown marker: '{}'", s))
    }
}

/// Kind of a directed relationship between two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// `from` implements interface `to`
    Implements,
    /// `from` holds a field of type `to`
    ReferencesField,
    /// `from` holds a collection whose element type is `to`
    ReferencesCollectionElement,
    /// `from` extends `to`
    Extends,
    /// `from` appears in a method signature of `to`
    UsedInMethodSignature,
}

impl RelationshipKind {
    /// Field-like dependency (single or collection)
    pub fn is_dependency(self) -> bool {
        matches!(
            self,
            RelationshipKind::ReferencesField | RelationshipKind::ReferencesCollectionElement
        )
    }
}

/// A directed edge `from -> to` of one [`RelationshipKind`].
///
/// Relationships naming an element missing from the graph are dropped when
/// the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub from: ElementId,
    pub to: ElementId,
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(from: impl Into<ElementId>, to: impl Into<ElementId>, kind: RelationshipKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// A declared method, used by signature-shape criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    /// Qualified parameter type names
    pub parameters: Vec<String>,
    /// Qualified return type name, `None` for void
    pub returns: Option<String>,
    /// Return type is a collection of `returns`
    #[serde(default)]
    pub returns_collection: bool,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, parameters: &[&str], returns: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            returns: returns.map(str::to_string),
            returns_collection: false,
        }
    }

    /// Marks the return type as a collection of `returns`
    pub fn returning_collection(mut self) -> Self {
        self.returns_collection = true;
        self
    }

    pub fn is_void(&self) -> bool {
        self.returns.is_none()
    }
}

/// One classifiable unit: a type or an interface.
///
/// Built with [`ElementNode::new`] and the `with_*` methods:
///
/// ```rust
/// use rolemap::graph::{ElementForm, ElementNode, Marker, MethodSignature};
///
/// let repository = ElementNode::new("shop.OrderRepository", ElementForm::Interface)
///     .with_marker(Marker::Repository)
///     .with_method(MethodSignature::new("save", &["shop.Order"], None));
/// assert!(repository.is_interface());
/// assert_eq!(repository.simple_name(), "OrderRepository");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: ElementId,
    pub form: ElementForm,
    #[serde(default)]
    pub shape: StructuralShape,
    #[serde(default)]
    pub markers: BTreeSet<Marker>,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    /// Referenced types that live outside the graph (framework types)
    #[serde(default)]
    pub external_dependencies: Vec<String>,
}

impl ElementNode {
    pub fn new(id: impl Into<ElementId>, form: ElementForm) -> Self {
        Self {
            id: id.into(),
            form,
            shape: StructuralShape::default(),
            markers: BTreeSet::new(),
            methods: Vec::new(),
            external_dependencies: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: StructuralShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_external_dependency(mut self, qualified_name: impl Into<String>) -> Self {
        self.external_dependencies.push(qualified_name.into());
        self
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_interface(&self) -> bool {
        self.form.is_interface()
    }

    pub fn simple_name(&self) -> &str {
        self.id.simple_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_parts() {
        let id = ElementId::new("com.acme.order.Order");
        assert_eq!(id.simple_name(), "Order");
        assert_eq!(id.package(), "com.acme.order");
        assert_eq!(
            id.package_segments().collect::<Vec<_>>(),
            vec!["com", "acme", "order"]
        );
    }

    #[test]
    fn test_element_id_default_package() {
        let id = ElementId::new("Order");
        assert_eq!(id.simple_name(), "Order");
        assert_eq!(id.package(), "");
        assert_eq!(id.package_segments().count(), 0);
    }

    #[test]
    fn test_marker_parsing_aliases() {
        assert_eq!("@AggregateRoot".parse::<Marker>(), Ok(Marker::AggregateRoot));
        assert_eq!("primary_port".parse::<Marker>(), Ok(Marker::PrimaryPort));
        assert_eq!("value-object".parse::<Marker>(), Ok(Marker::ValueObject));
        assert_eq!("identifier".parse::<Marker>(), Ok(Marker::Identity));
        assert!("Controller".parse::<Marker>().is_err());
    }

    #[test]
    fn test_stateless_shape() {
        assert!(StructuralShape::default().is_stateless());
        let stateful = StructuralShape {
            has_mutable_state: true,
            ..Default::default()
        };
        assert!(!stateful.is_stateless());
    }
}
