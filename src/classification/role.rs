use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a boundary interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Invoked by external callers (driving)
    Inbound,
    /// Invoked by the domain to reach infrastructure (driven)
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

/// Which registry a role belongs to.
///
/// Boundary roles are decided in the first stage, domain roles in the second.
/// A registry refuses criteria whose candidate roles come from the other
/// family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleFamily {
    Boundary,
    Domain,
}

impl fmt::Display for RoleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFamily::Boundary => write!(f, "boundary"),
            RoleFamily::Domain => write!(f, "domain"),
        }
    }
}

/// Architectural role an element can be classified as.
///
/// The serialized form is the screaming-snake name (`AGGREGATE_ROOT`), which
/// is also what [`Role::as_str`] returns and what configuration files use.
/// Parsing is lenient; see the [`FromStr`] impl for accepted aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    // Inbound boundaries
    UseCase,
    Command,
    Query,
    // Outbound boundaries
    Repository,
    Gateway,
    EventPublisher,
    GenericOutbound,
    // Domain elements
    AggregateRoot,
    Entity,
    ValueObject,
    Identifier,
    DomainEvent,
    DomainService,
    // Orchestration actors
    ApplicationService,
    InboundOnly,
    OutboundOnly,
    Saga,
}

impl Role {
    /// Every role, boundary roles first
    pub const ALL: [Role; 17] = [
        Role::UseCase,
        Role::Command,
        Role::Query,
        Role::Repository,
        Role::Gateway,
        Role::EventPublisher,
        Role::GenericOutbound,
        Role::AggregateRoot,
        Role::Entity,
        Role::ValueObject,
        Role::Identifier,
        Role::DomainEvent,
        Role::DomainService,
        Role::ApplicationService,
        Role::InboundOnly,
        Role::OutboundOnly,
        Role::Saga,
    ];

    /// Boundary direction, `None` for domain roles
    pub fn direction(self) -> Option<Direction> {
        match self {
            Role::UseCase | Role::Command | Role::Query => Some(Direction::Inbound),
            Role::Repository | Role::Gateway | Role::EventPublisher | Role::GenericOutbound => {
                Some(Direction::Outbound)
            }
            _ => None,
        }
    }

    /// Roles with a direction are boundary roles; everything else is domain.
    pub fn family(self) -> RoleFamily {
        if self.direction().is_some() {
            RoleFamily::Boundary
        } else {
            RoleFamily::Domain
        }
    }

    pub fn is_boundary(self) -> bool {
        self.family() == RoleFamily::Boundary
    }

    /// Application service, saga, inbound-only or outbound-only.
    ///
    /// These are decided from the final port roles around an element rather
    /// than from the element's own shape.
    pub fn is_orchestration_actor(self) -> bool {
        matches!(
            self,
            Role::ApplicationService | Role::InboundOnly | Role::OutboundOnly | Role::Saga
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::UseCase => "USE_CASE",
            Role::Command => "COMMAND",
            Role::Query => "QUERY",
            Role::Repository => "REPOSITORY",
            Role::Gateway => "GATEWAY",
            Role::EventPublisher => "EVENT_PUBLISHER",
            Role::GenericOutbound => "GENERIC_OUTBOUND",
            Role::AggregateRoot => "AGGREGATE_ROOT",
            Role::Entity => "ENTITY",
            Role::ValueObject => "VALUE_OBJECT",
            Role::Identifier => "IDENTIFIER",
            Role::DomainEvent => "DOMAIN_EVENT",
            Role::DomainService => "DOMAIN_SERVICE",
            Role::ApplicationService => "APPLICATION_SERVICE",
            Role::InboundOnly => "INBOUND_ONLY",
            Role::OutboundOnly => "OUTBOUND_ONLY",
            Role::Saga => "SAGA",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts canonical names in any case with `_`, `-` or space separators,
    /// plus the legacy port aliases (`DRIVING_PORT`, `DRIVEN_PORT`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        if let Some(role) = Role::ALL.into_iter().find(|r| r.as_str() == normalized) {
            return Ok(role);
        }
        match normalized.as_str() {
            "DRIVING_PORT" | "PRIMARY_PORT" => Ok(Role::UseCase),
            "DRIVEN_PORT" | "SECONDARY_PORT" => Ok(Role::GenericOutbound),
            "AGGREGATE" => Ok(Role::AggregateRoot),
            "VALUE" => Ok(Role::ValueObject),
            "IDENTITY" => Ok(Role::Identifier),
            "SERVICE" => Ok(Role::DomainService),
            _ => Err(format!("Unknown role: '{}'", s)),
        }
    }
}
