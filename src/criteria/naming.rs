//! Name and method-shape heuristics shared by the criteria catalogs.

use crate::classification::Role;
use crate::graph::{ElementId, ElementNode, MethodSignature};
use once_cell::sync::Lazy;
use regex::Regex;

static REPOSITORY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Repository|Repositories|Repo|Dao|Store)$").unwrap());
static USE_CASE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(UseCase|UseCases|Facade|Api)$").unwrap());
static GATEWAY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Gateway|Client|Provider|Sender|Notifier)$").unwrap());
static EVENT_PUBLISHER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Publisher|Emitter|EventBus|Dispatcher)$").unwrap());
static DOMAIN_EVENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(Event|Created|Updated|Deleted|Placed|Cancelled|Canceled|Changed|Completed|Registered|Shipped|Paid|Confirmed)$",
    )
    .unwrap()
});
static DOMAIN_SERVICE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Service|Policy|Calculator|Specification|Validator)$").unwrap());
static IDENTIFIER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(Id|ID|Identifier|Key)$").unwrap());

static COMMAND_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(create|update|delete|remove|place|cancel|register|submit|execute|handle|process|approve|reject|add|change|confirm|save|send)",
    )
    .unwrap()
});
static QUERY_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(get|find|list|search|fetch|load|count|query|read|lookup|exists|is|has)").unwrap()
});
static PERSISTENCE_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(save|saveAll|persist|store|insert|update|delete|remove|findBy|findAll|findOne|exists|count)")
        .unwrap()
});

pub fn is_repository_name(name: &str) -> bool {
    REPOSITORY_NAME.is_match(name)
}

pub fn is_use_case_name(name: &str) -> bool {
    USE_CASE_NAME.is_match(name)
}

pub fn is_gateway_name(name: &str) -> bool {
    GATEWAY_NAME.is_match(name)
}

pub fn is_event_publisher_name(name: &str) -> bool {
    EVENT_PUBLISHER_NAME.is_match(name)
}

pub fn is_domain_event_name(name: &str) -> bool {
    DOMAIN_EVENT_NAME.is_match(name)
}

pub fn is_domain_service_name(name: &str) -> bool {
    DOMAIN_SERVICE_NAME.is_match(name)
}

pub fn is_identifier_name(name: &str) -> bool {
    IDENTIFIER_NAME.is_match(name)
}

pub fn is_command_method(method: &MethodSignature) -> bool {
    COMMAND_VERB.is_match(&method.name)
}

pub fn is_query_method(method: &MethodSignature) -> bool {
    !method.is_void() && QUERY_VERB.is_match(&method.name)
}

pub fn is_persistence_method(method: &MethodSignature) -> bool {
    PERSISTENCE_VERB.is_match(&method.name)
}

/// Most methods change state: void returns or command verbs.
pub fn has_command_shape(node: &ElementNode) -> bool {
    let methods = &node.methods;
    if methods.is_empty() {
        return false;
    }
    let commands = methods
        .iter()
        .filter(|m| m.is_void() || is_command_method(m))
        .count();
    commands * 2 > methods.len()
}

/// Every method is a non-void read.
pub fn has_query_shape(node: &ElementNode) -> bool {
    !node.methods.is_empty() && node.methods.iter().all(is_query_method)
}

/// At least two persistence-style methods, one of which writes.
pub fn has_persistence_shape(node: &ElementNode) -> bool {
    let persistence: Vec<&MethodSignature> = node
        .methods
        .iter()
        .filter(|m| is_persistence_method(m))
        .collect();
    let writes = persistence
        .iter()
        .any(|m| m.name.starts_with("save") || m.name.starts_with("persist") || m.name.starts_with("store"));
    persistence.len() >= 2 && writes
}

/// Best outbound kind for an interface from its name and methods.
pub fn infer_outbound_role(node: &ElementNode) -> Role {
    let name = node.simple_name();
    if is_repository_name(name) || has_persistence_shape(node) {
        Role::Repository
    } else if is_event_publisher_name(name)
        || node.methods.iter().any(|m| m.name.starts_with("publish"))
    {
        Role::EventPublisher
    } else if is_gateway_name(name) {
        Role::Gateway
    } else {
        Role::GenericOutbound
    }
}

/// Best inbound kind for an interface from its method shape.
pub fn infer_inbound_role(node: &ElementNode) -> Role {
    if has_query_shape(node) {
        Role::Query
    } else if node.methods.len() == 1 && has_command_shape(node) {
        Role::Command
    } else {
        Role::UseCase
    }
}

pub fn package_has_segment(id: &ElementId, segments: &[&str]) -> bool {
    id.package_segments()
        .any(|segment| segments.contains(&segment.to_lowercase().as_str()))
}
