//! Type graph fixtures shared by the integration tests.

use rolemap::graph::{
    ElementForm, ElementNode, Marker, MethodSignature, RelationshipKind, StructuralShape, TypeGraph,
};

pub use rolemap::fixtures::{entity_shape, synthetic_graph};

pub fn class(id: &str) -> ElementNode {
    ElementNode::new(id, ElementForm::Class)
}

pub fn interface(id: &str) -> ElementNode {
    ElementNode::new(id, ElementForm::Interface)
}

pub fn value_shape() -> StructuralShape {
    StructuralShape {
        is_immutable: true,
        ..Default::default()
    }
}

/// `Orders`: plural-named, persistence-shaped, used only by a pivot, never implemented.
pub fn unmarked_orders_graph() -> TypeGraph {
    TypeGraph::builder()
        .element(class("shop.order.Order").with_shape(entity_shape()))
        .element(
            interface("shop.order.Orders")
                .with_method(MethodSignature::new("save", &["shop.order.Order"], None))
                .with_method(MethodSignature::new(
                    "findById",
                    &["java.lang.String"],
                    Some("shop.order.Order"),
                ))
                .with_method(MethodSignature::new("delete", &["shop.order.Order"], None)),
        )
        .element(class("shop.order.OrderService"))
        .relationship("shop.order.OrderService", "shop.order.Orders", RelationshipKind::ReferencesField)
        .relationship("shop.order.Order", "shop.order.Orders", RelationshipKind::UsedInMethodSignature)
        .build()
}

/// Small but complete hexagon: one inbound port, two outbound ports (one with
/// an infrastructure adapter), an application service, an aggregate with an
/// embedded value and an identifier, an event and an enumeration.
pub fn hexagon_graph() -> TypeGraph {
    TypeGraph::builder()
        .element(
            interface("shop.order.PlaceOrderUseCase")
                .with_method(MethodSignature::new("placeOrder", &["shop.order.Money"], Some("shop.order.OrderId")))
                .with_method(MethodSignature::new("cancelOrder", &["shop.order.OrderId"], None)),
        )
        .element(
            interface("shop.order.OrderRepository")
                .with_method(MethodSignature::new("save", &["shop.order.Order"], None))
                .with_method(MethodSignature::new(
                    "findById",
                    &["shop.order.OrderId"],
                    Some("shop.order.Order"),
                )),
        )
        .element(
            interface("shop.order.PaymentGateway")
                .with_method(MethodSignature::new("charge", &["shop.order.Money"], Some("java.lang.Boolean"))),
        )
        .element(class("shop.order.OrderApplicationService"))
        .element(
            class("shop.infrastructure.StripePaymentGateway")
                .with_external_dependency("com.stripe.StripeClient"),
        )
        .element(class("shop.order.Order").with_shape(entity_shape()))
        .element(
            ElementNode::new("shop.order.OrderId", ElementForm::Record).with_shape(StructuralShape {
                is_immutable: true,
                is_single_field_wrapper: true,
                ..Default::default()
            }),
        )
        .element(ElementNode::new("shop.order.Money", ElementForm::Record).with_shape(value_shape()))
        .element(ElementNode::new("shop.order.OrderPlaced", ElementForm::Record).with_shape(value_shape()))
        .element(
            ElementNode::new("shop.order.OrderStatus", ElementForm::Enum).with_shape(StructuralShape {
                is_enumeration: true,
                ..Default::default()
            }),
        )
        .element(class("shop.order.Customer").with_marker(Marker::Entity).with_shape(entity_shape()))
        .relationship(
            "shop.order.OrderApplicationService",
            "shop.order.PlaceOrderUseCase",
            RelationshipKind::Implements,
        )
        .relationship(
            "shop.order.OrderApplicationService",
            "shop.order.OrderRepository",
            RelationshipKind::ReferencesField,
        )
        .relationship(
            "shop.order.OrderApplicationService",
            "shop.order.PaymentGateway",
            RelationshipKind::ReferencesField,
        )
        .relationship(
            "shop.infrastructure.StripePaymentGateway",
            "shop.order.PaymentGateway",
            RelationshipKind::Implements,
        )
        .relationship("shop.order.Order", "shop.order.OrderId", RelationshipKind::ReferencesField)
        .relationship("shop.order.Order", "shop.order.Money", RelationshipKind::ReferencesField)
        .relationship("shop.order.Order", "shop.order.OrderStatus", RelationshipKind::ReferencesField)
        .relationship("shop.order.Order", "shop.order.OrderRepository", RelationshipKind::UsedInMethodSignature)
        .build()
}

/// `BillingService` holds an unnamed `Notifications` interface. With
/// `held_by_invoice`, a domain entity holds a field of the service, which
/// keeps the service out of the pivot set.
pub fn notifications_graph(held_by_invoice: bool) -> TypeGraph {
    let builder = TypeGraph::builder()
        .element(interface("shop.billing.Notifications"))
        .element(class("shop.billing.BillingService"))
        .relationship(
            "shop.billing.BillingService",
            "shop.billing.Notifications",
            RelationshipKind::ReferencesField,
        );
    if held_by_invoice {
        builder
            .element(class("shop.billing.Invoice").with_shape(entity_shape()))
            .relationship(
                "shop.billing.Invoice",
                "shop.billing.BillingService",
                RelationshipKind::ReferencesField,
            )
            .build()
    } else {
        builder.build()
    }
}

/// One of each non-application orchestration actor:
/// a stateful saga, an inbound-only handler and an outbound-only poller.
pub fn orchestration_graph() -> TypeGraph {
    TypeGraph::builder()
        .element(interface("shop.shipping.ShipOrderUseCase"))
        .element(interface("shop.shipping.TrackShipmentUseCase"))
        .element(interface("shop.shipping.CarrierGateway"))
        .element(class("shop.shipping.ShippingSaga").with_shape(StructuralShape {
            has_mutable_state: true,
            ..Default::default()
        }))
        .element(class("shop.shipping.TrackShipmentHandler"))
        .element(class("shop.shipping.TrackingPoller"))
        .relationship(
            "shop.shipping.ShippingSaga",
            "shop.shipping.ShipOrderUseCase",
            RelationshipKind::Implements,
        )
        .relationship(
            "shop.shipping.ShippingSaga",
            "shop.shipping.CarrierGateway",
            RelationshipKind::ReferencesField,
        )
        .relationship(
            "shop.shipping.TrackShipmentHandler",
            "shop.shipping.TrackShipmentUseCase",
            RelationshipKind::Implements,
        )
        .relationship(
            "shop.shipping.TrackingPoller",
            "shop.shipping.CarrierGateway",
            RelationshipKind::ReferencesField,
        )
        .build()
}

/// `OrderRepository` saves `Order` but looks up `Invoice` by id.
pub fn inconsistent_repository_graph() -> TypeGraph {
    TypeGraph::builder()
        .element(class("shop.order.Order").with_shape(entity_shape()))
        .element(class("shop.order.Invoice").with_shape(entity_shape()))
        .element(
            interface("shop.order.OrderRepository")
                .with_method(MethodSignature::new("save", &["shop.order.Order"], None))
                .with_method(MethodSignature::new(
                    "findById",
                    &["java.lang.String"],
                    Some("shop.order.Invoice"),
                )),
        )
        .relationship("shop.order.Order", "shop.order.OrderRepository", RelationshipKind::UsedInMethodSignature)
        .relationship("shop.order.Invoice", "shop.order.OrderRepository", RelationshipKind::UsedInMethodSignature)
        .build()
}

/// Types no criterion places: a record named like a value and a class named
/// like an entity.
pub fn leftover_types_graph() -> TypeGraph {
    TypeGraph::builder()
        .element(ElementNode::new("shop.billing.TaxAmount", ElementForm::Record))
        .element(class("shop.billing.PaymentEntity"))
        .build()
}
