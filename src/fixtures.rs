//! Graph builders shared by the benchmarks and the integration tests.

use crate::graph::{
    ElementForm, ElementNode, MethodSignature, Relationship, RelationshipKind, StructuralShape,
    TypeGraph,
};

/// Identity plus mutable state: what an entity looks like to the frontend.
pub fn entity_shape() -> StructuralShape {
    StructuralShape {
        has_identity_field: true,
        has_mutable_state: true,
        ..Default::default()
    }
}

/// `modules` independent copies of aggregate + repository + use case + service.
pub fn synthetic_graph(modules: usize) -> TypeGraph {
    let mut builder = TypeGraph::builder();
    for i in 0..modules {
        let aggregate = format!("app.m{i}.Thing{i}");
        let repository = format!("app.m{i}.Thing{i}Repository");
        let use_case = format!("app.m{i}.ManageThing{i}UseCase");
        let service = format!("app.m{i}.Thing{i}Service");

        builder.add_element(ElementNode::new(aggregate.as_str(), ElementForm::Class).with_shape(entity_shape()));
        builder.add_element(
            ElementNode::new(repository.as_str(), ElementForm::Interface)
                .with_method(MethodSignature::new("save", &[aggregate.as_str()], None))
                .with_method(MethodSignature::new("findById", &["java.lang.Long"], Some(aggregate.as_str()))),
        );
        builder.add_element(ElementNode::new(use_case.as_str(), ElementForm::Interface));
        builder.add_element(ElementNode::new(service.as_str(), ElementForm::Class));

        builder.add_relationship(Relationship::new(
            service.as_str(),
            repository.as_str(),
            RelationshipKind::ReferencesField,
        ));
        builder.add_relationship(Relationship::new(
            service.as_str(),
            use_case.as_str(),
            RelationshipKind::Implements,
        ));
        builder.add_relationship(Relationship::new(
            aggregate.as_str(),
            repository.as_str(),
            RelationshipKind::UsedInMethodSignature,
        ));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_graph_size() {
        let graph = synthetic_graph(3);
        assert_eq!(graph.len(), 12);
        assert_eq!(graph.interfaces().count(), 6);
        assert_eq!(graph.relationship_count(), 9);
    }
}
