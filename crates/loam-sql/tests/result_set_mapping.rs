use loam_core::mapping::{
    AttributeDescriptor, AttributeKindDescriptor, ColumnSource, ElementDescriptor,
    EntityDescriptor, IdentifierDescriptor, MappingModel, MappingModelBuilder,
};
use loam_core::schema::db::JdbcType;
use loam_sql::results::{
    PropertyResult, ResolutionContext, ResultDescriptor, ResultSetMappingDescriptor,
    ReturnMemento,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn order_model() -> MappingModel {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(EntityDescriptor {
        name: "Order".to_string(),
        table: "orders".to_string(),
        identifier: IdentifierDescriptor::Basic {
            attribute: "id".to_string(),
            column: "id".to_string(),
            jdbc_type: JdbcType::BigInt,
        },
        natural_id: None,
        attributes: vec![
            AttributeDescriptor {
                name: "total".to_string(),
                nullable: false,
                kind: AttributeKindDescriptor::Basic {
                    source: ColumnSource::Column("total".to_string()),
                    jdbc_type: JdbcType::Decimal,
                },
            },
            AttributeDescriptor {
                name: "tags".to_string(),
                nullable: false,
                kind: AttributeKindDescriptor::Plural {
                    collection_table: "order_tags".to_string(),
                    key_columns: vec!["order_id".to_string()],
                    element: ElementDescriptor::Basic {
                        column: "tag".to_string(),
                        jdbc_type: JdbcType::Varchar,
                    },
                },
            },
        ],
    });
    builder.finalize().unwrap()
}

fn entity_return(alias: &str) -> ResultDescriptor {
    ResultDescriptor::Entity {
        alias: Some(alias.to_string()),
        entity: "Order".to_string(),
        discriminator_column: None,
        property_results: vec![],
    }
}

fn join_return(alias: &str, key: &str) -> ResultDescriptor {
    ResultDescriptor::JoinReturn {
        alias: alias.to_string(),
        key: key.to_string(),
        property_results: vec![PropertyResult {
            name: "element".to_string(),
            columns: vec!["tag".to_string()],
        }],
    }
}

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

#[test]
fn resolve_is_memoized() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();

    let cx = ResolutionContext::new(&model);
    let first = descriptor.resolve(&cx).unwrap();
    let second = descriptor.resolve(&cx).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.name(), "orders");
}

#[test]
fn add_result_after_resolve_is_rejected() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor.resolve(&ResolutionContext::new(&model)).unwrap();

    let err = descriptor
        .add_result(ResultDescriptor::Scalar {
            column: "cnt".to_string(),
            jdbc_type: Some(JdbcType::BigInt),
        })
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

// ---------------------------------------------------------------------------
// Return resolution
// ---------------------------------------------------------------------------

#[test]
fn entity_scalar_and_join_returns_resolve_in_order() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders_with_tags");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor
        .add_result(ResultDescriptor::Scalar {
            column: "cnt".to_string(),
            jdbc_type: Some(JdbcType::BigInt),
        })
        .unwrap();
    descriptor.add_result(join_return("t", "o.tags")).unwrap();

    let memento = descriptor.resolve(&ResolutionContext::new(&model)).unwrap();
    assert_eq!(memento.returns().len(), 3);

    match &memento.returns()[0] {
        ReturnMemento::Entity { alias, entity, .. } => {
            assert_eq!(alias, "o");
            assert_eq!(entity, "Order");
        }
        other => panic!("expected entity return, found {other:?}"),
    }
    match &memento.returns()[1] {
        ReturnMemento::Scalar { column, jdbc_type } => {
            assert_eq!(column, "cnt");
            assert_eq!(*jdbc_type, Some(JdbcType::BigInt));
        }
        other => panic!("expected scalar return, found {other:?}"),
    }
    match &memento.returns()[2] {
        ReturnMemento::Join {
            alias,
            owner_alias,
            property_path,
            columns,
            ..
        } => {
            assert_eq!(alias, "t");
            assert_eq!(owner_alias, "o");
            assert_eq!(property_path, "tags");
            assert_eq!(columns, &vec!["tag".to_string()]);
        }
        other => panic!("expected join return, found {other:?}"),
    }
}

#[test]
fn entity_return_requires_an_alias() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor
        .add_result(ResultDescriptor::Entity {
            alias: None,
            entity: "Order".to_string(),
            discriminator_column: None,
            property_results: vec![],
        })
        .unwrap();

    let err = descriptor
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("requires an alias"));
}

#[test]
fn discriminator_column_on_undiscriminated_entity_is_rejected() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor
        .add_result(ResultDescriptor::Entity {
            alias: Some("o".to_string()),
            entity: "Order".to_string(),
            discriminator_column: Some("order_type".to_string()),
            property_results: vec![],
        })
        .unwrap();

    let err = descriptor
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("is not discriminated"));
}

#[test]
fn unknown_entity_is_rejected() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor
        .add_result(ResultDescriptor::Entity {
            alias: Some("i".to_string()),
            entity: "Invoice".to_string(),
            discriminator_column: None,
            property_results: vec![],
        })
        .unwrap();

    let err = descriptor
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn unresolvable_join_owner_is_rejected() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor.add_result(join_return("t", "x.tags")).unwrap();

    let err = descriptor
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err
        .to_string()
        .contains("could not locate join-return owner"));
}

#[test]
fn join_over_unknown_property_is_rejected() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor.add_result(join_return("t", "o.lines")).unwrap();

    let err = descriptor
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn collection_role_is_validated() {
    let model = order_model();

    let mut bad_format = ResultSetMappingDescriptor::new("m1");
    bad_format
        .add_result(ResultDescriptor::Collection {
            alias: None,
            role: "tags".to_string(),
        })
        .unwrap();
    assert!(bad_format
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err()
        .is_invalid_mapping());

    let mut unknown_attribute = ResultSetMappingDescriptor::new("m2");
    unknown_attribute
        .add_result(ResultDescriptor::Collection {
            alias: None,
            role: "Order.lines".to_string(),
        })
        .unwrap();
    assert!(unknown_attribute
        .resolve(&ResolutionContext::new(&model))
        .unwrap_err()
        .is_invalid_mapping());

    let mut valid = ResultSetMappingDescriptor::new("m3");
    valid
        .add_result(ResultDescriptor::Collection {
            alias: Some("t".to_string()),
            role: "Order.tags".to_string(),
        })
        .unwrap();
    let memento = valid.resolve(&ResolutionContext::new(&model)).unwrap();
    match &memento.returns()[0] {
        ReturnMemento::Collection {
            role_entity,
            role_attribute,
            ..
        } => {
            assert_eq!(role_entity, "Order");
            assert_eq!(role_attribute, "tags");
        }
        other => panic!("expected collection return, found {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Fetch-join reconciliation
// ---------------------------------------------------------------------------

#[test]
fn apply_fetch_joins_replaces_the_fetch_in_place() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor
        .add_result(ResultDescriptor::Fetch {
            alias: "t".to_string(),
            key: "o.tags".to_string(),
        })
        .unwrap();
    descriptor
        .add_result(ResultDescriptor::Scalar {
            column: "cnt".to_string(),
            jdbc_type: None,
        })
        .unwrap();

    descriptor
        .apply_fetch_joins(vec![join_return("t", "o.tags")])
        .unwrap();

    let memento = descriptor.resolve(&ResolutionContext::new(&model)).unwrap();
    assert_eq!(memento.returns().len(), 3);
    match &memento.returns()[1] {
        ReturnMemento::Join { columns, .. } => {
            assert_eq!(columns, &vec!["tag".to_string()]);
        }
        other => panic!("expected join return at the fetch position, found {other:?}"),
    }
    assert!(matches!(
        &memento.returns()[2],
        ReturnMemento::Scalar { .. }
    ));
}

#[test]
fn apply_fetch_joins_appends_new_keys() {
    let model = order_model();
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor
        .apply_fetch_joins(vec![join_return("t", "o.tags")])
        .unwrap();

    let memento = descriptor.resolve(&ResolutionContext::new(&model)).unwrap();
    assert_eq!(memento.returns().len(), 2);
}

#[test]
fn duplicate_join_mapping_is_rejected() {
    let mut descriptor = ResultSetMappingDescriptor::new("orders");
    descriptor.add_result(entity_return("o")).unwrap();
    descriptor.add_result(join_return("t", "o.tags")).unwrap();

    let err = descriptor
        .apply_fetch_joins(vec![join_return("t2", "o.tags")])
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("duplicate join mapping"));
}
