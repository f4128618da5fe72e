use loam_core::mapping::{
    AttributeDescriptor, AttributeKindDescriptor, AttributeMapping, ColumnSource,
    ElementDescriptor, EntityDescriptor, EntityIdentifierMapping, IdentifierDescriptor,
    MappingModelBuilder, NaturalIdDescriptor, PluralElement,
};
use loam_core::schema::db::JdbcType;

fn basic(name: &str, column: &str, jdbc_type: JdbcType) -> AttributeDescriptor {
    AttributeDescriptor {
        name: name.to_string(),
        nullable: false,
        kind: AttributeKindDescriptor::Basic {
            source: ColumnSource::Column(column.to_string()),
            jdbc_type,
        },
    }
}

fn user_descriptor() -> EntityDescriptor {
    EntityDescriptor {
        name: "User".to_string(),
        table: "users".to_string(),
        identifier: IdentifierDescriptor::Basic {
            attribute: "id".to_string(),
            column: "id".to_string(),
            jdbc_type: JdbcType::BigInt,
        },
        natural_id: Some(NaturalIdDescriptor {
            attributes: vec!["email".to_string()],
            mutable: false,
        }),
        attributes: vec![basic("email", "email", JdbcType::Varchar)],
    }
}

fn order_descriptor() -> EntityDescriptor {
    EntityDescriptor {
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
                name: "customer".to_string(),
                nullable: false,
                kind: AttributeKindDescriptor::EntityRef {
                    target_entity: "User".to_string(),
                    fk_columns: vec!["customer_id".to_string()],
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
    }
}

// ---------------------------------------------------------------------------
// Two-phase resolution
// ---------------------------------------------------------------------------

#[test]
fn entity_ref_resolves_against_later_registration() {
    // `Order.customer` targets `User`, registered afterwards; the second
    // phase sees the full identifier registry so the order must not matter.
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(order_descriptor());
    builder.register_entity(user_descriptor());
    let model = builder.finalize().unwrap();

    let order = model.entity("Order").unwrap();
    let customer = order.find_attribute("customer").unwrap();

    let AttributeMapping::Embedded(customer) = customer else {
        panic!("expected embedded expansion, found {customer:#?}");
    };
    assert_eq!(customer.selectables.len(), 1);

    let fk = customer.selectables.get(0).unwrap();
    assert_eq!(fk.containing_table_expression(), "orders");
    assert_eq!(fk.selection_expression(), "customer_id");
    assert_eq!(fk.jdbc_type(), JdbcType::BigInt);
}

#[test]
fn entity_ref_sub_part_mirrors_target_identifier_attribute() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(user_descriptor());
    builder.register_entity(order_descriptor());
    let model = builder.finalize().unwrap();

    let order = model.entity("Order").unwrap();
    let id = order.find_sub_part("customer.id").unwrap();

    assert_eq!(id.name(), "id");
    assert_eq!(id.navigable_path().full_path(), "Order.customer.id");
}

#[test]
fn plural_key_takes_owner_identifier_types() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(user_descriptor());
    builder.register_entity(order_descriptor());
    let model = builder.finalize().unwrap();

    let order = model.entity("Order").unwrap();
    let AttributeMapping::Plural(tags) = order.find_attribute("tags").unwrap() else {
        panic!("expected plural mapping");
    };

    assert_eq!(tags.collection_table, "order_tags");
    assert_eq!(tags.key.len(), 1);
    assert_eq!(tags.key.get(0).unwrap().jdbc_type(), JdbcType::BigInt);
    assert_eq!(
        tags.key.get(0).unwrap().containing_table_expression(),
        "order_tags"
    );
    assert!(matches!(tags.element, PluralElement::Basic { .. }));
}

#[test]
fn natural_id_resolves_from_attribute_selectables() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(user_descriptor());
    let model = builder.finalize().unwrap();

    let user = model.entity("User").unwrap();
    let natural_id = user.natural_id.as_ref().unwrap();

    assert!(!natural_id.is_mutable());
    assert_eq!(natural_id.entity(), "User");
}

#[test]
fn embedded_attributes_flatten_in_declaration_order() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(EntityDescriptor {
        name: "Venue".to_string(),
        table: "venues".to_string(),
        identifier: IdentifierDescriptor::Basic {
            attribute: "id".to_string(),
            column: "id".to_string(),
            jdbc_type: JdbcType::BigInt,
        },
        natural_id: None,
        attributes: vec![AttributeDescriptor {
            name: "address".to_string(),
            nullable: true,
            kind: AttributeKindDescriptor::Embedded {
                type_name: "Address".to_string(),
                attributes: vec![
                    basic("street", "street", JdbcType::Varchar),
                    basic("city", "city", JdbcType::Varchar),
                ],
            },
        }],
    });
    let model = builder.finalize().unwrap();

    let venue = model.entity("Venue").unwrap();
    let address = venue.find_attribute("address").unwrap();

    let mut columns = vec![];
    let consumed = address.for_each_selectable(0, &mut |position, selectable| {
        columns.push((position, selectable.selection_expression().to_string()));
    });

    assert_eq!(consumed, 2);
    assert_eq!(
        columns,
        [(0, "street".to_string()), (1, "city".to_string())]
    );
    assert_eq!(
        venue.find_sub_part("address.city").unwrap().name(),
        "city"
    );
}

#[test]
fn embedded_identifier_keeps_attribute_order() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(EntityDescriptor {
        name: "OrderLine".to_string(),
        table: "order_lines".to_string(),
        identifier: IdentifierDescriptor::Embedded {
            attributes: vec![
                loam_core::mapping::IdentifierAttributeDescriptor {
                    name: "orderId".to_string(),
                    column: "order_id".to_string(),
                    jdbc_type: JdbcType::BigInt,
                },
                loam_core::mapping::IdentifierAttributeDescriptor {
                    name: "lineNumber".to_string(),
                    column: "line_no".to_string(),
                    jdbc_type: JdbcType::Integer,
                },
            ],
        },
        natural_id: None,
        attributes: vec![],
    });
    let model = builder.finalize().unwrap();

    let line = model.entity("OrderLine").unwrap();
    let EntityIdentifierMapping::Embedded(id) = &line.identifier else {
        panic!("expected embedded identifier");
    };

    assert_eq!(id.attributes[0].name, "orderId");
    assert_eq!(id.attributes[1].name, "lineNumber");
    assert_eq!(line.identifier.jdbc_type_count(), 2);
}

// ---------------------------------------------------------------------------
// Rejected models
// ---------------------------------------------------------------------------

#[test]
fn unknown_entity_ref_target_is_rejected() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(order_descriptor());

    let err = builder.finalize().unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("User"), "{err}");
}

#[test]
fn fk_column_arity_mismatch_is_rejected() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(user_descriptor());
    builder.register_entity(EntityDescriptor {
        name: "Order".to_string(),
        table: "orders".to_string(),
        identifier: IdentifierDescriptor::Basic {
            attribute: "id".to_string(),
            column: "id".to_string(),
            jdbc_type: JdbcType::BigInt,
        },
        natural_id: None,
        attributes: vec![AttributeDescriptor {
            name: "customer".to_string(),
            nullable: false,
            kind: AttributeKindDescriptor::EntityRef {
                target_entity: "User".to_string(),
                fk_columns: vec!["customer_id".to_string(), "customer_ref".to_string()],
            },
        }],
    });

    let err = builder.finalize().unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn self_referencing_embeddable_is_rejected() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(EntityDescriptor {
        name: "Node".to_string(),
        table: "nodes".to_string(),
        identifier: IdentifierDescriptor::Basic {
            attribute: "id".to_string(),
            column: "id".to_string(),
            jdbc_type: JdbcType::BigInt,
        },
        natural_id: None,
        attributes: vec![AttributeDescriptor {
            name: "payload".to_string(),
            nullable: false,
            kind: AttributeKindDescriptor::Embedded {
                type_name: "Payload".to_string(),
                attributes: vec![AttributeDescriptor {
                    name: "nested".to_string(),
                    nullable: false,
                    kind: AttributeKindDescriptor::Embedded {
                        type_name: "Payload".to_string(),
                        attributes: vec![],
                    },
                }],
            },
        }],
    });

    let err = builder.finalize().unwrap_err();
    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("Payload"), "{err}");
}

#[test]
fn duplicate_entity_registration_is_rejected() {
    let mut builder = MappingModelBuilder::new();
    builder.register_entity(user_descriptor());
    builder.register_entity(user_descriptor());

    let err = builder.finalize().unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn natural_id_over_unknown_attribute_is_rejected() {
    let mut builder = MappingModelBuilder::new();
    let mut descriptor = user_descriptor();
    descriptor.natural_id = Some(NaturalIdDescriptor {
        attributes: vec!["nickname".to_string()],
        mutable: false,
    });
    builder.register_entity(descriptor);

    let err = builder.finalize().unwrap_err();
    assert!(err.is_invalid_mapping());
}
