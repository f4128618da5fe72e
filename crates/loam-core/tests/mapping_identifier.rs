use loam_core::mapping::{
    CompositeIdValue, EmbeddedIdentifierMapping, EntityIdentifierMapping,
    IdClassIdentifierMapping, IdentifierAttribute, SelectableMapping,
};
use loam_core::schema::db::JdbcType;
use loam_core::stmt::Value;
use loam_core::NavigablePath;

fn order_line_id() -> EmbeddedIdentifierMapping {
    EmbeddedIdentifierMapping {
        path: NavigablePath::root("OrderLine").append_synthetic("id"),
        attributes: vec![
            IdentifierAttribute {
                name: "orderId".to_string(),
                selectable: SelectableMapping::column("order_lines", "order_id", JdbcType::BigInt),
            },
            IdentifierAttribute {
                name: "lineNumber".to_string(),
                selectable: SelectableMapping::column("order_lines", "line_no", JdbcType::Integer),
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Disassemble / assemble
// ---------------------------------------------------------------------------

#[test]
fn disassemble_yields_declaration_order() {
    let id = order_line_id();
    let value = CompositeIdValue::new(vec![Value::I64(42), Value::I64(3)]);

    let fields = id.disassemble(&value).unwrap();
    assert_eq!(fields, [Value::I64(42), Value::I64(3)]);
}

#[test]
fn assemble_inverts_disassemble() {
    let id = order_line_id();
    let value = CompositeIdValue::new(vec![Value::I64(42), Value::I64(3)]);

    let fields = id.disassemble(&value).unwrap();
    let rebuilt = id.assemble(fields).unwrap();

    assert_eq!(rebuilt, value);
}

#[test]
fn disassemble_rejects_wrong_arity() {
    let id = order_line_id();
    let value = CompositeIdValue::new(vec![Value::I64(42)]);

    let err = id.disassemble(&value).unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn assemble_rejects_wrong_arity() {
    let id = order_line_id();

    let err = id
        .assemble(vec![Value::I64(1), Value::I64(2), Value::I64(3)])
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

// ---------------------------------------------------------------------------
// Flattened enumeration
// ---------------------------------------------------------------------------

#[test]
fn embedded_identifier_enumerates_attributes_in_order() {
    let id = EntityIdentifierMapping::Embedded(order_line_id());

    let mut columns = vec![];
    let consumed = id.for_each_selectable(0, &mut |position, selectable| {
        columns.push((position, selectable.selection_expression().to_string()));
    });

    assert_eq!(consumed, 2);
    assert_eq!(
        columns,
        [(0, "order_id".to_string()), (1, "line_no".to_string())]
    );
    assert_eq!(id.jdbc_type_count(), 2);
}

// ---------------------------------------------------------------------------
// ID-class correspondence
// ---------------------------------------------------------------------------

#[test]
fn id_class_accepts_matching_attributes() {
    let id = IdClassIdentifierMapping::new(
        "OrderLinePK",
        &["orderId".to_string(), "lineNumber".to_string()],
        order_line_id(),
    )
    .unwrap();

    assert_eq!(id.class_name, "OrderLinePK");
}

#[test]
fn id_class_rejects_arity_mismatch() {
    let err = IdClassIdentifierMapping::new(
        "OrderLinePK",
        &["orderId".to_string()],
        order_line_id(),
    )
    .unwrap_err();

    assert!(err.is_invalid_mapping());
}

#[test]
fn id_class_rejects_name_mismatch() {
    let err = IdClassIdentifierMapping::new(
        "OrderLinePK",
        &["orderId".to_string(), "position".to_string()],
        order_line_id(),
    )
    .unwrap_err();

    assert!(err.is_invalid_mapping());
}
