use super::{SelectableMapping, SelectableMappings};
use crate::schema::db::JdbcType;
use crate::stmt::Value;
use crate::{Error, NavigablePath, Result};

/// How an entity's identifier maps to columns.
///
/// The variants differ in shape, not contract: all expose the flattened
/// selectable enumeration, and the composite variants disassemble and
/// assemble values in attribute-declaration order — the two operations are
/// inverses keyed by that one order.
#[derive(Debug, Clone)]
pub enum EntityIdentifierMapping {
    Basic(BasicIdentifierMapping),
    Embedded(EmbeddedIdentifierMapping),
    IdClass(IdClassIdentifierMapping),
}

#[derive(Debug, Clone)]
pub struct BasicIdentifierMapping {
    pub attribute: String,
    pub path: NavigablePath,
    pub selectable: SelectableMapping,
}

#[derive(Debug, Clone)]
pub struct EmbeddedIdentifierMapping {
    pub path: NavigablePath,
    pub attributes: Vec<IdentifierAttribute>,
}

#[derive(Debug, Clone)]
pub struct IdentifierAttribute {
    pub name: String,
    pub selectable: SelectableMapping,
}

/// An ID-class identifier: a shadow embeddable used only for load-by-id,
/// kept in 1:1 positional correspondence with the virtual identifier
/// embeddable.
#[derive(Debug, Clone)]
pub struct IdClassIdentifierMapping {
    pub class_name: String,
    pub virtual_mapping: EmbeddedIdentifierMapping,
}

/// A composite identifier value, fields in attribute-declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeIdValue {
    fields: Vec<Value>,
}

impl CompositeIdValue {
    pub fn new(fields: Vec<Value>) -> CompositeIdValue {
        CompositeIdValue { fields }
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }
}

impl EntityIdentifierMapping {
    pub fn for_each_selectable(
        &self,
        offset: usize,
        f: &mut impl FnMut(usize, &SelectableMapping),
    ) -> usize {
        match self {
            Self::Basic(m) => {
                f(offset, &m.selectable);
                1
            }
            Self::Embedded(m) => m.for_each_selectable(offset, f),
            Self::IdClass(m) => m.virtual_mapping.for_each_selectable(offset, f),
        }
    }

    pub fn for_each_jdbc_type(&self, offset: usize, f: &mut impl FnMut(usize, JdbcType)) -> usize {
        self.for_each_selectable(offset, &mut |position, selectable| {
            f(position, selectable.jdbc_type())
        })
    }

    pub fn jdbc_type_count(&self) -> usize {
        self.for_each_selectable(0, &mut |_, _| {})
    }

    pub fn selectables(&self) -> SelectableMappings {
        let mut mappings = vec![];
        self.for_each_selectable(0, &mut |_, selectable| {
            mappings.push(selectable.clone());
        });
        SelectableMappings::from_vec(mappings)
    }
}

impl EmbeddedIdentifierMapping {
    pub fn for_each_selectable(
        &self,
        offset: usize,
        f: &mut impl FnMut(usize, &SelectableMapping),
    ) -> usize {
        for (i, attribute) in self.attributes.iter().enumerate() {
            f(offset + i, &attribute.selectable);
        }
        self.attributes.len()
    }

    /// Splits a composite value into per-attribute values, in declaration
    /// order.
    pub fn disassemble(&self, value: &CompositeIdValue) -> Result<Vec<Value>> {
        if value.fields.len() != self.attributes.len() {
            return Err(Error::invalid_mapping(format!(
                "composite identifier value has {} fields, mapping declares {}",
                value.fields.len(),
                self.attributes.len()
            )));
        }
        Ok(value.fields.clone())
    }

    /// Rebuilds the composite value from per-attribute values. Inverse of
    /// [`Self::disassemble`] under the same declaration order.
    pub fn assemble(&self, fields: Vec<Value>) -> Result<CompositeIdValue> {
        if fields.len() != self.attributes.len() {
            return Err(Error::invalid_mapping(format!(
                "composite identifier assembly got {} fields, mapping declares {}",
                fields.len(),
                self.attributes.len()
            )));
        }
        Ok(CompositeIdValue::new(fields))
    }
}

impl IdClassIdentifierMapping {
    /// Validates the 1:1 positional correspondence between the id-class
    /// attributes and the virtual embeddable.
    pub fn new(
        class_name: impl Into<String>,
        class_attributes: &[String],
        virtual_mapping: EmbeddedIdentifierMapping,
    ) -> Result<IdClassIdentifierMapping> {
        let class_name = class_name.into();
        if class_attributes.len() != virtual_mapping.attributes.len() {
            return Err(Error::invalid_mapping(format!(
                "id-class `{class_name}` declares {} attributes, identifier declares {}",
                class_attributes.len(),
                virtual_mapping.attributes.len()
            )));
        }
        for (class_attr, id_attr) in class_attributes.iter().zip(&virtual_mapping.attributes) {
            if class_attr != &id_attr.name {
                return Err(Error::invalid_mapping(format!(
                    "id-class `{class_name}` attribute `{class_attr}` does not correspond to \
                     identifier attribute `{}`",
                    id_attr.name
                )));
            }
        }
        Ok(IdClassIdentifierMapping {
            class_name,
            virtual_mapping,
        })
    }
}
