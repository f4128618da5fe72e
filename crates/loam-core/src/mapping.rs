mod basic;
pub use basic::BasicAttributeMapping;

mod builder;
pub use builder::{MappingModel, MappingModelBuilder};

mod descriptor;
pub use descriptor::{
    AttributeDescriptor, AttributeKindDescriptor, ColumnSource, ElementDescriptor,
    EntityDescriptor, IdentifierAttributeDescriptor, IdentifierDescriptor, NaturalIdDescriptor,
};

mod discriminated;
pub use discriminated::DiscriminatedAssociationMapping;

mod embedded;
pub use embedded::EmbeddedAttributeMapping;

mod identifier;
pub use identifier::{
    BasicIdentifierMapping, CompositeIdValue, EmbeddedIdentifierMapping,
    EntityIdentifierMapping, IdClassIdentifierMapping, IdentifierAttribute,
};

mod natural_id;
pub use natural_id::{CompoundNaturalIdMapping, NaturalIdMapping, SimpleNaturalIdMapping};

mod plural;
pub use plural::{PluralAttributeMapping, PluralElement};

mod selectable;
pub use selectable::{SelectableMapping, SelectableMappings};

use crate::results::{DomainResult, DomainResultCreationState, Fetch, FetchTiming};
use crate::schema::db::JdbcType;
use crate::stmt::TableGroup;
use crate::{Error, NavigablePath, Result};

/// One mapped attribute of a managed type.
///
/// Constructed once during mapping-model finalization, immutable
/// thereafter, and shared by every translation that touches the entity.
/// A closed sum type: shared operations match exhaustively.
#[derive(Debug, Clone)]
pub enum AttributeMapping {
    Basic(BasicAttributeMapping),
    Embedded(EmbeddedAttributeMapping),
    Plural(PluralAttributeMapping),
    Discriminated(DiscriminatedAssociationMapping),
}

impl AttributeMapping {
    pub fn name(&self) -> &str {
        match self {
            Self::Basic(m) => &m.name,
            Self::Embedded(m) => &m.name,
            Self::Plural(m) => &m.name,
            Self::Discriminated(m) => &m.name,
        }
    }

    pub fn navigable_path(&self) -> &NavigablePath {
        match self {
            Self::Basic(m) => &m.path,
            Self::Embedded(m) => &m.path,
            Self::Plural(m) => &m.path,
            Self::Discriminated(m) => &m.path,
        }
    }

    pub fn containing_table_expression(&self) -> &str {
        match self {
            Self::Basic(m) => m.selectable.containing_table_expression(),
            Self::Embedded(m) => &m.containing_table,
            Self::Plural(m) => &m.collection_table,
            Self::Discriminated(m) => m.discriminator.containing_table_expression(),
        }
    }

    /// Enumerates the flattened JDBC positions this part occupies, starting
    /// at `offset`; returns the number of positions consumed. Composite
    /// parts span several positions, so callers must never assume one
    /// attribute maps to one column.
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
            Self::Embedded(m) => m.selectables.for_each_selectable(offset, f),
            Self::Plural(m) => m.element_selectables().for_each_selectable(offset, f),
            Self::Discriminated(m) => {
                // Discriminator first, then the key.
                f(offset, &m.discriminator);
                f(offset + 1, &m.key);
                2
            }
        }
    }

    pub fn for_each_jdbc_type(
        &self,
        offset: usize,
        f: &mut impl FnMut(usize, JdbcType),
    ) -> usize {
        self.for_each_selectable(offset, &mut |position, selectable| {
            f(position, selectable.jdbc_type())
        })
    }

    /// The number of JDBC positions this part occupies.
    pub fn jdbc_type_count(&self) -> usize {
        self.for_each_selectable(0, &mut |_, _| {})
    }

    /// Resolves a direct sub-part by name. Only composite parts have
    /// sub-parts.
    pub fn find_sub_part(&self, name: &str) -> Option<&AttributeMapping> {
        match self {
            Self::Embedded(m) => m.attributes.iter().find(|a| a.name() == name),
            Self::Plural(m) => match &m.element {
                PluralElement::Entity { attributes, .. } => {
                    attributes.iter().find(|a| a.name() == name)
                }
                PluralElement::Basic { .. } => None,
            },
            _ => None,
        }
    }

    pub fn visit_sub_parts(&self, f: &mut impl FnMut(&AttributeMapping)) {
        match self {
            Self::Embedded(m) => {
                for attribute in &m.attributes {
                    f(attribute);
                }
            }
            Self::Plural(m) => {
                if let PluralElement::Entity { attributes, .. } = &m.element {
                    for attribute in attributes {
                        f(attribute);
                    }
                }
            }
            _ => {}
        }
    }

    /// Produces a fetch of this part under `parent_path`.
    ///
    /// Pure with respect to the mapping itself; table groups may be
    /// registered into the creation state's from-clause registry.
    pub fn generate_fetch(
        &self,
        parent_path: &NavigablePath,
        timing: FetchTiming,
        selected: bool,
        state: &mut DomainResultCreationState,
    ) -> Result<Fetch> {
        match self {
            Self::Plural(m) => m.generate_fetch(parent_path, timing, selected, state),
            _ => {
                let qualifier = parent_qualifier(parent_path, state)?;
                let mut selections = vec![];
                if selected {
                    self.for_each_selectable(0, &mut |_, selectable| {
                        selections.push(selectable.column_reference(&qualifier));
                    });
                }
                let selections = selections
                    .into_iter()
                    .map(|expr| state.resolve_selection(expr))
                    .collect();

                Ok(Fetch {
                    fetched_path: parent_path.append(self.name()),
                    timing,
                    selected,
                    selections,
                })
            }
        }
    }

    /// Produces a top-level (non-fetch) selection of this part.
    pub fn create_domain_result(
        &self,
        parent_path: &NavigablePath,
        result_variable: Option<String>,
        state: &mut DomainResultCreationState,
    ) -> Result<DomainResult> {
        let qualifier = parent_qualifier(parent_path, state)?;
        let mut expressions = vec![];
        self.for_each_selectable(0, &mut |_, selectable| {
            expressions.push(selectable.column_reference(&qualifier));
        });
        let selections = expressions
            .into_iter()
            .map(|expr| state.resolve_selection(expr))
            .collect();

        Ok(DomainResult {
            path: parent_path.append(self.name()),
            result_variable,
            selections,
        })
    }
}

/// Resolves the identification variable of the table group registered at
/// `path`. The group must already exist; fetch generation never creates the
/// owner's group.
fn parent_qualifier(path: &NavigablePath, state: &mut DomainResultCreationState) -> Result<String> {
    let group = state
        .from_clause_ref()
        .find_table_group(path)
        .ok_or_else(|| {
            Error::invalid_mapping(format!("no table group registered for path `{path}`"))
        })?;
    Ok(group.primary.identification_variable.clone())
}

/// The finished mapping of one entity: identifier, optional natural id and
/// attributes, all resolved against the physical schema.
#[derive(Debug)]
pub struct EntityMapping {
    pub entity_name: String,
    pub path: NavigablePath,
    pub table: String,
    pub identifier: EntityIdentifierMapping,
    pub natural_id: Option<NaturalIdMapping>,
    pub attributes: Vec<AttributeMapping>,
}

impl EntityMapping {
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeMapping> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Resolves a dot-path such as `address.city` through embedded
    /// attributes.
    pub fn find_sub_part(&self, path: &str) -> Option<&AttributeMapping> {
        let mut segments = path.split('.');
        let mut current = self.find_attribute(segments.next()?)?;
        for segment in segments {
            current = current.find_sub_part(segment)?;
        }
        Some(current)
    }

    /// Registers the root table group for this entity and selects its
    /// identifier plus every non-plural attribute.
    pub fn create_root_domain_result(
        &self,
        result_variable: Option<String>,
        state: &mut DomainResultCreationState,
    ) -> Result<DomainResult> {
        let reference = state.from_clause().new_table_reference(self.table.clone());
        let qualifier = reference.identification_variable.clone();
        state
            .from_clause()
            .register_table_group(TableGroup::new(self.path.clone(), reference));

        let mut expressions = vec![];
        self.identifier
            .for_each_selectable(0, &mut |_, selectable| {
                expressions.push(selectable.column_reference(&qualifier));
            });
        for attribute in &self.attributes {
            if matches!(attribute, AttributeMapping::Plural(_)) {
                continue;
            }
            attribute.for_each_selectable(0, &mut |_, selectable| {
                expressions.push(selectable.column_reference(&qualifier));
            });
        }

        let selections = expressions
            .into_iter()
            .map(|expr| state.resolve_selection(expr))
            .collect();

        Ok(DomainResult {
            path: self.path.clone(),
            result_variable,
            selections,
        })
    }
}
