use super::{
    AttributeDescriptor, AttributeKindDescriptor, AttributeMapping, BasicAttributeMapping,
    BasicIdentifierMapping, ColumnSource, CompoundNaturalIdMapping,
    DiscriminatedAssociationMapping, ElementDescriptor, EmbeddedAttributeMapping,
    EmbeddedIdentifierMapping, EntityDescriptor, EntityIdentifierMapping, EntityMapping,
    IdClassIdentifierMapping, IdentifierAttribute, IdentifierDescriptor, NaturalIdMapping,
    PluralAttributeMapping, PluralElement, SelectableMapping, SelectableMappings,
    SimpleNaturalIdMapping,
};
use crate::schema::db::JdbcType;
use crate::{Error, NavigablePath, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The finished, immutable mapping model shared by all translations.
#[derive(Debug)]
pub struct MappingModel {
    entities: IndexMap<String, Arc<EntityMapping>>,
}

impl MappingModel {
    pub fn entity(&self, name: &str) -> Option<&Arc<EntityMapping>> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Arc<EntityMapping>> {
        self.entities.values()
    }
}

/// Two-phase mapping-model finalization.
///
/// Phase one registers every entity and resolves its identifier mapping.
/// Phase two runs the queued attribute completions, which may consult any
/// entity's identifier (including entities registered later) — this is what
/// lets interdependent FK attributes resolve. After `finalize` returns, the
/// model is immutable.
#[derive(Default)]
pub struct MappingModelBuilder {
    descriptors: Vec<EntityDescriptor>,
}

type IdentifierRegistry = IndexMap<String, EntityIdentifierMapping>;

type AttributeCompletion = Box<dyn FnOnce(&IdentifierRegistry) -> Result<AttributeMapping>>;

impl MappingModelBuilder {
    pub fn new() -> MappingModelBuilder {
        MappingModelBuilder::default()
    }

    pub fn register_entity(&mut self, descriptor: EntityDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn finalize(self) -> Result<MappingModel> {
        // Phase one: identifiers.
        let mut identifiers = IdentifierRegistry::new();
        for descriptor in &self.descriptors {
            if identifiers.contains_key(&descriptor.name) {
                return Err(Error::invalid_mapping(format!(
                    "entity `{}` registered twice",
                    descriptor.name
                )));
            }
            let path = NavigablePath::root(&descriptor.name);
            let mapping = resolve_identifier(descriptor, &path)?;
            identifiers.insert(descriptor.name.clone(), mapping);
        }

        // Queue one completion per attribute, then run them all with the
        // full identifier registry in view.
        let mut entities = IndexMap::new();
        for descriptor in self.descriptors {
            let path = NavigablePath::root(&descriptor.name);

            let mut completions: Vec<AttributeCompletion> = vec![];
            for attribute in descriptor.attributes.clone() {
                let entity_name = descriptor.name.clone();
                let table = descriptor.table.clone();
                let attribute_path = path.append(&attribute.name);
                completions.push(Box::new(move |ids| {
                    let mut stack = vec![];
                    resolve_attribute(&entity_name, &table, attribute_path, &attribute, ids, &mut stack)
                }));
            }

            let mut attributes = vec![];
            for completion in completions {
                attributes.push(completion(&identifiers)?);
            }

            let identifier = identifiers[&descriptor.name].clone();
            let natural_id = resolve_natural_id(&descriptor, &attributes)?;

            entities.insert(
                descriptor.name.clone(),
                Arc::new(EntityMapping {
                    entity_name: descriptor.name,
                    path,
                    table: descriptor.table,
                    identifier,
                    natural_id,
                    attributes,
                }),
            );
        }

        Ok(MappingModel { entities })
    }
}

fn resolve_identifier(
    descriptor: &EntityDescriptor,
    entity_path: &NavigablePath,
) -> Result<EntityIdentifierMapping> {
    match &descriptor.identifier {
        IdentifierDescriptor::Basic {
            attribute,
            column,
            jdbc_type,
        } => Ok(EntityIdentifierMapping::Basic(BasicIdentifierMapping {
            attribute: attribute.clone(),
            path: entity_path.append(attribute),
            selectable: SelectableMapping::column(&descriptor.table, column, *jdbc_type),
        })),
        IdentifierDescriptor::Embedded { attributes } => Ok(EntityIdentifierMapping::Embedded(
            resolve_embedded_identifier(descriptor, entity_path, attributes),
        )),
        IdentifierDescriptor::IdClass {
            class_name,
            attributes,
        } => {
            let virtual_mapping = resolve_embedded_identifier(descriptor, entity_path, attributes);
            let class_attributes: Vec<String> =
                attributes.iter().map(|a| a.name.clone()).collect();
            Ok(EntityIdentifierMapping::IdClass(
                IdClassIdentifierMapping::new(class_name, &class_attributes, virtual_mapping)?,
            ))
        }
    }
}

fn resolve_embedded_identifier(
    descriptor: &EntityDescriptor,
    entity_path: &NavigablePath,
    attributes: &[super::IdentifierAttributeDescriptor],
) -> EmbeddedIdentifierMapping {
    EmbeddedIdentifierMapping {
        path: entity_path.append_synthetic("id"),
        attributes: attributes
            .iter()
            .map(|a| IdentifierAttribute {
                name: a.name.clone(),
                selectable: SelectableMapping::column(&descriptor.table, &a.column, a.jdbc_type),
            })
            .collect(),
    }
}

fn resolve_attribute(
    entity: &str,
    table: &str,
    path: NavigablePath,
    descriptor: &AttributeDescriptor,
    ids: &IdentifierRegistry,
    embeddable_stack: &mut Vec<String>,
) -> Result<AttributeMapping> {
    match &descriptor.kind {
        AttributeKindDescriptor::Basic { source, jdbc_type } => {
            let selectable = match source {
                ColumnSource::Column(name) => SelectableMapping::column(table, name, *jdbc_type),
                ColumnSource::Formula(fragment) => {
                    SelectableMapping::formula(table, fragment, *jdbc_type)
                }
            };
            Ok(AttributeMapping::Basic(BasicAttributeMapping {
                name: descriptor.name.clone(),
                path,
                nullable: descriptor.nullable,
                selectable,
            }))
        }

        AttributeKindDescriptor::Embedded {
            type_name,
            attributes,
        } => {
            // Composite types cannot self-reference; the expansion must
            // terminate.
            if embeddable_stack.contains(type_name) {
                return Err(Error::invalid_mapping(format!(
                    "embeddable `{type_name}` recursively contains itself"
                )));
            }
            embeddable_stack.push(type_name.clone());

            let mut sub_mappings = vec![];
            for sub in attributes {
                let sub_path = path.append(&sub.name);
                sub_mappings.push(resolve_attribute(
                    entity,
                    table,
                    sub_path,
                    sub,
                    ids,
                    embeddable_stack,
                )?);
            }
            embeddable_stack.pop();

            let selectables = flatten_selectables(&sub_mappings);
            Ok(AttributeMapping::Embedded(EmbeddedAttributeMapping {
                name: descriptor.name.clone(),
                path,
                nullable: descriptor.nullable,
                containing_table: table.to_string(),
                attributes: sub_mappings,
                selectables,
            }))
        }

        AttributeKindDescriptor::EntityRef {
            target_entity,
            fk_columns,
        } => {
            let target = ids.get(target_entity).ok_or_else(|| {
                Error::invalid_mapping(format!(
                    "attribute `{entity}.{}` references unknown entity `{target_entity}`",
                    descriptor.name
                ))
            })?;
            resolve_entity_ref(entity, table, path, descriptor, target, fk_columns)
        }

        AttributeKindDescriptor::Plural {
            collection_table,
            key_columns,
            element,
        } => {
            let owner_key = ids[entity].selectables();
            if key_columns.len() != owner_key.len() {
                return Err(Error::invalid_mapping(format!(
                    "collection `{entity}.{}` declares {} key columns, owner identifier has {}",
                    descriptor.name,
                    key_columns.len(),
                    owner_key.len()
                )));
            }
            let key = SelectableMappings::from_vec(
                key_columns
                    .iter()
                    .zip(owner_key.iter())
                    .map(|(column, owner_selectable)| {
                        SelectableMapping::column(
                            collection_table,
                            column,
                            owner_selectable.jdbc_type(),
                        )
                    })
                    .collect(),
            );

            let element = resolve_element(entity, descriptor, collection_table, element, ids)?;

            Ok(AttributeMapping::Plural(PluralAttributeMapping {
                name: descriptor.name.clone(),
                path,
                collection_table: collection_table.clone(),
                key,
                owner_key,
                element,
            }))
        }

        AttributeKindDescriptor::Discriminated {
            discriminator_column,
            key_column,
            key_jdbc_type,
        } => Ok(AttributeMapping::Discriminated(
            DiscriminatedAssociationMapping {
                name: descriptor.name.clone(),
                path,
                nullable: descriptor.nullable,
                discriminator: SelectableMapping::column(
                    table,
                    discriminator_column,
                    JdbcType::Varchar,
                ),
                key: SelectableMapping::column(table, key_column, *key_jdbc_type),
            },
        )),
    }
}

/// Expands a to-one reference into an embedded mapping mirroring the target
/// identifier's attributes, FK columns paired positionally.
fn resolve_entity_ref(
    entity: &str,
    table: &str,
    path: NavigablePath,
    descriptor: &AttributeDescriptor,
    target: &EntityIdentifierMapping,
    fk_columns: &[String],
) -> Result<AttributeMapping> {
    let target_key = target.selectables();
    if fk_columns.len() != target_key.len() {
        return Err(Error::invalid_mapping(format!(
            "attribute `{entity}.{}` declares {} FK columns, target identifier has {}",
            descriptor.name,
            fk_columns.len(),
            target_key.len()
        )));
    }

    let mut id_attribute_names = vec![];
    match target {
        EntityIdentifierMapping::Basic(m) => id_attribute_names.push(m.attribute.clone()),
        EntityIdentifierMapping::Embedded(m) => {
            id_attribute_names.extend(m.attributes.iter().map(|a| a.name.clone()))
        }
        EntityIdentifierMapping::IdClass(m) => id_attribute_names.extend(
            m.virtual_mapping
                .attributes
                .iter()
                .map(|a| a.name.clone()),
        ),
    }

    let attributes: Vec<AttributeMapping> = fk_columns
        .iter()
        .zip(target_key.iter())
        .zip(id_attribute_names)
        .map(|((column, target_selectable), id_name)| {
            AttributeMapping::Basic(BasicAttributeMapping {
                name: id_name.clone(),
                path: path.append(&id_name),
                nullable: descriptor.nullable,
                selectable: SelectableMapping::column(
                    table,
                    column,
                    target_selectable.jdbc_type(),
                ),
            })
        })
        .collect();

    let selectables = flatten_selectables(&attributes);
    Ok(AttributeMapping::Embedded(EmbeddedAttributeMapping {
        name: descriptor.name.clone(),
        path,
        nullable: descriptor.nullable,
        containing_table: table.to_string(),
        attributes,
        selectables,
    }))
}

fn resolve_element(
    entity: &str,
    descriptor: &AttributeDescriptor,
    collection_table: &str,
    element: &ElementDescriptor,
    ids: &IdentifierRegistry,
) -> Result<PluralElement> {
    match element {
        ElementDescriptor::Basic { column, jdbc_type } => Ok(PluralElement::Basic {
            selectable: SelectableMapping::column(collection_table, column, *jdbc_type),
        }),
        ElementDescriptor::Entity {
            target_entity,
            fk_columns,
        } => {
            let target = ids.get(target_entity).ok_or_else(|| {
                Error::invalid_mapping(format!(
                    "collection `{entity}.{}` element references unknown entity `{target_entity}`",
                    descriptor.name
                ))
            })?;
            let target_key = target.selectables();
            if fk_columns.len() != target_key.len() {
                return Err(Error::invalid_mapping(format!(
                    "collection `{entity}.{}` element declares {} FK columns, target identifier has {}",
                    descriptor.name,
                    fk_columns.len(),
                    target_key.len()
                )));
            }
            let fk = SelectableMappings::from_vec(
                fk_columns
                    .iter()
                    .zip(target_key.iter())
                    .map(|(column, target_selectable)| {
                        SelectableMapping::column(
                            collection_table,
                            column,
                            target_selectable.jdbc_type(),
                        )
                    })
                    .collect(),
            );
            Ok(PluralElement::Entity {
                target_entity: target_entity.clone(),
                fk,
                attributes: vec![],
            })
        }
    }
}

fn resolve_natural_id(
    descriptor: &EntityDescriptor,
    attributes: &[AttributeMapping],
) -> Result<Option<NaturalIdMapping>> {
    let Some(natural_id) = &descriptor.natural_id else {
        return Ok(None);
    };
    if natural_id.attributes.is_empty() {
        return Err(Error::invalid_mapping(format!(
            "entity `{}` declares an empty natural id",
            descriptor.name
        )));
    }

    let mut selectables = vec![];
    for name in &natural_id.attributes {
        let attribute = attributes
            .iter()
            .find(|a| a.name() == name.as_str())
            .ok_or_else(|| {
                Error::invalid_mapping(format!(
                    "natural id of `{}` references unknown attribute `{name}`",
                    descriptor.name
                ))
            })?;
        attribute.for_each_selectable(0, &mut |_, selectable| {
            selectables.push(selectable.clone());
        });
    }
    let selectables = SelectableMappings::from_vec(selectables);

    let mapping = if natural_id.attributes.len() == 1 {
        NaturalIdMapping::Simple(SimpleNaturalIdMapping {
            entity: descriptor.name.clone(),
            attribute: natural_id.attributes[0].clone(),
            mutable: natural_id.mutable,
            selectables,
        })
    } else {
        NaturalIdMapping::Compound(CompoundNaturalIdMapping {
            entity: descriptor.name.clone(),
            attributes: natural_id.attributes.clone(),
            mutable: natural_id.mutable,
            selectables,
        })
    };

    Ok(Some(mapping))
}

fn flatten_selectables(attributes: &[AttributeMapping]) -> SelectableMappings {
    let mut flat = vec![];
    for attribute in attributes {
        attribute.for_each_selectable(0, &mut |_, selectable| {
            flat.push(selectable.clone());
        });
    }
    SelectableMappings::from_vec(flat)
}
