use loam_core::mapping::MappingModel;
use loam_core::schema::db::JdbcType;
use loam_core::{Error, NavigablePath, Result};

use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};

/// Lookup surface the descriptors resolve against.
pub struct ResolutionContext<'a> {
    model: &'a MappingModel,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(model: &'a MappingModel) -> ResolutionContext<'a> {
        ResolutionContext { model }
    }
}

/// One declared return of a named result-set mapping.
///
/// Descriptors are boot-time data, mutable until the owning mapping is
/// resolved for the first time.
#[derive(Debug, Clone)]
pub enum ResultDescriptor {
    Entity {
        alias: Option<String>,
        entity: String,
        discriminator_column: Option<String>,
        property_results: Vec<PropertyResult>,
    },

    Scalar {
        column: String,
        jdbc_type: Option<JdbcType>,
    },

    Collection {
        alias: Option<String>,
        /// `Entity.attribute`
        role: String,
    },

    /// A property fetch declared without its own column mappings; may be
    /// upgraded in place by [`ResultSetMappingDescriptor::apply_fetch_joins`].
    Fetch {
        alias: String,
        /// `ownerAlias.propertyPath`
        key: String,
    },

    JoinReturn {
        alias: String,
        /// `ownerAlias.propertyPath`
        key: String,
        property_results: Vec<PropertyResult>,
    },
}

#[derive(Debug, Clone)]
pub struct PropertyResult {
    pub name: String,
    pub columns: Vec<String>,
}

impl ResultDescriptor {
    fn key(&self) -> Option<&str> {
        match self {
            Self::Fetch { key, .. } | Self::JoinReturn { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// A named result-set mapping: declared returns plus the memoized
/// resolution product.
pub struct ResultSetMappingDescriptor {
    name: String,
    results: Vec<ResultDescriptor>,
    memento: OnceLock<Arc<ResultSetMappingMemento>>,
}

impl ResultSetMappingDescriptor {
    pub fn new(name: impl Into<String>) -> ResultSetMappingDescriptor {
        ResultSetMappingDescriptor {
            name: name.into(),
            results: vec![],
            memento: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_result(&mut self, result: ResultDescriptor) -> Result<()> {
        if self.memento.get().is_some() {
            return Err(Error::invalid_mapping(format!(
                "result-set mapping `{}` is already resolved",
                self.name
            )));
        }
        self.results.push(result);
        Ok(())
    }

    /// Reconciles join returns with previously declared property fetches
    /// for the same owner/path key: the join return replaces the plain
    /// fetch at its original index, preserving declaration order.
    pub fn apply_fetch_joins(&mut self, joins: Vec<ResultDescriptor>) -> Result<()> {
        if self.memento.get().is_some() {
            return Err(Error::invalid_mapping(format!(
                "result-set mapping `{}` is already resolved",
                self.name
            )));
        }

        for join in joins {
            let ResultDescriptor::JoinReturn { key, .. } = &join else {
                return Err(Error::invalid_mapping(
                    "apply_fetch_joins accepts join returns only",
                ));
            };

            let existing = self
                .results
                .iter()
                .position(|r| r.key() == Some(key.as_str()));
            match existing.map(|i| (&self.results[i], i)) {
                Some((ResultDescriptor::JoinReturn { .. }, _)) => {
                    return Err(Error::invalid_mapping(format!(
                        "duplicate join mapping for `{key}` in result-set mapping `{}`",
                        self.name
                    )));
                }
                Some((_, index)) => self.results[index] = join,
                None => self.results.push(join),
            }
        }
        Ok(())
    }

    /// Resolves the mapping against the runtime model.
    ///
    /// The first call does the work; every later call returns the same
    /// `Arc` (pointer-equal), regardless of the context passed.
    pub fn resolve(&self, cx: &ResolutionContext<'_>) -> Result<Arc<ResultSetMappingMemento>> {
        if let Some(memento) = self.memento.get() {
            return Ok(memento.clone());
        }

        let memento = Arc::new(self.build(cx)?);
        tracing::debug!(name = %self.name, returns = memento.returns.len(), "resolved result-set mapping");
        Ok(self.memento.get_or_init(|| memento).clone())
    }

    fn build(&self, cx: &ResolutionContext<'_>) -> Result<ResultSetMappingMemento> {
        // Alias registry: entity name plus the dotted path (relative to the
        // entity root) the alias stands for.
        let mut aliases: IndexMap<String, AliasTarget> = IndexMap::new();
        let mut returns = vec![];

        for result in &self.results {
            match result {
                ResultDescriptor::Entity {
                    alias,
                    entity,
                    discriminator_column,
                    property_results,
                } => {
                    let alias = alias.clone().ok_or_else(|| {
                        Error::invalid_mapping(format!(
                            "entity result for `{entity}` requires an alias"
                        ))
                    })?;
                    let mapping = cx.model.entity(entity).ok_or_else(|| {
                        Error::invalid_mapping(format!(
                            "result-set mapping `{}` references unknown entity `{entity}`",
                            self.name
                        ))
                    })?;

                    // No entity in the model is discriminated.
                    if let Some(column) = discriminator_column {
                        return Err(Error::invalid_mapping(format!(
                            "entity `{entity}` is not discriminated; \
                             discriminator column `{column}` does not apply"
                        )));
                    }

                    for property in property_results {
                        if mapping.find_sub_part(&property.name).is_none() {
                            return Err(Error::invalid_mapping(format!(
                                "entity `{entity}` has no attribute `{}`",
                                property.name
                            )));
                        }
                    }

                    aliases.insert(
                        alias.clone(),
                        AliasTarget {
                            entity: entity.clone(),
                            relative_path: String::new(),
                            path: mapping.path.clone(),
                        },
                    );
                    returns.push(ReturnMemento::Entity {
                        alias,
                        entity: entity.clone(),
                        path: mapping.path.clone(),
                    });
                }

                ResultDescriptor::Scalar { column, jdbc_type } => {
                    returns.push(ReturnMemento::Scalar {
                        column: column.clone(),
                        jdbc_type: *jdbc_type,
                    });
                }

                ResultDescriptor::Collection { alias, role } => {
                    let Some((entity, attribute)) = role.split_once('.') else {
                        return Err(Error::invalid_mapping(format!(
                            "collection role `{role}` is not of the form `Entity.attribute`"
                        )));
                    };
                    let mapping = cx.model.entity(entity).ok_or_else(|| {
                        Error::invalid_mapping(format!(
                            "collection role `{role}` references unknown entity `{entity}`"
                        ))
                    })?;
                    if mapping.find_attribute(attribute).is_none() {
                        return Err(Error::invalid_mapping(format!(
                            "collection role `{role}` references unknown attribute `{attribute}`"
                        )));
                    }
                    returns.push(ReturnMemento::Collection {
                        alias: alias.clone(),
                        role_entity: entity.to_string(),
                        role_attribute: attribute.to_string(),
                    });
                }

                ResultDescriptor::Fetch { alias, key } => {
                    let resolved = resolve_join(cx, &aliases, alias, key)?;
                    aliases.insert(alias.clone(), resolved.target.clone());
                    returns.push(resolved.into_memento(vec![]));
                }

                ResultDescriptor::JoinReturn {
                    alias,
                    key,
                    property_results,
                } => {
                    let resolved = resolve_join(cx, &aliases, alias, key)?;
                    let columns = property_results
                        .iter()
                        .flat_map(|p| p.columns.iter().cloned())
                        .collect();
                    aliases.insert(alias.clone(), resolved.target.clone());
                    returns.push(resolved.into_memento(columns));
                }
            }
        }

        Ok(ResultSetMappingMemento {
            name: self.name.clone(),
            returns,
        })
    }
}

#[derive(Clone)]
struct AliasTarget {
    entity: String,
    /// Dotted path relative to the entity root; empty for the root itself.
    relative_path: String,
    path: NavigablePath,
}

struct ResolvedJoin {
    alias: String,
    owner_alias: String,
    property_path: String,
    target: AliasTarget,
}

impl ResolvedJoin {
    fn into_memento(self, columns: Vec<String>) -> ReturnMemento {
        ReturnMemento::Join {
            alias: self.alias,
            owner_alias: self.owner_alias,
            property_path: self.property_path,
            fetched_path: self.target.path,
            columns,
        }
    }
}

fn resolve_join(
    cx: &ResolutionContext<'_>,
    aliases: &IndexMap<String, AliasTarget>,
    alias: &str,
    key: &str,
) -> Result<ResolvedJoin> {
    // The key is `ownerAlias.propertyPath`, split at the first dot.
    let Some((owner_alias, property_path)) = key.split_once('.') else {
        return Err(Error::invalid_mapping(format!(
            "join key `{key}` is not of the form `ownerAlias.propertyPath`"
        )));
    };

    let owner = aliases.get(owner_alias).ok_or_else(|| {
        Error::invalid_mapping(format!(
            "could not locate join-return owner `{owner_alias}` for join `{key}`"
        ))
    })?;

    let entity = cx.model.entity(&owner.entity).ok_or_else(|| {
        Error::invalid_mapping(format!("unknown entity `{}`", owner.entity))
    })?;

    let full_path = if owner.relative_path.is_empty() {
        property_path.to_string()
    } else {
        format!("{}.{property_path}", owner.relative_path)
    };
    if entity.find_sub_part(&full_path).is_none() {
        return Err(Error::invalid_mapping(format!(
            "entity `{}` has no attribute at path `{full_path}`",
            owner.entity
        )));
    }

    let mut path = owner.path.clone();
    for segment in property_path.split('.') {
        path = path.append(segment);
    }

    Ok(ResolvedJoin {
        alias: alias.to_string(),
        owner_alias: owner_alias.to_string(),
        property_path: property_path.to_string(),
        target: AliasTarget {
            entity: owner.entity.clone(),
            relative_path: full_path,
            path,
        },
    })
}

/// The immutable product of resolving a result-set mapping.
#[derive(Debug)]
pub struct ResultSetMappingMemento {
    name: String,
    returns: Vec<ReturnMemento>,
}

impl ResultSetMappingMemento {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn returns(&self) -> &[ReturnMemento] {
        &self.returns
    }
}

#[derive(Debug)]
pub enum ReturnMemento {
    Entity {
        alias: String,
        entity: String,
        path: NavigablePath,
    },

    Scalar {
        column: String,
        jdbc_type: Option<JdbcType>,
    },

    Collection {
        alias: Option<String>,
        role_entity: String,
        role_attribute: String,
    },

    Join {
        alias: String,
        owner_alias: String,
        property_path: String,
        fetched_path: NavigablePath,
        columns: Vec<String>,
    },
}
