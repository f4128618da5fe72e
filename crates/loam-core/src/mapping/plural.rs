use super::{AttributeMapping, SelectableMapping, SelectableMappings};
use crate::results::{DomainResultCreationState, Fetch, FetchTiming};
use crate::stmt::{
    ComparisonOperator, ComparisonPredicate, Junction, JoinType, Predicate, TableGroup,
    TableGroupJoin,
};
use crate::{NavigablePath, Result};

/// A collection attribute backed by its own table.
///
/// `key` are the FK columns on the collection table; `owner_key` are the
/// owner identifier columns they point at, in the same order. The join
/// predicate pairs them positionally.
#[derive(Debug, Clone)]
pub struct PluralAttributeMapping {
    pub name: String,
    pub path: NavigablePath,
    pub collection_table: String,
    pub key: SelectableMappings,
    pub owner_key: SelectableMappings,
    pub element: PluralElement,
}

#[derive(Debug, Clone)]
pub enum PluralElement {
    Basic {
        selectable: SelectableMapping,
    },
    Entity {
        target_entity: String,
        fk: SelectableMappings,
        attributes: Vec<AttributeMapping>,
    },
}

impl PluralAttributeMapping {
    pub(super) fn element_selectables(&self) -> SelectableMappings {
        match &self.element {
            PluralElement::Basic { selectable } => {
                SelectableMappings::from_vec(vec![selectable.clone()])
            }
            PluralElement::Entity { fk, .. } => fk.clone(),
        }
    }

    /// Registers the collection's table group (joined to the owner's group
    /// by the key columns) and produces the fetch.
    ///
    /// A delayed fetch still selects the key columns so the collection can
    /// be loaded afterwards; an immediate fetch selects key and element.
    pub fn generate_fetch(
        &self,
        parent_path: &NavigablePath,
        timing: FetchTiming,
        selected: bool,
        state: &mut DomainResultCreationState,
    ) -> Result<Fetch> {
        let fetched_path = parent_path.append(&self.name);

        let mut owner_group = state
            .from_clause_ref()
            .find_table_group(parent_path)
            .cloned()
            .ok_or_else(|| {
                crate::Error::invalid_mapping(format!(
                    "no table group registered for fetch owner `{parent_path}`"
                ))
            })?;
        let owner_alias = owner_group.primary.identification_variable.clone();

        let collection_alias = if timing == FetchTiming::Immediate {
            let reference = state
                .from_clause()
                .new_table_reference(self.collection_table.clone());
            let alias = reference.identification_variable.clone();

            let mut comparisons = vec![];
            for (key, owner_key) in self.key.iter().zip(self.owner_key.iter()) {
                comparisons.push(Predicate::Comparison(ComparisonPredicate::new(
                    key.column_reference(&alias),
                    ComparisonOperator::Equal,
                    owner_key.column_reference(&owner_alias),
                )));
            }

            let joined = TableGroup::new(fetched_path.clone(), reference);
            let join = TableGroupJoin {
                join_type: JoinType::Left,
                joined,
                predicate: Some(Predicate::Junction(Junction::conjunction(comparisons))),
            };

            // Re-register the owner group with the collection join attached.
            owner_group.joins.push(join.clone());
            state.from_clause().register_table_group(owner_group);
            state.from_clause().register_table_group(join.joined.clone());

            Some(alias)
        } else {
            None
        };

        let mut expressions = vec![];
        if selected {
            match (&collection_alias, timing) {
                (Some(alias), FetchTiming::Immediate) => {
                    self.key.for_each_selectable(0, &mut |_, selectable| {
                        expressions.push(selectable.column_reference(alias));
                    });
                    self.element_selectables()
                        .for_each_selectable(0, &mut |_, selectable| {
                            expressions.push(selectable.column_reference(alias));
                        });
                }
                _ => {
                    // Delayed: ride the owner's key columns along.
                    self.owner_key.for_each_selectable(0, &mut |_, selectable| {
                        expressions.push(selectable.column_reference(&owner_alias));
                    });
                }
            }
        }

        let selections = expressions
            .into_iter()
            .map(|expr| state.resolve_selection(expr))
            .collect();

        Ok(Fetch {
            fetched_path,
            timing,
            selected,
            selections,
        })
    }
}
