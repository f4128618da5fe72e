use super::{AttributeMapping, SelectableMappings};
use crate::NavigablePath;

/// A composite attribute flattened onto its owner's table.
///
/// `selectables` is the recursively-expanded, declaration-ordered column
/// array; `attributes` are the resolved sub-parts in the same declaration
/// order. The two views must stay position-consistent: the i-th leaf
/// reached by walking `attributes` depth-first is `selectables[i]`.
#[derive(Debug, Clone)]
pub struct EmbeddedAttributeMapping {
    pub name: String,
    pub path: NavigablePath,
    pub nullable: bool,
    pub containing_table: String,
    pub attributes: Vec<AttributeMapping>,
    pub selectables: SelectableMappings,
}
