use super::SelectableMapping;
use crate::NavigablePath;

/// A single-column (or single-formula) attribute.
#[derive(Debug, Clone)]
pub struct BasicAttributeMapping {
    pub name: String,
    pub path: NavigablePath,
    pub nullable: bool,
    pub selectable: SelectableMapping,
}
