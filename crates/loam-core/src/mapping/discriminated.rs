use super::SelectableMapping;
use crate::NavigablePath;

/// An any-valued association: a discriminator selectable naming the target
/// type and a key selectable holding the target identifier.
///
/// Enumeration order is discriminator first, then key.
#[derive(Debug, Clone)]
pub struct DiscriminatedAssociationMapping {
    pub name: String,
    pub path: NavigablePath,
    pub nullable: bool,
    pub discriminator: SelectableMapping,
    pub key: SelectableMapping,
}
