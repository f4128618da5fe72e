use super::SelectableMappings;
use crate::stmt::Value;
use crate::{Error, Result};

/// A unique business key declared alongside the primary identifier.
#[derive(Debug, Clone)]
pub enum NaturalIdMapping {
    Simple(SimpleNaturalIdMapping),
    Compound(CompoundNaturalIdMapping),
}

#[derive(Debug, Clone)]
pub struct SimpleNaturalIdMapping {
    pub entity: String,
    pub attribute: String,
    pub mutable: bool,
    pub selectables: SelectableMappings,
}

#[derive(Debug, Clone)]
pub struct CompoundNaturalIdMapping {
    pub entity: String,

    /// Attribute names in declaration order; snapshot values follow this
    /// order.
    pub attributes: Vec<String>,

    pub mutable: bool,
    pub selectables: SelectableMappings,
}

impl NaturalIdMapping {
    pub fn is_mutable(&self) -> bool {
        match self {
            Self::Simple(m) => m.mutable,
            Self::Compound(m) => m.mutable,
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            Self::Simple(m) => &m.entity,
            Self::Compound(m) => &m.entity,
        }
    }

    /// Flush-time check: an immutable natural id must still match the
    /// snapshot taken at load. Mutable natural ids skip the comparison
    /// entirely.
    pub fn verify_flush_state(&self, snapshot: &[Value], current: &[Value]) -> Result<()> {
        if self.is_mutable() {
            return Ok(());
        }

        match self {
            Self::Simple(m) => {
                if snapshot.first() != current.first() {
                    return Err(Error::immutable_natural_id(&m.entity, &m.attribute));
                }
            }
            Self::Compound(m) => {
                for (i, attribute) in m.attributes.iter().enumerate() {
                    if snapshot.get(i) != current.get(i) {
                        return Err(Error::immutable_natural_id(&m.entity, attribute));
                    }
                }
            }
        }

        Ok(())
    }
}
