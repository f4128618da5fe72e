use super::Error;

/// Data-integrity error raised when an immutable natural id changed between
/// load and flush.
///
/// Natural ids declared mutable never raise this; the flush-time snapshot
/// comparison is skipped entirely for them.
#[derive(Debug)]
pub(super) struct ImmutableNaturalIdError {
    entity: Box<str>,
    attribute: Box<str>,
}

impl std::error::Error for ImmutableNaturalIdError {}

impl core::fmt::Display for ImmutableNaturalIdError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "immutable natural identifier of `{}` was altered (attribute `{}`)",
            self.entity, self.attribute
        )
    }
}

impl Error {
    /// Creates an immutable natural id violation error.
    pub fn immutable_natural_id(
        entity: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ImmutableNaturalId(
            ImmutableNaturalIdError {
                entity: entity.into().into(),
                attribute: attribute.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an immutable natural id violation.
    pub fn is_immutable_natural_id(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ImmutableNaturalId(_))
    }
}
