use super::Error;

/// Error when a rendering helper is asked for something its selected
/// emulation strategy cannot express.
///
/// Example: a PERCENT or WITH TIES fetch clause handed to the LIMIT/OFFSET
/// strategy. These indicate a bug in translator selection rather than a
/// user-facing runtime condition, and are asserted before emission.
#[derive(Debug)]
pub(super) struct CapabilityViolationError {
    message: Box<str>,
}

impl std::error::Error for CapabilityViolationError {}

impl core::fmt::Display for CapabilityViolationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "dialect capability violation: {}", self.message)
    }
}

impl Error {
    /// Creates a capability violation error.
    pub fn capability_violation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CapabilityViolation(
            CapabilityViolationError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a capability violation error.
    pub fn is_capability_violation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CapabilityViolation(_))
    }
}
