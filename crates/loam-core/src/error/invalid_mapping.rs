use super::Error;

/// Error when boot-time mapping configuration is invalid.
///
/// This occurs when:
/// - A join-return's owner alias was never declared as a return
/// - Two join mappings are declared for the same owner/path
/// - A native-query return is missing a required alias
/// - A composite type expansion cycles back on itself
///
/// These errors are raised at descriptor construction or first resolution,
/// never deferred to query execution. They are unrecoverable for the mapping
/// in question.
#[derive(Debug)]
pub(super) struct InvalidMappingError {
    message: Box<str>,
}

impl std::error::Error for InvalidMappingError {}

impl core::fmt::Display for InvalidMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error.
    pub fn invalid_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMappingError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMapping(_))
    }
}
