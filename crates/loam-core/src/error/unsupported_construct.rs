use super::Error;

/// Error when the translator encounters a construct it cannot render for the
/// target dialect.
///
/// This occurs when:
/// - Tuple emulation is requested together with limit/offset or set
///   operations that cannot be rewritten correctly
/// - A statement/emulation combination has no implemented rendering
///
/// This is a fail-fast signal raised at translation time, distinguishing
/// "unsupported construct" from "malformed tree". The translator never
/// silently degrades to incorrect SQL.
#[derive(Debug)]
pub(super) struct UnsupportedConstructError {
    message: Box<str>,
}

impl std::error::Error for UnsupportedConstructError {}

impl core::fmt::Display for UnsupportedConstructError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported construct: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported construct error.
    pub fn unsupported_construct(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedConstruct(
            UnsupportedConstructError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported construct error.
    pub fn is_unsupported_construct(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedConstruct(_))
    }
}
