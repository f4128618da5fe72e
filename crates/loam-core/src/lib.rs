#[macro_use]
mod macros;

mod error;
pub use error::Error;

pub mod mapping;

pub mod path;
pub use path::NavigablePath;

pub mod results;

pub mod schema;

pub mod stmt;

/// A Result type alias that uses Loam's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
