mod dialect;
pub use dialect::{Dialect, PaginationStrategy, PlaceholderStyle, RowValueSupport};

mod params;
pub use params::ParameterBinder;

pub mod results;

mod translator;
pub use translator::{Translation, Translator};
