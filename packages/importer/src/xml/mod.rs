//! Streaming XML access for the converters.

mod cursor;
mod name;
mod namespaces;
mod values;

pub use cursor::{Token, XmlCursor};
pub use name::ElementName;
pub use namespaces::Namespace;
pub use values::{parse_bool, parse_datetime};
