//! Element converters.
//!
//! Each converter consumes exactly one element of the exchange format,
//! including all of its descendants. Converters are composed by nesting:
//!
//! - [`VymennyFormatConvertor`] handles the document root and delegates
//!   `vf:Data` to [`DataConvertor`]
//! - [`DataConvertor`] dispatches entity collections to [`ListConvertor`]s
//! - [`ListConvertor`] hands each item to a [`SaveConvertor`]
//! - [`SaveConvertor`] accumulates one record through its [`SaveEntity`]
//!   and writes it
//!
//! Adding a new entity type means implementing [`SaveEntity`] for it and
//! registering its collection in [`DataConvertor`].

pub mod convertor;
pub mod document;
pub mod entities;
pub mod list;
pub mod reference;
pub mod save;

pub use convertor::Convertor;
pub use document::{DataConvertor, VymennyFormatConvertor};
pub use list::ListConvertor;
pub use reference::read_kod_reference;
pub use save::{require, with_key, SaveConvertor, SaveEntity, Statement, Statements, WriteMode};
