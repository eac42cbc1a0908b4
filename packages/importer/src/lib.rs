//! RÚIAN Import - Stream RÚIAN exchange format (VFR) documents into PostgreSQL.
//!
//! Documents are read with a forward-only XML cursor and never held in
//! memory as a whole. Every entity element is converted into one record and
//! written as an insert or update; entities owned by a parent record are
//! always inserted. Unknown elements are skipped and reported as
//! diagnostics, while malformed XML, unparseable values and database errors
//! abort the document.
//!
//! # Example
//!
//! ```
//! use ruian_import::xml::Namespace;
//!
//! let ns = Namespace::from_uri("urn:cz:isvs:ruian:schemas:ParcelaIntTypy:v1");
//! assert_eq!(ns, Some(Namespace::Parcela));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, settings and input validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Namespaces, element names, value parsing and the XML cursor
//! - [`diagnostics`]: Unknown-element diagnostics and their sinks
//! - [`store`]: Statement execution against PostgreSQL
//! - [`convertors`]: Element converters
//! - [`importer`]: Document import service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod convertors;
pub mod diagnostics;
pub mod error;
pub mod importer;
pub mod store;
pub mod xml;

// Re-export main functions
pub use importer::{dry_run_file, import_document, import_file, ImportReport};

// Re-export commonly used items
pub use config::ImportConfig;
pub use convertors::{Convertor, SaveConvertor, SaveEntity};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use error::{ImportError, Result};
pub use store::{SqlValue, Store};
