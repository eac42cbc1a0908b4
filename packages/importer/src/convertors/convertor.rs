//! Converter trait definition.

use async_trait::async_trait;

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::Store;
use crate::xml::XmlCursor;

/// Trait for element converters.
///
/// A converter is handed the cursor right after the opening tag of the
/// element it is responsible for. It consumes that element with all of its
/// descendants, writing to the store and delegating nested entities to their
/// own converters, and returns once the matching closing tag has been read.
///
/// Any error is fatal for the whole document and is returned unchanged.
#[async_trait]
pub trait Convertor: Send + Sync {
    /// Convert the current element and its sub-elements.
    ///
    /// # Arguments
    /// * `cursor` - XML cursor positioned inside the element's opening tag
    /// * `store` - Destination of the writes
    /// * `sink` - Receives a diagnostic for every skipped unknown element
    async fn convert(
        &self,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()>;
}
