//! Converter for collection elements.

use async_trait::async_trait;

use super::convertor::Convertor;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::Store;
use crate::xml::{Namespace, XmlCursor};

/// Converter for an element that only wraps a sequence of items,
/// such as `vf:Parcely` around `vf:Parcela` elements.
///
/// Each item is handed to the item converter; anything else is reported
/// and skipped.
pub struct ListConvertor<C> {
    namespace: Namespace,
    item: &'static str,
    convertor: C,
}

impl<C: Convertor> ListConvertor<C> {
    pub fn new(namespace: Namespace, item: &'static str, convertor: C) -> Self {
        Self {
            namespace,
            item,
            convertor,
        }
    }
}

#[async_trait]
impl<C: Convertor> Convertor for ListConvertor<C> {
    async fn convert(
        &self,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let depth = cursor.depth();
        let mut items = 0usize;

        while let Some(child) = cursor.next_child(depth)? {
            if child.is(self.namespace, self.item) {
                self.convertor.convert(cursor, store, sink).await?;
                items += 1;
            } else {
                cursor.skip_unknown(sink)?;
            }
        }

        tracing::debug!(item = self.item, items, "Converted list");
        Ok(())
    }
}
