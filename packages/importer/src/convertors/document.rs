//! Structural converters for the document envelope.

use async_trait::async_trait;

use super::convertor::Convertor;
use super::entities::{AdresniMistoEntity, ObecEntity, ParcelaEntity, StatEntity, UliceEntity};
use super::list::ListConvertor;
use super::save::SaveConvertor;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::Store;
use crate::xml::{Namespace, XmlCursor};

/// Converter for the `vf:VymennyFormat` root element.
pub struct VymennyFormatConvertor {
    data: DataConvertor,
}

impl VymennyFormatConvertor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DataConvertor,
        }
    }
}

impl Default for VymennyFormatConvertor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Convertor for VymennyFormatConvertor {
    async fn convert(
        &self,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let depth = cursor.depth();

        while let Some(child) = cursor.next_child(depth)? {
            match (child.namespace(), child.local_name()) {
                (Some(Namespace::VymennyFormat), "Hlavicka") => {
                    tracing::debug!("Skipping document header");
                    cursor.skip_element()?;
                }
                (Some(Namespace::VymennyFormat), "Data") => {
                    self.data.convert(cursor, store, sink).await?;
                }
                _ => cursor.skip_unknown(sink)?,
            }
        }

        Ok(())
    }
}

/// Converter for `vf:Data`, the container of entity collections.
pub struct DataConvertor;

#[async_trait]
impl Convertor for DataConvertor {
    async fn convert(
        &self,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let depth = cursor.depth();
        let vf = Namespace::VymennyFormat;

        while let Some(child) = cursor.next_child(depth)? {
            match (child.namespace(), child.local_name()) {
                (Some(Namespace::VymennyFormat), "Staty") => {
                    ListConvertor::new(vf, "Stat", SaveConvertor::new(StatEntity))
                        .convert(cursor, store, sink)
                        .await?;
                }
                (Some(Namespace::VymennyFormat), "Obce") => {
                    ListConvertor::new(vf, "Obec", SaveConvertor::new(ObecEntity))
                        .convert(cursor, store, sink)
                        .await?;
                }
                (Some(Namespace::VymennyFormat), "Ulice") => {
                    ListConvertor::new(vf, "Ulice", SaveConvertor::new(UliceEntity))
                        .convert(cursor, store, sink)
                        .await?;
                }
                (Some(Namespace::VymennyFormat), "Parcely") => {
                    ListConvertor::new(vf, "Parcela", SaveConvertor::new(ParcelaEntity))
                        .convert(cursor, store, sink)
                        .await?;
                }
                (Some(Namespace::VymennyFormat), "AdresniMista") => {
                    ListConvertor::new(vf, "AdresniMisto", SaveConvertor::new(AdresniMistoEntity))
                        .convert(cursor, store, sink)
                        .await?;
                }
                _ => cursor.skip_unknown(sink)?,
            }
        }

        Ok(())
    }
}
