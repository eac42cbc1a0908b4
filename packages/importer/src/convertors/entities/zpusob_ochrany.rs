//! Converter for `com:ZpusobOchrany` (protection method of a land parcel).
//!
//! Protection methods only exist as children of a parcel, so their rows are
//! always inserted and carry the parent parcel id given at construction.

use async_trait::async_trait;

use crate::convertors::save::{SaveEntity, Statement, Statements, WriteMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

/// Removes the protection methods of one parcel before its current ones are
/// inserted again.
pub const SQL_DELETE_BY_PARCELA: &str =
    "DELETE FROM rn_zpusob_ochrany_pozemku WHERE parcela_id = $1";

/// One protection method of a parcel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZpusobOchranyPozemku {
    pub kod: Option<i32>,
    pub zpusob_ochrany_kod: Option<i32>,
    pub id_trans_ruian: Option<i64>,
    pub rizeni_id: Option<i64>,
}

/// Entity steps for protection methods owned by parcel `parcela_id`.
pub struct ZpusobOchranyPozemkuEntity {
    parcela_id: i64,
}

impl ZpusobOchranyPozemkuEntity {
    #[must_use]
    pub fn new(parcela_id: i64) -> Self {
        Self { parcela_id }
    }
}

#[async_trait]
impl SaveEntity for ZpusobOchranyPozemkuEntity {
    type Record = ZpusobOchranyPozemku;

    const NAMESPACE: Namespace = Namespace::Common;
    const ELEMENT: &'static str = "ZpusobOchrany";
    const STATEMENTS: Statements = Statements {
        insert: "INSERT INTO rn_zpusob_ochrany_pozemku \
                 (kod, zpusob_ochrany_kod, parcela_id, id_trans_ruian, rizeni_id) \
                 VALUES ($1, $2, $3, $4, $5)",
        mode: WriteMode::AlwaysInsert,
    };

    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut ZpusobOchranyPozemku,
        cursor: &mut XmlCursor,
        _store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match element.local_name() {
            "IdTransakce" => record.id_trans_ruian = Some(cursor.read_parsed()?),
            "Kod" => record.kod = Some(cursor.read_parsed()?),
            "TypOchranyKod" => record.zpusob_ochrany_kod = Some(cursor.read_parsed()?),
            "RizeniId" => record.rizeni_id = Some(cursor.read_parsed()?),
            _ => cursor.skip_unknown(sink)?,
        }
        Ok(())
    }

    fn fill(&self, record: &ZpusobOchranyPozemku, _statement: Statement) -> Result<Vec<SqlValue>> {
        Ok(vec![
            record.kod.into(),
            record.zpusob_ochrany_kod.into(),
            self.parcela_id.into(),
            record.id_trans_ruian.into(),
            record.rizeni_id.into(),
        ])
    }

    fn fill_exists(&self, _record: &ZpusobOchranyPozemku) -> Result<Vec<SqlValue>> {
        // never queried, see WriteMode::AlwaysInsert
        Ok(Vec::new())
    }
}
