//! Converter for `vf:Parcela` (land parcel).

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::zpusob_ochrany::{ZpusobOchranyPozemkuEntity, SQL_DELETE_BY_PARCELA};
use crate::convertors::convertor::Convertor;
use crate::convertors::list::ListConvertor;
use crate::convertors::reference::read_kod_reference;
use crate::convertors::save::{require, with_key, SaveConvertor, SaveEntity, Statement, Statements, WriteMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

/// One land parcel. Identified by the registry-assigned `Id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parcela {
    pub id: Option<i64>,
    pub nespravny: Option<bool>,
    pub kmenove_cislo: Option<i32>,
    pub pododdeleni_cisla: Option<i32>,
    pub vymera_parcely: Option<i64>,
    pub zpusob_vyu_poz_kod: Option<i32>,
    pub druh_cislovani_kod: Option<i32>,
    pub druh_pozemku_kod: Option<i32>,
    pub katuz_kod: Option<i32>,
    pub plati_od: Option<NaiveDateTime>,
    pub plati_do: Option<NaiveDateTime>,
    pub id_trans_ruian: Option<i64>,
    pub rizeni_id: Option<i64>,
}

pub struct ParcelaEntity;

#[async_trait]
impl SaveEntity for ParcelaEntity {
    type Record = Parcela;

    const NAMESPACE: Namespace = Namespace::Parcela;
    const ELEMENT: &'static str = "Parcela";
    const STATEMENTS: Statements = Statements {
        insert: "INSERT INTO rn_parcela \
                 (id, nespravny, kmenove_cislo, pododdeleni_cisla, vymera_parcely, \
                 zpusob_vyu_poz_kod, druh_cislovani_kod, druh_pozemku_kod, katuz_kod, \
                 plati_od, plati_do, id_trans_ruian, rizeni_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        mode: WriteMode::Upsert {
            exists: "SELECT 1 FROM rn_parcela WHERE id = $1",
            update: "UPDATE rn_parcela SET nespravny = $1, kmenove_cislo = $2, \
                     pododdeleni_cisla = $3, vymera_parcely = $4, zpusob_vyu_poz_kod = $5, \
                     druh_cislovani_kod = $6, druh_pozemku_kod = $7, katuz_kod = $8, \
                     plati_od = $9, plati_do = $10, id_trans_ruian = $11, rizeni_id = $12, \
                     item_timestamp = now() \
                     WHERE id = $13",
        },
    };

    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut Parcela,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match element.local_name() {
            "Id" => record.id = Some(cursor.read_parsed()?),
            "Nespravny" => record.nespravny = Some(cursor.read_bool()?),
            "KmenoveCislo" => record.kmenove_cislo = Some(cursor.read_parsed()?),
            "PododdeleniCisla" => record.pododdeleni_cisla = Some(cursor.read_parsed()?),
            "VymeraParcely" => record.vymera_parcely = Some(cursor.read_parsed()?),
            "ZpusobyVyuzitiPozemku" => record.zpusob_vyu_poz_kod = Some(cursor.read_parsed()?),
            "DruhCislovaniKod" => record.druh_cislovani_kod = Some(cursor.read_parsed()?),
            "DruhPozemkuKod" => record.druh_pozemku_kod = Some(cursor.read_parsed()?),
            "KatastralniUzemi" => {
                record.katuz_kod = read_kod_reference(cursor, sink, Namespace::KatastralniUzemi)?;
            }
            "PlatiOd" => record.plati_od = Some(cursor.read_datetime()?),
            "PlatiDo" => record.plati_do = Some(cursor.read_datetime()?),
            "IdTransakce" => record.id_trans_ruian = Some(cursor.read_parsed()?),
            "RizeniId" => record.rizeni_id = Some(cursor.read_parsed()?),
            "ZpusobyOchranyPozemku" => {
                let parcela_id = require(record.id, "Id", Self::ELEMENT)?;
                store
                    .execute(SQL_DELETE_BY_PARCELA, &[SqlValue::from(parcela_id)])
                    .await?;
                ListConvertor::new(
                    Namespace::Common,
                    "ZpusobOchrany",
                    SaveConvertor::new(ZpusobOchranyPozemkuEntity::new(parcela_id)),
                )
                .convert(cursor, store, sink)
                .await?;
            }
            "Geometrie" => cursor.skip_element()?,
            _ => cursor.skip_unknown(sink)?,
        }
        Ok(())
    }

    fn fill(&self, record: &Parcela, statement: Statement) -> Result<Vec<SqlValue>> {
        let id = require(record.id, "Id", Self::ELEMENT)?;
        let fields: Vec<SqlValue> = vec![
            record.nespravny.into(),
            record.kmenove_cislo.into(),
            record.pododdeleni_cisla.into(),
            record.vymera_parcely.into(),
            record.zpusob_vyu_poz_kod.into(),
            record.druh_cislovani_kod.into(),
            record.druh_pozemku_kod.into(),
            record.katuz_kod.into(),
            record.plati_od.into(),
            record.plati_do.into(),
            record.id_trans_ruian.into(),
            record.rizeni_id.into(),
        ];
        Ok(with_key(statement, id.into(), fields))
    }

    fn fill_exists(&self, record: &Parcela) -> Result<Vec<SqlValue>> {
        Ok(vec![require(record.id, "Id", Self::ELEMENT)?.into()])
    }
}
