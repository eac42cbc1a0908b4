//! Converter for `vf:Obec` (municipality).

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::convertors::reference::read_kod_reference;
use crate::convertors::save::{require, with_key, SaveEntity, Statement, Statements, WriteMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obec {
    pub kod: Option<i32>,
    pub nazev: Option<String>,
    pub nespravny: Option<bool>,
    pub status_kod: Option<i32>,
    pub okres_kod: Option<i32>,
    pub pou_kod: Option<i32>,
    pub plati_od: Option<NaiveDateTime>,
    pub plati_do: Option<NaiveDateTime>,
    pub id_trans_ruian: Option<i64>,
    pub nz_id_globalni: Option<i64>,
    pub nuts_lau: Option<String>,
    pub datum_vzniku: Option<NaiveDateTime>,
}

pub struct ObecEntity;

#[async_trait]
impl SaveEntity for ObecEntity {
    type Record = Obec;

    const NAMESPACE: Namespace = Namespace::Obec;
    const ELEMENT: &'static str = "Obec";
    const STATEMENTS: Statements = Statements {
        insert: "INSERT INTO rn_obec \
                 (kod, nazev, nespravny, status_kod, okres_kod, pou_kod, plati_od, \
                 plati_do, id_trans_ruian, nz_id_globalni, nuts_lau, datum_vzniku) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        mode: WriteMode::Upsert {
            exists: "SELECT 1 FROM rn_obec WHERE kod = $1",
            update: "UPDATE rn_obec SET nazev = $1, nespravny = $2, status_kod = $3, \
                     okres_kod = $4, pou_kod = $5, plati_od = $6, plati_do = $7, \
                     id_trans_ruian = $8, nz_id_globalni = $9, nuts_lau = $10, \
                     datum_vzniku = $11, item_timestamp = now() \
                     WHERE kod = $12",
        },
    };

    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut Obec,
        cursor: &mut XmlCursor,
        _store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match element.local_name() {
            "Kod" => record.kod = Some(cursor.read_parsed()?),
            "Nazev" => record.nazev = Some(cursor.read_text()?),
            "Nespravny" => record.nespravny = Some(cursor.read_bool()?),
            "StatusKod" => record.status_kod = Some(cursor.read_parsed()?),
            "Okres" => record.okres_kod = read_kod_reference(cursor, sink, Namespace::Okres)?,
            "Pou" => record.pou_kod = read_kod_reference(cursor, sink, Namespace::Pou)?,
            "PlatiOd" => record.plati_od = Some(cursor.read_datetime()?),
            "PlatiDo" => record.plati_do = Some(cursor.read_datetime()?),
            "IdTransakce" => record.id_trans_ruian = Some(cursor.read_parsed()?),
            "GlobalniIdNavrhuZmeny" => record.nz_id_globalni = Some(cursor.read_parsed()?),
            "NutsLau" => record.nuts_lau = Some(cursor.read_text()?),
            "DatumVzniku" => record.datum_vzniku = Some(cursor.read_datetime()?),
            "Geometrie" => cursor.skip_element()?,
            _ => cursor.skip_unknown(sink)?,
        }
        Ok(())
    }

    fn fill(&self, record: &Obec, statement: Statement) -> Result<Vec<SqlValue>> {
        let kod = require(record.kod, "Kod", Self::ELEMENT)?;
        let fields: Vec<SqlValue> = vec![
            record.nazev.clone().into(),
            record.nespravny.into(),
            record.status_kod.into(),
            record.okres_kod.into(),
            record.pou_kod.into(),
            record.plati_od.into(),
            record.plati_do.into(),
            record.id_trans_ruian.into(),
            record.nz_id_globalni.into(),
            record.nuts_lau.clone().into(),
            record.datum_vzniku.into(),
        ];
        Ok(with_key(statement, kod.into(), fields))
    }

    fn fill_exists(&self, record: &Obec) -> Result<Vec<SqlValue>> {
        Ok(vec![require(record.kod, "Kod", Self::ELEMENT)?.into()])
    }
}
