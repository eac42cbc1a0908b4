//! Converter for `vf:Ulice` (street).

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::convertors::reference::read_kod_reference;
use crate::convertors::save::{require, with_key, SaveEntity, Statement, Statements, WriteMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ulice {
    pub kod: Option<i32>,
    pub nazev: Option<String>,
    pub nespravny: Option<bool>,
    pub obec_kod: Option<i32>,
    pub plati_od: Option<NaiveDateTime>,
    pub plati_do: Option<NaiveDateTime>,
    pub id_trans_ruian: Option<i64>,
    pub nz_id_globalni: Option<i64>,
}

pub struct UliceEntity;

#[async_trait]
impl SaveEntity for UliceEntity {
    type Record = Ulice;

    const NAMESPACE: Namespace = Namespace::Ulice;
    const ELEMENT: &'static str = "Ulice";
    const STATEMENTS: Statements = Statements {
        insert: "INSERT INTO rn_ulice \
                 (kod, nazev, nespravny, obec_kod, plati_od, plati_do, id_trans_ruian, \
                 nz_id_globalni) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        mode: WriteMode::Upsert {
            exists: "SELECT 1 FROM rn_ulice WHERE kod = $1",
            update: "UPDATE rn_ulice SET nazev = $1, nespravny = $2, obec_kod = $3, \
                     plati_od = $4, plati_do = $5, id_trans_ruian = $6, nz_id_globalni = $7, \
                     item_timestamp = now() \
                     WHERE kod = $8",
        },
    };

    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut Ulice,
        cursor: &mut XmlCursor,
        _store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match element.local_name() {
            "Kod" => record.kod = Some(cursor.read_parsed()?),
            "Nazev" => record.nazev = Some(cursor.read_text()?),
            "Nespravny" => record.nespravny = Some(cursor.read_bool()?),
            "Obec" => record.obec_kod = read_kod_reference(cursor, sink, Namespace::Obec)?,
            "PlatiOd" => record.plati_od = Some(cursor.read_datetime()?),
            "PlatiDo" => record.plati_do = Some(cursor.read_datetime()?),
            "IdTransakce" => record.id_trans_ruian = Some(cursor.read_parsed()?),
            "GlobalniIdNavrhuZmeny" => record.nz_id_globalni = Some(cursor.read_parsed()?),
            "Geometrie" => cursor.skip_element()?,
            _ => cursor.skip_unknown(sink)?,
        }
        Ok(())
    }

    fn fill(&self, record: &Ulice, statement: Statement) -> Result<Vec<SqlValue>> {
        let kod = require(record.kod, "Kod", Self::ELEMENT)?;
        let fields: Vec<SqlValue> = vec![
            record.nazev.clone().into(),
            record.nespravny.into(),
            record.obec_kod.into(),
            record.plati_od.into(),
            record.plati_do.into(),
            record.id_trans_ruian.into(),
            record.nz_id_globalni.into(),
        ];
        Ok(with_key(statement, kod.into(), fields))
    }

    fn fill_exists(&self, record: &Ulice) -> Result<Vec<SqlValue>> {
        Ok(vec![require(record.kod, "Kod", Self::ELEMENT)?.into()])
    }
}
