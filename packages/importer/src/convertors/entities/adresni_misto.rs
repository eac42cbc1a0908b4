//! Converter for `vf:AdresniMisto` (address point).

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::convertors::reference::read_kod_reference;
use crate::convertors::save::{require, with_key, SaveEntity, Statement, Statements, WriteMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdresniMisto {
    pub kod: Option<i32>,
    pub nespravny: Option<bool>,
    pub cislo_domovni: Option<i32>,
    pub cislo_orientacni: Option<i32>,
    pub cislo_orientacni_pismeno: Option<String>,
    pub psc: Option<i32>,
    pub stavobj_kod: Option<i32>,
    pub ulice_kod: Option<i32>,
    pub plati_od: Option<NaiveDateTime>,
    pub plati_do: Option<NaiveDateTime>,
    pub id_trans_ruian: Option<i64>,
    pub nz_id_globalni: Option<i64>,
}

pub struct AdresniMistoEntity;

#[async_trait]
impl SaveEntity for AdresniMistoEntity {
    type Record = AdresniMisto;

    const NAMESPACE: Namespace = Namespace::AdresniMisto;
    const ELEMENT: &'static str = "AdresniMisto";
    const STATEMENTS: Statements = Statements {
        insert: "INSERT INTO rn_adresni_misto \
                 (kod, nespravny, cislo_domovni, cislo_orientacni, \
                 cislo_orientacni_pismeno, psc, stavobj_kod, ulice_kod, plati_od, \
                 plati_do, id_trans_ruian, nz_id_globalni) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        mode: WriteMode::Upsert {
            exists: "SELECT 1 FROM rn_adresni_misto WHERE kod = $1",
            update: "UPDATE rn_adresni_misto SET nespravny = $1, cislo_domovni = $2, \
                     cislo_orientacni = $3, cislo_orientacni_pismeno = $4, psc = $5, \
                     stavobj_kod = $6, ulice_kod = $7, plati_od = $8, plati_do = $9, \
                     id_trans_ruian = $10, nz_id_globalni = $11, item_timestamp = now() \
                     WHERE kod = $12",
        },
    };

    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut AdresniMisto,
        cursor: &mut XmlCursor,
        _store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match element.local_name() {
            "Kod" => record.kod = Some(cursor.read_parsed()?),
            "Nespravny" => record.nespravny = Some(cursor.read_bool()?),
            "CisloDomovni" => record.cislo_domovni = Some(cursor.read_parsed()?),
            "CisloOrientacni" => record.cislo_orientacni = Some(cursor.read_parsed()?),
            "CisloOrientacniPismeno" => record.cislo_orientacni_pismeno = Some(cursor.read_text()?),
            "Psc" => record.psc = Some(cursor.read_parsed()?),
            "StavebniObjekt" => {
                record.stavobj_kod = read_kod_reference(cursor, sink, Namespace::StavebniObjekt)?;
            }
            "Ulice" => record.ulice_kod = read_kod_reference(cursor, sink, Namespace::Ulice)?,
            "PlatiOd" => record.plati_od = Some(cursor.read_datetime()?),
            "PlatiDo" => record.plati_do = Some(cursor.read_datetime()?),
            "IdTransakce" => record.id_trans_ruian = Some(cursor.read_parsed()?),
            "GlobalniIdNavrhuZmeny" => record.nz_id_globalni = Some(cursor.read_parsed()?),
            "Geometrie" => cursor.skip_element()?,
            _ => cursor.skip_unknown(sink)?,
        }
        Ok(())
    }

    fn fill(&self, record: &AdresniMisto, statement: Statement) -> Result<Vec<SqlValue>> {
        let kod = require(record.kod, "Kod", Self::ELEMENT)?;
        let fields: Vec<SqlValue> = vec![
            record.nespravny.into(),
            record.cislo_domovni.into(),
            record.cislo_orientacni.into(),
            record.cislo_orientacni_pismeno.clone().into(),
            record.psc.into(),
            record.stavobj_kod.into(),
            record.ulice_kod.into(),
            record.plati_od.into(),
            record.plati_do.into(),
            record.id_trans_ruian.into(),
            record.nz_id_globalni.into(),
        ];
        Ok(with_key(statement, kod.into(), fields))
    }

    fn fill_exists(&self, record: &AdresniMisto) -> Result<Vec<SqlValue>> {
        Ok(vec![require(record.kod, "Kod", Self::ELEMENT)?.into()])
    }
}
