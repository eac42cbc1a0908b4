#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use ruian_import::diagnostics::Diagnostic;
use ruian_import::error::Result;
use ruian_import::import_document;
use ruian_import::store::{SqlValue, Store};
use ruian_import::xml::XmlCursor;

/// In-memory store recording every statement.
///
/// A key reported missing by an existence query becomes existing once the
/// next insert runs, so importing the same document twice turns inserts
/// into updates the way a real database would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    existing: HashSet<(String, Vec<SqlValue>)>,
    pending: Option<(String, Vec<SqlValue>)>,
    pub queries: Vec<(String, Vec<SqlValue>)>,
    pub writes: Vec<(String, Vec<SqlValue>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes whose statement starts with `prefix`, e.g. `"INSERT INTO rn_parcela"`.
    pub fn writes_starting_with(&self, prefix: &str) -> Vec<&Vec<SqlValue>> {
        self.writes
            .iter()
            .filter(|(sql, _)| sql.starts_with(prefix))
            .map(|(_, params)| params)
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.queries.clear();
        self.writes.clear();
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn exists(&mut self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        let key = (sql.to_string(), params.to_vec());
        self.queries.push(key.clone());
        let found = self.existing.contains(&key);
        if !found {
            self.pending = Some(key);
        }
        Ok(found)
    }

    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        if sql.starts_with("INSERT") {
            if let Some(key) = self.pending.take() {
                self.existing.insert(key);
            }
        }
        self.writes.push((sql.to_string(), params.to_vec()));
        Ok(1)
    }
}

/// Path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("vfr")
        .join(name)
}

/// Load fixture file content.
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Import a document held in memory, collecting diagnostics.
pub async fn import_xml(xml: &str, store: &mut MemoryStore) -> Result<Vec<Diagnostic>> {
    let mut cursor = XmlCursor::from_xml(xml);
    let mut sink: Vec<Diagnostic> = Vec::new();
    import_document(&mut cursor, store, &mut sink).await?;
    Ok(sink)
}

/// Wrap `data` in a document root declaring every exchange format prefix.
pub fn document(data: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<vf:VymennyFormat
    xmlns:vf="urn:cz:isvs:ruian:schemas:VymennyFormatTypy:v1"
    xmlns:com="urn:cz:isvs:ruian:schemas:CommonTypy:v1"
    xmlns:sti="urn:cz:isvs:ruian:schemas:StatIntTypy:v1"
    xmlns:oki="urn:cz:isvs:ruian:schemas:OkresIntTypy:v1"
    xmlns:obi="urn:cz:isvs:ruian:schemas:ObecIntTypy:v1"
    xmlns:poi="urn:cz:isvs:ruian:schemas:PouIntTypy:v1"
    xmlns:uli="urn:cz:isvs:ruian:schemas:UliceIntTypy:v1"
    xmlns:kui="urn:cz:isvs:ruian:schemas:KatUzIntTypy:v1"
    xmlns:pai="urn:cz:isvs:ruian:schemas:ParcelaIntTypy:v1"
    xmlns:soi="urn:cz:isvs:ruian:schemas:StavObjIntTypy:v1"
    xmlns:ami="urn:cz:isvs:ruian:schemas:AdrMistoIntTypy:v1"
    xmlns:gml="http://www.opengis.net/gml/3.2">
  <vf:Data>{data}</vf:Data>
</vf:VymennyFormat>"#
    )
}
