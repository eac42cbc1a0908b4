//! Document import service that ties the cursor, converters and store together.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use crate::convertors::{Convertor, VymennyFormatConvertor};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ImportError, Result};
use crate::store::{DryRunStore, SqlValue, Store};
use crate::xml::{Namespace, Token, XmlCursor};

/// Summary of one imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub file: PathBuf,
    /// Existence queries run.
    pub queries: usize,
    /// Insert, update and delete statements run.
    pub statements: usize,
    /// Unknown elements skipped.
    pub diagnostics: usize,
    pub elapsed: Duration,
}

/// Store wrapper counting what passes through it.
struct CountingStore<'a> {
    inner: &'a mut dyn Store,
    queries: usize,
    statements: usize,
}

#[async_trait]
impl Store for CountingStore<'_> {
    async fn exists(&mut self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        self.queries += 1;
        self.inner.exists(sql, params).await
    }

    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        self.statements += 1;
        self.inner.execute(sql, params).await
    }
}

/// Import one exchange format document from `cursor`.
///
/// The root element must be `vf:VymennyFormat` and nothing may follow it.
/// Any error aborts the import; the caller decides what happens to writes
/// already made, typically by rolling back its transaction.
///
/// # Examples
/// ```
/// use ruian_import::diagnostics::Diagnostic;
/// use ruian_import::importer::import_document;
/// use ruian_import::store::DryRunStore;
/// use ruian_import::xml::XmlCursor;
///
/// # #[tokio::main]
/// # async fn main() {
/// let xml = r#"<vf:VymennyFormat xmlns:vf="urn:cz:isvs:ruian:schemas:VymennyFormatTypy:v1">
///     <vf:Hlavicka><vf:Platnost>2024-01-31</vf:Platnost></vf:Hlavicka>
/// </vf:VymennyFormat>"#;
///
/// let mut store = DryRunStore::new();
/// let mut sink: Vec<Diagnostic> = Vec::new();
/// import_document(&mut XmlCursor::from_xml(xml), &mut store, &mut sink)
///     .await
///     .unwrap();
/// assert_eq!(store.statements(), 0);
/// assert!(sink.is_empty());
/// # }
/// ```
pub async fn import_document(
    cursor: &mut XmlCursor,
    store: &mut dyn Store,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let root = loop {
        match cursor.next_token()? {
            Token::Start(name) => break name,
            Token::Text(_) => {}
            Token::End(_) | Token::Eof => {
                return Err(ImportError::MissingElement {
                    element: "VymennyFormat".to_string(),
                    context: "document".to_string(),
                })
            }
        }
    };

    if !root.is(Namespace::VymennyFormat, "VymennyFormat") {
        return Err(ImportError::UnexpectedRoot(root.to_string()));
    }

    VymennyFormatConvertor::new().convert(cursor, store, sink).await?;

    loop {
        match cursor.next_token()? {
            Token::Eof => return Ok(()),
            Token::Text(_) => {}
            Token::Start(name) | Token::End(name) => {
                return Err(ImportError::UnexpectedRoot(name.to_string()));
            }
        }
    }
}

/// Import one document file into PostgreSQL inside a single transaction.
///
/// The transaction is committed only when the whole document converted
/// successfully; on error it is rolled back when dropped.
pub async fn import_file(
    path: &Path,
    connection: &mut PgConnection,
    sink: &mut dyn DiagnosticSink,
) -> Result<ImportReport> {
    let started = Instant::now();
    let mut cursor = XmlCursor::open(path)?;
    let mut tx = connection.begin().await?;

    let report = import_into(path, &mut cursor, &mut *tx, sink, started).await?;

    tx.commit().await?;
    tracing::info!(
        file = %path.display(),
        statements = report.statements,
        diagnostics = report.diagnostics,
        "Imported document"
    );
    Ok(report)
}

/// Convert one document file without touching any database.
///
/// Every entity is treated as new, so the report counts the statements a
/// first import would issue.
pub async fn dry_run_file(path: &Path, sink: &mut dyn DiagnosticSink) -> Result<ImportReport> {
    let started = Instant::now();
    let mut cursor = XmlCursor::open(path)?;
    let mut store = DryRunStore::new();

    import_into(path, &mut cursor, &mut store, sink, started).await
}

async fn import_into(
    path: &Path,
    cursor: &mut XmlCursor,
    store: &mut dyn Store,
    sink: &mut dyn DiagnosticSink,
    started: Instant,
) -> Result<ImportReport> {
    let diagnostics_before = sink.recorded();
    let mut counting = CountingStore {
        inner: store,
        queries: 0,
        statements: 0,
    };

    import_document(cursor, &mut counting, sink).await?;

    Ok(ImportReport {
        file: path.to_path_buf(),
        queries: counting.queries,
        statements: counting.statements,
        diagnostics: sink.recorded() - diagnostics_before,
        elapsed: started.elapsed(),
    })
}
