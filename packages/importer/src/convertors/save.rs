//! Generic save converter: one record per element, written with an
//! existence-checked insert or update.

use async_trait::async_trait;

use super::convertor::Convertor;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ImportError, Result};
use crate::store::{SqlValue, Store};
use crate::xml::{ElementName, Namespace, XmlCursor};

/// How a finished record reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Run `exists` bound to the identity key, then `update` or insert.
    Upsert {
        exists: &'static str,
        update: &'static str,
    },
    /// Always insert. Used for records owned by a parent record, whose rows
    /// live and die with the parent row.
    AlwaysInsert,
}

/// SQL statements of one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statements {
    pub insert: &'static str,
    pub mode: WriteMode,
}

/// Statement a parameter list is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Insert,
    Update,
}

/// Entity-specific steps plugged into [`SaveConvertor`].
#[async_trait]
pub trait SaveEntity: Send + Sync {
    /// In-memory record, created fresh for every element.
    type Record: Default + Send + Sync;

    /// Namespace of the record's child elements. Children in any other
    /// namespace are reported and skipped by the converter.
    const NAMESPACE: Namespace;

    /// Local name of the element holding one record.
    const ELEMENT: &'static str;

    const STATEMENTS: Statements;

    /// Process one child element in [`Self::NAMESPACE`].
    ///
    /// Must consume the child up to its closing tag: read its text, hand it
    /// to a nested converter, or skip it (reporting unknown names).
    async fn process_element(
        &self,
        element: &ElementName,
        record: &mut Self::Record,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()>;

    /// Parameters of the insert or update statement.
    fn fill(&self, record: &Self::Record, statement: Statement) -> Result<Vec<SqlValue>>;

    /// Parameters of the existence query.
    fn fill_exists(&self, record: &Self::Record) -> Result<Vec<SqlValue>>;
}

/// Converter running the accumulate-then-write algorithm for one entity.
pub struct SaveConvertor<E> {
    entity: E,
}

impl<E: SaveEntity> SaveConvertor<E> {
    pub fn new(entity: E) -> Self {
        Self { entity }
    }

    async fn save(&self, record: &E::Record, store: &mut dyn Store) -> Result<()> {
        let statements = E::STATEMENTS;

        let statement = match statements.mode {
            WriteMode::AlwaysInsert => Statement::Insert,
            WriteMode::Upsert { exists, .. } => {
                let key = self.entity.fill_exists(record)?;
                if store.exists(exists, &key).await? {
                    Statement::Update
                } else {
                    Statement::Insert
                }
            }
        };

        let sql = match (statement, statements.mode) {
            (Statement::Update, WriteMode::Upsert { update, .. }) => update,
            _ => statements.insert,
        };

        tracing::trace!(element = E::ELEMENT, ?statement, "Writing record");
        let params = self.entity.fill(record, statement)?;
        store.execute(sql, &params).await?;
        Ok(())
    }
}

#[async_trait]
impl<E: SaveEntity> Convertor for SaveConvertor<E> {
    async fn convert(
        &self,
        cursor: &mut XmlCursor,
        store: &mut dyn Store,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let depth = cursor.depth();
        let mut record = E::Record::default();

        while let Some(child) = cursor.next_child(depth)? {
            if child.namespace() == Some(E::NAMESPACE) {
                self.entity
                    .process_element(&child, &mut record, cursor, store, sink)
                    .await?;
            } else {
                cursor.skip_unknown(sink)?;
            }
        }

        self.save(&record, store).await
    }
}

/// Place the identity key where the statement expects it: first for inserts,
/// last (the `WHERE` clause) for updates.
pub fn with_key(statement: Statement, key: SqlValue, mut fields: Vec<SqlValue>) -> Vec<SqlValue> {
    match statement {
        Statement::Insert => fields.insert(0, key),
        Statement::Update => fields.push(key),
    }
    fields
}

/// Unwrap a field that must have been read before it is needed.
pub fn require<T>(value: Option<T>, element: &str, context: &str) -> Result<T> {
    value.ok_or_else(|| ImportError::MissingElement {
        element: element.to_string(),
        context: context.to_string(),
    })
}
