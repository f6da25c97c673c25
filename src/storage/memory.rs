//! In-memory triple store.
//!
//! This is the reference implementation of `GraphStore`.
//! Committed triples live in one map keyed by subject, behind an RwLock.
//!
//! ## Transactions
//!
//! A `MemoryTx` stages the full new state of every subject it touches.
//! Reads inside the transaction see the stage; `commit_tx()` swaps all
//! staged subjects in under a single write lock, `rollback_tx()` (or
//! dropping the transaction) throws the stage away.
//!
//! Two transactions touching the same subject are not detected: the later
//! commit wins. Edits to one topic are expected to be serialised by the
//! caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::{Iri, Term, Triple, TripleSet};
use crate::tx::{Transaction, TxId, TxMode};
use crate::{Error, Result};
use super::{GraphStore, SubjectInfo};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory triple storage.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    root: Iri,
    subjects: RwLock<HashMap<Iri, SubjectEntry>>,
    next_tx_id: AtomicU64,
}

struct SubjectEntry {
    triples: TripleSet,
    revision: u64,
    modified: DateTime<Utc>,
}

impl SubjectEntry {
    fn info(&self) -> SubjectInfo {
        SubjectInfo {
            revision: self.revision,
            modified: self.modified,
            triple_count: self.triples.len(),
        }
    }
}

impl MemoryStore {
    pub fn new(root: Iri) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                root,
                subjects: RwLock::new(HashMap::new()),
                next_tx_id: AtomicU64::new(1),
            }),
        }
    }

    /// Committed triples about `subject`.
    fn committed(&self, subject: &Iri) -> TripleSet {
        self.inner
            .subjects
            .read()
            .get(subject)
            .map(|e| e.triples.clone())
            .unwrap_or_default()
    }

    /// The subject's staged state, staging the committed one on first touch.
    fn stage<'t>(&self, tx: &'t mut MemoryTx, subject: &Iri) -> Result<&'t mut TripleSet> {
        if tx.is_read_only() {
            return Err(Error::TxError(format!("{} is read-only", tx.id)));
        }
        Ok(tx
            .staged
            .entry(subject.clone())
            .or_insert_with(|| self.committed(subject)))
    }
}

fn subject_iri(triple: &Triple) -> Result<&Iri> {
    match &triple.subject {
        Term::Iri(iri) => Ok(iri),
        other => Err(Error::StorageError(format!("subject {other} is not an IRI"))),
    }
}

// ============================================================================
// MemoryTx
// ============================================================================

/// In-memory transaction: an id, a mode, and the staged subjects.
pub struct MemoryTx {
    id: TxId,
    mode: TxMode,
    staged: HashMap<Iri, TripleSet>,
}

impl MemoryTx {
    fn read(&self, store: &MemoryStore, subject: &Iri) -> TripleSet {
        match self.staged.get(subject) {
            Some(staged) => staged.clone(),
            None => store.committed(subject),
        }
    }
}

impl Transaction for MemoryTx {
    fn mode(&self) -> TxMode { self.mode }
    fn id(&self) -> TxId { self.id }
}

// ============================================================================
// GraphStore impl
// ============================================================================

#[async_trait]
impl GraphStore for MemoryStore {
    type Tx = MemoryTx;

    fn root(&self) -> &Iri {
        &self.inner.root
    }

    async fn begin_tx(&self, mode: TxMode) -> Result<MemoryTx> {
        let id = TxId(self.inner.next_tx_id.fetch_add(1, Ordering::Relaxed));
        Ok(MemoryTx { id, mode, staged: HashMap::new() })
    }

    async fn commit_tx(&self, tx: MemoryTx) -> Result<()> {
        if tx.staged.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let mut subjects = self.inner.subjects.write();
        let touched = tx.staged.len();
        for (subject, triples) in tx.staged {
            if triples.is_empty() {
                subjects.remove(&subject);
                continue;
            }
            let entry = subjects.entry(subject).or_insert_with(|| SubjectEntry {
                triples: TripleSet::new(),
                revision: 0,
                modified: now,
            });
            if entry.triples != triples {
                entry.triples = triples;
                entry.revision += 1;
                entry.modified = now;
            }
        }
        tracing::debug!(tx = %tx.id, subjects = touched, "transaction committed");
        Ok(())
    }

    async fn rollback_tx(&self, tx: MemoryTx) -> Result<()> {
        tracing::debug!(tx = %tx.id, discarded = tx.staged.len(), "transaction rolled back");
        Ok(())
    }

    async fn add(&self, tx: &mut MemoryTx, triple: Triple) -> Result<()> {
        let subject = subject_iri(&triple)?.clone();
        self.stage(tx, &subject)?.insert(triple);
        Ok(())
    }

    async fn remove(&self, tx: &mut MemoryTx, triple: &Triple) -> Result<bool> {
        let subject = subject_iri(triple)?;
        Ok(self.stage(tx, subject)?.remove(triple))
    }

    async fn triples_for(&self, tx: &MemoryTx, subject: &Iri) -> Result<TripleSet> {
        Ok(tx.read(self, subject))
    }

    async fn replace_subject(
        &self,
        tx: &mut MemoryTx,
        subject: &Iri,
        triples: TripleSet,
    ) -> Result<()> {
        let subject_term = Term::Iri(subject.clone());
        if let Some(stray) = triples.iter().find(|t| t.subject != subject_term) {
            return Err(Error::StorageError(format!("{stray} is not about {subject}")));
        }
        *self.stage(tx, subject)? = triples;
        Ok(())
    }

    async fn subjects(&self, tx: &MemoryTx) -> Result<Vec<Iri>> {
        let mut all: Vec<Iri> = self.inner.subjects.read().keys().cloned().collect();
        all.retain(|s| !tx.staged.contains_key(s));
        all.extend(
            tx.staged
                .iter()
                .filter(|(_, triples)| !triples.is_empty())
                .map(|(s, _)| s.clone()),
        );
        all.sort();
        Ok(all)
    }

    async fn triple_count(&self, tx: &MemoryTx) -> Result<u64> {
        let subjects = self.inner.subjects.read();
        let committed: usize = subjects
            .iter()
            .filter(|(s, _)| !tx.staged.contains_key(*s))
            .map(|(_, e)| e.triples.len())
            .sum();
        let staged: usize = tx.staged.values().map(TripleSet::len).sum();
        Ok((committed + staged) as u64)
    }

    async fn subject_info(&self, _tx: &MemoryTx, subject: &Iri) -> Result<Option<SubjectInfo>> {
        Ok(self.inner.subjects.read().get(subject).map(SubjectEntry::info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn iri(s: &str) -> Iri {
        Iri::new(s).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new(iri("http://localhost/"))
    }

    fn t(subject: &str, pred: &str, value: i64) -> Triple {
        Triple::new(iri(subject), iri(pred), Literal::integer(value))
    }

    #[tokio::test]
    async fn test_add_and_read_back() {
        let db = store();
        let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        db.add(&mut tx, t("http://localhost/A", "http://localhost/p", 1)).await.unwrap();
        db.add(&mut tx, t("http://localhost/B", "http://localhost/p", 2)).await.unwrap();

        let a = db.triples_for(&tx, &iri("http://localhost/A")).await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(db.triple_count(&tx).await.unwrap(), 2);
        db.commit_tx(tx).await.unwrap();

        let tx = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        assert_eq!(db.subjects(&tx).await.unwrap(), vec![iri("http://localhost/A"), iri("http://localhost/B")]);
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_invisible() {
        let db = store();
        let mut writer = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        db.add(&mut writer, t("http://localhost/A", "http://localhost/p", 1)).await.unwrap();

        let reader = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        assert_eq!(db.triple_count(&reader).await.unwrap(), 0);
        db.commit_tx(writer).await.unwrap();
        assert_eq!(db.triple_count(&reader).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_stage() {
        let db = store();
        let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        db.add(&mut tx, t("http://localhost/A", "http://localhost/p", 1)).await.unwrap();
        db.rollback_tx(tx).await.unwrap();

        let tx = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        assert_eq!(db.triple_count(&tx).await.unwrap(), 0);
        assert!(db.subject_info(&tx, &iri("http://localhost/A")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_only_tx_rejects_writes() {
        let db = store();
        let mut tx = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        let result = db.add(&mut tx, t("http://localhost/A", "http://localhost/p", 1)).await;
        assert!(matches!(result, Err(Error::TxError(_))));
    }

    #[tokio::test]
    async fn test_replace_subject_bumps_revision() {
        let db = store();
        let a = iri("http://localhost/A");
        for value in [1, 2, 2] {
            let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
            let triples = [t("http://localhost/A", "http://localhost/p", value)].into_iter().collect();
            db.replace_subject(&mut tx, &a, triples).await.unwrap();
            db.commit_tx(tx).await.unwrap();
        }
        let tx = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        let info = db.subject_info(&tx, &a).await.unwrap().unwrap();
        assert_eq!(info.revision, 2);
        assert_eq!(info.triple_count, 1);
    }

    #[tokio::test]
    async fn test_replace_subject_rejects_other_subjects() {
        let db = store();
        let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        let triples = [t("http://localhost/B", "http://localhost/p", 1)].into_iter().collect();
        let result = db.replace_subject(&mut tx, &iri("http://localhost/A"), triples).await;
        assert!(matches!(result, Err(Error::StorageError(_))));
    }

    #[tokio::test]
    async fn test_emptied_subject_disappears() {
        let db = store();
        let triple = t("http://localhost/A", "http://localhost/p", 1);
        let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        db.add(&mut tx, triple.clone()).await.unwrap();
        db.commit_tx(tx).await.unwrap();

        let mut tx = db.begin_tx(TxMode::ReadWrite).await.unwrap();
        assert!(db.remove(&mut tx, &triple).await.unwrap());
        assert!(!db.remove(&mut tx, &triple).await.unwrap());
        db.commit_tx(tx).await.unwrap();

        let tx = db.begin_tx(TxMode::ReadOnly).await.unwrap();
        assert!(db.subjects(&tx).await.unwrap().is_empty());
    }
}
