//! # Graph Store Trait
//!
//! This is THE contract between the wiki and any triple store.
//! Triples are partitioned by subject; a topic edit replaces one subject's
//! triples as a unit.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Iri, Triple, TripleSet};
use crate::tx::{Transaction, TxMode};
use crate::Result;

pub use memory::MemoryStore;

// ============================================================================
// Subject metadata
// ============================================================================

/// Bookkeeping a store keeps per subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    /// Bumped on every committed change to the subject's triples.
    pub revision: u64,
    pub modified: DateTime<Utc>,
    pub triple_count: usize,
}

// ============================================================================
// GraphStore Trait
// ============================================================================

/// The universal storage contract.
///
/// Reads inside a transaction see that transaction's own writes. Nothing a
/// transaction writes is visible to others before `commit_tx`, and
/// `rollback_tx` leaves the store as it was.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    /// The transaction type for this store.
    type Tx: Transaction;

    /// The root IRI `:name` references are expanded against.
    fn root(&self) -> &Iri;

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Begin a new transaction.
    async fn begin_tx(&self, mode: TxMode) -> Result<Self::Tx>;

    /// Commit a transaction, applying its writes atomically.
    async fn commit_tx(&self, tx: Self::Tx) -> Result<()>;

    /// Roll back a transaction, discarding its writes.
    async fn rollback_tx(&self, tx: Self::Tx) -> Result<()>;

    // ========================================================================
    // Triples
    // ========================================================================

    /// Add a triple. Its subject must be an IRI.
    async fn add(&self, tx: &mut Self::Tx, triple: Triple) -> Result<()>;

    /// Remove a triple. Returns true if it existed.
    async fn remove(&self, tx: &mut Self::Tx, triple: &Triple) -> Result<bool>;

    /// All triples whose subject is `subject`.
    async fn triples_for(&self, tx: &Self::Tx, subject: &Iri) -> Result<TripleSet>;

    /// Make `triples` the complete set of triples about `subject`.
    /// Fails if any of them is about another subject.
    async fn replace_subject(
        &self,
        tx: &mut Self::Tx,
        subject: &Iri,
        triples: TripleSet,
    ) -> Result<()>;

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Every subject with at least one triple, in IRI order.
    async fn subjects(&self, tx: &Self::Tx) -> Result<Vec<Iri>>;

    async fn triple_count(&self, tx: &Self::Tx) -> Result<u64>;

    /// Committed metadata for `subject`, if anything is stored about it.
    async fn subject_info(&self, tx: &Self::Tx, subject: &Iri) -> Result<Option<SubjectInfo>>;
}
