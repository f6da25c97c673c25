//! Edit sessions: one scoped, all-or-nothing edit of a topic.
//!
//! ```text
//! Collecting ──commit──▶ Reconciling ──ok──▶ Committed
//!     │                       └──error──▶ Rejected
//!     └──abort──▶ Rejected
//! ```
//!
//! Nothing reaches the store before reconciliation and validation pass; the
//! topic's triples are then replaced in one store transaction.

use crate::model::{Iri, Literal, Term, TopicScope, Triple, TripleSet};
use crate::model::vocab;
use crate::reconcile::complete_new_graph;
use crate::storage::GraphStore;
use crate::tx::TxMode;
use crate::validate::check_new_graph;
use crate::{Error, Result};

/// What the working copy starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// The topic's current state.
    Keep,
    /// Nothing: the edit supplies the whole new state.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Collecting,
    Reconciling,
    Committed,
    Rejected,
}

/// Edit session handle. Dropping it before `commit` discards the edit.
pub struct EditSession<'w, S: GraphStore> {
    store: &'w S,
    scope: TopicScope,
    tx: Option<S::Tx>,
    stored: TripleSet,
    working: TripleSet,
    state: EditState,
}

impl<'w, S: GraphStore> EditSession<'w, S> {
    pub(crate) async fn begin(store: &'w S, scope: TopicScope, mode: EditMode) -> Result<Self> {
        let tx = store.begin_tx(TxMode::ReadWrite).await?;
        let stored = scope.fill_state(store.triples_for(&tx, scope.topic()).await?);
        let working = match mode {
            EditMode::Keep => stored.clone(),
            EditMode::Clear => TripleSet::new(),
        };
        tracing::debug!(topic = %scope.topic(), ?mode, "edit session started");
        Ok(Self { store, scope, tx: Some(tx), stored, working, state: EditState::Collecting })
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn scope(&self) -> &TopicScope {
        &self.scope
    }

    /// The topic's state when the session began.
    pub fn stored(&self) -> &TripleSet {
        &self.stored
    }

    /// The candidate state being collected.
    pub fn working(&self) -> &TripleSet {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut TripleSet {
        &mut self.working
    }

    /// Add `(topic, predicate, object)` to the working copy.
    pub fn insert(&mut self, predicate: Iri, object: impl Into<Term>) {
        let triple = Triple::new(self.scope.subject(), predicate, object);
        self.working.insert(triple);
    }

    /// Make `text` the single wikitext of the working copy.
    pub fn set_wikitext(&mut self, text: impl Into<String>) {
        self.working.set(
            self.scope.subject(),
            vocab::wikitext(),
            Term::Literal(Literal::string(text)),
        );
    }

    /// Reconcile, validate, and store the working copy.
    ///
    /// Returns the state that was stored. On error the store is untouched
    /// and the session is `Rejected`.
    pub async fn commit(&mut self) -> Result<TripleSet> {
        if self.state != EditState::Collecting {
            return Err(Error::TxError(format!("edit session is {:?}", self.state)));
        }
        let mut tx = self
            .tx
            .take()
            .ok_or_else(|| Error::TxError("edit session has no transaction".into()))?;
        self.state = EditState::Reconciling;

        let outcome = match self.reconcile() {
            Ok(()) => self
                .store
                .replace_subject(&mut tx, self.scope.topic(), self.working.clone())
                .await,
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            self.state = EditState::Rejected;
            tracing::warn!(topic = %self.scope.topic(), error = %e, "edit rejected");
            self.store.rollback_tx(tx).await?;
            return Err(e);
        }

        self.store.commit_tx(tx).await?;
        self.state = EditState::Committed;
        tracing::info!(topic = %self.scope.topic(), triples = self.working.len(), "edit committed");
        Ok(self.working.clone())
    }

    /// Give up the edit.
    pub async fn abort(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            self.store.rollback_tx(tx).await?;
        }
        self.state = EditState::Rejected;
        Ok(())
    }

    fn reconcile(&mut self) -> Result<()> {
        complete_new_graph(&self.scope, &self.stored, &mut self.working)?;
        check_new_graph(&self.scope, &self.working)
    }
}
