//! Resources of a wiki: the wiki root and the topics below it.

use crate::model::{vocab, Iri, Term, TopicScope, TripleSet};
use crate::storage::{GraphStore, SubjectInfo};
use crate::tx::session::{EditMode, EditSession};
use crate::tx::TxMode;
use crate::{Error, Result};

/// What a URI below a wiki designates.
pub enum Resource<'w, S: GraphStore> {
    /// The wiki itself.
    Root,
    Topic(Topic<'w, S>),
}

/// Handle on one topic.
///
/// Topics exist implicitly: a topic nothing was ever stored about shows a
/// placeholder wikitext and is created by its first edit.
pub struct Topic<'w, S: GraphStore> {
    store: &'w S,
    scope: TopicScope,
}

impl<'w, S: GraphStore> Topic<'w, S> {
    pub(crate) fn new(store: &'w S, scope: TopicScope) -> Self {
        Self { store, scope }
    }

    pub fn uri(&self) -> &Iri {
        self.scope.topic()
    }

    pub fn scope(&self) -> &TopicScope {
        &self.scope
    }

    /// The topic's triples, or the placeholder state if none are stored.
    pub async fn state(&self) -> Result<TripleSet> {
        let tx = self.store.begin_tx(TxMode::ReadOnly).await?;
        let stored = self.store.triples_for(&tx, self.uri()).await?;
        self.store.commit_tx(tx).await?;
        Ok(self.scope.fill_state(stored))
    }

    /// Whether anything is stored about the topic.
    pub async fn exists(&self) -> Result<bool> {
        Ok(self.info().await?.is_some())
    }

    pub async fn info(&self) -> Result<Option<SubjectInfo>> {
        let tx = self.store.begin_tx(TxMode::ReadOnly).await?;
        let info = self.store.subject_info(&tx, self.uri()).await?;
        self.store.commit_tx(tx).await?;
        Ok(info)
    }

    pub async fn wikitext(&self) -> Result<String> {
        let state = self.state().await?;
        match state.value(&self.scope.subject(), &vocab::wikitext()) {
            Some(Term::Literal(lit)) => Ok(lit.lexical().to_string()),
            Some(other) => Err(Error::InvalidDataError(format!("wikitext of {} is {other}", self.uri()))),
            None => Ok(String::new()),
        }
    }

    /// Open an edit session on the topic.
    pub async fn begin_edit(&self, mode: EditMode) -> Result<EditSession<'w, S>> {
        EditSession::begin(self.store, self.scope.clone(), mode).await
    }

    /// Run `f` against a working copy and commit it.
    pub async fn edit<F>(&self, mode: EditMode, f: F) -> Result<TripleSet>
    where
        F: FnOnce(&mut EditSession<'w, S>),
    {
        let mut session = self.begin_edit(mode).await?;
        f(&mut session);
        session.commit().await
    }

    /// Replace the wikitext; the triples follow from it.
    pub async fn set_wikitext(&self, text: impl Into<String>) -> Result<TripleSet> {
        let text = text.into();
        self.edit(EditMode::Clear, move |s| s.set_wikitext(text)).await
    }

    /// Replace the topic's whole state with `graph`.
    pub async fn put_graph(&self, graph: TripleSet) -> Result<TripleSet> {
        self.edit(EditMode::Clear, move |s| s.working_mut().extend(graph)).await
    }

    /// Topics are only ever created by replacing their state.
    pub async fn post_graph(&self, _graph: TripleSet) -> Result<TripleSet> {
        Err(Error::UnsupportedOperationError(format!(
            "{} can not be created by POST, PUT its state instead",
            self.uri()
        )))
    }

    pub async fn delete(&self) -> Result<()> {
        Err(Error::UnsupportedOperationError(format!("{} can not be deleted", self.uri())))
    }
}
