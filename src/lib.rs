//! # semwiki-rs: Semantic Wiki Engine
//!
//! Every page ("topic") of the wiki carries one plaintext body, the
//! *wikitext*, that reads as prose and at the same time spells out triples
//! about the topic. This crate keeps the two views of a topic consistent:
//!
//! 1. **Markup is a grammar**: `markup` lexes lines and parses inline markup
//!    into a small AST; nothing in it fails on malformed text
//! 2. **Pure transforms**: `format` extracts triples from text, generates text
//!    from triple deltas, and renders HTML
//! 3. **One decision point**: `reconcile` decides for every edit whether the
//!    text or the triples are authoritative, `validate` vets the result
//! 4. **Trait-first storage**: `GraphStore` is the contract between the wiki
//!    and the triple store; edits replace a topic's triples atomically
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use semwiki::{Iri, Wiki};
//!
//! # async fn example() -> semwiki::Result<()> {
//! let wiki = Wiki::open_memory("http://localhost/").await?;
//! let home = wiki.topic(&Iri::new("http://localhost/Home")?)?;
//!
//! home.set_wikitext(":name->\"John Doe\" :age->42 # :not->:parsed").await?;
//! assert_eq!(home.state().await?.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! | Store | Config | Description |
//! |-------|--------|-------------|
//! | Memory | `StoreConfig::Memory` | In-memory triple store for testing/embedding |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod markup;
pub mod format;
pub mod reconcile;
pub mod validate;
pub mod storage;
pub mod tx;
pub mod topic;
pub mod media;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Iri, BlankNode, Term, Literal, LiteralKind,
    Triple, TripleSet, TripleDiff, TopicScope, Vocab,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{GraphStore, MemoryStore, SubjectInfo};

// ============================================================================
// Re-exports: Transactions and edits
// ============================================================================

pub use tx::{Transaction, TxMode, TxId};
pub use tx::session::{EditMode, EditSession, EditState};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use reconcile::{complete_new_graph, EditPlan};
pub use validate::{check_new_graph, Diagnosis};
pub use topic::{Resource, Topic};
pub use config::{StoreConfig, WikiConfig};

// ============================================================================
// Top-level Wiki handle
// ============================================================================

use model::vocab;

/// The primary entry point. A `Wiki` wraps a graph store and hands out
/// the resources below its root.
pub struct Wiki<S: GraphStore> {
    store: S,
}

impl<S: GraphStore> Wiki<S> {
    /// Wrap an existing store. With `create`, an empty store receives the
    /// root resource.
    pub async fn with_store(store: S, create: bool) -> Result<Self> {
        let wiki = Self { store };
        if create {
            wiki.init().await?;
        }
        Ok(wiki)
    }

    /// The wiki root: every topic lives strictly below it.
    pub fn root(&self) -> &Iri {
        self.store.root()
    }

    /// Access the underlying store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve `uri` to a resource of this wiki.
    ///
    /// The root itself is the wiki resource. A URI strictly below the root
    /// is a topic, whether or not anything was ever stored about it, unless
    /// its local part starts with `@` (reserved for service endpoints).
    pub fn resource(&self, uri: &Iri) -> Option<Resource<'_, S>> {
        if uri == self.root() {
            return Some(Resource::Root);
        }
        let local = uri.local_part(self.root())?;
        if local.starts_with('@') {
            return None;
        }
        let scope = TopicScope::new(self.root().clone(), uri.clone()).ok()?;
        Some(Resource::Topic(Topic::new(&self.store, scope)))
    }

    /// Like [`Wiki::resource`], for callers that expect a topic.
    pub fn topic(&self, uri: &Iri) -> Result<Topic<'_, S>> {
        match self.resource(uri) {
            Some(Resource::Topic(topic)) => Ok(topic),
            Some(Resource::Root) => Err(Error::NotFound(format!("{uri} is the wiki itself, not a topic"))),
            None => Err(Error::NotFound(format!("no topic at {uri}"))),
        }
    }

    /// Triples describing the wiki itself.
    pub async fn root_state(&self) -> Result<TripleSet> {
        let tx = self.store.begin_tx(TxMode::ReadOnly).await?;
        let state = self.store.triples_for(&tx, self.root()).await?;
        self.store.commit_tx(tx).await?;
        Ok(state)
    }

    /// Write the root resource into an empty store.
    async fn init(&self) -> Result<()> {
        let mut tx = self.store.begin_tx(TxMode::ReadWrite).await?;
        if self.store.triple_count(&tx).await? > 0 {
            self.store.rollback_tx(tx).await?;
            return Ok(());
        }
        let root = self.root().clone();
        let home = root.join("Home")?;
        self.store.add(&mut tx, Triple::new(root.clone(), vocab::rdf_type(), Vocab::SemWiki.iri())).await?;
        self.store.add(&mut tx, Triple::new(root.clone(), Vocab::Home.iri(), home)).await?;
        self.store.commit_tx(tx).await?;
        tracing::info!(root = %root, "wiki initialised");
        Ok(())
    }
}

/// In-memory wiki for testing and embedding.
impl Wiki<MemoryStore> {
    /// Build the store described by `config` and open a wiki on it.
    pub async fn open(config: WikiConfig) -> Result<Self> {
        config.validate()?;
        let root = Iri::new(config.root_uri.as_str())?;
        let store = match config.store {
            StoreConfig::Memory => MemoryStore::new(root),
        };
        tracing::info!(root = %config.root_uri, "opening wiki");
        Self::with_store(store, config.create).await
    }

    pub async fn open_memory(root_uri: &str) -> Result<Self> {
        Self::open(WikiConfig::memory(root_uri)).await
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inconsistent data: {0}")]
    InconsistentDataError(String),

    #[error("Unsupported subject: {0}")]
    UnsupportedSubjectError(String),

    #[error("Cardinality error: {0}")]
    CardinalityError(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperationError(String),

    #[error("Invalid data: {0}")]
    InvalidDataError(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Transaction error: {0}")]
    TxError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
