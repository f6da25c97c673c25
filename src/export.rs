//! N-Triples export: dump every stored triple.
//!
//! ```text
//! GraphStore → export_ntriples() → one `<s> <p> o .` line per triple
//!   → load into any RDF store, or diff two dumps
//! ```

use std::io::Write;

use crate::storage::GraphStore;
use crate::tx::TxMode;
use crate::Result;

/// Export the whole store as N-Triples.
///
/// Subjects come out in IRI order, each subject's triples in set order, so
/// two dumps of the same state are byte-identical.
pub async fn export_ntriples<S: GraphStore>(store: &S, writer: &mut dyn Write) -> Result<()> {
    let tx = store.begin_tx(TxMode::ReadOnly).await?;

    // Header
    writeln!(writer, "# semwiki-rs N-Triples dump")?;
    writeln!(writer, "# Root: {}", store.root().as_str())?;
    writeln!(writer, "# Triples: {}", store.triple_count(&tx).await?)?;

    for subject in store.subjects(&tx).await? {
        for triple in store.triples_for(&tx, &subject).await?.iter() {
            writeln!(writer, "{triple}")?;
        }
    }

    store.commit_tx(tx).await?;
    Ok(())
}
