//! Validate every collection

use anyhow::{Context, Result};

use crate::content::loader::COLLECTIONS;
use crate::Folio;

/// Load every known collection, returning `(name, entry count)` pairs
pub fn run(folio: &Folio) -> Result<Vec<(&'static str, usize)>> {
    let store = folio.store();
    let mut counts = Vec::with_capacity(COLLECTIONS.len());

    for &name in COLLECTIONS {
        let collection = store
            .load_collection(name)
            .with_context(|| format!("Collection `{}` failed validation", name))?;
        tracing::debug!("Collection `{}` is valid", name);
        counts.push((name, collection.len()));
    }

    Ok(counts)
}
