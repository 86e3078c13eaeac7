// src/index/lifecycle.rs

//! Index lifecycle management.
//!
//! Each edition gets a fresh, empty index before loading: delete the old
//! one if present, then create it with the document schema. Either step
//! failing aborts that edition, since an edition without an index cannot
//! accept writes.

use crate::error::{AppError, Result};

use super::SearchIndex;

/// Ensure a fresh, empty index exists under this name.
pub async fn prepare_index(backend: &dyn SearchIndex, index_name: &str) -> Result<()> {
    let exists = backend
        .exists(index_name)
        .await
        .map_err(|e| AppError::lifecycle(index_name, e))?;

    if exists {
        backend
            .delete(index_name)
            .await
            .map_err(|e| AppError::lifecycle(index_name, e))?;
        log::info!("Deleted existing index: {}", index_name);
    }

    backend
        .create(index_name)
        .await
        .map_err(|e| AppError::lifecycle(index_name, e))?;
    log::info!("Created index: {}", index_name);

    Ok(())
}
