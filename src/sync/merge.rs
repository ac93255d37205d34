//! Carry curated annotations forward across syncs.
//!
//! The merge is destructive: the result contains exactly the freshly converted
//! models. Models that only exist in the stored document are dropped without
//! warning, so the store reflects the latest fetch plus curated text.

use crate::store::{CuratedIndex, Model};

/// Merge curated fields from `stored` into `fresh`, matching models by id.
///
/// `description` is carried over only when the fresh model has none;
/// `description_zh` is always taken from the stored model.
pub fn merge_curated_fields(fresh: Vec<Model>, stored: &CuratedIndex) -> Vec<Model> {
    fresh
        .into_iter()
        .map(|mut model| {
            if let Some(previous) = stored.get(&model.id) {
                if model.description.is_none() {
                    model.description = previous.description.clone();
                }
                model.description_zh = previous.description_zh.clone();
            }
            model
        })
        .collect()
}
