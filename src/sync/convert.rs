//! Conversion from upstream catalog records to store models.

use std::collections::{BTreeMap, btree_map::Entry};

use super::tier::classify_tier;
use crate::{
    catalog::{CatalogLimit, CatalogModel, CatalogProvider},
    store::{Capabilities, DEFAULT_STATUS, Limits, Model, PRICING_CURRENCY, Pricing, ProviderInfo},
};

/// Convert one upstream model record.
///
/// `key` is the record's key in the upstream model map and stands in for the
/// id when the record omits one. Streaming and JSON mode are always reported
/// as supported; upstream has no reliable flag for either.
pub fn convert_model(key: &str, model: &CatalogModel) -> Model {
    let id = if model.id.is_empty() { key } else { model.id.as_str() };
    let name = if model.name.is_empty() { id } else { model.name.as_str() };

    let vision = model
        .modalities
        .input
        .iter()
        .any(|m| m == "image" || m == "video")
        || model.attachment;

    Model {
        id: id.to_string(),
        name: name.to_string(),
        family: model.family.clone(),
        tier: classify_tier(id, name),
        capabilities: Capabilities {
            vision,
            tools: model.tool_call,
            streaming: true,
            json_mode: true,
            function_calling: model.tool_call,
            reasoning: model.reasoning,
        },
        pricing: model.cost.as_ref().map(|cost| Pricing {
            input: cost.input,
            output: cost.output,
            cache_read: cost.cache_read,
            cache_write: cost.cache_write,
            currency: PRICING_CURRENCY.to_string(),
        }),
        limits: model.limit.as_ref().and_then(convert_limits),
        status: model
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        release_date: model.release_date.clone(),
        is_latest: id.contains("latest"),
        description: None,
        description_zh: None,
    }
}

/// Zero figures are treated as missing.
fn convert_limits(limit: &CatalogLimit) -> Option<Limits> {
    let context = limit.context.filter(|&c| c > 0);
    let max_output = limit.output.filter(|&o| o > 0);

    if context.is_none() && max_output.is_none() {
        return None;
    }

    Some(Limits {
        context,
        max_output,
    })
}

/// Convert every model of a provider, keyed by model id so ids stay unique.
///
/// Records are visited in key order. When several records share an id, the
/// one stored under its own id wins; otherwise the first key wins. Output is
/// in id order; callers apply the presentation order.
pub fn convert_models(provider: &CatalogProvider) -> Vec<Model> {
    let mut records: Vec<_> = provider.models.iter().collect();
    records.sort_by(|a, b| a.0.cmp(b.0));

    let mut by_id: BTreeMap<String, (bool, Model)> = BTreeMap::new();
    for (key, record) in records {
        let model = convert_model(key, record);
        let canonical = model.id == *key;
        match by_id.entry(model.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert((canonical, model));
            }
            Entry::Occupied(mut slot) => {
                tracing::debug!(
                    provider = %provider.id,
                    model = %model.id,
                    key = %key,
                    "Duplicate model id in upstream catalog, keeping one record"
                );
                if canonical && !slot.get().0 {
                    slot.insert((canonical, model));
                }
            }
        }
    }
    by_id.into_values().map(|(_, model)| model).collect()
}

pub fn convert_provider_info(provider: &CatalogProvider) -> ProviderInfo {
    ProviderInfo {
        id: provider.id.clone(),
        name: provider.name.clone(),
        api: provider.api.clone(),
        npm: provider.npm.clone(),
        doc: provider.doc.clone(),
    }
}
