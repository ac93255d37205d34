//! Slim mode: reduce each model family to its most relevant variants.
//!
//! This is best-effort curation to keep the distributed dataset small, not a
//! complete catalog. Within a family at most two models survive: one
//! latest-classified model and one other. Family-less models survive only when
//! they are latest-classified or tier max/pro.

use std::{cmp::Ordering, collections::BTreeMap};

use crate::store::{Model, Tier};

/// Apply slim mode to a provider's models. Output order is unspecified.
pub fn simplify_families(models: Vec<Model>) -> Vec<Model> {
    let mut families: BTreeMap<String, Vec<Model>> = BTreeMap::new();
    let mut kept = Vec::new();

    for model in models {
        if let Some(family) = model.family_key().map(str::to_string) {
            families.entry(family).or_default().push(model);
        } else if model.is_latest_like() || matches!(model.tier, Tier::Max | Tier::Pro) {
            kept.push(model);
        }
    }

    for (family, group) in families {
        let size = group.len();
        let representatives = select_representatives(group);
        if representatives.len() < size {
            tracing::trace!(
                family = %family,
                before = size,
                after = representatives.len(),
                "Reduced model family"
            );
        }
        kept.extend(representatives);
    }

    kept
}

/// Latest first, then newest release date (dated before undated), then tier rank.
fn family_order(a: &Model, b: &Model) -> Ordering {
    b.is_latest
        .cmp(&a.is_latest)
        .then_with(|| match (&a.release_date, &b.release_date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.tier.rank().cmp(&b.tier.rank()))
}

/// Pick at most two models from one family.
///
/// The first latest-classified and the first other model are kept. A family
/// with no latest-classified member keeps its first two models in sorted order.
fn select_representatives(mut group: Vec<Model>) -> Vec<Model> {
    group.sort_by(family_order);
    let group_has_latest = group.iter().any(Model::is_latest_like);

    let mut kept = Vec::with_capacity(2);
    let mut has_latest = false;
    let mut has_other = false;

    for model in group {
        let latest = model.is_latest_like();
        if latest && !has_latest {
            has_latest = true;
            kept.push(model);
        } else if !latest && !has_other {
            has_other = true;
            kept.push(model);
        } else if !group_has_latest {
            kept.push(model);
        }

        if (has_latest && has_other) || kept.len() >= 2 {
            break;
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Capabilities;

    fn model(id: &str, family: Option<&str>, date: Option<&str>, tier: Tier) -> Model {
        Model {
            id: id.to_string(),
            name: id.to_string(),
            family: family.map(str::to_string),
            tier,
            capabilities: Capabilities::default(),
            pricing: None,
            limits: None,
            status: "active".to_string(),
            release_date: date.map(str::to_string),
            is_latest: id.contains("latest"),
            description: None,
            description_zh: None,
        }
    }

    fn ids(models: &[Model]) -> Vec<&str> {
        let mut ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_family_capped_at_two_with_latest_included() {
        let models = vec![
            model("opus-2024-01", Some("opus"), Some("2024-01-01"), Tier::Max),
            model("opus-2024-06", Some("opus"), Some("2024-06-01"), Tier::Max),
            model("opus-latest", Some("opus"), None, Tier::Max),
            model("opus-2023-03", Some("opus"), Some("2023-03-01"), Tier::Max),
            model("opus-2025-02", Some("opus"), Some("2025-02-01"), Tier::Max),
        ];

        let kept = simplify_families(models);
        assert_eq!(kept.len(), 2);
        assert_eq!(ids(&kept), vec!["opus-2025-02", "opus-latest"]);
    }

    #[test]
    fn test_family_without_latest_keeps_two_newest() {
        let models = vec![
            model("a-1", Some("a"), Some("2024-01-01"), Tier::Pro),
            model("a-3", Some("a"), Some("2024-03-01"), Tier::Pro),
            model("a-2", Some("a"), Some("2024-02-01"), Tier::Pro),
        ];

        let kept = simplify_families(models);
        assert_eq!(ids(&kept), vec!["a-2", "a-3"]);
    }

    #[test]
    fn test_family_of_only_latest_models_keeps_one() {
        let models = vec![
            model("x-latest", Some("x"), Some("2024-01-01"), Tier::Pro),
            model("x-preview-latest", Some("x"), Some("2024-05-01"), Tier::Pro),
        ];

        let kept = simplify_families(models);
        assert_eq!(ids(&kept), vec!["x-preview-latest"]);
    }

    #[test]
    fn test_single_member_family_kept() {
        let kept = simplify_families(vec![model("solo", Some("s"), None, Tier::Mini)]);
        assert_eq!(ids(&kept), vec!["solo"]);
    }

    #[test]
    fn test_latest_by_name_counts_as_latest() {
        let mut named = model("gpt-x", Some("gpt"), Some("2023-01-01"), Tier::Pro);
        named.name = "GPT X (Latest)".into();
        let models = vec![
            named,
            model("gpt-y", Some("gpt"), Some("2024-01-01"), Tier::Pro),
            model("gpt-z", Some("gpt"), Some("2024-06-01"), Tier::Pro),
        ];

        let kept = simplify_families(models);
        assert_eq!(ids(&kept), vec!["gpt-x", "gpt-z"]);
    }

    #[test]
    fn test_undated_sorts_after_dated_then_by_tier() {
        let models = vec![
            model("m-mini", Some("m"), None, Tier::Mini),
            model("m-max", Some("m"), None, Tier::Max),
            model("m-dated", Some("m"), Some("2020-01-01"), Tier::Mini),
        ];

        let kept = simplify_families(models);
        assert_eq!(ids(&kept), vec!["m-dated", "m-max"]);
    }

    #[test]
    fn test_familyless_models_filtered_by_tier_and_latest() {
        let models = vec![
            model("big", None, None, Tier::Max),
            model("mid", None, None, Tier::Pro),
            model("tiny", None, None, Tier::Mini),
            model("tiny-latest", None, None, Tier::Mini),
            model("empty-family", Some(""), None, Tier::Mini),
        ];

        let kept = simplify_families(models);
        assert_eq!(ids(&kept), vec!["big", "mid", "tiny-latest"]);
    }

    #[test]
    fn test_family_order_comparator() {
        let latest = model("f-latest", Some("f"), None, Tier::Mini);
        let dated = model("f-1", Some("f"), Some("2024-01-01"), Tier::Mini);
        assert_eq!(family_order(&latest, &dated), Ordering::Less);

        let newer = model("f-2", Some("f"), Some("2024-02-01"), Tier::Mini);
        assert_eq!(family_order(&newer, &dated), Ordering::Less);

        let max = model("f-max", Some("f"), Some("2024-01-01"), Tier::Max);
        assert_eq!(family_order(&max, &dated), Ordering::Less);
    }
}
