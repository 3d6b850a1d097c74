//! Conjunctive (AND) membership filter over the resort/service association.

use crate::domain::model::{ResortId, ResortServiceLink, ServiceId};
use crate::domain::ports::ResortStore;
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};

/// 回傳同時提供所有指定設施的度假村 id
///
/// An empty request yields an empty result without touching the store.
pub async fn filter_by_all_services<S: ResortStore>(
    store: &S,
    service_ids: &[ServiceId],
) -> Result<Vec<ResortId>> {
    let required: HashSet<ServiceId> = service_ids.iter().copied().collect();
    if required.is_empty() {
        return Ok(Vec::new());
    }

    let mut distinct: Vec<ServiceId> = required.iter().copied().collect();
    distinct.sort();

    let links = store.links_for_services(&distinct).await?;
    tracing::debug!(
        "🔗 {} association rows for {} requested services",
        links.len(),
        distinct.len()
    );

    Ok(conjunctive_match(&links, &required))
}

/// Single pass over `links` with a per-resort counter.
///
/// A resort qualifies when the number of distinct requested services it is
/// linked to equals `required.len()`. Duplicate rows and rows for services
/// outside `required` are ignored. Output keeps first-seen order.
pub fn conjunctive_match(links: &[ResortServiceLink], required: &HashSet<ServiceId>) -> Vec<ResortId> {
    if required.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<ResortServiceLink> = HashSet::with_capacity(links.len());
    let mut counts: HashMap<ResortId, usize> = HashMap::new();
    let mut order: Vec<ResortId> = Vec::new();

    for link in links {
        if !required.contains(&link.service_id) || !seen.insert(*link) {
            continue;
        }

        let count = counts.entry(link.resort_id).or_insert_with(|| {
            order.push(link.resort_id);
            0
        });
        *count += 1;
    }

    order
        .into_iter()
        .filter(|resort_id| counts.get(resort_id) == Some(&required.len()))
        .collect()
}
