//! City and service name resolution.
//!
//! Both resolvers take free text typed by a user (or chosen by the agent),
//! ask the store for case-insensitive substring matches, and pick
//! identifiers from the rows that come back.

use crate::domain::model::{City, CityId, Service, ServiceId};
use crate::domain::ports::ResortStore;
use crate::domain::query::{contains_ignore_case, TextMatch};
use crate::utils::error::Result;

/// Outcome of resolving a list of service name fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResolution {
    /// One id per fragment, deduplicated, in fragment order.
    Resolved(Vec<ServiceId>),
    /// At least one fragment matched no service.
    NotAllFound { missing: Vec<String> },
}

impl ServiceResolution {
    pub fn ids(&self) -> Option<&[ServiceId]> {
        match self {
            ServiceResolution::Resolved(ids) => Some(ids),
            ServiceResolution::NotAllFound { .. } => None,
        }
    }
}

/// 以名稱片段解析城市 id；沒有符合時回傳 `None`
pub async fn resolve_city<S: ResortStore>(store: &S, query: &str) -> Result<Option<CityId>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    let cities = store.find_cities(&TextMatch::contains(query)).await?;
    tracing::debug!("🏙️ City query '{}' matched {} cities", query, cities.len());

    Ok(pick_city(&cities, query).map(|city| city.id))
}

/// An exact (case-insensitive) name wins; otherwise the first matching row.
pub fn pick_city<'a>(cities: &'a [City], query: &str) -> Option<&'a City> {
    best_match(cities, query, |city| &city.name)
}

fn best_match<'a, T>(rows: &'a [T], query: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    let wanted = query.trim().to_lowercase();
    let mut matching = rows
        .iter()
        .filter(|row| contains_ignore_case(name(row), &wanted));

    let first = matching.next()?;
    let exact = std::iter::once(first)
        .chain(matching)
        .find(|row| name(row).to_lowercase() == wanted);

    Some(exact.unwrap_or(first))
}

/// 解析設施名稱片段；任何一個片段找不到就整體失敗
pub async fn resolve_services<S: ResortStore>(
    store: &S,
    fragments: &[String],
) -> Result<ServiceResolution> {
    let filter = TextMatch::any_of(fragments.iter().cloned());
    if filter.is_empty() || filter.patterns().len() != fragments.len() {
        // 空白片段不可能對應到任何設施
        let missing = fragments
            .iter()
            .filter(|f| f.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>();
        return Ok(ServiceResolution::NotAllFound { missing });
    }

    let services = store.find_services(&filter).await?;
    tracing::debug!(
        "🧩 {} service fragments matched {} services",
        fragments.len(),
        services.len()
    );

    Ok(match_fragments(&services, fragments))
}

/// Maps every fragment to exactly one service.
///
/// An exact (case-insensitive) name beats a partial match; among partial
/// matches the first row wins. Fragments naming the same service collapse
/// into a single id.
pub fn match_fragments(services: &[Service], fragments: &[String]) -> ServiceResolution {
    let mut ids: Vec<ServiceId> = Vec::with_capacity(fragments.len());
    let mut missing = Vec::new();

    for fragment in fragments {
        match best_match(services, fragment, |service| &service.name) {
            Some(service) if !ids.contains(&service.id) => ids.push(service.id),
            Some(_) => {}
            None => missing.push(fragment.clone()),
        }
    }

    if missing.is_empty() {
        ServiceResolution::Resolved(ids)
    } else {
        ServiceResolution::NotAllFound { missing }
    }
}
