use crate::core::assembler;
use crate::core::membership;
use crate::core::resolver::{self, ServiceResolution};
use crate::domain::model::{City, Resort, SearchResult};
use crate::domain::ports::ResortStore;
use crate::utils::error::Result;

/// 度假村搜尋引擎
///
/// Stateless: holds only the injected store handle, so one engine can serve
/// concurrent calls. Every "nothing found" step short-circuits to an empty
/// list; only store failures surface as errors.
#[derive(Debug, Clone)]
pub struct SearchEngine<S: ResortStore> {
    store: S,
}

impl<S: ResortStore> SearchEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resorts of the first city whose name contains `city_query`.
    pub async fn search_by_city(&self, city_query: &str) -> Result<Vec<Resort>> {
        let Some(city_id) = resolver::resolve_city(&self.store, city_query).await? else {
            tracing::warn!("🏙️ No city matches '{}'", city_query.trim());
            return Ok(Vec::new());
        };

        let resorts = self.store.resorts_in_city(city_id).await?;
        tracing::info!(
            "🏖️ Found {} resorts in city {} for '{}'",
            resorts.len(),
            city_id,
            city_query.trim()
        );
        Ok(resorts)
    }

    pub async fn list_all_with_city(&self) -> Result<Vec<SearchResult>> {
        let results = assembler::assemble_all(&self.store).await?;
        tracing::info!("🏖️ Listed {} resorts with their city", results.len());
        Ok(results)
    }

    pub async fn list_all_cities(&self) -> Result<Vec<City>> {
        let cities = self.store.all_cities().await?;
        tracing::info!("🏙️ Listed {} cities", cities.len());
        Ok(cities)
    }

    /// Resorts offering every service named in `service_names`.
    pub async fn filter_by_services(&self, service_names: &[String]) -> Result<Vec<SearchResult>> {
        self.filter_by_city_and_services(None, service_names).await
    }

    /// Like [`filter_by_services`](Self::filter_by_services), optionally
    /// restricted to the city resolved from `city_query`. A blank query means
    /// no city restriction.
    pub async fn filter_by_city_and_services(
        &self,
        city_query: Option<&str>,
        service_names: &[String],
    ) -> Result<Vec<SearchResult>> {
        let service_ids = match resolver::resolve_services(&self.store, service_names).await? {
            ServiceResolution::Resolved(ids) => ids,
            ServiceResolution::NotAllFound { missing } => {
                tracing::warn!("🧩 Not all services found, missing: {:?}", missing);
                return Ok(Vec::new());
            }
        };

        let city_filter = match city_query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => match resolver::resolve_city(&self.store, query).await? {
                Some(city_id) => Some(city_id),
                None => {
                    tracing::warn!("🏙️ No city matches '{}'", query);
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let resort_ids = membership::filter_by_all_services(&self.store, &service_ids).await?;
        if resort_ids.is_empty() {
            tracing::info!("🔍 No resort offers all of {:?}", service_names);
            return Ok(Vec::new());
        }

        let results = assembler::assemble(&self.store, &resort_ids, city_filter).await?;
        tracing::info!(
            "🔍 {} resorts offer all of {:?}{}",
            results.len(),
            service_names,
            city_filter
                .map(|id| format!(" in city {}", id))
                .unwrap_or_default()
        );
        Ok(results)
    }
}
