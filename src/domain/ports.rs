use crate::domain::model::{
    City, CityId, Resort, ResortId, ResortServiceLink, ResortWithCity, Service, ServiceId,
};
use crate::domain::query::TextMatch;
use crate::utils::error::Result;
use std::future::Future;

/// Read-only access to the resort database.
///
/// Rows come back in the store's natural order (primary key ascending).
/// Implementations never write.
pub trait ResortStore: Send + Sync + Clone {
    /// Cities whose name contains any pattern of `filter`, ignoring case.
    fn find_cities(
        &self,
        filter: &TextMatch,
    ) -> impl Future<Output = Result<Vec<City>>> + Send;

    /// Services whose name contains any pattern of `filter`, ignoring case.
    fn find_services(
        &self,
        filter: &TextMatch,
    ) -> impl Future<Output = Result<Vec<Service>>> + Send;

    fn resorts_in_city(&self, city_id: CityId)
        -> impl Future<Output = Result<Vec<Resort>>> + Send;

    /// Association rows whose service id is in `service_ids`.
    fn links_for_services(
        &self,
        service_ids: &[ServiceId],
    ) -> impl Future<Output = Result<Vec<ResortServiceLink>>> + Send;

    /// Resorts joined with their owning city.
    ///
    /// `resort_ids` restricts by primary key when present; `city_id`
    /// restricts by owning city when present.
    fn resorts_with_city(
        &self,
        resort_ids: Option<&[ResortId]>,
        city_id: Option<CityId>,
    ) -> impl Future<Output = Result<Vec<ResortWithCity>>> + Send;

    fn all_cities(&self) -> impl Future<Output = Result<Vec<City>>> + Send;
}

/// Table names used by the store, overridable from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub cities: String,
    pub resorts: String,
    pub services: String,
    pub resort_services: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            cities: "ciudades".to_string(),
            resorts: "balnearios".to_string(),
            services: "servicios".to_string(),
            resort_services: "balneario_servicio".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn store_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn schema(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn tables(&self) -> TableNames;
}
