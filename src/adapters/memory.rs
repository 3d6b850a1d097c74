use crate::domain::model::{
    City, CityId, Resort, ResortId, ResortServiceLink, ResortWithCity, Service, ServiceId,
};
use crate::domain::ports::ResortStore;
use crate::domain::query::TextMatch;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 資料庫快照，欄位名稱與資料表相同
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub ciudades: Vec<City>,
    #[serde(default)]
    pub balnearios: Vec<Resort>,
    #[serde(default)]
    pub servicios: Vec<Service>,
    #[serde(default)]
    pub balneario_servicio: Vec<ResortServiceLink>,
}

/// In-process store over a fixed [`Snapshot`]; rows are kept sorted by id
/// to mirror the database's default ordering.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    snapshot: Arc<Snapshot>,
}

impl MemoryStore {
    pub fn new(mut snapshot: Snapshot) -> Self {
        snapshot.ciudades.sort_by_key(|c| c.id);
        snapshot.balnearios.sort_by_key(|r| r.id);
        snapshot.servicios.sort_by_key(|s| s.id);
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// 從 JSON 檔案載入快照
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        tracing::debug!(
            "📂 Loaded snapshot: {} cities, {} resorts, {} services, {} links",
            snapshot.ciudades.len(),
            snapshot.balnearios.len(),
            snapshot.servicios.len(),
            snapshot.balneario_servicio.len()
        );
        Ok(Self::new(snapshot))
    }

    fn city(&self, id: CityId) -> Option<&City> {
        self.snapshot.ciudades.iter().find(|c| c.id == id)
    }
}

impl ResortStore for MemoryStore {
    async fn find_cities(&self, filter: &TextMatch) -> Result<Vec<City>> {
        Ok(self
            .snapshot
            .ciudades
            .iter()
            .filter(|c| filter.matches(&c.name))
            .cloned()
            .collect())
    }

    async fn find_services(&self, filter: &TextMatch) -> Result<Vec<Service>> {
        Ok(self
            .snapshot
            .servicios
            .iter()
            .filter(|s| filter.matches(&s.name))
            .cloned()
            .collect())
    }

    async fn resorts_in_city(&self, city_id: CityId) -> Result<Vec<Resort>> {
        Ok(self
            .snapshot
            .balnearios
            .iter()
            .filter(|r| r.city_id == Some(city_id))
            .cloned()
            .collect())
    }

    async fn links_for_services(&self, service_ids: &[ServiceId]) -> Result<Vec<ResortServiceLink>> {
        Ok(self
            .snapshot
            .balneario_servicio
            .iter()
            .filter(|l| service_ids.contains(&l.service_id))
            .copied()
            .collect())
    }

    async fn resorts_with_city(
        &self,
        resort_ids: Option<&[ResortId]>,
        city_id: Option<CityId>,
    ) -> Result<Vec<ResortWithCity>> {
        Ok(self
            .snapshot
            .balnearios
            .iter()
            .filter(|r| resort_ids.map_or(true, |ids| ids.contains(&r.id)))
            .filter(|r| city_id.map_or(true, |id| r.city_id == Some(id)))
            .map(|r| ResortWithCity {
                resort: r.clone(),
                city: r.city_id.and_then(|id| self.city(id)).cloned(),
            })
            .collect())
    }

    async fn all_cities(&self) -> Result<Vec<City>> {
        Ok(self.snapshot.ciudades.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "ciudades": [
            {"id_ciudad": 2, "nombre": "Necochea", "img": null},
            {"id_ciudad": 1, "nombre": "Miramar", "img": "miramar.jpg"}
        ],
        "balnearios": [
            {"id_balneario": 10, "nombre": "Sol y Mar", "direccion": "Costanera 123",
             "telefono": "0223-155", "imagen": null, "id_ciudad": 1}
        ],
        "servicios": [{"id_servicio": 100, "nombre": "Wi-Fi"}],
        "balneario_servicio": [{"id_balneario": 10, "id_servicio": 100}]
    }"#;

    #[tokio::test]
    async fn test_snapshot_is_sorted_by_id() {
        let store = MemoryStore::from_json_str(SNAPSHOT).unwrap();
        let cities = store.all_cities().await.unwrap();
        assert_eq!(cities[0].name, "Miramar");
        assert_eq!(cities[1].name, "Necochea");
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let store = MemoryStore::from_json_file(temp_file.path()).unwrap();
        let joined = store.resorts_with_city(None, None).await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].city.as_ref().unwrap().name, "Miramar");
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_a_serialization_error() {
        let err = MemoryStore::from_json_str("{\"ciudades\": 3}").unwrap_err();
        assert!(matches!(err, AppError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_find_services_matches_any_pattern() {
        let store = MemoryStore::from_json_str(SNAPSHOT).unwrap();
        let found = store
            .find_services(&TextMatch::any_of(["wi", "spa"]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
