use crate::domain::model::{CityId, ResortId, SearchResult};
use crate::domain::ports::ResortStore;
use crate::utils::error::Result;
use std::collections::HashSet;

/// 將度假村 id 與所屬城市結合成搜尋結果
///
/// `resort_ids` empty means nothing to fetch. Order follows the store;
/// a resort id never appears twice.
pub async fn assemble<S: ResortStore>(
    store: &S,
    resort_ids: &[ResortId],
    city_filter: Option<CityId>,
) -> Result<Vec<SearchResult>> {
    if resort_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = store.resorts_with_city(Some(resort_ids), city_filter).await?;
    Ok(project(rows.into_iter().map(SearchResult::from)))
}

/// Every resort joined with its city, no filtering.
pub async fn assemble_all<S: ResortStore>(store: &S) -> Result<Vec<SearchResult>> {
    let rows = store.resorts_with_city(None, None).await?;
    Ok(project(rows.into_iter().map(SearchResult::from)))
}

fn project(results: impl Iterator<Item = SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results.filter(|r| seen.insert(r.id_balneario)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryStore, Snapshot};
    use crate::domain::model::{City, Resort};

    fn resort(id: i64, name: &str, city: Option<i64>) -> Resort {
        Resort {
            id: ResortId(id),
            name: name.to_string(),
            address: format!("Costanera {}", id),
            phone: None,
            image: None,
            city_id: city.map(CityId),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(Snapshot {
            ciudades: vec![
                City {
                    id: CityId(1),
                    name: "Miramar".to_string(),
                    image: Some("miramar.jpg".to_string()),
                },
                City {
                    id: CityId(2),
                    name: "Necochea".to_string(),
                    image: None,
                },
            ],
            balnearios: vec![
                resort(10, "Sol y Mar", Some(1)),
                resort(11, "La Perla", Some(2)),
                resort(12, "Sin Ciudad", None),
                resort(13, "Ciudad Borrada", Some(99)),
            ],
            ..Snapshot::default()
        })
    }

    #[tokio::test]
    async fn test_assemble_restricts_to_ids_and_city() {
        let store = store();
        let ids = [ResortId(10), ResortId(11)];

        let all = assemble(&store, &ids, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let in_miramar = assemble(&store, &ids, Some(CityId(1))).await.unwrap();
        assert_eq!(in_miramar.len(), 1);
        assert_eq!(in_miramar[0].nombre, "Sol y Mar");
        assert_eq!(in_miramar[0].ciudad.as_deref(), Some("Miramar"));
        assert_eq!(in_miramar[0].ciudad_img.as_deref(), Some("miramar.jpg"));
    }

    #[tokio::test]
    async fn test_assemble_with_no_ids_is_empty() {
        assert!(assemble(&store(), &[], None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assemble_all_nulls_unresolvable_cities() {
        let results = assemble_all(&store()).await.unwrap();
        assert_eq!(results.len(), 4);

        for result in &results {
            match result.id_balneario.0 {
                10 => assert_eq!(result.ciudad.as_deref(), Some("Miramar")),
                11 => assert_eq!(result.ciudad.as_deref(), Some("Necochea")),
                _ => {
                    assert_eq!(result.ciudad, None);
                    assert_eq!(result.ciudad_img, None);
                }
            }
        }
    }

    #[test]
    fn test_project_drops_duplicate_ids() {
        let row = SearchResult {
            id_balneario: ResortId(10),
            nombre: "Sol y Mar".to_string(),
            direccion: String::new(),
            telefono: None,
            imagen: None,
            ciudad: None,
            ciudad_img: None,
        };
        let projected = project(vec![row.clone(), row].into_iter());
        assert_eq!(projected.len(), 1);
    }
}
