use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(CityId);
entity_id!(ResortId);
entity_id!(ServiceId);

/// 城市 (`ciudades`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "id_ciudad")]
    pub id: CityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "img", default)]
    pub image: Option<String>,
}

/// 海灘度假村 (`balnearios`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    #[serde(rename = "id_balneario")]
    pub id: ResortId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "id_ciudad", default)]
    pub city_id: Option<CityId>,
}

/// 設施類型 (`servicios`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "id_servicio")]
    pub id: ServiceId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "img", default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResortServiceLink {
    #[serde(rename = "id_balneario")]
    pub resort_id: ResortId,
    #[serde(rename = "id_servicio")]
    pub service_id: ServiceId,
}

/// Resort row with its owning city embedded, as returned by a joined query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortWithCity {
    #[serde(flatten)]
    pub resort: Resort,
    #[serde(rename = "ciudades", default)]
    pub city: Option<City>,
}

/// 搜尋結果：度假村欄位加上所屬城市的名稱與圖片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id_balneario: ResortId,
    pub nombre: String,
    pub direccion: String,
    pub telefono: Option<String>,
    pub imagen: Option<String>,
    pub ciudad: Option<String>,
    pub ciudad_img: Option<String>,
}

impl From<ResortWithCity> for SearchResult {
    fn from(row: ResortWithCity) -> Self {
        let (ciudad, ciudad_img) = match row.city {
            Some(city) => (Some(city.name), city.image),
            None => (None, None),
        };

        Self {
            id_balneario: row.resort.id,
            nombre: row.resort.name,
            direccion: row.resort.address,
            telefono: row.resort.phone,
            imagen: row.resort.image,
            ciudad,
            ciudad_img,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resort_with_city_decodes_embedded_row() {
        let row: ResortWithCity = serde_json::from_value(serde_json::json!({
            "id_balneario": 10,
            "nombre": "Sol y Mar",
            "direccion": "Costanera 123",
            "telefono": null,
            "imagen": "sol.jpg",
            "id_ciudad": 1,
            "ciudades": {"id_ciudad": 1, "nombre": "Miramar", "img": "miramar.jpg"}
        }))
        .unwrap();

        assert_eq!(row.resort.id, ResortId(10));
        assert_eq!(row.resort.city_id, Some(CityId(1)));
        assert_eq!(row.city.as_ref().map(|c| c.name.as_str()), Some("Miramar"));

        let result = SearchResult::from(row);
        assert_eq!(result.ciudad.as_deref(), Some("Miramar"));
        assert_eq!(result.ciudad_img.as_deref(), Some("miramar.jpg"));
        assert_eq!(result.telefono, None);
    }

    #[test]
    fn test_missing_city_yields_null_city_fields() {
        let row: ResortWithCity = serde_json::from_value(serde_json::json!({
            "id_balneario": 11,
            "nombre": "Huérfano",
            "direccion": "Ruta 11",
            "id_ciudad": null,
            "ciudades": null
        }))
        .unwrap();

        let result = SearchResult::from(row);
        assert_eq!(result.ciudad, None);
        assert_eq!(result.ciudad_img, None);
    }

    #[test]
    fn test_search_result_serializes_store_field_names() {
        let result = SearchResult {
            id_balneario: ResortId(10),
            nombre: "Sol y Mar".to_string(),
            direccion: "Costanera 123".to_string(),
            telefono: Some("0223-155".to_string()),
            imagen: None,
            ciudad: Some("Miramar".to_string()),
            ciudad_img: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id_balneario"], 10);
        assert_eq!(json["ciudad"], "Miramar");
        assert!(json["ciudad_img"].is_null());
    }
}
