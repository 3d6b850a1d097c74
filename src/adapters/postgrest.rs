//! HTTP store client for a PostgREST (Supabase) backend.

use crate::domain::model::{
    City, CityId, Resort, ResortId, ResortServiceLink, ResortWithCity, Service, ServiceId,
};
use crate::domain::ports::{ConfigProvider, ResortStore, TableNames};
use crate::domain::query::TextMatch;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_store_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;

const CITY_COLUMNS: &str = "id_ciudad,nombre,img";
const RESORT_COLUMNS: &str = "id_balneario,nombre,direccion,telefono,imagen,id_ciudad";
const SERVICE_COLUMNS: &str = "id_servicio,nombre,img";
const LINK_COLUMNS: &str = "id_balneario,id_servicio";

type QueryParams = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    tables: TableNames,
}

impl PostgrestStore {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_store_url("store.url", config.store_url())?;
        let api_key = config.api_key().ok_or_else(|| AppError::MissingConfigError {
            field: "store.api_key".to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            header_value("store.api_key", api_key)?,
        );
        headers.insert(
            AUTHORIZATION,
            header_value("store.api_key", &format!("Bearer {}", api_key))?,
        );
        if let Some(schema) = config.schema() {
            headers.insert(
                HeaderName::from_static("accept-profile"),
                header_value("store.schema", schema)?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", config.store_url().trim_end_matches('/')),
            tables: config.tables(),
        })
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, params: &QueryParams) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, table);
        tracing::debug!("📡 GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!("📡 Store error {}: {}", status, body);
            return Err(AppError::StoreResponseError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let rows: Vec<T> = serde_json::from_str(&body)?;
        tracing::debug!("📡 {} rows from '{}'", rows.len(), table);
        Ok(rows)
    }
}

impl ResortStore for PostgrestStore {
    async fn find_cities(&self, filter: &TextMatch) -> Result<Vec<City>> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let mut params = select_params(CITY_COLUMNS, "id_ciudad");
        params.push(ilike_param("nombre", filter));
        self.select(&self.tables.cities, &params).await
    }

    async fn find_services(&self, filter: &TextMatch) -> Result<Vec<Service>> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let mut params = select_params(SERVICE_COLUMNS, "id_servicio");
        params.push(ilike_param("nombre", filter));
        self.select(&self.tables.services, &params).await
    }

    async fn resorts_in_city(&self, city_id: CityId) -> Result<Vec<Resort>> {
        let mut params = select_params(RESORT_COLUMNS, "id_balneario");
        params.push(eq_param("id_ciudad", city_id));
        self.select(&self.tables.resorts, &params).await
    }

    async fn links_for_services(&self, service_ids: &[ServiceId]) -> Result<Vec<ResortServiceLink>> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params = select_params(LINK_COLUMNS, "id_balneario");
        params.push(in_param("id_servicio", service_ids));
        self.select(&self.tables.resort_services, &params).await
    }

    async fn resorts_with_city(
        &self,
        resort_ids: Option<&[ResortId]>,
        city_id: Option<CityId>,
    ) -> Result<Vec<ResortWithCity>> {
        if resort_ids.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let columns = format!(
            "{},ciudades:{}({})",
            RESORT_COLUMNS, self.tables.cities, CITY_COLUMNS
        );
        let mut params = select_params(&columns, "id_balneario");
        if let Some(ids) = resort_ids {
            params.push(in_param("id_balneario", ids));
        }
        if let Some(id) = city_id {
            params.push(eq_param("id_ciudad", id));
        }
        self.select(&self.tables.resorts, &params).await
    }

    async fn all_cities(&self) -> Result<Vec<City>> {
        let params = select_params(CITY_COLUMNS, "id_ciudad");
        self.select(&self.tables.cities, &params).await
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::InvalidConfigValueError {
        field: field.to_string(),
        value: "<redacted>".to_string(),
        reason: format!("Not a valid HTTP header value: {}", e),
    })
}

fn select_params(columns: &str, order_by: &str) -> QueryParams {
    vec![
        ("select".to_string(), columns.to_string()),
        ("order".to_string(), format!("{}.asc", order_by)),
    ]
}

fn eq_param(column: &str, value: impl Display) -> (String, String) {
    (column.to_string(), format!("eq.{}", value))
}

fn in_param<T: Display>(column: &str, values: &[T]) -> (String, String) {
    let list = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    (column.to_string(), format!("in.({})", list))
}

/// Renders a [`TextMatch`] as a PostgREST `ilike` filter.
///
/// One pattern becomes `column=ilike.*p*`; several become
/// `or=(column.ilike."*a*",column.ilike."*b*")` with each value quoted.
fn ilike_param(column: &str, filter: &TextMatch) -> (String, String) {
    match filter.patterns() {
        [single] => (
            column.to_string(),
            format!("ilike.*{}*", escape_like(single)),
        ),
        patterns => {
            let alternatives = patterns
                .iter()
                .map(|p| {
                    format!(
                        "{}.ilike.{}",
                        column,
                        quote_value(&format!("*{}*", escape_like(p)))
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            ("or".to_string(), format!("({})", alternatives))
        }
    }
}

/// Escapes LIKE metacharacters so user text matches literally. `*` is the
/// PostgREST wildcard and is dropped.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '*' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn quote_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// PostgREST errors are JSON objects with a `message` field.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
