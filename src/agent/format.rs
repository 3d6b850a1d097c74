use crate::domain::model::{City, Resort, SearchResult};

pub const PHONE_NOT_PROVIDED: &str = "No informado";
pub const CITY_NOT_PROVIDED: &str = "No informada";

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default)
}

pub fn resort_line(resort: &Resort) -> String {
    format!(
        "Balneario: {}, Dirección: {}, Teléfono: {}",
        resort.name,
        resort.address,
        or_default(resort.phone.as_deref(), PHONE_NOT_PROVIDED)
    )
}

pub fn result_line(result: &SearchResult) -> String {
    format!(
        "Balneario: {}, Ciudad: {}, Dirección: {}, Teléfono: {}",
        result.nombre,
        or_default(result.ciudad.as_deref(), CITY_NOT_PROVIDED),
        result.direccion,
        or_default(result.telefono.as_deref(), PHONE_NOT_PROVIDED)
    )
}

pub fn city_line(city: &City) -> String {
    format!("Ciudad: {}", city.name)
}

/// One line per item, newline separated.
pub fn lines<T>(items: &[T], line: impl Fn(&T) -> String) -> String {
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}
