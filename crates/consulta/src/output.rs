//! Rendering query results.
//!
//! Structured modes (JSON, YAML) serialize the whole result. CSV writes the
//! page's items only, flattened to one row per record. Text mode renders a
//! per-collection minijinja template.

use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;

use consulta_query::QueryResult;

use crate::cli::OutputMode;

const PAGE_FOOTER: &str = include_str!("templates/page.jinja");

const TEMPLATES: &[(&str, &str)] = &[
    ("therapists", include_str!("templates/therapists.jinja")),
    ("favorites", include_str!("templates/favorites.jinja")),
    ("appointments", include_str!("templates/appointments.jinja")),
    ("notifications", include_str!("templates/notifications.jinja")),
    ("payments", include_str!("templates/payments.jinja")),
];

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders `result` for `collection` in the requested mode.
pub fn render<R: Serialize>(
    collection: &str,
    result: &QueryResult<R>,
    mode: OutputMode,
) -> Result<String, OutputError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(result)? + "\n"),
        OutputMode::Yaml => Ok(serde_yaml::to_string(result)?),
        OutputMode::Csv => to_csv(&result.items),
        OutputMode::Text => render_text(collection, result),
    }
}

fn render_text<R: Serialize>(collection: &str, result: &QueryResult<R>) -> Result<String, OutputError> {
    let mut env = Environment::new();
    env.add_template("page", PAGE_FOOTER)?;
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    let template = env.get_template(collection)?;
    Ok(template.render(context! {
        items => &result.items,
        total => result.total,
        page => result.page,
        page_size => result.page_size,
        page_count => result.page_count,
    })?)
}

/// Serializes records as CSV, one column per top-level field.
pub fn to_csv<R: Serialize>(items: &[R]) -> Result<String, OutputError> {
    use serde_json::Value;

    let rows: Vec<Value> = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(String::as_str).collect();
        wtr.write_record(&headers)
            .map_err(|e| OutputError::Csv(e.to_string()))?;
        for row in &rows {
            let record: Vec<String> = headers
                .iter()
                .map(|h| row.get(*h).map(cell).unwrap_or_default())
                .collect();
            wtr.write_record(&record)
                .map_err(|e| OutputError::Csv(e.to_string()))?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Csv(e.to_string()))
}

/// Flattens a JSON value into one CSV cell. Lists are joined with `; `.
fn cell(v: &serde_json::Value) -> String {
    use serde_json::Value;
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result<R>(items: Vec<R>, total: usize) -> QueryResult<R> {
        QueryResult {
            items,
            total,
            page: 1,
            page_size: 10,
            page_count: 1,
        }
    }

    #[test]
    fn csv_flattens_lists() {
        let items = vec![
            json!({"name": "Ana", "specialties": ["Ansiedad", "Psicoterapia"], "price": 90}),
            json!({"name": "Carlos", "specialties": [], "price": 40}),
        ];
        let csv = to_csv(&items).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,price,specialties");
        assert_eq!(lines[1], "Ana,90,Ansiedad; Psicoterapia");
        assert_eq!(lines[2], "Carlos,40,");
    }

    #[test]
    fn csv_of_nothing_is_empty() {
        let items: Vec<serde_json::Value> = vec![];
        assert_eq!(to_csv(&items).unwrap(), "");
    }

    #[test]
    fn json_includes_paging() {
        let out = render("payments", &result(vec![json!({"id": 1})], 1), OutputMode::Json).unwrap();
        assert!(out.contains("\"total\": 1"));
        assert!(out.contains("\"page_count\": 1"));
    }

    #[test]
    fn every_collection_has_a_template() {
        for &(name, _) in TEMPLATES {
            let empty: QueryResult<serde_json::Value> = result(vec![], 0);
            let out = render(name, &empty, OutputMode::Text).unwrap();
            assert!(out.contains("Sin resultados"), "{name}: {out}");
        }
    }
}
