//! End-to-end runs of the command line over seed data and files on disk.

use std::fs;

use clap::Parser;
use consulta::cli::Cli;
use consulta_records::{Record, Therapist};
use tempfile::TempDir;

async fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("consulta").chain(args.iter().copied()))?;
    consulta::run(&cli).await
}

fn json(out: &str) -> serde_json::Value {
    serde_json::from_str(out).unwrap()
}

fn names(result: &serde_json::Value) -> Vec<String> {
    result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Therapist directory
// ============================================================================

#[tokio::test]
async fn price_floor_ascending_first_page() {
    let out = run(&[
        "therapists",
        "--where",
        "price>=75",
        "--sort",
        "price:asc",
        "--per-page",
        "3",
        "-o",
        "json",
    ])
    .await
    .unwrap();

    let result = json(&out);
    assert_eq!(result["total"], 5);
    assert_eq!(result["page_count"], 2);
    assert_eq!(
        names(&result),
        vec!["Lucía Fernández", "Pablo Moreno", "Javier López"]
    );
}

#[tokio::test]
async fn relevance_sort_defaults_to_best_first() {
    let out = run(&["therapists", "--sort", "relevance", "--per-page", "2", "-o", "json"])
        .await
        .unwrap();
    assert_eq!(names(&json(&out)), vec!["Ana Martínez", "Dra. María González"]);
}

#[tokio::test]
async fn availability_sort_puts_today_first() {
    let out = run(&["therapists", "--sort", "availability", "--per-page", "0", "-o", "json"])
        .await
        .unwrap();
    let result = json(&out);
    assert_eq!(result["page_count"], 1);
    assert_eq!(
        names(&result)[..4],
        ["Ana Martínez", "Dra. María González", "Elena Sánchez", "Sofía Navarro"]
    );
}

#[tokio::test]
async fn search_with_specialty_filter() {
    let out = run(&[
        "therapists",
        "--search",
        "ANSIEDAD",
        "--where",
        "modalities~=Presencial",
        "-o",
        "json",
    ])
    .await
    .unwrap();
    assert_eq!(names(&json(&out)), vec!["Ana Martínez"]);
}

#[tokio::test]
async fn page_past_end_is_empty_text() {
    let out = run(&["therapists", "--page", "7"]).await.unwrap();
    assert!(out.contains("Sin resultados."));
    assert!(out.contains("Página 7 de 2"));
}

#[tokio::test]
async fn unknown_field_fails() {
    let err = run(&["therapists", "--sort", "nonexistent"]).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("nonexistent"), "{message}");
}

// ============================================================================
// Other screens
// ============================================================================

#[tokio::test]
async fn upcoming_appointments_in_window() {
    let out = run(&[
        "appointments",
        "--where",
        "status=upcoming",
        "--where",
        "slot@2024-06-14..2024-06-20",
        "--sort",
        "starts_at",
        "-o",
        "json",
    ])
    .await
    .unwrap();
    let result = json(&out);
    let ids: Vec<u64> = result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn unread_notifications_text() {
    let out = run(&["notifications", "--where", "read=false"]).await.unwrap();
    assert!(out.contains("● Recordatorio de cita"));
    assert!(!out.contains("Pago recibido"));
    assert!(out.contains("3 resultados"));
}

#[tokio::test]
async fn payments_as_csv() {
    let out = run(&["payments", "--where", "status~=pending,refunded", "--sort", "amount:desc", "-o", "csv"])
        .await
        .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("amount,concept,"));
    assert!(lines[1].contains("Bono 4 sesiones"));
    assert!(lines[2].contains("Cancelación"));
}

#[tokio::test]
async fn favorites_as_yaml() {
    let out = run(&["favorites", "--search", "reiki", "-o", "yaml"]).await.unwrap();
    assert!(out.contains("total: 1"));
    assert!(out.contains("name: Dra. María González"));
}

// ============================================================================
// Sources
// ============================================================================

#[tokio::test]
async fn data_directory_replaces_seed() {
    let dir = TempDir::new().unwrap();
    let mut therapists = Therapist::seed();
    therapists.truncate(2);
    fs::write(
        dir.path().join("therapists.json"),
        serde_json::to_string(&therapists).unwrap(),
    )
    .unwrap();

    let data = dir.path().to_str().unwrap();
    let out = run(&["therapists", "--data", data, "-o", "json"]).await.unwrap();
    assert_eq!(json(&out)["total"], 2);
}

#[tokio::test]
async fn config_file_sets_page_size() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("consulta.yaml");
    fs::write(&config, "default_page_size: 2\n").unwrap();

    let out = run(&["therapists", "--config", config.to_str().unwrap(), "-o", "json"])
        .await
        .unwrap();
    let result = json(&out);
    assert_eq!(result["page_size"], 2);
    assert_eq!(result["page_count"], 4);
}

#[tokio::test]
async fn missing_data_directory_fails() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().to_str().unwrap();
    let err = run(&["payments", "--data", data]).await.unwrap_err();
    assert!(format!("{err:#}").contains("payments"));
}
