//! `consulta`: the booking client's list screens on the command line.
//!
//! ```text
//! consulta therapists --search ansiedad --where online=true --sort relevance
//! consulta appointments --where status=upcoming --where slot@2024-06-14..2024-06-20
//! consulta payments --where status~=pending,refunded --output csv
//! ```
//!
//! Records come from the configured source (`consulta.yaml`, `--config`,
//! `CONSULTA_CONFIG`), or from `--data DIR` holding `<collection>.json|yaml`.

pub mod cli;
pub mod filter;
pub mod logging;
pub mod output;

mod app;

pub use app::{build_query, load_config, run, DEFAULT_CONFIG_FILE};
