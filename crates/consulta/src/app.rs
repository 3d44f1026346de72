//! Wiring: config → source → query → engine → output.

use std::path::Path;

use anyhow::Context;
use consulta_query::{ListQueryEngine, Query};
use consulta_records::{
    sort_spec, Appointment, Config, Favorite, Notification, Payment, Record, SourceKind, Therapist,
};
use tracing::{debug, info};

use crate::cli::{Cli, Collection, ListArgs};
use crate::output;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "consulta.yaml";

/// Runs the command line and returns the rendered output.
pub async fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli)?;
    match &cli.collection {
        Collection::Therapists(args) => list::<Therapist>(cli, &config, args).await,
        Collection::Favorites(args) => list::<Favorite>(cli, &config, args).await,
        Collection::Appointments(args) => list::<Appointment>(cli, &config, args).await,
        Collection::Notifications(args) => list::<Notification>(cli, &config, args).await,
        Collection::Payments(args) => list::<Payment>(cli, &config, args).await,
    }
}

/// Reads the config file and applies command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };

    if let Some(data) = &cli.data {
        config.source.kind = SourceKind::File;
        config.source.path = Some(data.clone());
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.source.delay_ms = delay_ms;
    }
    Ok(config)
}

/// Builds the query for record shape `R` from list flags.
pub fn build_query<R: Record>(args: &ListArgs, default_page_size: usize) -> Query<R> {
    let mut query = Query::<R>::for_queryable();
    if !args.search_in.is_empty() {
        query = query.search_in(args.search_in.iter().cloned());
    }
    if let Some(term) = &args.search {
        query = query.search(term.as_str());
    }
    for clause in &args.filters {
        query = clause.apply(query);
    }
    if let Some(key) = &args.sort {
        query = query.sort(sort_spec::<R>(&key.field, key.dir));
    }
    query.page(args.page, args.per_page.unwrap_or(default_page_size))
}

async fn list<R: Record>(cli: &Cli, config: &Config, args: &ListArgs) -> anyhow::Result<String> {
    let source = config
        .source
        .build::<R>()
        .with_context(|| format!("cannot open the {} source", R::COLLECTION))?;
    info!(collection = R::COLLECTION, source = %source.describe(), "fetching records");

    let records = source
        .fetch()
        .await
        .with_context(|| format!("cannot fetch {}", R::COLLECTION))?;

    let query = build_query::<R>(args, config.default_page_size);
    debug!(?query, "running query");

    let result = ListQueryEngine::<R>::for_queryable()
        .execute(&records, &query)
        .with_context(|| format!("invalid query for {}", R::COLLECTION))?;
    info!(
        total = result.total,
        page = result.page,
        page_count = result.page_count,
        "query complete"
    );

    Ok(output::render(R::COLLECTION, &result, cli.output)?)
}
