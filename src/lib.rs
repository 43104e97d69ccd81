pub mod alias_file;
pub mod cli;
pub mod error;
pub mod frame;
pub mod headers;
pub mod io_utils;
pub mod label;
pub mod registry;
pub mod rename;
pub mod report;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    label::ColumnLabel,
};

pub use crate::{
    error::AliasError,
    frame::{Frame, LabeledTable},
    registry::{AliasRegistry, fold_case},
    rename::{CanonicalOptions, RENAME_RECORD_KEY, RenameRecord},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("column_aliases", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Canonicalize(args) => headers::canonicalize(&args),
        Commands::Restore(args) => headers::restore(&args),
        Commands::Resolve(args) => handle_resolve(&args),
        Commands::List(args) => handle_list(&args),
        Commands::Export(args) => handle_export(&args),
    }
}

fn load_registry(path: &std::path::Path) -> Result<AliasRegistry> {
    let mut registry =
        alias_file::load(path).with_context(|| format!("Loading aliases from {path:?}"))?;
    registry.freeze();
    Ok(registry)
}

fn handle_resolve(args: &cli::ResolveArgs) -> Result<()> {
    let registry = load_registry(&args.aliases)?;
    let labels = args
        .labels
        .iter()
        .map(|label| ColumnLabel::from(label.as_str()))
        .collect::<Vec<_>>();
    let resolved = registry.resolve(Some(labels.as_slice())).unwrap_or_default();
    let rows = labels
        .iter()
        .zip(&resolved)
        .map(|(label, canonical)| vec![label.to_string(), canonical.to_string()])
        .collect::<Vec<_>>();
    report::print_table(&["label", "canonical"], &rows);
    Ok(())
}

fn handle_list(args: &cli::ListArgs) -> Result<()> {
    let registry = load_registry(&args.aliases)?;
    let rows = match &args.canonical {
        Some(canonical) => registry
            .aliases_for(canonical)
            .into_iter()
            .map(|alias| vec![alias, canonical.clone()])
            .collect::<Vec<_>>(),
        None => registry
            .aliases()
            .into_iter()
            .map(|(alias, canonical)| vec![alias, canonical])
            .collect(),
    };
    if rows.is_empty() {
        info!("No aliases matched in {:?}", args.aliases);
        return Ok(());
    }
    report::print_table(&["alias", "canonical"], &rows);
    info!("Listed {} alias(es) from {:?}", rows.len(), args.aliases);
    Ok(())
}

fn handle_export(args: &cli::ExportArgs) -> Result<()> {
    let registry = load_registry(&args.aliases)?;
    alias_file::save(&registry, &args.output)
        .with_context(|| format!("Exporting aliases to {:?}", args.output))?;
    info!(
        "Exported {} alias(es) from {:?} to {:?}",
        registry.len(),
        args.aliases,
        args.output
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
