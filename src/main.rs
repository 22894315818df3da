use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod dataset;
mod enrich;
mod pass;
mod reconcile;
mod record;
mod resolver;
mod status;
mod util;

use cli::{Command, DefinitionProvider, ImageSource, PassArgs, RootArgs, StatusArgs, UnifyArgs};
use config::{Overrides, ToolConfig};
use dataset::{Checkpoint, DatasetStore, DiscardCheckpoint};
use enrich::{EnrichOptions, EnrichSummary};
use pass::{Step, Target};
use resolver::{
    DatamuseResolver, DictionaryApiResolver, HttpClient, OpenverseResolver, PollinationsResolver,
    YoudaoResolver,
};

/// Exit status after a Ctrl-C, matching shell convention (128 + SIGINT).
const INTERRUPTED_EXIT: u8 = 130;

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Definitions(cmd) => run_pass(&cmd.pass, |config, client| {
            let step = match cmd.provider {
                DefinitionProvider::Datamuse => Step::new(
                    Target::Definition,
                    DatamuseResolver::new(client, &config.endpoints.datamuse),
                ),
                DefinitionProvider::DictionaryApi => Step::new(
                    Target::Definition,
                    DictionaryApiResolver::new(client, &config.endpoints.dictionary_api),
                ),
            };
            vec![step]
        }),
        Command::Translations(pass_args) => run_pass(&pass_args, |config, client| {
            vec![Step::new(
                Target::Translation,
                YoudaoResolver::new(client, &config.endpoints.youdao),
            )]
        }),
        Command::Rich(pass_args) => run_pass(&pass_args, |config, client| {
            vec![
                Step::new(
                    Target::Translation,
                    YoudaoResolver::new(client.clone(), &config.endpoints.youdao),
                ),
                Step::new(
                    Target::Definition,
                    DictionaryApiResolver::new(client, &config.endpoints.dictionary_api),
                ),
            ]
        }),
        Command::Images(cmd) => run_pass(&cmd.pass, |config, client| {
            let step = match cmd.source {
                ImageSource::Generated => Step::new(
                    Target::GeneratedImage,
                    PollinationsResolver::new(&config.endpoints.pollinations),
                ),
                ImageSource::Search => Step::new(
                    Target::SearchedImage,
                    OpenverseResolver::new(client, &config.endpoints.openverse),
                ),
            };
            vec![step]
        }),
        Command::Unify(cmd) => run_unify(&cmd),
        Command::Status(cmd) => run_status(&cmd),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(args: &PassArgs) -> Result<ToolConfig> {
    let overrides = Overrides {
        checkpoint_every: args.checkpoint_every,
        delay_ms: args.delay_ms,
        jitter_ms: args.jitter_ms,
        timeout_secs: args.timeout_secs,
        user_agent: env::var(config::USER_AGENT_ENV).ok(),
    };
    let resolved = config::load_config(args.config.as_deref())?.with_overrides(&overrides);
    config::validate_config(&resolved)?;
    Ok(resolved)
}

/// Set a flag on the first Ctrl-C; exit immediately on the second.
fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || {
        if handler_flag.swap(true, Ordering::SeqCst) {
            std::process::exit(i32::from(INTERRUPTED_EXIT));
        }
        eprintln!("interrupt received; saving progress (press Ctrl-C again to abort)");
    })
    .context("install Ctrl-C handler")?;
    Ok(flag)
}

fn run_pass<F>(args: &PassArgs, build_steps: F) -> Result<ExitCode>
where
    F: FnOnce(&ToolConfig, HttpClient) -> Vec<Step>,
{
    let config = resolve_config(args)?;
    let store = DatasetStore::new(args.data.clone());
    let mut records = store.load()?;
    let cwd = env::current_dir().ok();
    tracing::info!(
        path = %util::display_path(store.path(), cwd.as_deref()),
        records = records.len(),
        "loaded dataset"
    );

    let client = HttpClient::new(config.timeout(), &config.user_agent);
    let steps = build_steps(&config, client);
    let mut options = EnrichOptions::new(config.checkpoint_every);
    options.delay = config.delay();
    options.jitter = config.jitter();
    options.limit = args.limit;
    options.interrupt = install_interrupt_handler()?;

    let sink: &dyn Checkpoint = if args.dry_run {
        &DiscardCheckpoint
    } else {
        &store
    };
    let summary = enrich::enrich(&mut records, &steps, sink, &options)?;
    print_summary(&summary, args.dry_run);

    if summary.interrupted {
        return Ok(ExitCode::from(INTERRUPTED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &EnrichSummary, dry_run: bool) {
    let mut line = format!(
        "Processed {} of {} candidates; updated {}, lookup failures {}.",
        summary.processed, summary.candidates, summary.updated, summary.failed
    );
    if summary.interrupted {
        line.push_str(" Interrupted; progress saved.");
    }
    if dry_run {
        line.push_str(" Dry run; dataset not written.");
    }
    println!("{line}");
}

fn run_unify(args: &UnifyArgs) -> Result<ExitCode> {
    let store = DatasetStore::new(args.data.clone());
    let mut records = store.load()?;
    let summary = reconcile::reconcile(&mut records);
    if summary.changed() && !args.dry_run {
        store.save(&records)?;
    }
    println!(
        "Unified {} records: synced definitions on {}, assigned {} ids.{}",
        summary.records,
        summary.aliases_synced,
        summary.ids_assigned,
        if args.dry_run { " Dry run; dataset not written." } else { "" }
    );
    Ok(ExitCode::SUCCESS)
}

fn run_status(args: &StatusArgs) -> Result<ExitCode> {
    let store = DatasetStore::new(args.data.clone());
    let records = store.load()?;
    let summary = status::summarize(&records);
    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("serialize status")?;
        println!("{text}");
    } else {
        print!("{}", status::render_text(&summary));
    }
    Ok(ExitCode::SUCCESS)
}
