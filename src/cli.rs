//! CLI argument parsing for the enrichment passes.
//!
//! Every subcommand names its dataset explicitly; nothing defaults to a
//! hard-coded file location.
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vocab-enrich",
    version,
    about = "Fill gaps in a vocabulary dataset from dictionary, translation, and image services",
    after_help = "Examples:\n  vocab-enrich status --data words.json\n  vocab-enrich definitions --data words.json --provider dictionary-api\n  vocab-enrich translations --data words.json --checkpoint-every 10\n  vocab-enrich images --data words.json --source search --delay-ms 1500 --jitter-ms 1500\n  vocab-enrich unify --data words.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill English definitions (definition, definitionEn, meaning)
    Definitions(DefinitionsArgs),
    /// Fill Chinese translations
    Translations(PassArgs),
    /// Fill translations, then definitions, in one pass
    Rich(PassArgs),
    /// Fill image URLs
    Images(ImagesArgs),
    /// Sync definition aliases and assign missing ids (offline)
    Unify(UnifyArgs),
    /// Count records needing each pass (read-only)
    Status(StatusArgs),
}

/// Options shared by every network pass.
#[derive(Args, Debug, Clone)]
pub struct PassArgs {
    /// Dataset JSON file, rewritten in place
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Config file (defaults to <config dir>/vocab-enrich/config.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Save after this many processed records
    #[arg(long, value_name = "N")]
    pub checkpoint_every: Option<usize>,

    /// Pause between lookups, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Random extra pause of up to this many milliseconds
    #[arg(long, value_name = "MS")]
    pub jitter_ms: Option<u64>,

    /// Per-lookup timeout, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Stop after this many processed records
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Run lookups but never write the dataset
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct DefinitionsArgs {
    #[command(flatten)]
    pub pass: PassArgs,

    /// Definition source
    #[arg(long, value_enum, default_value_t = DefinitionProvider::Datamuse)]
    pub provider: DefinitionProvider,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionProvider {
    Datamuse,
    DictionaryApi,
}

#[derive(Args, Debug)]
pub struct ImagesArgs {
    #[command(flatten)]
    pub pass: PassArgs,

    /// `generated` fills missing URLs; `search` also replaces generated ones
    #[arg(long, value_enum, default_value_t = ImageSource::Generated)]
    pub source: ImageSource,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Generated,
    Search,
}

#[derive(Args, Debug)]
pub struct UnifyArgs {
    /// Dataset JSON file, rewritten in place
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Report changes without writing the dataset
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Dataset JSON file
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
