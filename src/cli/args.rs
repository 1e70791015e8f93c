use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the typeexpand binary.
#[derive(Parser, Debug)]
#[command(
    name = "typeexpand",
    version,
    about = "Project TypeScript checker types into portable type objects"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project every top-level declaration of a file.
    Extract(ExtractArgs),
    /// Project the type under a cursor position.
    At(AtArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Checker snapshot (JSON) to load.
    pub snapshot: PathBuf,

    /// File name inside the snapshot.
    pub file: String,

    /// Keep declarations whose alias is instantiated with bare type parameters.
    #[arg(long = "keep-unresolved-generics")]
    pub keep_unresolved_generics: bool,

    /// Levels of object properties to expand eagerly.
    #[arg(long = "expand-depth", default_value_t = 0)]
    pub expand_depth: u32,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct AtArgs {
    /// Checker snapshot (JSON) to load.
    pub snapshot: PathBuf,

    /// File name inside the snapshot.
    pub file: String,

    /// Zero-based line.
    pub line: u32,

    /// Zero-based UTF-16 character offset within the line.
    pub character: u32,

    /// Levels of object properties to expand eagerly.
    #[arg(long = "expand-depth", default_value_t = 0)]
    pub expand_depth: u32,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}
