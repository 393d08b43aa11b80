use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `qc` binary.
#[derive(Debug, Parser)]
#[command(name = "qc", version, about = "qualcode - qualitative coding of research sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// How results are printed
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Rows shown by list commands (defaults to `general.default_limit`)
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Log errors only and skip the serve banner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root or its `.qualcode` directory (defaults to the nearest one above the cwd)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Flags handed to every command handler.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}
