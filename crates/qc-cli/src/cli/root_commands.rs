use clap::{Args, Subcommand};

use crate::cli::subcommands::{CodeCommands, CodingCommands, SourceCommands, TreeCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize qualcode for a project directory.
    Init(InitArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Codes and the flat code list.
    Code {
        #[command(subcommand)]
        action: CodeCommands,
    },
    /// Codings (coded excerpts of a source).
    Coding {
        #[command(subcommand)]
        action: CodingCommands,
    },
    /// Sources.
    Source {
        #[command(subcommand)]
        action: SourceCommands,
    },
    /// The code hierarchy as a tree.
    Tree {
        #[command(subcommand)]
        action: TreeCommands,
    },
}

/// Arguments for `qc init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    pub path: Option<String>,
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `qc serve`.
#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Address to bind, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}
