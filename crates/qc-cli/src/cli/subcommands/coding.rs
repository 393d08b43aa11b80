use clap::{ArgGroup, Subcommand};

/// Coding commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CodingCommands {
    /// Attach an excerpt of a source to a code.
    Create {
        /// Source id.
        #[arg(long)]
        source: i64,
        /// Code id.
        #[arg(long)]
        code: i64,
        #[arg(long)]
        snippet: String,
        #[arg(long)]
        start: Option<i64>,
        #[arg(long)]
        end: Option<i64>,
    },
    /// Update a coding.
    Update {
        id: i64,
        #[arg(long)]
        snippet: Option<String>,
        #[arg(long)]
        start: Option<i64>,
        #[arg(long)]
        end: Option<i64>,
    },
    /// List codings of a code (by id) or of a source (by source number).
    #[command(group(ArgGroup::new("owner").required(true).args(["code", "source"])))]
    List {
        #[arg(long)]
        code: Option<i64>,
        #[arg(long)]
        source: Option<i64>,
    },
}
