use clap::Subcommand;

/// Code commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CodeCommands {
    /// List every code with its coding count.
    List,
    /// Create a root code.
    Create { name: String },
    /// Move a code under another code, or to the root without `--parent`.
    Move {
        id: i64,
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Show a code with its codings.
    Codings { id: i64 },
}
