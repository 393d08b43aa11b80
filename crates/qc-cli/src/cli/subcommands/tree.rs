use clap::Subcommand;

/// Code tree commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TreeCommands {
    /// Print the code hierarchy.
    Show,
    /// Save an edited tree (widget JSON) from a file, or `-` for stdin.
    Apply {
        input: String,
        /// Print the parent updates without writing them.
        #[arg(long)]
        dry_run: bool,
    },
}
