use clap::{Args, Subcommand, ValueEnum};

/// Source commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SourceCommands {
    /// List sources ordered by number.
    List,
    /// Register a source.
    Create {
        #[arg(long)]
        number: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        publication_title: Option<String>,
        #[arg(long)]
        source_type: Option<String>,
        #[arg(long)]
        search_type: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Show a source with its codings.
    Get { number: i64 },
    /// Edit the descriptive fields of a source.
    Update(SourceEditArgs),
    /// Mark the initial coding pass over a source as done.
    Review {
        number: i64,
        /// Mark as not done instead.
        #[arg(long)]
        undo: bool,
    },
    /// Count reviewed sources per source type.
    Summary,
}

/// Fields for `qc source update`. Unset flags leave the field alone.
#[derive(Clone, Debug, Args)]
pub struct SourceEditArgs {
    pub number: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub publication_title: Option<String>,
    #[arg(long)]
    pub source_type: Option<String>,
    #[arg(long)]
    pub search_type: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    /// Clear an optional field. Repeatable.
    #[arg(long, value_enum)]
    pub clear: Vec<SourceField>,
}

/// Optional source fields that `--clear` can reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceField {
    Author,
    PublicationTitle,
    SourceType,
    SearchType,
    Url,
}
