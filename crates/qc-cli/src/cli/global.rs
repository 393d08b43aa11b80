use clap::ValueEnum;
use qc_config::GeneralConfig;

/// How command results are printed on stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON in the API's camelCase shape.
    Json,
    /// Column views per record type; the code tree prints as an outline.
    Table,
    /// Single-line JSON for piping into other tools.
    Raw,
}

/// Flags accepted before or after any subcommand.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    /// Explicit project root; otherwise the nearest `.qualcode` ancestor.
    pub project: Option<String>,
}

impl GlobalFlags {
    /// Row count for list commands: `--limit` when positive, else `configured`.
    #[must_use]
    pub fn limit_or(&self, configured: u32) -> u32 {
        GeneralConfig::resolve_limit(self.limit, configured)
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalFlags, OutputFormat};

    fn flags(limit: Option<u32>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit,
            quiet: false,
            verbose: false,
            project: None,
        }
    }

    #[test]
    fn limit_flag_overrides_configured_default() {
        assert_eq!(flags(Some(5)).limit_or(50), 5);
        assert_eq!(flags(None).limit_or(50), 50);
    }

    #[test]
    fn zero_limit_flag_falls_back() {
        assert_eq!(flags(Some(0)).limit_or(50), 50);
        assert_eq!(flags(None).limit_or(0), 1);
    }
}
