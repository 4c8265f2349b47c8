use clap::Parser;
use std::path::PathBuf;

/// Posts accessibility feature statuses read from stdin.
///
/// Each input line is `<feature> <status>` (e.g. `voice_over enabled`).
/// Every posted status is printed to stdout as `feature=status`.
#[derive(Debug, Parser)]
#[command(name = "capable", version, about)]
pub(crate) struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults and `CAPABLE__*` variables apply without it.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Overrides `logging.level`.
    #[arg(short, long, value_name = "LEVEL")]
    pub(crate) log_level: Option<String>,
}
