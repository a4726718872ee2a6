use std::path::PathBuf;

use clap::Parser;

use schedres::resources::ResourceList;

use crate::client::output::Outputs;

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Path to a TOML file with emptiness thresholds, comparison tolerances
    /// and the subtract guard
    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        global = true,
        env = "RESQ_CONFIG",
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub config: Option<PathBuf>,

    /// Sets output formatting
    #[arg(
        long,
        env = "RESQ_OUTPUT_MODE",
        default_value_t = Outputs::CLI,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = "RESQ_DEBUG",
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,
}

// Root CLI options
#[derive(Parser)]
#[command(
    author,
    about,
    version(crate::RESQ_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Sum resource lists into a single resource quantity
    Sum(SumOpts),
    /// Compare two resource lists
    Compare(CompareOpts),
    /// Admit requests one by one into a capacity
    Fit(FitOpts),
}

#[derive(Parser)]
pub struct SumOpts {
    /// Resource lists, e.g. `cpu=500m,memory=1Gi,accelerator-count=1`
    #[arg(required = true)]
    pub lists: Vec<ResourceList>,
}

#[derive(Parser)]
pub struct CompareOpts {
    /// Left-hand side of the comparison
    pub left: ResourceList,

    /// Right-hand side of the comparison
    pub right: ResourceList,
}

#[derive(Parser)]
pub struct FitOpts {
    /// Total capacity, e.g. `cpu=8,memory=32Gi,accelerator-count=2`
    #[arg(long)]
    pub capacity: ResourceList,

    /// Request to admit, can be used multiple times
    #[arg(long = "request")]
    pub requests: Vec<ResourceList>,

    /// JSON file with an array of requests, e.g. `[{"cpu": "500m", "memory": "1Gi"}]`
    ///
    /// Requests from the file are admitted after requests passed by `--request`.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub requests_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use schedres::resources::{Quantity, ResourceName};

    #[test]
    fn test_cli_is_valid() {
        RootOptions::command().debug_assert();
    }

    #[test]
    fn test_parse_fit() {
        let opts = RootOptions::try_parse_from([
            "resq",
            "--output-mode",
            "json",
            "fit",
            "--capacity",
            "cpu=2,memory=1Gi",
            "--request",
            "cpu=500m",
            "--request",
            "cpu=1",
        ])
        .unwrap();
        assert!(matches!(opts.common.output_mode, Outputs::JSON));
        match opts.subcmd {
            SubCommand::Fit(fit) => {
                assert_eq!(fit.capacity.total(&ResourceName::Cpu), Quantity::from_units(2));
                assert_eq!(fit.requests.len(), 2);
                assert!(fit.requests_file.is_none());
            }
            _ => panic!("Expected fit command"),
        }
    }

    #[test]
    fn test_parse_invalid_list() {
        assert!(RootOptions::try_parse_from(["resq", "sum", "cpu=abc"]).is_err());
        assert!(RootOptions::try_parse_from(["resq", "sum"]).is_err());
    }
}
