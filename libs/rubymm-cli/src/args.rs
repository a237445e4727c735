use clap::Parser;
use config::constants::{TransformConfig, UnknownNodePolicy, SKIP_UNKNOWN_NODES_ENV};
use std::path::PathBuf;

/// CLI arguments for the rubymm binary.
#[derive(Parser, Debug)]
#[command(
    name = "rubymm",
    version,
    about = "Converts a serialized Ruby syntax tree into a simplified metamodel"
)]
pub struct CliArgs {
    /// Serialized raw tree (JSON). Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Skip raw node kinds without a metamodel counterpart instead of failing.
    #[arg(long, env = SKIP_UNKNOWN_NODES_ENV)]
    pub permissive: bool,

    /// Print the model on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Log transformation progress to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The transformation settings selected on the command line.
    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig::default().with_unknown_nodes(UnknownNodePolicy::from(self.permissive))
    }

    /// The input file, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}
