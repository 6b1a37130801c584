use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Feature-driven webpack configuration generator
#[derive(Parser, Debug)]
#[command(
    name = "bundlerig",
    about = "Feature-driven webpack configuration generator",
    version,
    author,
    long_about = "bundlerig composes a webpack configuration from a declarative set of \
                  named features (typescript, sass, polyfill, ...). It validates that the \
                  packages the enabled features need are installed, merges per-feature \
                  rules by priority, and overlays the result onto a base configuration \
                  and your raw webpack overrides."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a webpack configuration",
        long_about = "Reads a feature selection document and optional raw webpack overrides, \
                      and writes the merged configuration.\n\n\
                      Examples:\n  \
                      bundlerig generate\n  \
                      bundlerig generate /path/to/project\n  \
                      bundlerig generate --config rig.json --merge webpack.override.json\n  \
                      bundlerig generate --format human"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "List known features",
        long_about = "Lists every feature the generator knows, with its default state, \
                      required packages, rule category and priority."
    )]
    Features(FeaturesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Project root (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Feature selection document (JSON); defaults to bundlerig.json under the project root"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "merge",
        value_name = "FILE",
        help = "Raw webpack config (JSON) merged last, wins every conflict"
    )]
    pub merge_config: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct FeaturesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}
