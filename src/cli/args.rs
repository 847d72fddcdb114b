use crate::utils::constants::{ALL_FEDERATION_UNITS, DEFAULT_SAMPLE_ROWS, DEFAULT_SOURCE_ENCODING};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legend-local")]
#[command(about = "Fetch and normalize Brazilian municipal-election coalition records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file [default: ./legend-local.toml if present]")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download one year's archive and build the coalition table
    Fetch {
        #[arg(short, long, help = "Municipal election year")]
        year: u16,

        #[arg(
            short,
            long,
            default_value = ALL_FEDERATION_UNITS,
            help = "Federation units: 'all', a code, or a comma-separated list (e.g. 'SP,RJ')"
        )]
        uf: String,

        #[arg(long, help = "Fold text columns to ASCII")]
        transliterate: bool,

        #[arg(short, long, default_value = DEFAULT_SOURCE_ENCODING)]
        encoding: String,

        #[arg(long, help = "Write Parquet and Arrow files")]
        export: bool,

        #[arg(short, long, help = "Directory for exported files [default: settings output_dir]")]
        output_dir: Option<PathBuf>,

        #[arg(short, long, help = "Use a local zip archive instead of downloading")]
        archive: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression [default: settings compression]")]
        compression: Option<String>,

        #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        sample: usize,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// Display information about an exported Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        sample: usize,
    },

    /// List municipal election years and whether coalition records exist for them
    Years,
}
