//! Main entry point for the fix-attrs CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use fix_attrs::{Format, FsApplicator, IdentityResolver};

#[derive(Parser, Debug)]
#[command(name = "fix-attrs", version, about = "fixes file attributes based on a configuration file")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fix ownership and permission modes for the paths named in CONFIG.
    Fix {
        /// Configuration file describing paths and their attributes.
        config: PathBuf,

        /// File format; defaults to the file extension, then to json.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum FormatArg {
    Json,
    Yml,
}

impl From<FormatArg> for Format {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => Format::Json,
            FormatArg::Yml => Format::Yml,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match args.command {
        Commands::Fix { config, format } => {
            let mut resolver = IdentityResolver::default();
            let res = fix_attrs::run(&config, format.map(Into::into), &mut resolver, &FsApplicator);
            if let Err(e) = res {
                eprintln!("fix-attrs: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
