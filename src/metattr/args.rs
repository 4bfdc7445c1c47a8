use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metattr")]
#[command(about = "Inspect and edit media metadata attached to files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing config.json (defaults to the user config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the attachments of one or more files
    #[command(alias = "s")]
    Show {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Print the stored metadata text instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Set the original file name (an empty name clears it)
    SetName { file: PathBuf, name: String },

    /// Remove the original name and metadata from one or more files
    Clear {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Copy attachments from one file to another
    #[command(alias = "cp")]
    Copy { source: PathBuf, target: PathBuf },
}
