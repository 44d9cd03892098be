use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_STORIES_FILE: &str = "stories.json";
pub const DEFAULT_ADMIN_KEY: &str = "admin123";

#[derive(Parser, Debug)]
#[command(name = "tales")]
#[command(version, about = "A story library and story capsule service")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the file-backed story library (reader pages, JSON API, admin)
    Serve {
        /// Address to listen on
        #[arg(long, env = "TALES_BIND", default_value = DEFAULT_BIND)]
        bind: String,

        /// JSON file holding the stories
        #[arg(long, env = "TALES_STORIES_FILE", default_value = DEFAULT_STORIES_FILE)]
        file: PathBuf,

        /// Key admin requests must present
        #[arg(
            long,
            env = "TALES_ADMIN_KEY",
            default_value = DEFAULT_ADMIN_KEY,
            hide_env_values = true,
            hide_default_value = true
        )]
        admin_key: String,
    },

    /// Serve the in-memory story capsule API
    Capsule {
        /// Address to listen on
        #[arg(long, env = "TALES_BIND", default_value = DEFAULT_BIND)]
        bind: String,

        /// Start with no stories instead of the sample capsule
        #[arg(long)]
        no_seed: bool,
    },

    /// List stories in the library file
    List {
        /// JSON file holding the stories
        #[arg(long, env = "TALES_STORIES_FILE", default_value = DEFAULT_STORIES_FILE)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a library story one sentence per line
    Read {
        /// Story ID
        id: u64,

        /// JSON file holding the stories
        #[arg(long, env = "TALES_STORIES_FILE", default_value = DEFAULT_STORIES_FILE)]
        file: PathBuf,
    },
}
