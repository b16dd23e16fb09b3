use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "concord",
    about = "Concord: cross-file consistency checks for redundantly declared values",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every configured group over a directory tree
    Check {
        /// Root of the tree to walk
        #[arg(default_value = ".")]
        path: String,

        /// Path to the group configuration (TOML)
        #[arg(long, default_value = "concord.toml")]
        config: String,

        /// Restrict the run to the named group (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,

        /// Decode documents strictly, without lenient repair
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured groups and their members
    Groups {
        /// Path to the group configuration (TOML)
        #[arg(long, default_value = "concord.toml")]
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
