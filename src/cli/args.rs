//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Composite directory/file tree: size aggregation and cascading deletion
#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: ~/.config/dirtree/dirtree.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scripted walkthrough on the sample tree
    Demo,

    /// Show a tree with aggregate sizes
    Tree {
        /// Layout file (default: configured layout, else the sample tree)
        #[arg(value_hint = ValueHint::FilePath)]
        layout: Option<PathBuf>,
    },

    /// Print aggregate sizes
    Size {
        /// Layout file (default: configured layout, else the sample tree)
        #[arg(value_hint = ValueHint::FilePath)]
        layout: Option<PathBuf>,
        /// Print every node, not just the root
        #[arg(short, long)]
        all: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,
}
