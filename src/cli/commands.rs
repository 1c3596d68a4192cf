//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{build_from_file, run_demo, sample_tree};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{NodeId, TreeArena};
use crate::render::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(path.as_path()))?,
        None => Settings::load()?,
    };
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Demo) => _demo(),
        Some(Commands::Tree { layout }) => _tree(layout.as_deref(), &settings),
        Some(Commands::Size { layout, all }) => _size(layout.as_deref(), *all, &settings),
        Some(Commands::Config { command }) => _config(command, cli.config.as_deref(), &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Tree from the given layout, the configured layout, or the sample tree.
fn load_tree(layout: Option<&Path>, settings: &Settings) -> CliResult<(TreeArena, NodeId)> {
    match layout.or(settings.layout.as_deref()) {
        Some(path) => {
            debug!(path = %path.display(), "building tree from layout");
            Ok(build_from_file(path)?)
        }
        None => {
            let sample = sample_tree()?;
            Ok((sample.tree, sample.root))
        }
    }
}

#[instrument]
fn _demo() -> CliResult<()> {
    let mut sample = sample_tree()?;
    for event in run_demo(&mut sample)? {
        output::demo_event(&event);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(layout: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let (tree, _) = load_tree(layout, settings)?;
    output::info(&tree.to_tree_string(&settings.render_options()));
    Ok(())
}

#[instrument(skip(settings))]
fn _size(layout: Option<&Path>, all: bool, settings: &Settings) -> CliResult<()> {
    let (tree, root) = load_tree(layout, settings)?;
    if all {
        for (id, _) in tree.iter() {
            output::print_size(&tree, id)?;
        }
    } else {
        output::print_size(&tree, root)?;
    }
    Ok(())
}

fn _config(
    command: &ConfigCommands,
    config_file: Option<&Path>,
    settings: &Settings,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let path: Option<PathBuf> = config_file
                .map(Path::to_path_buf)
                .or_else(global_config_path);
            match path {
                Some(path) if path.exists() => output::info(&path.display()),
                Some(path) => output::info(&format!("{} (not found)", path.display())),
                None => output::warning("no config directory available"),
            }
        }
    }
    Ok(())
}
