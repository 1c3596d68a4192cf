//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::DemoEvent;
use crate::domain::{NodeId, TreeArena, TreeResult};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print `Size of '<name>' = <size>`; `AlreadyDeleted` is returned, not printed.
pub fn print_size(tree: &TreeArena, id: NodeId) -> TreeResult<()> {
    let report = tree.size_report(id)?;
    info(&report);
    Ok(())
}

/// Render one demo event.
pub fn demo_event(event: &DemoEvent) {
    match event {
        DemoEvent::Size(report) => info(report),
        DemoEvent::Deleted(name) => success(&format!("Delete '{}'", name)),
        DemoEvent::Removed { child, container } => {
            success(&format!("Remove '{}' from '{}'", child, container))
        }
        DemoEvent::RemoveFailed { child, container } => {
            failure(&format!("Fail to remove '{}' from '{}'", child, container))
        }
        DemoEvent::AlreadyDeleted(name) => warning(&format!("'{}' was already deleted", name)),
        DemoEvent::Error(e) => error(e),
        DemoEvent::Separator => header("------------------"),
    }
}
