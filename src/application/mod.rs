//! Application layer: use cases on top of the domain tree
//!
//! Loads layouts from disk and runs the scripted demo; no terminal output here.

pub mod demo;
pub mod error;
pub mod error_ext;
pub mod layout;

pub use demo::{run_demo, sample_layout, sample_tree, DemoEvent, SampleTree};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use layout::{build_from_file, load_layout};
