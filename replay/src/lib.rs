#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod gate;
pub mod history;
pub mod pipeline;
pub mod scanner;
pub mod source;
pub mod state;
pub mod validate;

pub use config::{Mode, ReplayConfig, ScanConfig};
pub use error::ReplayError;
pub use history::{History, MoveRecord};
pub use pipeline::{Pipeline, Skip, Tick};
pub use state::{ReplayState, View};
