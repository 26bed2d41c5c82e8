pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::RosterPipeline};
pub use domain::model::{EventSettings, MusicianRecord, RunReport};
pub use report::RosterSummary;
pub use utils::error::{EtlError, Result};
