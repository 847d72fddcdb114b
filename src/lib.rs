pub mod archive;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{LegendError, Result};
pub use models::{CoalitionTable, FederationUnit, LegendOutcome, LegendRequest, UnitSelection};
pub use processors::{legend_local, run_pipeline};
pub use settings::Settings;
