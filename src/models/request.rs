use crate::models::{CoalitionTable, UnitSelection};
use crate::utils::constants::DEFAULT_SOURCE_ENCODING;
use std::path::PathBuf;

/// Parameters of one `legend_local` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRequest {
    pub year: u16,
    pub federation_units: UnitSelection,
    pub transliterate: bool,
    pub source_encoding: String,
    pub export: bool,
}

impl LegendRequest {
    pub fn new(year: u16) -> Self {
        Self {
            year,
            federation_units: UnitSelection::All,
            transliterate: false,
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            export: false,
        }
    }

    pub fn with_federation_units(mut self, selection: UnitSelection) -> Self {
        self.federation_units = selection;
        self
    }

    pub fn with_transliterate(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    pub fn with_source_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.source_encoding = encoding.into();
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }
}

/// What a `legend_local` call produced.
#[derive(Debug)]
pub enum LegendOutcome {
    Table {
        table: CoalitionTable,
        /// Files written when export was requested.
        exported: Vec<PathBuf>,
    },
    /// The year is known but the source publishes no coalition records for it.
    Unavailable { year: u16, message: String },
}

impl LegendOutcome {
    pub fn table(&self) -> Option<&CoalitionTable> {
        match self {
            LegendOutcome::Table { table, .. } => Some(table),
            LegendOutcome::Unavailable { .. } => None,
        }
    }

    pub fn into_table(self) -> Option<CoalitionTable> {
        match self {
            LegendOutcome::Table { table, .. } => Some(table),
            LegendOutcome::Unavailable { .. } => None,
        }
    }
}
