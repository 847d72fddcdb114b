pub mod coalition;
pub mod federation_unit;
pub mod request;
pub mod schema;

pub use coalition::{CoalitionRecord, CoalitionTable, TableSummary};
pub use federation_unit::{FederationUnit, UnitSelection};
pub use request::{LegendOutcome, LegendRequest};
pub use schema::{ColumnKind, ColumnSpec, COLUMNS, COLUMN_COUNT};
