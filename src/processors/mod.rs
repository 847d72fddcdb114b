pub mod aggregator;
pub mod input_validator;
pub mod pipeline;
pub mod transliterator;

pub use aggregator::{Aggregator, MissingFilePolicy};
pub use input_validator::{expand_federation_units, validate_encoding, validate_year, YearCheck};
pub use pipeline::{legend_local, run_pipeline, Stage};
pub use transliterator::{fold_to_ascii, transliterate};
