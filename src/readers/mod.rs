pub mod legend_reader;

pub use legend_reader::LegendReader;
