/// Default location of the published coalition archives
pub const DEFAULT_BASE_URL: &str = "https://cdn.tse.jus.br/estatistica/sead/odsele/consulta_legendas";

/// Archive and source file naming
pub const ARCHIVE_PREFIX: &str = "consulta_legendas";
pub const ARCHIVE_EXTENSION: &str = "zip";
pub const SOURCE_EXTENSIONS: &[&str] = &["txt", "csv"];

/// Export naming
pub const EXPORT_PREFIX: &str = "legend_local";
pub const PARQUET_EXTENSION: &str = "parquet";
pub const ARROW_EXTENSION: &str = "arrow";

/// Municipal election years for which the source publishes coalition files
pub const LOCAL_ELECTION_YEARS: &[u16] = &[1996, 2000, 2004, 2008, 2012, 2016, 2020];

/// Years at or before this one are listed but carry no coalition records
pub const UNAVAILABLE_CUTOFF_YEAR: u16 = 2004;

/// Sentinel accepted in place of explicit federation-unit codes
pub const ALL_FEDERATION_UNITS: &str = "all";

/// Text encoding of the raw source files
pub const DEFAULT_SOURCE_ENCODING: &str = "latin-1";

/// Processing defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Source file delimiters
pub const SEMICOLON: u8 = b';';
pub const COMMA: u8 = b',';

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
