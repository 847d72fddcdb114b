use crate::error::{LegendError, Result};
use crate::models::schema::{COLUMN_COUNT, UF_COLUMN};
use crate::models::FederationUnit;
use crate::utils::constants::{COMMA, SEMICOLON};
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads one federation unit's delimited coalition file.
pub struct LegendReader {
    encoding: &'static Encoding,
}

impl LegendReader {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Decode `path` and return its data rows, header excluded.
    ///
    /// Every row must be [`COLUMN_COUNT`] wide and belong to `uf`.
    pub fn read_rows(&self, path: &Path, uf: FederationUnit) -> Result<Vec<StringRecord>> {
        let bytes = fs::read(path)?;
        let (text, _, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            warn!(
                file = %path.display(),
                encoding = self.encoding.name(),
                "source contains bytes invalid in the configured encoding"
            );
        }

        let delimiter = sniff_delimiter(&text);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 1);

            if i == 0 && looks_like_header(&record) {
                continue;
            }

            if record.len() != COLUMN_COUNT {
                return Err(LegendError::SchemaMismatch {
                    file: path.to_path_buf(),
                    row: line,
                    expected: COLUMN_COUNT,
                    found: record.len(),
                });
            }

            let found = record.get(UF_COLUMN).unwrap_or("").trim();
            if !found.eq_ignore_ascii_case(uf.code()) {
                return Err(LegendError::UnexpectedFederationUnit {
                    file: path.to_path_buf(),
                    row: line,
                    expected: uf.code().to_string(),
                    found: found.to_string(),
                });
            }

            rows.push(record);
        }

        debug!(
            file = %path.display(),
            rows = rows.len(),
            delimiter = %(delimiter as char),
            "read source file"
        );
        Ok(rows)
    }
}

/// Semicolon unless the first line holds more commas than semicolons.
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if commas > semicolons {
        COMMA
    } else {
        SEMICOLON
    }
}

/// Header rows start with an upper-case identifier such as `DT_GERACAO`.
fn looks_like_header(record: &StringRecord) -> bool {
    let first = record.get(0).unwrap_or("").trim();
    first.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && first
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn line(uf: &str, delimiter: &str) -> String {
        let fields = [
            "10/10/2016",
            "10:59:06",
            "2016",
            "1",
            "ELEIÇÕES MUNICIPAIS 2016",
            uf,
            "01120",
            "RIO BRANCO",
            "11",
            "PREFEITO",
            "COLIGAÇÃO",
            "13",
            "PT",
            "PARTIDO DOS TRABALHADORES",
            "FRENTE POPULAR",
            "10000000123",
            "PT / PC do B",
            "1",
        ];
        fields
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    fn latin1_file(lines: &[String]) -> NamedTempFile {
        let text = lines.join("\n");
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_latin1_semicolon_rows() -> Result<()> {
        let file = latin1_file(&[line("AC", ";"), line("AC", ";"), String::new()]);
        let reader = LegendReader::new(encoding_rs::WINDOWS_1252);

        let rows = reader.read_rows(file.path(), FederationUnit::AC)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(4), Some("ELEIÇÕES MUNICIPAIS 2016"));
        assert_eq!(rows[0].get(6), Some("01120"));
        Ok(())
    }

    #[test]
    fn test_reads_comma_delimited_with_header() -> Result<()> {
        let header = [
            "DT_GERACAO", "HH_GERACAO", "ANO_ELEICAO", "NR_TURNO", "DS_ELEICAO", "SG_UF",
            "SG_UE", "NM_UE", "CD_CARGO", "DS_CARGO", "TP_AGREMIACAO", "NR_PARTIDO",
            "SG_PARTIDO", "NM_PARTIDO", "SG_COLIGACAO", "SQ_COLIGACAO", "DS_COMPOSICAO",
            "NR_SEQ",
        ]
        .join(",");
        let file = latin1_file(&[header, line("RR", ",")]);
        let reader = LegendReader::new(encoding_rs::WINDOWS_1252);

        let rows = reader.read_rows(file.path(), FederationUnit::RR)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(5), Some("RR"));
        Ok(())
    }

    #[test]
    fn test_wrong_width_is_schema_mismatch() {
        let file = latin1_file(&[line("AC", ";"), "\"a\";\"b\";\"c\"".to_string()]);
        let reader = LegendReader::new(encoding_rs::WINDOWS_1252);

        match reader.read_rows(file.path(), FederationUnit::AC) {
            Err(LegendError::SchemaMismatch { row, found, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_unit_rejected() {
        let file = latin1_file(&[line("SP", ";")]);
        let reader = LegendReader::new(encoding_rs::WINDOWS_1252);

        let err = reader.read_rows(file.path(), FederationUnit::AC).unwrap_err();
        assert!(matches!(
            err,
            LegendError::UnexpectedFederationUnit { ref found, .. } if found == "SP"
        ));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a;b;c\n"), SEMICOLON);
        assert_eq!(sniff_delimiter("\n\na,b,c\n"), COMMA);
        assert_eq!(sniff_delimiter("\"x, y\";\"z\";\"w\""), SEMICOLON);
        assert_eq!(sniff_delimiter(""), SEMICOLON);
    }
}
