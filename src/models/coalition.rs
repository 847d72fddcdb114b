use crate::error::{LegendError, Result};
use crate::models::schema::{
    column_index, column_names, COLUMNS, COLUMN_COUNT, BALLOT_TYPE_COLUMN, PARTY_ACRONYM_COLUMN,
    UF_COLUMN,
};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Typed view of one party-or-coalition registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoalitionRecord {
    #[serde(rename = "DATA_GERACAO")]
    pub generation_date: String,
    #[serde(rename = "HORA_GERACAO")]
    pub generation_time: String,
    #[serde(rename = "ANO_ELEICAO", deserialize_with = "csv::invalid_option")]
    pub election_year: Option<i64>,
    #[serde(rename = "NUM_TURNO", deserialize_with = "csv::invalid_option")]
    pub round: Option<i64>,
    #[serde(rename = "DESCRICAO_ELEICAO")]
    pub election_description: String,
    #[serde(rename = "SIGLA_UF")]
    pub federation_unit: String,
    #[serde(rename = "SIGLA_UE")]
    pub electoral_unit_code: String,
    #[serde(rename = "NOME_UE")]
    pub electoral_unit_name: String,
    #[serde(rename = "CODIGO_CARGO", deserialize_with = "csv::invalid_option")]
    pub position_code: Option<i64>,
    #[serde(rename = "DESCRICAO_CARGO")]
    pub position_description: String,
    #[serde(rename = "TIPO_LEGENDA")]
    pub ballot_type: String,
    #[serde(rename = "NUM_PARTIDO", deserialize_with = "csv::invalid_option")]
    pub party_number: Option<i64>,
    #[serde(rename = "SIGLA_PARTIDO")]
    pub party_acronym: String,
    #[serde(rename = "NOME_PARTIDO")]
    pub party_name: String,
    #[serde(rename = "SIGLA_COLIGACAO")]
    pub coalition_acronym: String,
    #[serde(rename = "CODIGO_COLIGACAO", deserialize_with = "csv::invalid_option")]
    pub coalition_code: Option<i64>,
    #[serde(rename = "COMPOSICAO_COLIGACAO")]
    pub coalition_composition: String,
    #[serde(rename = "SEQUENCIAL_COLIGACAO", deserialize_with = "csv::invalid_option")]
    pub coalition_sequence: Option<i64>,
}

impl CoalitionRecord {
    pub fn generation_date(&self) -> Option<NaiveDate> {
        parse_generation_date(&self.generation_date)
    }

    /// True for coalition ballots, false for isolated parties.
    pub fn is_coalition(&self) -> bool {
        is_coalition_ballot(&self.ballot_type)
    }

    /// Member parties listed in the composition field (`PT / PC do B / PSB`).
    pub fn member_parties(&self) -> Vec<&str> {
        self.coalition_composition
            .split('/')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

pub(crate) fn parse_generation_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

fn is_coalition_ballot(value: &str) -> bool {
    value.trim().to_uppercase().starts_with("COLIGA")
}

/// Aggregated coalition records under the canonical 18-column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CoalitionTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl CoalitionTable {
    pub fn empty() -> Self {
        Self {
            headers: StringRecord::from(column_names().collect::<Vec<_>>()),
            rows: Vec::new(),
        }
    }

    /// Assign the canonical names to raw rows by position.
    ///
    /// Every row must be exactly [`COLUMN_COUNT`] wide.
    pub fn from_rows(rows: Vec<StringRecord>) -> Result<Self> {
        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != COLUMN_COUNT)
        {
            return Err(LegendError::SchemaMismatch {
                file: PathBuf::from("<aggregate>"),
                row: row + 1,
                expected: COLUMN_COUNT,
                found: record.len(),
            });
        }

        let mut table = Self::empty();
        table.rows = rows;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.headers.iter().collect()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Values of a column by canonical name, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = column_index(name)?;
        Some(self.rows.iter().map(|r| r.get(index).unwrap_or("")).collect())
    }

    pub fn records(&self) -> impl Iterator<Item = Result<CoalitionRecord>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.deserialize(Some(&self.headers)).map_err(LegendError::from))
    }

    /// Rewrite every text-kind value with `f`; other kinds are left alone.
    pub fn map_text_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(COLUMNS.iter())
                    .map(|(value, spec)| {
                        if spec.kind.is_text() {
                            f(value)
                        } else {
                            value.to_string()
                        }
                    })
                    .collect::<StringRecord>()
            })
            .collect();

        Self {
            headers: self.headers.clone(),
            rows,
        }
    }

    pub fn summary(&self) -> TableSummary {
        let mut rows_per_unit: Vec<(String, usize)> = Vec::new();
        let mut coalition_rows = 0;
        let mut parties = BTreeSet::new();

        for row in &self.rows {
            let uf = row.get(UF_COLUMN).unwrap_or("");
            let same_unit = rows_per_unit.last().is_some_and(|(last, _)| last == uf);
            match rows_per_unit.last_mut() {
                Some((_, count)) if same_unit => *count += 1,
                _ => rows_per_unit.push((uf.to_string(), 1)),
            }

            if is_coalition_ballot(row.get(BALLOT_TYPE_COLUMN).unwrap_or("")) {
                coalition_rows += 1;
            }
            if let Some(party) = row.get(PARTY_ACRONYM_COLUMN) {
                parties.insert(party.trim().to_string());
            }
        }

        TableSummary {
            total_rows: self.rows.len(),
            columns: self.column_count(),
            rows_per_unit,
            coalition_rows,
            isolated_party_rows: self.rows.len() - coalition_rows,
            distinct_parties: parties.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub total_rows: usize,
    pub columns: usize,
    /// Row counts per federation unit, in table order.
    pub rows_per_unit: Vec<(String, usize)>,
    pub coalition_rows: usize,
    pub isolated_party_rows: usize,
    pub distinct_parties: usize,
}

impl TableSummary {
    pub fn summary(&self) -> String {
        let units = self
            .rows_per_unit
            .iter()
            .map(|(uf, n)| format!("{}={}", uf, n))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Coalition Records:\n- Rows: {}\n- Columns: {}\n- Coalition ballots: {}\n- Isolated parties: {}\n- Distinct parties: {}\n- Rows per unit: {}",
            self.total_rows,
            self.columns,
            self.coalition_rows,
            self.isolated_party_rows,
            self.distinct_parties,
            if units.is_empty() { "-".to_string() } else { units }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(uf: &str, ballot: &str, party: &str) -> StringRecord {
        StringRecord::from(vec![
            "10/10/2016",
            "10:59:06",
            "2016",
            "1",
            "ELEIÇÕES MUNICIPAIS 2016",
            uf,
            "71072",
            "SÃO PAULO",
            "11",
            "PREFEITO",
            ballot,
            "13",
            party,
            "PARTIDO DOS TRABALHADORES",
            "MAIS SÃO PAULO",
            "250000012345",
            "PT / PC do B / PR",
            "#NULO#",
        ])
    }

    #[test]
    fn test_from_rows_assigns_canonical_names() {
        let table = CoalitionTable::from_rows(vec![row("SP", "COLIGAÇÃO", "PT")]).unwrap();
        assert_eq!(table.column_count(), COLUMN_COUNT);
        assert_eq!(table.column_names()[0], "DATA_GERACAO");
        assert_eq!(table.column_names()[17], "SEQUENCIAL_COLIGACAO");
        assert_eq!(table.column("SIGLA_UF").unwrap(), vec!["SP"]);
    }

    #[test]
    fn test_from_rows_rejects_wrong_width() {
        let short = StringRecord::from(vec!["a", "b", "c"]);
        let err = CoalitionTable::from_rows(vec![row("SP", "COLIGAÇÃO", "PT"), short]).unwrap_err();
        match err {
            LegendError::SchemaMismatch {
                row,
                expected,
                found,
                ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(expected, 18);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_typed_records() {
        let table = CoalitionTable::from_rows(vec![row("SP", "COLIGAÇÃO", "PT")]).unwrap();
        let record = table.records().next().unwrap().unwrap();

        assert_eq!(record.election_year, Some(2016));
        assert_eq!(record.coalition_code, Some(250000012345));
        assert_eq!(record.coalition_sequence, None);
        assert_eq!(
            record.generation_date(),
            NaiveDate::from_ymd_opt(2016, 10, 10)
        );
        assert!(record.is_coalition());
        assert_eq!(record.member_parties(), vec!["PT", "PC do B", "PR"]);
    }

    #[test]
    fn test_summary() {
        let table = CoalitionTable::from_rows(vec![
            row("AC", "COLIGAÇÃO", "PT"),
            row("AC", "PARTIDO ISOLADO", "PSOL"),
            row("SP", "COLIGACAO", "PT"),
        ])
        .unwrap();

        let summary = table.summary();
        assert_eq!(summary.total_rows, 3);
        assert_eq!(
            summary.rows_per_unit,
            vec![("AC".to_string(), 2), ("SP".to_string(), 1)]
        );
        assert_eq!(summary.coalition_rows, 2);
        assert_eq!(summary.isolated_party_rows, 1);
        assert_eq!(summary.distinct_parties, 2);
        assert!(summary.summary().contains("AC=2, SP=1"));
    }
}
