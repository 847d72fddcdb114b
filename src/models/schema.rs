/// How a column's values are interpreted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    /// dd/mm/yyyy
    Date,
    /// hh:mm:ss
    Time,
}

impl ColumnKind {
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnKind::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

const fn column(name: &'static str, label: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, label, kind }
}

pub const COLUMN_COUNT: usize = 18;

/// Canonical layout of a coalition record; source columns are mapped onto it by position.
pub const COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    column("DATA_GERACAO", "Generation date", ColumnKind::Date),
    column("HORA_GERACAO", "Generation time", ColumnKind::Time),
    column("ANO_ELEICAO", "Election year", ColumnKind::Integer),
    column("NUM_TURNO", "Round number", ColumnKind::Integer),
    column("DESCRICAO_ELEICAO", "Election description", ColumnKind::Text),
    column("SIGLA_UF", "Federation unit code", ColumnKind::Text),
    column("SIGLA_UE", "Electoral unit code", ColumnKind::Text),
    column("NOME_UE", "Electoral unit name", ColumnKind::Text),
    column("CODIGO_CARGO", "Position code", ColumnKind::Integer),
    column("DESCRICAO_CARGO", "Position description", ColumnKind::Text),
    column("TIPO_LEGENDA", "Ballot type (coalition or isolated party)", ColumnKind::Text),
    column("NUM_PARTIDO", "Party number", ColumnKind::Integer),
    column("SIGLA_PARTIDO", "Party acronym", ColumnKind::Text),
    column("NOME_PARTIDO", "Party name", ColumnKind::Text),
    column("SIGLA_COLIGACAO", "Coalition acronym", ColumnKind::Text),
    column("CODIGO_COLIGACAO", "Coalition code", ColumnKind::Integer),
    column("COMPOSICAO_COLIGACAO", "Coalition composition", ColumnKind::Text),
    column("SEQUENCIAL_COLIGACAO", "Coalition sequential identifier", ColumnKind::Integer),
];

pub const UF_COLUMN: usize = 5;
pub const BALLOT_TYPE_COLUMN: usize = 10;
pub const PARTY_ACRONYM_COLUMN: usize = 12;

pub fn column_names() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.name)
}

pub fn column_index(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.name.eq_ignore_ascii_case(name))
}
