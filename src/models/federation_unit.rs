use crate::error::LegendError;
use crate::utils::constants::ALL_FEDERATION_UNITS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brazilian state or the Federal District, by two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FederationUnit {
    AC,
    AL,
    AM,
    AP,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MG,
    MS,
    MT,
    PA,
    PB,
    PE,
    PI,
    PR,
    RJ,
    RN,
    RO,
    RR,
    RS,
    SC,
    SE,
    SP,
    TO,
}

impl FederationUnit {
    /// Every unit in alphabetical order of its code.
    pub const ALL: [FederationUnit; 27] = [
        FederationUnit::AC,
        FederationUnit::AL,
        FederationUnit::AM,
        FederationUnit::AP,
        FederationUnit::BA,
        FederationUnit::CE,
        FederationUnit::DF,
        FederationUnit::ES,
        FederationUnit::GO,
        FederationUnit::MA,
        FederationUnit::MG,
        FederationUnit::MS,
        FederationUnit::MT,
        FederationUnit::PA,
        FederationUnit::PB,
        FederationUnit::PE,
        FederationUnit::PI,
        FederationUnit::PR,
        FederationUnit::RJ,
        FederationUnit::RN,
        FederationUnit::RO,
        FederationUnit::RR,
        FederationUnit::RS,
        FederationUnit::SC,
        FederationUnit::SE,
        FederationUnit::SP,
        FederationUnit::TO,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FederationUnit::AC => "AC",
            FederationUnit::AL => "AL",
            FederationUnit::AM => "AM",
            FederationUnit::AP => "AP",
            FederationUnit::BA => "BA",
            FederationUnit::CE => "CE",
            FederationUnit::DF => "DF",
            FederationUnit::ES => "ES",
            FederationUnit::GO => "GO",
            FederationUnit::MA => "MA",
            FederationUnit::MG => "MG",
            FederationUnit::MS => "MS",
            FederationUnit::MT => "MT",
            FederationUnit::PA => "PA",
            FederationUnit::PB => "PB",
            FederationUnit::PE => "PE",
            FederationUnit::PI => "PI",
            FederationUnit::PR => "PR",
            FederationUnit::RJ => "RJ",
            FederationUnit::RN => "RN",
            FederationUnit::RO => "RO",
            FederationUnit::RR => "RR",
            FederationUnit::RS => "RS",
            FederationUnit::SC => "SC",
            FederationUnit::SE => "SE",
            FederationUnit::SP => "SP",
            FederationUnit::TO => "TO",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|uf| uf.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for FederationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for FederationUnit {
    type Err = LegendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| LegendError::InvalidFederationUnit(s.to_string()))
    }
}

/// Which federation units a request covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitSelection {
    /// Every known unit; units without a source file are skipped.
    #[default]
    All,
    /// Caller-named codes, not yet validated; each must have a source file.
    Codes(Vec<String>),
}

impl UnitSelection {
    pub fn single(code: impl Into<String>) -> Self {
        UnitSelection::Codes(vec![code.into()])
    }

    pub fn codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UnitSelection::Codes(codes.into_iter().map(Into::into).collect())
    }

    /// True for `All` and for a lone `"all"` code.
    pub fn is_all(&self) -> bool {
        match self {
            UnitSelection::All => true,
            UnitSelection::Codes(codes) => {
                codes.len() == 1 && codes[0].trim().eq_ignore_ascii_case(ALL_FEDERATION_UNITS)
            }
        }
    }
}

impl FromStr for UnitSelection {
    type Err = LegendError;

    /// Parses `all`, `SP` or a comma-separated list such as `SP,RJ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_FEDERATION_UNITS) {
            return Ok(UnitSelection::All);
        }

        let codes: Vec<String> = trimmed
            .split(',')
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if codes.is_empty() {
            return Err(LegendError::InvalidFederationUnit(s.to_string()));
        }
        Ok(UnitSelection::Codes(codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(FederationUnit::from_code("sp"), Some(FederationUnit::SP));
        assert_eq!(FederationUnit::from_code(" RJ "), Some(FederationUnit::RJ));
        assert_eq!(FederationUnit::from_code("XX"), None);
        assert_eq!(FederationUnit::from_code("BR"), None);
    }

    #[test]
    fn test_all_is_sorted_and_round_trips() {
        let codes: Vec<&str> = FederationUnit::ALL.iter().map(|uf| uf.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);

        for uf in FederationUnit::ALL {
            assert_eq!(uf.code().parse::<FederationUnit>().unwrap(), uf);
        }
    }

    #[test]
    fn test_selection_from_str() {
        assert_eq!("ALL".parse::<UnitSelection>().unwrap(), UnitSelection::All);
        assert_eq!(
            "sp".parse::<UnitSelection>().unwrap(),
            UnitSelection::single("sp")
        );
        assert_eq!(
            "SP, RJ,".parse::<UnitSelection>().unwrap(),
            UnitSelection::codes(["SP", "RJ"])
        );
        assert!(" , ".parse::<UnitSelection>().is_err());
    }

    #[test]
    fn test_lone_all_code_selects_everything() {
        assert!(UnitSelection::All.is_all());
        assert!(UnitSelection::single("all").is_all());
        assert!(UnitSelection::codes([" ALL "]).is_all());
        assert!(!UnitSelection::single("SP").is_all());
        assert!(!UnitSelection::codes(["all", "SP"]).is_all());
    }
}
