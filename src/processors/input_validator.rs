use crate::error::{LegendError, Result};
use crate::models::{FederationUnit, UnitSelection};
use crate::utils::constants::{LOCAL_ELECTION_YEARS, UNAVAILABLE_CUTOFF_YEAR};
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearCheck {
    Available,
    /// Known election year without published coalition records.
    Unavailable { message: String },
}

/// Resolve an encoding label such as `latin-1`, `ISO-8859-1` or `utf8`.
pub fn validate_encoding(name: &str) -> Result<&'static Encoding> {
    let label = name.trim().to_ascii_lowercase();
    if label.is_empty() {
        return Err(LegendError::InvalidEncoding(name.to_string()));
    }

    Encoding::for_label(label.as_bytes())
        .or_else(|| {
            let compact: String = label.chars().filter(|c| *c != '-' && *c != '_').collect();
            Encoding::for_label(compact.as_bytes())
        })
        // labels like `replacement` or `iso-2022-kr` decode any input to a single U+FFFD
        .filter(|encoding| *encoding != encoding_rs::REPLACEMENT)
        .ok_or_else(|| LegendError::InvalidEncoding(name.to_string()))
}

pub fn validate_year(year: u16) -> Result<YearCheck> {
    if !LOCAL_ELECTION_YEARS.contains(&year) {
        return Err(LegendError::UnsupportedYear {
            year,
            known: LOCAL_ELECTION_YEARS
                .iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    if year <= UNAVAILABLE_CUTOFF_YEAR {
        return Ok(YearCheck::Unavailable {
            message: format!(
                "Coalition records are only published for municipal elections after {}; nothing to fetch for {}",
                UNAVAILABLE_CUTOFF_YEAR, year
            ),
        });
    }

    Ok(YearCheck::Available)
}

/// Turn a selection into the ordered list of units to process.
///
/// `All` yields every unit alphabetically; explicit codes keep the caller's
/// order with repeats dropped.
pub fn expand_federation_units(selection: &UnitSelection) -> Result<Vec<FederationUnit>> {
    if selection.is_all() {
        return Ok(FederationUnit::ALL.to_vec());
    }

    match selection {
        UnitSelection::All => Ok(FederationUnit::ALL.to_vec()),
        UnitSelection::Codes(codes) => {
            if codes.is_empty() {
                return Err(LegendError::InvalidFederationUnit(String::new()));
            }

            let mut units = Vec::with_capacity(codes.len());
            for code in codes {
                let uf: FederationUnit = code.parse()?;
                if !units.contains(&uf) {
                    units.push(uf);
                }
            }
            Ok(units)
        }
    }
}
