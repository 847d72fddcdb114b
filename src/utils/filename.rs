use crate::models::FederationUnit;
use crate::utils::constants::{
    ARCHIVE_EXTENSION, ARCHIVE_PREFIX, EXPORT_PREFIX, SOURCE_EXTENSIONS,
};
use std::path::Path;

/// Archive file name published for a year: consulta_legendas_{YEAR}.zip
pub fn archive_file_name(year: u16) -> String {
    format!("{}_{}.{}", ARCHIVE_PREFIX, year, ARCHIVE_EXTENSION)
}

/// Download URL for a year's archive under `base_url`
pub fn archive_url(base_url: &str, year: u16) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), archive_file_name(year))
}

/// Base name shared by both export files: legend_local_{YEAR}
pub fn export_base_name(year: u16) -> String {
    format!("{}_{}", EXPORT_PREFIX, year)
}

/// Whether `path` is the per-unit source file for `uf` in `year`.
///
/// Matches names like `consulta_legendas_2016_SP.txt`: the stem must end in
/// `_{UF}` and embed the year somewhere before it.
pub fn is_source_file_for(path: &Path, year: u16, uf: FederationUnit) -> bool {
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
        .unwrap_or(false);
    if !extension_ok {
        return false;
    }

    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let suffix = format!("_{}", uf.code());
    let upper = stem.to_ascii_uppercase();
    match upper.strip_suffix(&suffix) {
        Some(head) => head.contains(&year.to_string()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_archive_url() {
        assert_eq!(
            archive_url("https://example.org/legendas/", 2016),
            "https://example.org/legendas/consulta_legendas_2016.zip"
        );
        assert_eq!(
            archive_url("https://example.org/legendas", 2012),
            "https://example.org/legendas/consulta_legendas_2012.zip"
        );
    }

    #[test]
    fn test_export_base_name() {
        assert_eq!(export_base_name(2016), "legend_local_2016");
    }

    #[test]
    fn test_is_source_file_for() {
        let sp = PathBuf::from("2016/consulta_legendas_2016_SP.txt");
        assert!(is_source_file_for(&sp, 2016, FederationUnit::SP));
        assert!(!is_source_file_for(&sp, 2016, FederationUnit::RJ));
        assert!(!is_source_file_for(&sp, 2012, FederationUnit::SP));

        // case of the code and extension does not matter
        let lower = PathBuf::from("consulta_legendas_2016_sp.TXT");
        assert!(is_source_file_for(&lower, 2016, FederationUnit::SP));

        // documentation files are not source files
        let pdf = PathBuf::from("consulta_legendas_2016_SP.pdf");
        assert!(!is_source_file_for(&pdf, 2016, FederationUnit::SP));

        // "_MS" must not match a file for "MS" embedded elsewhere
        let other = PathBuf::from("consulta_legendas_2016_MS_extra.txt");
        assert!(!is_source_file_for(&other, 2016, FederationUnit::MS));
    }
}
