use crate::models::CoalitionTable;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const REPLACEMENT: char = '?';

/// Fold every text column of `table` to ASCII. Date, time and integer columns are copied as is.
pub fn transliterate(table: &CoalitionTable) -> CoalitionTable {
    table.map_text_columns(fold_to_ascii)
}

/// ASCII rendering of `value`: accents dropped, a few symbols spelled out,
/// anything else without an ASCII form replaced by `?`.
pub fn fold_to_ascii(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    for c in value.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        match c {
            'ß' => out.push_str("ss"),
            'Æ' => out.push_str("AE"),
            'æ' => out.push_str("ae"),
            'Œ' => out.push_str("OE"),
            'œ' => out.push_str("oe"),
            'Ø' => out.push('O'),
            'ø' => out.push('o'),
            'Đ' => out.push('D'),
            'đ' => out.push('d'),
            '‐' | '‑' | '‒' | '–' | '—' => out.push('-'),
            '‘' | '’' | '‚' | '´' => out.push('\''),
            '“' | '”' | '„' => out.push('"'),
            '\u{a0}' => out.push(' '),
            _ => out.push(REPLACEMENT),
        }
    }
    out
}
