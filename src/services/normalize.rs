/// Canonical form of a free-text cell: straight quotes, trimmed,
/// inner whitespace collapsed to single spaces. Total and idempotent.
pub fn clean(value: &str) -> String {
    let mut s = value.to_string();

    for (curly, straight) in [('\u{2018}', '\''), ('\u{2019}', '\''), ('\u{201C}', '"'), ('\u{201D}', '"')] {
        s = s.replace(curly, &straight.to_string());
    }

    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A year is only usable in a query when it survives `clean` as exactly
/// four decimal digits. Anything else (blanks, "N/A", stray markers) maps
/// to the empty string.
pub fn normalize_year(value: &str) -> String {
    let cleaned = clean(value);

    if cleaned.len() == 4 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        cleaned
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_trims_and_collapses_whitespace() {
        assert_eq!(clean("  The   Matrix \t Reloaded \n"), "The Matrix Reloaded");
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn clean_straightens_typographic_quotes() {
        assert_eq!(clean("Ocean\u{2019}s  Eleven"), "Ocean's Eleven");
        assert_eq!(clean("\u{201C}Crocodile\u{201D} Dundee"), "\"Crocodile\" Dundee");
    }

    #[test]
    fn clean_is_idempotent() {
        for s in ["  a  b ", "Ocean\u{2019}s 11", "", "plain", " \u{201C}x\u{201D}  y "] {
            let once = clean(s);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn clean_never_leaves_whitespace_runs() {
        let out = clean(" a \t\t b\n\n c ");
        assert!(!out.contains("  "));
        assert_eq!(out, "a b c");
    }

    #[test]
    fn normalize_year_accepts_only_four_digits() {
        assert_eq!(normalize_year("1999"), "1999");
        assert_eq!(normalize_year(" 2010 "), "2010");
        assert_eq!(normalize_year("199"), "");
        assert_eq!(normalize_year("19999"), "");
        assert_eq!(normalize_year("20a1"), "");
        assert_eq!(normalize_year("N/A"), "");
        assert_eq!(normalize_year(""), "");
    }

    #[test]
    fn normalize_year_equals_clean_for_digit_strings() {
        for y in ["0000", "1968", "2024"] {
            assert_eq!(normalize_year(y), clean(y));
        }
    }
}
