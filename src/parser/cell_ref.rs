//! A1-style cell reference decoding.

/// Rows in a worksheet (`1..=1_048_576`).
pub(crate) const MAX_ROWS: usize = 1_048_576;

/// Columns in a worksheet (`A..=XFD`).
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// Decode the column letters of a cell reference into a zero-based index.
///
/// Letters are read as a bijective base-26 number (`A` = 0, `Z` = 25,
/// `AA` = 26, ...). Trailing row digits are ignored and `$` anchors are
/// skipped. Returns `None` when the reference has no leading letters.
///
/// ```
/// use sheetpdf::parser::column_index;
///
/// assert_eq!(column_index("A1"), Some(0));
/// assert_eq!(column_index("C7"), Some(2));
/// assert_eq!(column_index("AA10"), Some(26));
/// assert_eq!(column_index("17"), None);
/// ```
pub fn column_index(reference: &str) -> Option<usize> {
    let mut index: usize = 0;
    let mut seen = false;
    for ch in reference.trim_start_matches('$').chars() {
        if ch.is_ascii_alphabetic() {
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            index = index.checked_mul(26)?.checked_add(digit)?;
            seen = true;
        } else {
            break;
        }
    }
    if seen {
        Some(index - 1)
    } else {
        None
    }
}

/// Decode the 1-based row number of a cell reference (`"C7"` -> 7).
pub fn row_number(reference: &str) -> Option<u32> {
    let digits = reference
        .trim_start_matches('$')
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim_start_matches('$');
    digits.parse().ok().filter(|&n| n > 0)
}

/// Encode a zero-based column index as letters (`0` -> `"A"`, `26` -> `"AA"`).
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_single_letters() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("B2"), Some(1));
        assert_eq!(column_index("Z99"), Some(25));
        assert_eq!(column_index("d4"), Some(3));
    }

    #[test]
    fn test_column_index_multi_letters() {
        assert_eq!(column_index("AA1"), Some(26));
        assert_eq!(column_index("AZ1"), Some(51));
        assert_eq!(column_index("BA1"), Some(52));
        assert_eq!(column_index("XFD1048576"), Some(16383));
        assert_eq!(column_index("$C$7"), Some(2));
    }

    #[test]
    fn test_column_index_invalid() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("12"), None);
        assert_eq!(column_index("ZZZZZZZZZZZZZZZZ1"), None);
    }

    #[test]
    fn test_row_number() {
        assert_eq!(row_number("C7"), Some(7));
        assert_eq!(row_number("$AB$120"), Some(120));
        assert_eq!(row_number("A0"), None);
        assert_eq!(row_number("A"), None);
    }

    #[test]
    fn test_column_letters_inverse() {
        for (index, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (51, "AZ"), (701, "ZZ"), (702, "AAA")] {
            assert_eq!(column_letters(index), letters);
            assert_eq!(column_index(&format!("{}1", letters)), Some(index));
        }
    }
}
