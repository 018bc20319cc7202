//! Spreadsheet-style cell addresses ("C7") and their (row, column) form

use crate::error::OdsError;
use regex::Regex;
use std::sync::OnceLock;

/// A zero-based (row, column) pair resolved from a position string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// The address string for this position, e.g. `(6, 2)` -> `"C7"`.
    pub fn to_address(&self) -> String {
        format!("{}{}", column_to_letters(self.column), self.row + 1)
    }
}

/// Parse an address like `"C7"` or `"$AA$12"` into a zero-based position.
///
/// Letters are case-insensitive base-26 (A=0..Z=25, AA=26, ...), digits are
/// the 1-based row number. `$` absolute markers are accepted and ignored.
pub fn parse_position(address: &str) -> Result<Position, OdsError> {
    static POSITION_RE: OnceLock<Regex> = OnceLock::new();
    let re = POSITION_RE.get_or_init(|| Regex::new(r"^\$?([A-Za-z]+)\$?([0-9]+)$").unwrap());

    let caps = re
        .captures(address)
        .ok_or_else(|| OdsError::BadPosition(address.to_string()))?;

    let mut column: usize = 0;
    for c in caps[1].chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        column = column * 26 + digit + 1;
    }

    let row: usize = caps[2]
        .parse()
        .map_err(|_| OdsError::BadPosition(address.to_string()))?;
    if row == 0 {
        return Err(OdsError::BadPosition(address.to_string()));
    }

    Ok(Position::new(row - 1, column - 1))
}

/// Convert a zero-based column index to letters (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_to_letters(mut column: usize) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (column % 26) as u8) as char);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_addresses() -> anyhow::Result<()> {
        assert_eq!(parse_position("A1")?, Position::new(0, 0));
        assert_eq!(parse_position("C7")?, Position::new(6, 2));
        assert_eq!(parse_position("Z1")?, Position::new(0, 25));
        assert_eq!(parse_position("AA1")?, Position::new(0, 26));
        assert_eq!(parse_position("AB12")?, Position::new(11, 27));
        Ok(())
    }

    #[test]
    fn case_insensitive_and_absolute_markers() -> anyhow::Result<()> {
        assert_eq!(parse_position("c7")?, parse_position("C7")?);
        assert_eq!(parse_position("$B$3")?, Position::new(2, 1));
        Ok(())
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "7", "C", "C0", "1C", "C-7", "C7C"] {
            assert!(parse_position(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn address_round_trip() -> anyhow::Result<()> {
        for address in ["A1", "C7", "Z99", "AA1", "AZ20", "BA2", "ZZ1000"] {
            assert_eq!(parse_position(address)?.to_address(), address);
        }
        Ok(())
    }
}
