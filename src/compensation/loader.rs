//! CSV-based tax ladder loader
//!
//! Loads marginal-rate ladders from CSV files in data/tax/. Each file has an
//! `upper_bound,rate` header; the open-ended last band uses `inf` (or an
//! empty bound).

use csv::Reader;
use log::info;
use std::path::Path;

use super::brackets::{TaxBracket, TaxBracketTable};
use crate::error::{CalcError, Result};

/// Default path to tax tables directory
pub const DEFAULT_TAX_TABLES_PATH: &str = "data/tax";

/// Federal single-filer ladder file name
pub const FEDERAL_SINGLE_FILE: &str = "federal_single_2024.csv";

/// Load and validate a bracket ladder from a CSV file
pub fn load_bracket_table<P: AsRef<Path>>(path: P) -> Result<TaxBracketTable> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let table = read_bracket_table(reader)?;
    info!("Loaded {} tax brackets from {}", table.brackets().len(), path.display());
    Ok(table)
}

/// Load a bracket ladder from any reader
pub fn load_bracket_table_from_reader<R: std::io::Read>(reader: R) -> Result<TaxBracketTable> {
    read_bracket_table(Reader::from_reader(reader))
}

fn read_bracket_table<R: std::io::Read>(mut reader: Reader<R>) -> Result<TaxBracketTable> {
    let mut brackets = Vec::new();

    for result in reader.records() {
        let record = result?;
        let upper_bound = parse_bound(record.get(0).unwrap_or(""))?;
        let rate_field = record.get(1).unwrap_or("").trim();
        let marginal_rate: f64 = rate_field
            .parse()
            .map_err(|_| CalcError::Parse(format!("invalid rate '{}'", rate_field)))?;

        brackets.push(TaxBracket {
            upper_bound,
            marginal_rate,
        });
    }

    TaxBracketTable::new(brackets)
}

fn parse_bound(field: &str) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("inf") || field.eq_ignore_ascii_case("infinity") {
        return Ok(f64::INFINITY);
    }
    field
        .parse()
        .map_err(|_| CalcError::Parse(format!("invalid bracket bound '{}'", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_federal_table() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(DEFAULT_TAX_TABLES_PATH)
            .join(FEDERAL_SINGLE_FILE);
        let table = load_bracket_table(&path).expect("Failed to load federal table");

        assert_eq!(table.brackets().len(), 7);
        assert_eq!(table.brackets()[0].upper_bound, 11_600.0);
        assert_eq!(table.brackets()[0].marginal_rate, 0.10);
        assert!(table.brackets()[6].upper_bound.is_infinite());
    }

    #[test]
    fn test_married_joint_table_taxes_less_than_single() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TAX_TABLES_PATH);
        let joint = load_bracket_table(dir.join("federal_married_joint_2024.csv")).unwrap();
        let single = load_bracket_table(dir.join(FEDERAL_SINGLE_FILE)).unwrap();

        assert_eq!(joint.brackets()[0].upper_bound, 23_200.0);
        assert!(joint.tax(150_000.0) < single.tax(150_000.0));
    }

    #[test]
    fn test_empty_bound_is_open_ended() {
        let data = "upper_bound,rate\n50000,0.02\n,0.04\n";
        let table = load_bracket_table_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.brackets().len(), 2);
        assert_eq!(table.brackets()[1].upper_bound, f64::INFINITY);
    }

    #[test]
    fn test_bad_rows_are_rejected() {
        let bad_rate = "upper_bound,rate\n10000,abc\ninf,0.2\n";
        assert!(matches!(
            load_bracket_table_from_reader(bad_rate.as_bytes()),
            Err(CalcError::Parse(_))
        ));

        let not_open = "upper_bound,rate\n10000,0.1\n20000,0.2\n";
        assert!(matches!(
            load_bracket_table_from_reader(not_open.as_bytes()),
            Err(CalcError::InvalidBracketTable(_))
        ));
    }
}
