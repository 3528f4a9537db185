//! Load loan scenarios from CSV
//!
//! Expected columns: `ScenarioID,Principal,AnnualRatePct,TermMonths,MonthsElapsed,ExtraMonthly,LumpSum`.
//! The last three columns may be left empty.

use csv::Reader;
use log::info;
use std::path::Path;

use super::{AccelerationStrategy, LoanScenario, LoanTerms};
use crate::error::{CalcError, Result};

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRatePct")]
    annual_rate_pct: f64,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "MonthsElapsed", default)]
    months_elapsed: Option<u32>,
    #[serde(rename = "ExtraMonthly", default)]
    extra_monthly: Option<f64>,
    #[serde(rename = "LumpSum", default)]
    lump_sum: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self) -> Result<LoanScenario> {
        let terms = LoanTerms::new(self.principal, self.annual_rate_pct, self.term_months).map_err(|e| {
            CalcError::Parse(format!("scenario {}: {}", self.scenario_id, e))
        })?;

        let strategy = AccelerationStrategy::from_amounts(
            self.extra_monthly.unwrap_or(0.0),
            self.lump_sum.unwrap_or(0.0),
        );
        strategy
            .validate()
            .map_err(|e| CalcError::Parse(format!("scenario {}: {}", self.scenario_id, e)))?;

        Ok(LoanScenario::new(terms, self.months_elapsed.unwrap_or(0), strategy).with_id(self.scenario_id))
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let scenarios = read_scenarios(reader)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (string buffer, stdin, ...)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanScenario>> {
    read_scenarios(Reader::from_reader(reader))
}

fn read_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::AccelerationMode;

    const SAMPLE: &str = "\
ScenarioID,Principal,AnnualRatePct,TermMonths,MonthsElapsed,ExtraMonthly,LumpSum
1,300000,6.5,360,60,200,
2,25000,4.9,60,,,5000
3,12000,0,12,0,0,0
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(SAMPLE.as_bytes()).expect("Failed to load scenarios");
        assert_eq!(scenarios.len(), 3);

        let s1 = &scenarios[0];
        assert_eq!(s1.scenario_id, 1);
        assert_eq!(s1.terms.term_months, 360);
        assert_eq!(s1.months_elapsed, 60);
        assert_eq!(s1.strategy.mode(), AccelerationMode::ExtraMonthly);
        assert_eq!(s1.strategy.extra_monthly(), 200.0);

        let s2 = &scenarios[1];
        assert_eq!(s2.months_elapsed, 0);
        assert_eq!(s2.strategy.mode(), AccelerationMode::LumpSum);
        assert_eq!(s2.strategy.lump_sum(), 5000.0);

        assert!(scenarios[2].strategy.is_none());
    }

    #[test]
    fn test_invalid_row_is_reported_with_its_id() {
        let data = "ScenarioID,Principal,AnnualRatePct,TermMonths,MonthsElapsed,ExtraMonthly,LumpSum\n7,-100,5,12,,,\n";
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("scenario 7"), "unexpected error: {}", err);
    }

    #[test]
    fn test_load_scenarios_from_file() {
        let path = std::env::temp_dir().join(format!("payoff_core_scenarios_{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let scenarios = load_scenarios(&path).unwrap();
        assert_eq!(scenarios.len(), 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_scenarios("/definitely/not/here.csv");
        assert!(result.is_err());
    }
}
