//! Scenario runner for loan payoff analyses
//!
//! Runs the full loan pipeline for one scenario (payment, balance at the
//! valuation date, baseline and accelerated payoffs, comparison) and fans a
//! batch of scenarios out across threads.

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    compare_payoffs, total_extra_contributed, ComparisonResult, PayoffOutcome, PayoffSimulator, SimulationConfig,
};
use crate::error::Result;
use crate::loan::{AccelerationStrategy, ElapsedState, LoanScenario};

/// Everything computed for one loan scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub scenario_id: u32,

    /// Contractual monthly payment
    pub monthly_payment: f64,

    pub elapsed: ElapsedState,
    pub baseline: PayoffOutcome,
    pub accelerated: PayoffOutcome,
    pub comparison: ComparisonResult,

    /// Calendar payoff dates counted from the valuation date
    pub baseline_payoff_date: Option<NaiveDate>,
    pub accelerated_payoff_date: Option<NaiveDate>,
}

/// Flat one-line view of a `LoanAnalysis` for CSV output
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRow {
    #[serde(rename = "ScenarioID")]
    pub scenario_id: u32,
    #[serde(rename = "MonthlyPayment")]
    pub monthly_payment: f64,
    #[serde(rename = "CurrentBalance")]
    pub current_balance: f64,
    #[serde(rename = "BaselineMonths")]
    pub baseline_months: u32,
    #[serde(rename = "AcceleratedMonths")]
    pub accelerated_months: u32,
    #[serde(rename = "MonthsSaved")]
    pub months_saved: i64,
    #[serde(rename = "BaselineInterest")]
    pub baseline_interest: f64,
    #[serde(rename = "AcceleratedInterest")]
    pub accelerated_interest: f64,
    #[serde(rename = "InterestSaved")]
    pub interest_saved: f64,
    #[serde(rename = "ExtraContributed")]
    pub extra_contributed: f64,
    #[serde(rename = "ReturnOnExtraPct")]
    pub return_on_extra_pct: Option<f64>,
    #[serde(rename = "AcceleratedPayoffDate")]
    pub accelerated_payoff_date: Option<NaiveDate>,
}

impl LoanAnalysis {
    pub fn to_row(&self) -> AnalysisRow {
        AnalysisRow {
            scenario_id: self.scenario_id,
            monthly_payment: self.monthly_payment,
            current_balance: self.elapsed.current_balance,
            baseline_months: self.baseline.months_to_payoff,
            accelerated_months: self.accelerated.months_to_payoff,
            months_saved: self.comparison.time_saved_months,
            baseline_interest: self.baseline.total_interest,
            accelerated_interest: self.accelerated.total_interest,
            interest_saved: self.comparison.interest_saved,
            extra_contributed: self.comparison.total_extra_contributed,
            return_on_extra_pct: self.comparison.return_on_extra_pct,
            accelerated_payoff_date: self.accelerated_payoff_date,
        }
    }
}

/// Runs loan scenarios with a shared simulation config
///
/// # Example
/// ```ignore
/// let runner = PayoffRunner::default();
/// let analysis = runner.analyze(&scenario, today)?;
/// println!("{} months saved", analysis.comparison.time_saved_months);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayoffRunner {
    simulator: PayoffSimulator,
}

impl PayoffRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            simulator: PayoffSimulator::new(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        self.simulator.config()
    }

    /// Baseline and accelerated payoffs from the balance owed at `as_of`
    ///
    /// # Errors
    /// `InvalidLoanTerms` / `InvalidStrategy` from validation. Non-convergent
    /// or capped payoffs are reported in the outcomes, not as errors.
    pub fn analyze(&self, scenario: &LoanScenario, as_of: NaiveDate) -> Result<LoanAnalysis> {
        scenario.strategy.validate()?;

        let terms = &scenario.terms;
        let monthly_payment = terms.monthly_payment()?;
        let monthly_rate = terms.monthly_rate();
        let elapsed = ElapsedState::project(terms, scenario.months_elapsed)?;

        let baseline = self.simulator.simulate(
            elapsed.current_balance,
            monthly_rate,
            monthly_payment,
            &AccelerationStrategy::None,
        )?;
        let accelerated = self.simulator.simulate(
            elapsed.current_balance,
            monthly_rate,
            monthly_payment,
            &scenario.strategy,
        )?;

        let extra = total_extra_contributed(&scenario.strategy, &accelerated);
        let comparison = compare_payoffs(&baseline, &accelerated, extra);

        Ok(LoanAnalysis {
            scenario_id: scenario.scenario_id,
            monthly_payment,
            elapsed,
            baseline_payoff_date: baseline.payoff_date(as_of),
            accelerated_payoff_date: accelerated.payoff_date(as_of),
            baseline,
            accelerated,
            comparison,
        })
    }

    /// Analyze independent scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[LoanScenario], as_of: NaiveDate) -> Vec<Result<LoanAnalysis>> {
        info!("Analyzing {} loan scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| self.analyze(scenario, as_of))
            .collect()
    }
}
