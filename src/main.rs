//! Payoff Core CLI
//!
//! Command-line interface for loan payoff analyses and hourly wage conversion

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use payoff_core::amortization::{solve_extra_payment, write_schedule_csv_to_path, SimulationConfig};
use payoff_core::compensation::{compute_net_pay, load_bracket_table, PeriodAmounts, TaxAssumptions, WageInputs};
use payoff_core::loan::{load_scenarios, AccelerationStrategy, LoanScenario, LoanTerms};
use payoff_core::scenario::{LoanAnalysis, PayoffRunner};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one loan: baseline vs. accelerated payoff
    Payoff(PayoffArgs),
    /// Analyze every loan in a scenario CSV
    Batch(BatchArgs),
    /// Convert an hourly wage into gross and net pay per period
    Wage(WageArgs),
}

#[derive(Parser, Debug)]
struct PayoffArgs {
    /// Original loan amount
    #[arg(long)]
    principal: f64,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long)]
    rate: f64,

    /// Contractual term in months
    #[arg(long)]
    term_months: u32,

    /// Payments already made
    #[arg(long, default_value_t = 0)]
    elapsed: u32,

    /// Recurring extra payment each month
    #[arg(long, default_value_t = 0.0)]
    extra_monthly: f64,

    /// One-time payment applied before the next month
    #[arg(long, default_value_t = 0.0)]
    lump_sum: f64,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Iteration ceiling for the payoff simulation
    #[arg(long, default_value_t = payoff_core::amortization::DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Also report the recurring extra needed to pay off within this many months
    #[arg(long)]
    target_months: Option<u32>,

    /// Write the accelerated month-by-month schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Scenario CSV (ScenarioID,Principal,AnnualRatePct,TermMonths,...)
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "payoff_results.csv")]
    output: PathBuf,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Parser, Debug)]
struct WageArgs {
    /// Hourly rate
    #[arg(long)]
    hourly: f64,

    /// Regular hours per week
    #[arg(long, default_value_t = 40.0)]
    hours: f64,

    #[arg(long, default_value_t = 52.0)]
    weeks: f64,

    /// Unpaid weeks off
    #[arg(long, default_value_t = 0.0)]
    vacation_weeks: f64,

    #[arg(long, default_value_t = 0.0)]
    overtime_hours: f64,

    /// Annual holiday pay and bonuses
    #[arg(long, default_value_t = 0.0)]
    holiday_pay: f64,

    /// Annual value of non-cash benefits
    #[arg(long, default_value_t = 0.0)]
    benefits: f64,

    /// Flat state income tax rate as a decimal (0.05 = 5%)
    #[arg(long)]
    state_rate: Option<f64>,

    /// Federal bracket CSV (upper_bound,rate) replacing the built-in ladder
    #[arg(long)]
    federal_brackets: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Payoff(args) => run_payoff(args),
        Commands::Batch(args) => run_batch(args),
        Commands::Wage(args) => run_wage(args),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run_payoff(args: PayoffArgs) -> Result<()> {
    let terms = LoanTerms::new(args.principal, args.rate, args.term_months)?;
    let strategy = AccelerationStrategy::from_amounts(args.extra_monthly, args.lump_sum);
    let scenario = LoanScenario::new(terms, args.elapsed, strategy);

    let config = SimulationConfig {
        max_months: args.max_months,
        record_schedule: args.schedule_csv.is_some(),
    };
    let runner = PayoffRunner::new(config.clone());
    let analysis = runner.analyze(&scenario, args.as_of.unwrap_or_else(today))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }

    if let Some(target) = args.target_months {
        let extra = solve_extra_payment(
            analysis.elapsed.current_balance,
            terms.monthly_rate(),
            analysis.monthly_payment,
            target,
            &config,
        )?;
        println!(
            "\nExtra needed to pay off within {} months: ${:.2}/month (total ${:.2})",
            target,
            extra,
            analysis.monthly_payment + extra
        );
    }

    if let Some(path) = args.schedule_csv {
        write_schedule_csv_to_path(&path, &analysis.accelerated.schedule)
            .with_context(|| format!("Failed to write schedule to {}", path.display()))?;
        println!("\nSchedule written to {}", path.display());
    }

    Ok(())
}

fn print_analysis(analysis: &LoanAnalysis) {
    let fmt_date = |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_else(|| "never".to_string());

    println!("Loan Payoff Analysis");
    println!("====================\n");
    println!("  Monthly payment:  ${:.2}", analysis.monthly_payment);
    println!(
        "  Balance after {} months: ${:.2}",
        analysis.elapsed.months_elapsed, analysis.elapsed.current_balance
    );
    println!();

    println!("{:<12} {:>8} {:>16} {:>16} {:>12} {:>14}", "", "Months", "Total Paid", "Interest", "Payoff", "Status");
    println!("{}", "-".repeat(82));
    for (label, outcome, date) in [
        ("Baseline", &analysis.baseline, analysis.baseline_payoff_date),
        ("Accelerated", &analysis.accelerated, analysis.accelerated_payoff_date),
    ] {
        println!(
            "{:<12} {:>8} {:>16.2} {:>16.2} {:>12} {:>14}",
            label,
            outcome.months_to_payoff,
            outcome.total_paid,
            outcome.total_interest,
            fmt_date(date),
            format!("{:?}", outcome.status)
        );
    }

    let comparison = &analysis.comparison;
    let (years, months) = comparison.time_saved_years_months();
    println!();
    println!("  Time saved:       {} months ({}y {}m)", comparison.time_saved_months, years, months);
    println!("  Interest saved:   ${:.2}", comparison.interest_saved);
    println!("  Extra contributed: ${:.2}", comparison.total_extra_contributed);
    match comparison.return_on_extra_pct {
        Some(pct) => println!("  Return on extra:  {:.2}%", pct),
        None => println!("  Return on extra:  n/a"),
    }
    println!("  Verdict:          {:?}", comparison.verdict);
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());

    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("Failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = PayoffRunner::default();
    let results = runner.run_batch(&scenarios, args.as_of.unwrap_or_else(today));

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut failed = 0;
    for (scenario, result) in scenarios.iter().zip(&results) {
        match result {
            Ok(analysis) => writer.serialize(analysis.to_row())?,
            Err(e) => {
                failed += 1;
                eprintln!("Scenario {} skipped: {}", scenario.scenario_id, e);
            }
        }
    }
    writer.flush()?;

    println!(
        "Output written to {} ({} analyzed, {} skipped)",
        args.output.display(),
        results.len() - failed,
        failed
    );
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn run_wage(args: WageArgs) -> Result<()> {
    let inputs = WageInputs {
        hourly_rate: args.hourly,
        hours_per_week: args.hours,
        weeks_per_year: args.weeks,
        vacation_weeks: args.vacation_weeks,
        overtime_hours_per_week: args.overtime_hours,
        holiday_pay: args.holiday_pay,
        benefits_value: args.benefits,
    };

    let mut assumptions = TaxAssumptions::default_single_filer();
    if let Some(rate) = args.state_rate {
        assumptions = assumptions.with_state_rate(rate);
    }
    if let Some(path) = &args.federal_brackets {
        assumptions.federal = load_bracket_table(path)
            .with_context(|| format!("Failed to load federal brackets from {}", path.display()))?;
    }

    let result = compute_net_pay(&inputs, &assumptions)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Hourly Wage Conversion");
    println!("======================\n");
    println!("{:<10} {:>14} {:>14}", "Period", "Gross", "Net");
    println!("{}", "-".repeat(40));
    let rows: [(&str, fn(&PeriodAmounts) -> f64); 5] = [
        ("Annual", |p| p.annual),
        ("Monthly", |p| p.monthly),
        ("Biweekly", |p| p.biweekly),
        ("Weekly", |p| p.weekly),
        ("Daily", |p| p.daily),
    ];
    for (label, pick) in rows {
        println!(
            "{:<10} {:>14.2} {:>14.2}",
            label,
            pick(&result.breakdown.gross),
            pick(&result.net)
        );
    }

    let taxes = &result.taxes;
    println!();
    println!("  Federal tax:    ${:.2}", taxes.federal_tax);
    println!("  State tax:      ${:.2}", taxes.state_tax);
    println!("  Payroll tax:    ${:.2}", taxes.payroll_tax);
    println!("  Effective rate: {:.2}%", result.effective_tax_rate * 100.0);
    if let Some(rate) = result.breakdown.effective_hourly_rate {
        println!("  Effective hourly (with benefits): ${:.2}", rate);
    }

    Ok(())
}
