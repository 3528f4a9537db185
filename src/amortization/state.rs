//! Running state of a single payoff simulation

/// State of a loan at a point in time during a payoff simulation
#[derive(Debug, Clone)]
pub struct PayoffState {
    /// Months simulated so far
    pub month: u32,

    /// Balance entering the loop, after any lump sum
    pub starting_balance: f64,

    /// Outstanding balance
    pub balance: f64,

    /// Lump sum actually applied (never more than the balance it reduced)
    pub lump_sum_applied: f64,

    /// Everything paid, lump sum included
    pub total_paid: f64,

    /// Principal retired, lump sum included
    pub principal_retired: f64,

    pub cumulative_interest: f64,
}

impl PayoffState {
    /// Initialize state, applying a one-time lump sum before the first month
    pub fn from_balance(balance: f64, lump_sum: f64) -> Self {
        let lump_sum_applied = lump_sum.min(balance).max(0.0);
        let adjusted = (balance - lump_sum_applied).max(0.0);

        Self {
            month: 0,
            starting_balance: adjusted,
            balance: adjusted,
            lump_sum_applied,
            total_paid: lump_sum_applied,
            principal_retired: lump_sum_applied,
            cumulative_interest: 0.0,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }

    /// Record one month's split and advance the month counter
    pub fn apply_payment(&mut self, interest: f64, principal: f64) {
        self.balance = (self.balance - principal).max(0.0);
        self.total_paid += interest + principal;
        self.principal_retired += principal;
        self.cumulative_interest += interest;
        self.month += 1;
    }
}
