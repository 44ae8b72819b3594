//! Earnings Engine - The pure computation step.
//!
//! Maps the three bounded inputs to the two monetary outputs. No element
//! tree, no side effects: callers parse control values, this computes.

/// Approximate weeks per month used by the monthly projection.
pub const WEEKS_PER_MONTH: i64 = 4;

/// Months per year.
pub const MONTHS_PER_YEAR: i64 = 12;

// =============================================================================
// Types
// =============================================================================

/// The three inputs, parsed from the bound controls. Bounds are enforced
/// by the controls' declared min/max, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsInputs {
    pub hours_per_day: i64,
    pub rate_per_hour: i64,
    pub days_per_month: i64,
}

/// The two derived outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsOutputs {
    pub monthly_earnings: i64,
    pub yearly_earnings: i64,
}

// =============================================================================
// Compute
// =============================================================================

/// Derive monthly and yearly earnings.
///
/// `monthly = hours × rate × days × 4`, `yearly = monthly × 12`.
/// Total over the integer domain, deterministic, and free of side
/// effects; calling twice with the same inputs yields identical outputs.
pub fn compute(inputs: EarningsInputs) -> EarningsOutputs {
    let monthly_earnings = inputs.hours_per_day
        * inputs.rate_per_hour
        * inputs.days_per_month
        * WEEKS_PER_MONTH;
    EarningsOutputs {
        monthly_earnings,
        yearly_earnings: monthly_earnings * MONTHS_PER_YEAR,
    }
}

// =============================================================================
// Tests
// =============================================================================
