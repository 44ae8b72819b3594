//! Input Binding - Element discovery for the calculator.
//!
//! Locates the three required controls and their paired display elements
//! by stable ids. The binding holds element indices only; all state lives
//! in the bound controls themselves.

use crate::page::Page;

/// Id of the hours-per-day control.
pub const HOURS_CONTROL: &str = "calc-hours";
/// Id of the rate-per-hour control.
pub const RATE_CONTROL: &str = "calc-rate";
/// Id of the days-per-month control.
pub const DAYS_CONTROL: &str = "calc-days";

/// Id of the hours echo display.
pub const HOURS_ECHO: &str = "calc-hours-val";
/// Id of the rate echo display.
pub const RATE_ECHO: &str = "calc-rate-val";
/// Id of the days echo display.
pub const DAYS_ECHO: &str = "calc-days-val";
/// Id of the monthly result display.
pub const MONTHLY_RESULT: &str = "monthly-earnings";
/// Id of the yearly result display.
pub const YEARLY_RESULT: &str = "yearly-earnings";

// =============================================================================
// Binding
// =============================================================================

/// Resolved element references for one calculator section.
///
/// The three controls are required as a unit; each display element is
/// optional individually and skipped at render time when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorBinding {
    pub hours: usize,
    pub rate: usize,
    pub days: usize,
    pub hours_echo: Option<usize>,
    pub rate_echo: Option<usize>,
    pub days_echo: Option<usize>,
    pub monthly_result: Option<usize>,
    pub yearly_result: Option<usize>,
}

impl CalculatorBinding {
    /// Locate the calculator elements on a page.
    ///
    /// Returns None when any required control is missing; the feature
    /// then stays inert with no partial binding.
    pub fn discover(page: &Page) -> Option<Self> {
        let hours = page.element_by_id(HOURS_CONTROL)?;
        let rate = page.element_by_id(RATE_CONTROL)?;
        let days = page.element_by_id(DAYS_CONTROL)?;

        Some(Self {
            hours,
            rate,
            days,
            hours_echo: page.element_by_id(HOURS_ECHO),
            rate_echo: page.element_by_id(RATE_ECHO),
            days_echo: page.element_by_id(DAYS_ECHO),
            monthly_result: page.element_by_id(MONTHLY_RESULT),
            yearly_result: page.element_by_id(YEARLY_RESULT),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
