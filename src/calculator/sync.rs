//! Reactive Sync - Subscribes the engine to the bound controls.
//!
//! One synchronization pass reads all three control values, runs the
//! pure compute step and writes all five display fields. The pass runs
//! once at initialization (so displays match control defaults before any
//! interaction) and again, synchronously and in full, on every input
//! event from any of the three controls. There is no debouncing and no
//! partial update.

use tracing::debug;

use super::binding::CalculatorBinding;
use super::engine::{EarningsInputs, compute};
use crate::format::{RUPEE, rupees};
use crate::page::Page;
use crate::page::events::on_input;
use crate::types::{Cleanup, combine_cleanups};

// =============================================================================
// Initialization
// =============================================================================

/// Wire the calculator to a page.
///
/// Returns None, attaching nothing, when any required control is absent.
/// On success the displays are synchronized immediately and the returned
/// cleanup detaches all three subscriptions.
pub fn init_calculator(page: &Page) -> Option<Cleanup> {
    let binding = CalculatorBinding::discover(page)?;
    debug!(
        hours = binding.hours,
        rate = binding.rate,
        days = binding.days,
        "calculator wired"
    );

    sync_pass(page, &binding);

    let cleanups = [binding.hours, binding.rate, binding.days]
        .into_iter()
        .map(|control| on_input(page, control, move |page, _| sync_pass(page, &binding)))
        .collect();
    Some(combine_cleanups(cleanups))
}

// =============================================================================
// Recompute-and-Render Cycle
// =============================================================================

/// One full cycle: read, compute, render all five fields.
fn sync_pass(page: &Page, binding: &CalculatorBinding) {
    let hours = parse_value(page, binding.hours);
    let rate = parse_value(page, binding.rate);
    let days = parse_value(page, binding.days);

    // Echoes: rate carries the currency prefix, the other two are bare
    if let Some(echo) = binding.hours_echo {
        page.set_text(echo, &hours.to_string());
    }
    if let Some(echo) = binding.rate_echo {
        page.set_text(echo, &format!("{RUPEE}{rate}"));
    }
    if let Some(echo) = binding.days_echo {
        page.set_text(echo, &days.to_string());
    }

    let outputs = compute(EarningsInputs {
        hours_per_day: hours,
        rate_per_hour: rate,
        days_per_month: days,
    });

    if let Some(result) = binding.monthly_result {
        page.set_text(result, &rupees(outputs.monthly_earnings));
    }
    if let Some(result) = binding.yearly_result {
        page.set_text(result, &rupees(outputs.yearly_earnings));
    }
}

/// Parse a control value. The control type guarantees a numeric string;
/// anything else clamps to zero so the cycle stays total.
fn parse_value(page: &Page, control: usize) -> i64 {
    page.value(control).trim().parse().unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
