//! Earnings Calculator - A reactive computation bound to page controls.
//!
//! Three bounded controls drive two monetary projections. The pieces keep
//! to their own concerns:
//!
//! - [`engine`] - the pure compute step, testable with no element tree
//! - [`binding`] - element discovery (all-or-nothing for the controls)
//! - [`sync`] - the subscribe + recompute-and-render cycle
//!
//! A change on any one control triggers a full recomputation and a full
//! re-render of all five display fields.

pub mod binding;
pub mod engine;
pub mod sync;

pub use binding::CalculatorBinding;
pub use engine::{EarningsInputs, EarningsOutputs, MONTHS_PER_YEAR, WEEKS_PER_MONTH, compute};
pub use sync::init_calculator;
