//! Derived-value calculators for the HR workflow engine.
//!
//! Every function in this module is pure and side-effect free: work hours
//! and overtime from a check-in/check-out pair, leave duration over a date
//! range, clamped net salary, and criteria-weighted review scores. The
//! workflow engine and the read-side projections both call into here so the
//! same arithmetic backs every derived field.

mod leave_duration;
mod net_salary;
mod weighted_score;
mod work_hours;

pub use leave_duration::leave_duration;
pub use net_salary::{NetSalaryOutcome, net_salary};
pub use weighted_score::weighted_score;
pub use work_hours::{STANDARD_DAILY_HOURS, overtime_hours, work_hours};
