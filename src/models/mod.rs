//! Domain entities for the HR workflow engine.
//!
//! Each entity mirrors one durable record in the store. Derived fields
//! (remaining days, work hours, net salary, overall score) are recomputed
//! on every relevant mutation rather than stored as independent truth.

mod attendance;
mod department;
mod identity;
mod leave;
mod payroll;
mod performance;

pub use attendance::AttendanceRecord;
pub use department::Department;
pub use identity::{Identity, Role};
pub use leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};
pub use payroll::{PayrollPeriod, PayrollRecord, PayrollRecordStatus, PeriodStatus, PeriodType};
pub use performance::{PerformanceReview, PerformanceScore, ReviewStatus, ReviewType};
