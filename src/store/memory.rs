//! In-memory store with uniqueness indices and transactions.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::models::{
    AttendanceRecord, Department, Identity, LeaveBalance, LeaveRequest, LeaveType, PayrollPeriod,
    PayrollRecord, PerformanceReview, PerformanceScore,
};

/// The durable tables, with the uniqueness indices the store enforces:
/// (employee, date) for attendance, (employee, leave_type, year) for
/// balances, (payroll_period, employee) for payroll records and
/// (review, criteria) for scores.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    identities: HashMap<Uuid, Identity>,
    departments: HashMap<Uuid, Department>,
    leave_types: HashMap<Uuid, LeaveType>,
    leave_balances: HashMap<Uuid, LeaveBalance>,
    leave_requests: HashMap<Uuid, LeaveRequest>,
    attendance: HashMap<Uuid, AttendanceRecord>,
    payroll_periods: HashMap<Uuid, PayrollPeriod>,
    payroll_records: HashMap<Uuid, PayrollRecord>,
    reviews: HashMap<Uuid, PerformanceReview>,
    scores: HashMap<Uuid, PerformanceScore>,

    attendance_by_day: HashMap<(Uuid, NaiveDate), Uuid>,
    balance_by_key: HashMap<(Uuid, Uuid, i32), Uuid>,
    record_by_key: HashMap<(Uuid, Uuid), Uuid>,
    score_by_key: HashMap<(Uuid, String), Uuid>,
}

impl Tables {
    // ----- identities -------------------------------------------------------

    /// Inserts an identity. Email addresses are unique.
    pub fn insert_identity(&mut self, identity: Identity) -> HrResult<()> {
        if self
            .identities
            .values()
            .any(|existing| existing.email == identity.email)
        {
            return Err(HrError::Duplicate {
                entity: "identity",
                key: identity.email,
            });
        }
        self.identities.insert(identity.id, identity);
        Ok(())
    }

    /// Looks up an identity by id.
    pub fn identity(&self, id: Uuid) -> HrResult<&Identity> {
        self.identities.get(&id).ok_or(HrError::NotFound {
            entity: "identity",
            id: id.to_string(),
        })
    }

    /// Mutable identity lookup.
    pub fn identity_mut(&mut self, id: Uuid) -> HrResult<&mut Identity> {
        self.identities.get_mut(&id).ok_or(HrError::NotFound {
            entity: "identity",
            id: id.to_string(),
        })
    }

    /// Iterates all identities.
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.values()
    }

    /// Collects every direct and transitive report of `manager`.
    ///
    /// Iterative breadth-first walk with a visited set: a self-referencing
    /// manager chain in the data terminates the walk instead of recursing
    /// forever.
    pub fn subordinates_of(&self, manager: Uuid) -> Vec<Uuid> {
        let mut result = Vec::new();
        let mut visited = HashSet::from([manager]);
        let mut queue = VecDeque::from([manager]);

        while let Some(current) = queue.pop_front() {
            for identity in self.identities.values() {
                if identity.manager == Some(current) && visited.insert(identity.id) {
                    result.push(identity.id);
                    queue.push_back(identity.id);
                }
            }
        }
        result
    }

    // ----- departments ------------------------------------------------------

    /// Inserts a department.
    pub fn insert_department(&mut self, department: Department) {
        self.departments.insert(department.id, department);
    }

    /// Looks up a department by id.
    pub fn department(&self, id: Uuid) -> HrResult<&Department> {
        self.departments.get(&id).ok_or(HrError::NotFound {
            entity: "department",
            id: id.to_string(),
        })
    }

    // ----- leave types ------------------------------------------------------

    /// Inserts a leave type. Names are unique.
    pub fn insert_leave_type(&mut self, leave_type: LeaveType) -> HrResult<()> {
        if self
            .leave_types
            .values()
            .any(|existing| existing.name == leave_type.name)
        {
            return Err(HrError::Duplicate {
                entity: "leave_type",
                key: leave_type.name,
            });
        }
        self.leave_types.insert(leave_type.id, leave_type);
        Ok(())
    }

    /// Looks up a leave type by id.
    pub fn leave_type(&self, id: Uuid) -> HrResult<&LeaveType> {
        self.leave_types.get(&id).ok_or(HrError::NotFound {
            entity: "leave_type",
            id: id.to_string(),
        })
    }

    /// Iterates the leave-type catalog.
    pub fn leave_types(&self) -> impl Iterator<Item = &LeaveType> {
        self.leave_types.values()
    }

    // ----- leave balances ---------------------------------------------------

    /// Inserts a balance. The (employee, leave_type, year) triple is unique.
    pub fn insert_leave_balance(&mut self, balance: LeaveBalance) -> HrResult<()> {
        let key = (balance.employee, balance.leave_type, balance.year);
        if self.balance_by_key.contains_key(&key) {
            return Err(HrError::Duplicate {
                entity: "leave_balance",
                key: format!("{}/{}/{}", key.0, key.1, key.2),
            });
        }
        self.balance_by_key.insert(key, balance.id);
        self.leave_balances.insert(balance.id, balance);
        Ok(())
    }

    /// Looks up a balance by its (employee, leave_type, year) key.
    pub fn leave_balance(
        &self,
        employee: Uuid,
        leave_type: Uuid,
        year: i32,
    ) -> HrResult<&LeaveBalance> {
        self.balance_by_key
            .get(&(employee, leave_type, year))
            .and_then(|id| self.leave_balances.get(id))
            .ok_or(HrError::NotFound {
                entity: "leave_balance",
                id: format!("{employee}/{leave_type}/{year}"),
            })
    }

    /// Mutable balance lookup by key.
    pub fn leave_balance_mut(
        &mut self,
        employee: Uuid,
        leave_type: Uuid,
        year: i32,
    ) -> HrResult<&mut LeaveBalance> {
        let id = self
            .balance_by_key
            .get(&(employee, leave_type, year))
            .copied()
            .ok_or(HrError::NotFound {
                entity: "leave_balance",
                id: format!("{employee}/{leave_type}/{year}"),
            })?;
        self.leave_balances.get_mut(&id).ok_or(HrError::NotFound {
            entity: "leave_balance",
            id: id.to_string(),
        })
    }

    /// Iterates all balances.
    pub fn leave_balances(&self) -> impl Iterator<Item = &LeaveBalance> {
        self.leave_balances.values()
    }

    // ----- leave requests ---------------------------------------------------

    /// Inserts a leave request.
    pub fn insert_leave_request(&mut self, request: LeaveRequest) {
        self.leave_requests.insert(request.id, request);
    }

    /// Looks up a leave request by id.
    pub fn leave_request(&self, id: Uuid) -> HrResult<&LeaveRequest> {
        self.leave_requests.get(&id).ok_or(HrError::NotFound {
            entity: "leave_request",
            id: id.to_string(),
        })
    }

    /// Mutable leave-request lookup.
    pub fn leave_request_mut(&mut self, id: Uuid) -> HrResult<&mut LeaveRequest> {
        self.leave_requests.get_mut(&id).ok_or(HrError::NotFound {
            entity: "leave_request",
            id: id.to_string(),
        })
    }

    /// Iterates all leave requests.
    pub fn leave_requests(&self) -> impl Iterator<Item = &LeaveRequest> {
        self.leave_requests.values()
    }

    // ----- attendance -------------------------------------------------------

    /// Inserts an attendance record. The (employee, date) pair is unique.
    pub fn insert_attendance(&mut self, record: AttendanceRecord) -> HrResult<()> {
        let key = (record.employee, record.date);
        if self.attendance_by_day.contains_key(&key) {
            return Err(HrError::Duplicate {
                entity: "attendance_record",
                key: format!("{}/{}", key.0, key.1),
            });
        }
        self.attendance_by_day.insert(key, record.id);
        self.attendance.insert(record.id, record);
        Ok(())
    }

    /// Looks up the attendance record for an (employee, date) pair.
    pub fn attendance_for(&self, employee: Uuid, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance_by_day
            .get(&(employee, date))
            .and_then(|id| self.attendance.get(id))
    }

    /// Mutable attendance lookup by (employee, date).
    pub fn attendance_for_mut(
        &mut self,
        employee: Uuid,
        date: NaiveDate,
    ) -> Option<&mut AttendanceRecord> {
        let id = self.attendance_by_day.get(&(employee, date)).copied()?;
        self.attendance.get_mut(&id)
    }

    /// Iterates all attendance records.
    pub fn attendance_records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.attendance.values()
    }

    // ----- payroll ----------------------------------------------------------

    /// Inserts a payroll period.
    pub fn insert_payroll_period(&mut self, period: PayrollPeriod) {
        self.payroll_periods.insert(period.id, period);
    }

    /// Looks up a payroll period by id.
    pub fn payroll_period(&self, id: Uuid) -> HrResult<&PayrollPeriod> {
        self.payroll_periods.get(&id).ok_or(HrError::NotFound {
            entity: "payroll_period",
            id: id.to_string(),
        })
    }

    /// Mutable payroll-period lookup.
    pub fn payroll_period_mut(&mut self, id: Uuid) -> HrResult<&mut PayrollPeriod> {
        self.payroll_periods.get_mut(&id).ok_or(HrError::NotFound {
            entity: "payroll_period",
            id: id.to_string(),
        })
    }

    /// Iterates all payroll periods.
    pub fn payroll_periods(&self) -> impl Iterator<Item = &PayrollPeriod> {
        self.payroll_periods.values()
    }

    /// Inserts a payroll record. The (payroll_period, employee) pair is
    /// unique.
    pub fn insert_payroll_record(&mut self, record: PayrollRecord) -> HrResult<()> {
        let key = (record.payroll_period, record.employee);
        if self.record_by_key.contains_key(&key) {
            return Err(HrError::Duplicate {
                entity: "payroll_record",
                key: format!("{}/{}", key.0, key.1),
            });
        }
        self.record_by_key.insert(key, record.id);
        self.payroll_records.insert(record.id, record);
        Ok(())
    }

    /// Looks up a payroll record by id.
    pub fn payroll_record(&self, id: Uuid) -> HrResult<&PayrollRecord> {
        self.payroll_records.get(&id).ok_or(HrError::NotFound {
            entity: "payroll_record",
            id: id.to_string(),
        })
    }

    /// Mutable payroll-record lookup.
    pub fn payroll_record_mut(&mut self, id: Uuid) -> HrResult<&mut PayrollRecord> {
        self.payroll_records.get_mut(&id).ok_or(HrError::NotFound {
            entity: "payroll_record",
            id: id.to_string(),
        })
    }

    /// Iterates all payroll records.
    pub fn payroll_records(&self) -> impl Iterator<Item = &PayrollRecord> {
        self.payroll_records.values()
    }

    /// Ids of every record belonging to a period.
    pub fn record_ids_for_period(&self, period: Uuid) -> Vec<Uuid> {
        self.payroll_records
            .values()
            .filter(|record| record.payroll_period == period)
            .map(|record| record.id)
            .collect()
    }

    // ----- performance ------------------------------------------------------

    /// Inserts a performance review.
    pub fn insert_review(&mut self, review: PerformanceReview) {
        self.reviews.insert(review.id, review);
    }

    /// Looks up a review by id.
    pub fn review(&self, id: Uuid) -> HrResult<&PerformanceReview> {
        self.reviews.get(&id).ok_or(HrError::NotFound {
            entity: "performance_review",
            id: id.to_string(),
        })
    }

    /// Mutable review lookup.
    pub fn review_mut(&mut self, id: Uuid) -> HrResult<&mut PerformanceReview> {
        self.reviews.get_mut(&id).ok_or(HrError::NotFound {
            entity: "performance_review",
            id: id.to_string(),
        })
    }

    /// Iterates all reviews.
    pub fn reviews(&self) -> impl Iterator<Item = &PerformanceReview> {
        self.reviews.values()
    }

    /// Inserts or replaces the score for a (review, criteria) pair.
    pub fn upsert_score(&mut self, score: PerformanceScore) {
        let key = (score.review, score.criteria.clone());
        if let Some(existing) = self.score_by_key.get(&key) {
            self.scores.remove(existing);
        }
        self.score_by_key.insert(key, score.id);
        self.scores.insert(score.id, score);
    }

    /// The scores recorded for a review.
    pub fn scores_for_review(&self, review: Uuid) -> Vec<&PerformanceScore> {
        self.scores
            .values()
            .filter(|score| score.review == review)
            .collect()
    }
}

/// Thread-safe store wrapping [`Tables`] behind a mutex.
///
/// [`MemoryStore::transaction`] is the only mutation path: the closure runs
/// against a working copy of the tables and the copy replaces the shared
/// state only when the closure returns `Ok`. A failed transition therefore
/// retains nothing, and the mutex serializes concurrent transitions so that
/// two approvals of the same request cannot interleave.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure against the tables.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs a mutating closure as one atomic unit.
    ///
    /// Either every write in the closure persists or none does; no
    /// intermediate state is ever visible to other callers.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut Tables) -> HrResult<T>) -> HrResult<T> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = guard.clone();
        let value = f(&mut working)?;
        *guard = working;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn identity(name: &str, manager: Option<Uuid>) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            role: Role::Employee,
            department: None,
            manager,
            active: true,
        }
    }

    fn attendance(employee: Uuid, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee,
            date,
            check_in: None,
            check_out: None,
            work_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            notes: String::new(),
        }
    }

    #[test]
    fn test_duplicate_attendance_day_rejected() {
        let mut tables = Tables::default();
        let employee = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        tables.insert_attendance(attendance(employee, date)).unwrap();
        let result = tables.insert_attendance(attendance(employee, date));
        assert!(matches!(result, Err(HrError::Duplicate { .. })));
    }

    #[test]
    fn test_duplicate_balance_key_rejected() {
        let mut tables = Tables::default();
        let employee = Uuid::new_v4();
        let leave_type = Uuid::new_v4();
        let balance = |id: Uuid| LeaveBalance {
            id,
            employee,
            leave_type,
            year: 2024,
            total_days: 20,
            used_days: 0,
            remaining_days: 20,
            updated_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        tables.insert_leave_balance(balance(Uuid::new_v4())).unwrap();
        let result = tables.insert_leave_balance(balance(Uuid::new_v4()));
        assert!(matches!(result, Err(HrError::Duplicate { .. })));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = MemoryStore::new();
        let employee = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let result: HrResult<()> = store.transaction(|tables| {
            tables.insert_attendance(attendance(employee, date))?;
            Err(HrError::PermissionDenied)
        });

        assert!(result.is_err());
        // The insert inside the failed transaction left no trace.
        assert!(store.read(|tables| tables.attendance_for(employee, date).is_none()));
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let store = MemoryStore::new();
        let employee = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        store
            .transaction(|tables| tables.insert_attendance(attendance(employee, date)))
            .unwrap();

        assert!(store.read(|tables| tables.attendance_for(employee, date).is_some()));
    }

    #[test]
    fn test_subordinates_transitive() {
        let mut tables = Tables::default();
        let boss = identity("boss", None);
        let lead = identity("lead", Some(boss.id));
        let report = identity("report", Some(lead.id));
        let unrelated = identity("unrelated", None);

        let boss_id = boss.id;
        let lead_id = lead.id;
        let report_id = report.id;
        for person in [boss, lead, report, unrelated] {
            tables.insert_identity(person).unwrap();
        }

        let subordinates = tables.subordinates_of(boss_id);
        assert_eq!(subordinates.len(), 2);
        assert!(subordinates.contains(&lead_id));
        assert!(subordinates.contains(&report_id));
    }

    #[test]
    fn test_subordinates_terminates_on_manager_cycle() {
        let mut tables = Tables::default();
        // a manages b, b manages a: defective data, but the walk must end.
        let a_id = Uuid::new_v4();
        let b_id = Uuid::new_v4();
        let mut a = identity("a", Some(b_id));
        a.id = a_id;
        let mut b = identity("b", Some(a_id));
        b.id = b_id;

        tables.insert_identity(a).unwrap();
        tables.insert_identity(b).unwrap();

        let subordinates = tables.subordinates_of(a_id);
        assert_eq!(subordinates, vec![b_id]);
    }

    #[test]
    fn test_upsert_score_replaces_existing_pair() {
        let mut tables = Tables::default();
        let review = Uuid::new_v4();

        let score = |value: i64| PerformanceScore {
            id: Uuid::new_v4(),
            review,
            criteria: "communication".to_string(),
            score: Decimal::from(value),
            comments: String::new(),
        };

        tables.upsert_score(score(3));
        tables.upsert_score(score(4));

        let scores = tables.scores_for_review(review);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, Decimal::from(4));
    }
}
