//! Performance benchmarks for the HR workflow engine.
//!
//! Covers the pure calculators on their own and the full leave-approval
//! path (policy check, transition planning, balance debit) through the
//! store.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use hr_engine::calculation::{leave_duration, net_salary, weighted_score, work_hours};
use hr_engine::models::{Identity, LeaveBalance, LeaveStatus, LeaveType, Role};
use hr_engine::notify::TracingNotifier;
use hr_engine::policy::Actor;
use hr_engine::store::MemoryStore;
use hr_engine::workflow::{Hooks, LeaveDecision, NewLeaveRequest, create_request, decide_request};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn bench_calculators(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculators");

    let check_in = NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let check_out = NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(17, 30, 0)
        .unwrap();
    group.bench_function("work_hours", |b| {
        b.iter(|| work_hours(black_box(Some(check_in)), black_box(Some(check_out))))
    });

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    group.bench_function("leave_duration_full_year_weekdays", |b| {
        b.iter(|| leave_duration(black_box(start), black_box(end), true))
    });

    group.bench_function("net_salary", |b| {
        b.iter(|| {
            net_salary(
                black_box(dec("5000")),
                black_box(dec("250")),
                black_box(dec("300")),
                black_box(dec("150")),
                black_box(dec("800")),
            )
        })
    });

    let scores = [
        (dec("4"), dec("40")),
        (dec("3"), dec("20")),
        (dec("5"), dec("15")),
        (dec("4"), dec("25")),
    ];
    group.bench_function("weighted_score", |b| {
        b.iter(|| weighted_score(black_box(&scores)))
    });

    group.finish();
}

/// Seeds a store with `count` employees, each carrying one pending leave
/// request against a 20-day annual balance.
fn seeded_requests(count: usize) -> (MemoryStore, Hooks, Actor, Vec<Uuid>) {
    let store = MemoryStore::new();
    let hooks = Hooks::new(Arc::new(TracingNotifier));
    let hr = Actor {
        id: Uuid::new_v4(),
        role: Role::Hr,
        department: None,
    };
    let leave_type = Uuid::new_v4();
    let now = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    store
        .transaction(|tables| {
            tables.insert_leave_type(LeaveType {
                id: leave_type,
                name: "annual".to_string(),
                days_allowed: 20,
                is_paid: true,
                requires_approval: true,
                exclude_weekends: false,
            })
        })
        .unwrap();

    let mut requests = Vec::with_capacity(count);
    for n in 0..count {
        let employee = Uuid::new_v4();
        store
            .transaction(|tables| {
                tables.insert_identity(Identity {
                    id: employee,
                    name: format!("employee-{n}"),
                    email: format!("employee-{n}@example.com"),
                    role: Role::Employee,
                    department: None,
                    manager: None,
                    active: true,
                })?;
                let mut balance = LeaveBalance {
                    id: Uuid::new_v4(),
                    employee,
                    leave_type,
                    year: 2024,
                    total_days: 20,
                    used_days: 0,
                    remaining_days: 0,
                    updated_at: now,
                };
                balance.recompute();
                tables.insert_leave_balance(balance)
            })
            .unwrap();

        let actor = Actor {
            id: employee,
            role: Role::Employee,
            department: None,
        };
        let request = create_request(
            &store,
            &hooks,
            &actor,
            NewLeaveRequest {
                employee: None,
                leave_type,
                start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
                reason: String::new(),
            },
            now,
        )
        .unwrap();
        requests.push(request.id);
    }

    (store, hooks, hr, requests)
}

fn bench_leave_approval(c: &mut Criterion) {
    let mut group = c.benchmark_group("leave_approval");
    let now = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    for count in [10usize, 100] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &count,
            |b, &count| {
                b.iter_batched(
                    || seeded_requests(count),
                    |(store, hooks, hr, requests)| {
                        for request in requests {
                            decide_request(
                                &store,
                                &hooks,
                                &hr,
                                request,
                                LeaveDecision {
                                    status: LeaveStatus::Approved,
                                    rejection_reason: None,
                                },
                                now,
                            )
                            .unwrap();
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_calculators, bench_leave_approval);
criterion_main!(benches);
