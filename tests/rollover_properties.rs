mod common;

use common::{at, TestEnv};
use expense_tracker::ledger::{AccumulatorRecord, Rollover, RolloverEngine, Totals};

fn seeded(env: &TestEnv, amount: i64) {
    let mut service = env.open();
    service.record_expense(amount).expect("seed expense");
}

#[test]
fn rollover_check_twice_is_a_no_op() {
    let env = TestEnv::new(at(2025, 6, 11, 10, 0));
    seeded(&env, 420);
    let mut service = env.open();

    assert_eq!(service.check_rollover(), Rollover::None);
    assert_eq!(service.check_rollover(), Rollover::None);
    assert_eq!(service.totals().day, 420);
    assert_eq!(service.record().last_update, at(2025, 6, 11, 10, 0));
}

#[test]
fn year_boundary_zeroes_every_total() {
    let env = TestEnv::new(at(2024, 12, 31, 21, 15));
    seeded(&env, 3000);

    env.clock.set(at(2025, 1, 1, 0, 5));
    let mut service = env.open();
    assert_eq!(service.check_rollover(), Rollover::Year);
    assert_eq!(service.totals(), Totals::default());
}

#[test]
fn month_boundary_zeroes_only_month() {
    let env = TestEnv::new(at(2025, 1, 31, 19, 0));
    seeded(&env, 800);

    env.clock.set(at(2025, 2, 1, 9, 0));
    let mut service = env.open();
    assert_eq!(service.check_rollover(), Rollover::Month);
    assert_eq!(
        service.totals(),
        Totals {
            year: 800,
            month: 0,
            week: 800,
            day: 800
        }
    );
}

#[test]
fn sunday_to_monday_resets_week_and_keeps_day() {
    // 2025-06-15 is a Sunday.
    let env = TestEnv::new(at(2025, 6, 15, 20, 0));
    seeded(&env, 150);

    env.clock.set(at(2025, 6, 16, 8, 0));
    let mut service = env.open();
    let totals = service.record_expense(40).expect("record");
    assert_eq!(totals.week, 40);
    assert_eq!(totals.day, 190, "week tier shadows the day reset");
    assert_eq!(totals.month, 190);
}

#[test]
fn next_day_resets_only_day() {
    // Tuesday to Wednesday.
    let env = TestEnv::new(at(2025, 6, 10, 12, 0));
    seeded(&env, 90);

    env.clock.set(at(2025, 6, 11, 12, 0));
    let mut service = env.open();
    let totals = service.record_expense(10).expect("record");
    assert_eq!(
        totals,
        Totals {
            year: 100,
            month: 100,
            week: 100,
            day: 10
        }
    );
}

#[test]
fn expenses_accumulate_without_boundary() {
    let env = TestEnv::new(at(2025, 6, 11, 8, 0));
    let mut service = env.open();
    for amount in [100, 250, 50] {
        service.record_expense(amount).expect("record");
    }
    assert_eq!(
        service.totals(),
        Totals {
            year: 400,
            month: 400,
            week: 400,
            day: 400
        }
    );
}

#[test]
fn week_can_exceed_month_after_mid_week_month_start() {
    // Monday 2025-09-29, then Wednesday 2025-10-01.
    let mut record = AccumulatorRecord::fresh(at(2025, 9, 29, 9, 0));
    record.add(500).expect("add");
    assert_eq!(
        RolloverEngine::apply(&mut record, at(2025, 10, 1, 9, 0)),
        Rollover::Month
    );
    record.add(20).expect("add");
    assert!(record.week_total > record.month_total);
    assert!(record.year_total >= record.week_total);
}
