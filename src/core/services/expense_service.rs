use std::sync::Arc;

use tracing::info;

use crate::{
    core::time::Clock,
    errors::Result,
    ledger::{AccumulatorRecord, Rollover, RolloverEngine, Totals},
    storage::AccumulatorStore,
};

/// Records expenses against the rolling totals, keeping them rolled over and persisted.
pub struct ExpenseService {
    store: AccumulatorStore,
    clock: Arc<dyn Clock>,
    record: AccumulatorRecord,
}

impl ExpenseService {
    /// Loads the stored record (or a fresh one) without evaluating rollover.
    pub fn open(store: AccumulatorStore, clock: Arc<dyn Clock>) -> Self {
        let record = store.load(clock.now());
        Self {
            store,
            clock,
            record,
        }
    }

    /// Clears whichever totals went stale since the last update. In-memory only.
    pub fn check_rollover(&mut self) -> Rollover {
        RolloverEngine::apply(&mut self.record, self.clock.now())
    }

    /// Rolls over, adds `amount` to every window, then persists.
    ///
    /// Negative amounts are accepted as corrections. When the save fails the error is
    /// returned but the in-memory totals keep the new amount.
    pub fn record_expense(&mut self, amount: i64) -> Result<Totals> {
        let rollover = self.check_rollover();
        let totals = self.record.add(amount)?;
        info!(amount, ?rollover, day_total = totals.day, "expense recorded");
        self.persist()?;
        Ok(totals)
    }

    /// Runs a standalone rollover check and persists the outcome.
    pub fn refresh(&mut self) -> Result<Rollover> {
        let rollover = self.check_rollover();
        self.persist()?;
        Ok(rollover)
    }

    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.record)
    }

    pub fn totals(&self) -> Totals {
        self.record.totals()
    }

    pub fn record(&self) -> &AccumulatorRecord {
        &self.record
    }

    pub fn storage_location(&self) -> String {
        self.store.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::time::ManualClock,
        errors::TrackerError,
        storage::{memory_backend::MemoryStorage, StorageBackend},
    };
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn service_at(
        backend: MemoryStorage,
        start: NaiveDateTime,
    ) -> (ExpenseService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let store = AccumulatorStore::new(Box::new(backend));
        (ExpenseService::open(store, clock.clone()), clock)
    }

    #[test]
    fn accumulates_within_one_day() {
        let (mut service, _clock) = service_at(MemoryStorage::new(), at(2025, 4, 16, 9));
        for amount in [100, 250, 50] {
            service.record_expense(amount).unwrap();
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
    fn every_expense_is_persisted() {
        let backend = MemoryStorage::new();
        let (mut service, _clock) = service_at(backend.clone(), at(2025, 4, 16, 9));
        service.record_expense(75).unwrap();

        let stored = backend.load().unwrap().unwrap();
        assert_eq!(stored.expense_day, 75);
        assert_eq!(stored.last_update.as_deref(), Some("2025-04-16T09:00:00"));
    }

    #[test]
    fn next_day_expense_starts_new_daily_total() {
        let (mut service, clock) = service_at(MemoryStorage::new(), at(2025, 4, 16, 9));
        service.record_expense(300).unwrap();
        clock.advance(Duration::days(1));
        let totals = service.record_expense(20).unwrap();
        assert_eq!(totals.day, 20);
        assert_eq!(totals.week, 320);
        assert_eq!(totals.month, 320);
        assert_eq!(totals.year, 320);
    }

    #[test]
    fn reopening_on_a_new_year_shows_zeroes_before_any_expense() {
        let backend = MemoryStorage::new();
        let (mut service, _clock) = service_at(backend.clone(), at(2024, 12, 31, 23));
        service.record_expense(900).unwrap();

        let (mut reopened, _clock) = service_at(backend, at(2025, 1, 1, 7));
        assert_eq!(reopened.totals().year, 900);
        assert_eq!(reopened.refresh().unwrap(), Rollover::Year);
        assert_eq!(reopened.totals(), Totals::default());
    }

    #[test]
    fn failed_save_keeps_in_memory_totals() {
        let backend = MemoryStorage::new().read_only();
        let (mut service, _clock) = service_at(backend, at(2025, 4, 16, 9));
        let err = service.record_expense(60).unwrap_err();
        assert!(matches!(err, TrackerError::StorageError(_)));
        assert_eq!(service.totals().day, 60);
    }

    #[test]
    fn negative_amount_is_applied_as_correction() {
        let (mut service, _clock) = service_at(MemoryStorage::new(), at(2025, 4, 16, 9));
        service.record_expense(500).unwrap();
        let totals = service.record_expense(-120).unwrap();
        assert_eq!(totals.day, 380);
        assert_eq!(totals.year, 380);
    }
}
