use std::collections::BTreeSet;
use std::env;
use std::sync::Arc;

use ramadanCalendar::models::day_state::DayState;
use ramadanCalendar::service::day_state_service::DayStateStore;
use ramadanCalendar::storage::{JsonFileStore, MemoryStore, SettingsStore};
use serde_json::json;

async fn fresh_store() -> (Arc<MemoryStore>, DayStateStore) {
    let memory = Arc::new(MemoryStore::new());
    let store = DayStateStore::load(memory.clone())
        .await
        .expect("load should succeed");
    (memory, store)
}

#[tokio::test]
async fn three_cycles_return_every_day_to_its_start() {
    let (_, mut store) = fresh_store().await;
    // Put some days in each state first so every starting point is covered.
    for day in 1..=30 {
        for _ in 0..(day % 3) {
            store.cycle(day).await.unwrap();
        }
    }
    for day in 1..=30 {
        let before = store.get_state(day);
        for _ in 0..3 {
            store.cycle(day).await.unwrap();
        }
        assert_eq!(store.get_state(day), before, "day {}", day);
    }
}

#[tokio::test]
async fn completed_count_matches_done_entries() {
    let (memory, mut store) = fresh_store().await;
    let pattern = [0usize, 1, 2, 1, 0, 2, 2, 0, 1, 3];
    for (idx, steps) in pattern.iter().enumerate() {
        let day = idx as i64 + 1;
        for _ in 0..*steps {
            store.cycle(day).await.unwrap();
        }
    }

    let saved = memory.snapshot().unwrap();
    let done_in_file = saved["dayStates"]
        .as_object()
        .unwrap()
        .values()
        .filter(|v| v.as_i64() == Some(1) || v.as_i64() == Some(2))
        .count();
    assert_eq!(store.completed_count(), done_in_file);
    assert_eq!(store.completed_count(), 6);
}

#[tokio::test]
async fn toggling_day_one_scenario() {
    let memory = Arc::new(MemoryStore::with_data(json!({ "startDate": "2026-02-17" })));
    let mut store = DayStateStore::load(memory.clone()).await.unwrap();
    assert_eq!(store.get_state(1), DayState::Untracked);

    store.cycle(1).await.unwrap();
    let state = store.cycle(1).await.unwrap();
    assert_eq!(state, DayState::CompletedWithException);
    assert_eq!(store.get_state(1).code(), 2);
    assert_eq!(store.completed_count(), 1);

    assert_eq!(store.cycle(1).await.unwrap(), DayState::Untracked);
    assert_eq!(store.completed_count(), 0);
    let saved = memory.snapshot().unwrap();
    assert!(saved["dayStates"].get("1").is_none());
    assert_eq!(saved["startDate"], json!("2026-02-17"));
}

#[tokio::test]
async fn legacy_checked_days_migrate_once_on_load() {
    let memory = Arc::new(MemoryStore::with_data(json!({
        "startDate": "2026-02-17",
        "checkedDays": [3, 10, 29]
    })));
    let mut store = DayStateStore::load(memory.clone()).await.unwrap();

    for day in [3, 10, 29] {
        assert_eq!(store.get_state(day), DayState::Completed);
    }
    assert_eq!(store.get_state(4), DayState::Untracked);
    assert!(!store.period().has_legacy_shape());

    let saved = memory.snapshot().unwrap();
    assert!(saved.get("checkedDays").is_none());
    assert_eq!(saved["dayStates"], json!({ "3": 1, "10": 1, "29": 1 }));
    assert_eq!(memory.save_count(), 1);

    assert!(!store.migrate_if_needed().await.unwrap());
    assert_eq!(memory.save_count(), 1);

    let reloaded = DayStateStore::load(memory.clone()).await.unwrap();
    assert_eq!(reloaded.completed_count(), 3);
    assert_eq!(memory.save_count(), 1);
}

#[tokio::test]
async fn explicit_migration_marks_days_completed() {
    let (memory, mut store) = fresh_store().await;
    let legacy: BTreeSet<i64> = [3, 10, 29].into_iter().collect();
    store.migrate_legacy(&legacy).await.unwrap();

    assert_eq!(store.get_state(3), DayState::Completed);
    assert_eq!(store.get_state(10), DayState::Completed);
    assert_eq!(store.get_state(29), DayState::Completed);
    assert_eq!(memory.save_count(), 1);
}

#[tokio::test]
async fn file_store_survives_reload() {
    let dir = env::temp_dir().join(format!("ramadan_calendar_it_{}", uuid::Uuid::new_v4()));
    let file_store = Arc::new(JsonFileStore::in_dir(&dir));
    file_store
        .save(&json!({ "checkedDays": [1, 2], "theme": "dark" }))
        .await
        .unwrap();

    let mut store = DayStateStore::load(file_store.clone()).await.unwrap();
    store.cycle(2).await.unwrap();

    let reloaded = DayStateStore::load(file_store.clone()).await.unwrap();
    assert_eq!(reloaded.get_state(1), DayState::Completed);
    assert_eq!(reloaded.get_state(2), DayState::CompletedWithException);

    let raw = file_store.load().await.unwrap().unwrap();
    assert_eq!(raw["theme"], json!("dark"));
    assert!(raw.get("checkedDays").is_none());
}

#[tokio::test]
async fn out_of_range_keys_count_and_survive_a_save() {
    let memory = Arc::new(MemoryStore::with_data(json!({ "dayStates": { "31": 1, "0": 2 } })));
    let mut store = DayStateStore::load(memory.clone()).await.unwrap();
    assert_eq!(store.completed_count(), 2);
    assert_eq!(store.get_state(31), DayState::Completed);

    store.cycle(5).await.unwrap();
    assert_eq!(store.completed_count(), 3);

    let saved = memory.snapshot().unwrap();
    assert_eq!(saved["dayStates"], json!({ "0": 2, "31": 1, "5": 1 }));
}
