mod helpers;

use chrono::{Duration, TimeZone, Utc};
use reap::db;
use reap::food::indexed::IndexedFoodStore;
use reap::food::memory::InMemoryFoodStore;
use reap::food::types::{FoodFilter, FoodRecordEntry};
use reap::food::{FoodStore, StoreError};
use tempfile::TempDir;
use uuid::Uuid;

use helpers::{indexed_store, user};

fn entry(owner: Uuid, name: &str, description: &str) -> FoodRecordEntry {
    FoodRecordEntry {
        id: Uuid::now_v7(),
        user_id: owner,
        name: name.into(),
        description: description.into(),
        energy_kj: 2092.0,
        mass_grams: 150.0,
        ..FoodRecordEntry::default()
    }
}

#[test]
fn create_then_get_by_id() {
    let store = indexed_store();
    assert!(store.is_indexed());

    let owner = user();
    let e = entry(owner, "chicken", "grilled chicken breast");
    store.create(e.clone()).unwrap();

    let got = store.get_by_id(e.id).unwrap();
    assert_eq!(got.id, e.id);
    assert_eq!(got.user_id, owner);
    assert_eq!(got.name, "chicken");
    assert_eq!(got.energy_kj, 2092.0);
    assert_eq!(got.mass_grams, 150.0);
    assert!(got.created_at.is_some());
    assert!(got.storage_id > 0);
}

#[test]
fn nil_id_is_generated() {
    let store = indexed_store();
    let owner = user();
    store
        .create(FoodRecordEntry {
            id: Uuid::nil(),
            ..entry(owner, "rice", "white rice")
        })
        .unwrap();

    let found = store.get_by_filter(&FoodFilter::for_user(owner)).unwrap();
    assert_eq!(found.len(), 1);
    assert!(!found[0].id.is_nil());
}

#[test]
fn duplicate_id_is_bad_id() {
    let store = indexed_store();
    let e = entry(user(), "toast", "buttered toast");
    store.create(e.clone()).unwrap();

    let err = store.create(e).unwrap_err();
    assert!(matches!(err, StoreError::BadId(_)));
}

#[test]
fn missing_id_is_not_found() {
    let store = indexed_store();
    assert!(matches!(
        store.get_by_id(Uuid::now_v7()),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn filter_is_scoped_to_user() {
    let store = indexed_store();
    let owner = user();
    let other = user();
    store.create(entry(owner, "oats", "porridge oats")).unwrap();
    store.create(entry(owner, "milk", "oat milk")).unwrap();
    store.create(entry(other, "oats", "porridge oats")).unwrap();

    let all = store.get_by_filter(&FoodFilter::for_user(owner)).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|e| e.user_id == owner));

    let named = store
        .get_by_filter(&FoodFilter {
            name: Some("oats".into()),
            ..FoodFilter::for_user(owner)
        })
        .unwrap();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].description, "porridge oats");
}

#[test]
fn partial_words_match_like_the_memory_store() {
    let indexed = indexed_store();
    let memory = InMemoryFoodStore::new();
    let owner = user();
    for e in [
        entry(owner, "pancakes", "stack of buttermilk pancakes"),
        entry(owner, "eggs", "scrambled eggs on toast"),
    ] {
        indexed.create(e.clone()).unwrap();
        memory.create(e).unwrap();
    }

    let filters = [
        (Some("pancake"), None),
        (Some("cake"), None),
        (Some("eg"), None),
        (None, Some("butter")),
        (None, Some("on")),
        (Some("Pancake"), None),
    ];
    for (name, description) in filters {
        let filter = FoodFilter {
            name: name.map(String::from),
            description: description.map(String::from),
            ..FoodFilter::for_user(owner)
        };
        let mut from_index: Vec<String> = indexed
            .get_by_filter(&filter)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        let mut from_memory: Vec<String> = memory
            .get_by_filter(&filter)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        from_index.sort();
        from_memory.sort();
        assert_eq!(from_index, from_memory, "name {name:?} description {description:?}");
    }

    let pancake = indexed
        .get_by_filter(&FoodFilter {
            name: Some("pancake".into()),
            ..FoodFilter::for_user(owner)
        })
        .unwrap();
    assert_eq!(pancake.len(), 1);
    assert_eq!(pancake[0].name, "pancakes");
}

#[test]
fn no_matches_is_empty_not_error() {
    let store = indexed_store();
    let found = store
        .get_by_filter(&FoodFilter {
            name: Some("pizza".into()),
            ..FoodFilter::for_user(user())
        })
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn predicates_are_anded_including_id() {
    let store = indexed_store();
    let owner = user();
    let e = entry(owner, "cake", "chocolate cake");
    store.create(e.clone()).unwrap();

    let filter = FoodFilter {
        id: Some(e.id),
        description: Some("vanilla".into()),
        ..FoodFilter::for_user(owner)
    };
    assert!(store.get_by_filter(&filter).unwrap().is_empty());
}

#[test]
fn time_window_is_applied_after_index_query() {
    let store = indexed_store();
    let owner = user();
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    for (hours, name) in [(0, "breakfast"), (5, "lunch"), (10, "dinner")] {
        store
            .create(FoodRecordEntry {
                created_at: Some(base + Duration::hours(hours)),
                ..entry(owner, name, "meal")
            })
            .unwrap();
    }

    let filter = FoodFilter {
        created_after: Some(base + Duration::hours(5)),
        created_before: Some(base + Duration::hours(10)),
        ..FoodFilter::for_user(owner)
    };
    let names: Vec<String> = store
        .get_by_filter(&filter)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["lunch", "dinner"]);
}

#[test]
fn update_and_delete_are_not_implemented() {
    let store = indexed_store();
    let e = entry(user(), "tea", "green tea");
    store.create(e.clone()).unwrap();

    assert!(matches!(
        store.update(e.clone()),
        Err(StoreError::NotImplemented(_))
    ));
    assert!(matches!(
        store.delete(e.id),
        Err(StoreError::NotImplemented(_))
    ));
    assert!(store.get_by_id(e.id).is_ok());
}

#[test]
fn documents_survive_reopen_and_are_reindexed() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("food.db");
    let owner = user();
    let e = entry(owner, "soup", "tomato soup");

    {
        let store = IndexedFoodStore::new(db::open_database(&path).unwrap()).unwrap();
        store.create(e.clone()).unwrap();
    }

    let store = IndexedFoodStore::new(db::open_database(&path).unwrap()).unwrap();
    assert!(store.is_indexed());
    assert_eq!(store.get_by_id(e.id).unwrap().name, "soup");

    let found = store
        .get_by_filter(&FoodFilter {
            description: Some("tomato".into()),
            ..FoodFilter::for_user(owner)
        })
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn unindexed_store_still_serves_reads() {
    let conn = db::open_memory_database().unwrap();
    // A view under the index name makes the index rebuild fail
    conn.execute_batch("CREATE VIEW idx_food AS SELECT 1 AS id;")
        .unwrap();

    let store = IndexedFoodStore::new(conn).unwrap();
    assert!(!store.is_indexed());

    let owner = user();
    let e = entry(owner, "apple", "green apple");
    store.create(e.clone()).unwrap();

    assert_eq!(store.get_by_id(e.id).unwrap().name, "apple");
    let found = store
        .get_by_filter(&FoodFilter {
            name: Some("app".into()),
            ..FoodFilter::for_user(owner)
        })
        .unwrap();
    assert_eq!(found.len(), 1);
}
