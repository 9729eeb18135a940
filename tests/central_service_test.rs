mod helpers;

use chrono::{Duration, TimeZone, Utc};
use reap::central::{CentralService, FoodService};
use reap::error::ReapError;
use reap::food::types::{FoodRecord, GetFoodFilter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use helpers::{fn_caller, memory_service, text_turn, user, CountingStore, ScriptedClient};

fn record(owner: Uuid, name: &str) -> FoodRecord {
    FoodRecord {
        user_id: owner.to_string(),
        name: name.into(),
        description: format!("a plate of {name}"),
        ..FoodRecord::default()
    }
}

#[tokio::test]
async fn blank_description_never_reaches_the_store() {
    let store = CountingStore::new();
    let food = FoodService::new(store.clone());

    for description in ["", "   "] {
        let err = food
            .create_food_record(
                FoodRecord {
                    description: description.into(),
                    ..record(user(), "air")
                },
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReapError::InvalidRequest(_)));
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn create_returns_stored_record_with_both_unit_systems() {
    let (_, food) = memory_service();
    let owner = user();

    let created = food
        .create_food_record(
            FoodRecord {
                calories: 1000.0,
                kj: 10.0,
                oz: 2.0,
                ..record(owner, "steak")
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // Metric wins when both are given
    assert_eq!(created.kj, 10.0);
    assert!((created.calories - 10.0 / 4.184).abs() < 1e-9);
    assert!((created.grams - 2.0 * 28.35).abs() < 1e-9);
    assert!((created.oz - 2.0).abs() < 1e-9);
    assert!(Uuid::parse_str(&created.id).is_ok());
    assert!(created.time.is_some());
}

#[tokio::test]
async fn explicit_id_and_time_are_kept() {
    let (_, food) = memory_service();
    let id = Uuid::now_v7();
    let at = Utc.with_ymd_and_hms(2024, 5, 5, 7, 30, 0).unwrap();

    let created = food
        .create_food_record(
            FoodRecord {
                id: id.to_string(),
                time: Some(at),
                ..record(user(), "porridge")
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(created.id, id.to_string());
    assert_eq!(created.time, Some(at));
}

#[tokio::test]
async fn bad_user_id_is_rejected() {
    let (store, food) = memory_service();
    let err = food
        .create_food_record(
            FoodRecord {
                user_id: "bob".into(),
                ..record(user(), "pie")
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::BadUserId(_)));
    assert!(store.is_empty());

    let err = food
        .get_food_records("bob", &GetFoodFilter::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn get_with_no_matches_is_empty() {
    let (_, food) = memory_service();
    let records = food
        .get_food_records(
            &user().to_string(),
            &GetFoodFilter::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn get_applies_time_window() {
    let (_, food) = memory_service();
    let owner = user();
    let base = Utc.with_ymd_and_hms(2024, 5, 5, 8, 0, 0).unwrap();
    let cancel = CancellationToken::new();

    for (hours, name) in [(0, "eggs"), (4, "sandwich"), (12, "pasta")] {
        food.create_food_record(
            FoodRecord {
                time: Some(base + Duration::hours(hours)),
                ..record(owner, name)
            },
            &cancel,
        )
        .await
        .unwrap();
    }

    let filter = GetFoodFilter {
        after_time: Some(base + Duration::hours(1)),
        before_time: Some(base + Duration::hours(12)),
        ..GetFoodFilter::default()
    };
    let names: Vec<String> = food
        .get_food_records(&owner.to_string(), &filter, &cancel)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["sandwich", "pasta"]);
}

#[tokio::test]
async fn malformed_filter_id_is_invalid_request() {
    let (_, food) = memory_service();
    let filter = GetFoodFilter {
        id: Some("12345".into()),
        ..GetFoodFilter::default()
    };
    let err = food
        .get_food_records(&user().to_string(), &filter, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::InvalidRequest(_)));
}

#[tokio::test]
async fn cancelled_token_stops_store_call() {
    let (store, food) = memory_service();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = food
        .create_food_record(record(user(), "cookie"), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::Cancelled));
    // Nothing was written, so a retry cannot duplicate the record
    assert!(store.is_empty());
}

#[tokio::test]
async fn cancelled_token_never_reaches_the_store() {
    let store = CountingStore::new();
    let food = FoodService::new(store.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = food
        .get_food_records(&user().to_string(), &GetFoodFilter::default(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::Cancelled));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn action_user_input_is_not_implemented() {
    let (_, food) = memory_service();
    let central = CentralService::new(food, fn_caller(ScriptedClient::new(vec![])));

    let err = central
        .action_user_input("I ate an apple", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::NotImplemented(_)));
}

#[tokio::test]
async fn call_fn_user_input_runs_engine() {
    let (_, food) = memory_service();
    let client = ScriptedClient::new(vec![text_turn("Boo. Nothing to log.")]);
    let central = CentralService::new(food, fn_caller(client.clone()));

    let reply = central
        .call_fn_user_input("hello", &user().to_string(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(reply, "Boo. Nothing to log.");

    let err = central
        .call_fn_user_input("  ", &user().to_string(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ReapError::InvalidRequest(_)));
    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn shared_service_serves_concurrent_callers() {
    let (store, food) = memory_service();
    let food = Arc::new(food);
    let owner = user();

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let food = food.clone();
            tokio::spawn(async move {
                food.create_food_record(record(owner, &format!("bite {i}")), &CancellationToken::new())
                    .await
            })
        })
        .collect();
    for t in tasks {
        t.await.unwrap().unwrap();
    }
    assert_eq!(store.len(), 10);
}
