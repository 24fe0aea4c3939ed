//! Tests for the sliding-window rate limiter.

mod test_utils;

use chrono::{Duration, Utc};
use std::sync::Arc;
use test_utils::MemoryUsageStore;
use uuid::Uuid;
use vociform_interface::UsageStore;
use vociform_quota::{RateDecision, RateLimiter};

fn limiter_over(store: &Arc<MemoryUsageStore>) -> RateLimiter {
    RateLimiter::with_limits(Arc::clone(store) as Arc<dyn UsageStore>, 60, 10)
}

#[tokio::test]
async fn allows_under_the_cap() {
    let store = Arc::new(MemoryUsageStore::new());
    let limiter = limiter_over(&store);
    let user = Uuid::new_v4();

    let now = Utc::now();
    for i in 0..9 {
        store.push_event_at(user, now - Duration::seconds(i * 5));
    }

    assert_eq!(limiter.check(user).await, RateDecision::Allowed);
}

#[tokio::test]
async fn denies_at_exactly_max_calls() {
    let store = Arc::new(MemoryUsageStore::new());
    let limiter = limiter_over(&store);
    let user = Uuid::new_v4();

    let now = Utc::now();
    for i in 0..10 {
        store.push_event_at(user, now - Duration::seconds(i * 5));
    }

    assert_eq!(
        limiter.check(user).await,
        RateDecision::Denied {
            max_calls: 10,
            window_secs: 60,
        }
    );
}

#[tokio::test]
async fn events_outside_the_window_do_not_count() {
    let store = Arc::new(MemoryUsageStore::new());
    let limiter = limiter_over(&store);
    let user = Uuid::new_v4();

    let now = Utc::now();
    for i in 0..9 {
        store.push_event_at(user, now - Duration::seconds(i * 5));
    }
    // The tenth call sits just past the trailing edge.
    store.push_event_at(user, now - Duration::seconds(61));

    assert_eq!(limiter.check(user).await, RateDecision::Allowed);
}

#[tokio::test]
async fn other_users_events_are_ignored() {
    let store = Arc::new(MemoryUsageStore::new());
    let limiter = limiter_over(&store);
    let user = Uuid::new_v4();
    let neighbor = Uuid::new_v4();

    let now = Utc::now();
    for _ in 0..20 {
        store.push_event_at(neighbor, now);
    }

    assert_eq!(limiter.check(user).await, RateDecision::Allowed);
}

#[tokio::test]
async fn store_failure_fails_open() {
    let store = Arc::new(MemoryUsageStore::new());
    let limiter = limiter_over(&store);
    let user = Uuid::new_v4();

    // Even a user over the cap is allowed when the store is down.
    let now = Utc::now();
    for _ in 0..20 {
        store.push_event_at(user, now);
    }
    store.fail_event_reads(true);

    assert_eq!(limiter.check(user).await, RateDecision::Allowed);
}
