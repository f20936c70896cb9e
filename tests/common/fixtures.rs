#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use growloop_backend::domain::{NewRecycler, Recycler, User};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_id() -> u64 {
    TEST_COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn test_user(id: i64, email: &str, password_hash: Option<String>) -> User {
    User {
        id,
        user_name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        phone_number: None,
        address_text: None,
        external_uid: format!("local-fixture-{}", next_id()),
        password_hash,
        loyalty_points: 0,
        is_verified: false,
        is_premium: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_recycler(id: i64, name: &str, latitude: f64, longitude: f64) -> Recycler {
    Recycler {
        id,
        name: name.to_string(),
        address: format!("{id} Recycling Way"),
        phone_number: None,
        email: None,
        latitude,
        longitude,
        rating: 0.0,
        accepted_items: vec!["plastic".to_string(), "glass".to_string()],
        open_hours: Some("08:00-17:00".to_string()),
        is_verified: false,
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn rated(mut recycler: Recycler, rating: f64) -> Recycler {
    recycler.rating = rating;
    recycler
}

pub fn verified(mut recycler: Recycler) -> Recycler {
    recycler.is_verified = true;
    recycler
}

pub fn new_recycler(name: &str, latitude: f64, longitude: f64) -> NewRecycler {
    NewRecycler {
        name: name.to_string(),
        address: format!("{} Depot Road", next_id()),
        phone_number: Some("555-0100".to_string()),
        email: None,
        latitude,
        longitude,
        rating: 4.0,
        accepted_items: vec!["paper".to_string(), "metal".to_string()],
        open_hours: None,
        is_verified: false,
        description: Some("Drop-off point".to_string()),
    }
}
