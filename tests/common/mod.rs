//! Shared test doubles and fixtures.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use arenda::error::{ApiError, ApiResult};
use arenda::model::{Apartment, ApartmentDraft, Identity, Page, PageLocator};
use arenda::transport::Transport;

/// Scripted transport: each operation pops its next outcome from a queue.
/// An exhausted queue answers with a transport error so a test that forgets
/// to script a call fails loudly instead of hanging on a default.
#[derive(Default)]
pub struct MockTransport {
    pub login_outcomes: Mutex<VecDeque<ApiResult<()>>>,
    pub refresh_outcomes: Mutex<VecDeque<ApiResult<()>>>,
    pub identity_outcomes: Mutex<VecDeque<ApiResult<Identity>>>,
    pub logout_outcomes: Mutex<VecDeque<ApiResult<()>>>,
    pub page_outcomes: Mutex<VecDeque<ApiResult<Page>>>,
    /// Every locator handed to `fetch_page`, verbatim.
    pub fetched_locators: Mutex<Vec<String>>,
    pub refresh_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn identity_count(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }
}

fn pop<T>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
    queue.lock().pop_front().unwrap_or_else(|| Err(ApiError::transport("mock: unscripted call")))
}

#[async_trait]
impl Transport for MockTransport {
    async fn login(&self, _email: &str, _password: &str) -> ApiResult<()> {
        pop(&self.login_outcomes)
    }

    async fn refresh(&self) -> ApiResult<()> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.refresh_outcomes)
    }

    async fn fetch_identity(&self) -> ApiResult<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.identity_outcomes)
    }

    async fn logout(&self) -> ApiResult<()> {
        pop(&self.logout_outcomes)
    }

    async fn fetch_page(&self, locator: &PageLocator) -> ApiResult<Page> {
        self.fetched_locators.lock().push(locator.as_str().to_string());
        pop(&self.page_outcomes)
    }

    async fn fetch_apartment(&self, _slug: &str) -> ApiResult<Apartment> {
        Err(ApiError::transport("mock: fetch_apartment not scripted"))
    }

    async fn create_apartment(&self, _draft: &ApartmentDraft) -> ApiResult<Apartment> {
        Err(ApiError::transport("mock: create_apartment not scripted"))
    }

    async fn update_apartment(&self, _slug: &str, _draft: &ApartmentDraft) -> ApiResult<Apartment> {
        Err(ApiError::transport("mock: update_apartment not scripted"))
    }

    async fn delete_apartment(&self, _slug: &str) -> ApiResult<()> {
        Err(ApiError::transport("mock: delete_apartment not scripted"))
    }
}

pub fn identity(email: &str) -> Identity {
    Identity {
        email: email.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        is_verified: true,
    }
}

pub fn apartment(slug: &str, rooms: i64, available: bool) -> Apartment {
    let listed = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    Apartment {
        id: 1,
        name: slug.to_string(),
        slug: slug.to_string(),
        description: format!("{slug} description"),
        price: "1200.00".to_string(),
        number_of_rooms: rooms,
        square: "45.00".to_string(),
        availability: available,
        owner_email: "owner@example.com".to_string(),
        created_at: listed,
        updated_at: listed,
    }
}

/// Mint an opaque locator the way the wire does: through deserialization.
/// The library itself exposes no constructor for arbitrary cursor strings.
pub fn locator(raw: &str) -> PageLocator {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap()
}

pub fn page(items: Vec<Apartment>, next: Option<&str>, previous: Option<&str>) -> Page {
    Page { items, next: next.map(locator), previous: previous.map(locator) }
}
