//! Wire model shared by the transport and the list-view managers.
//!
//! Decimal fields (`price`, `square`) arrive as JSON strings and stay opaque
//! strings here: nothing client-side does arithmetic on them, and round-
//! tripping them untouched avoids float formatting drift on update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account, as reported by `GET /auth/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_verified: bool,
}

impl Identity {
    /// Name shown in greeting/navbar positions: first name when the profile
    /// has one, otherwise the email.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() { &self.email } else { &self.first_name }
    }
}

/// One apartment as served by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: String,
    pub number_of_rooms: i64,
    pub square: String,
    pub availability: bool,
    #[serde(default)]
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for create/update. `slug`, `owner_email` and timestamps are
/// server-assigned and absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub number_of_rooms: i64,
    pub square: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

/// Opaque page locator. The server mints these (as the `next`/`previous`
/// links of a page response); the client stores and echoes them verbatim,
/// never parses or rebuilds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageLocator(String);

impl PageLocator {
    /// The collection's default first page.
    pub fn first() -> Self {
        PageLocator("apartments/".to_string())
    }

    /// First page narrowed by server-side query options.
    pub fn first_with(query: &ListQuery) -> Self {
        let qs = query.to_query_string();
        if qs.is_empty() { Self::first() } else { PageLocator(format!("apartments/?{qs}")) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-side narrowing of the collection, applied only when building the
/// initial locator. Distinct from [`crate::filter::FilterCriteria`], which is
/// client-local and touches no request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub rooms: Option<i64>,
    pub available: Option<bool>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(s) = &self.search {
            if !s.is_empty() {
                parts.push(format!("search={}", urlencoding::encode(s)));
            }
        }
        if let Some(p) = &self.price_min {
            parts.push(format!("price_min={}", urlencoding::encode(p)));
        }
        if let Some(p) = &self.price_max {
            parts.push(format!("price_max={}", urlencoding::encode(p)));
        }
        if let Some(n) = self.rooms {
            parts.push(format!("number_of_rooms={n}"));
        }
        if let Some(a) = self.available {
            parts.push(format!("availability={a}"));
        }
        parts.join("&")
    }
}

/// One fetched window of the collection. Cursors come from the server
/// response and from nowhere else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "results")]
    pub items: Vec<Apartment>,
    pub next: Option<PageLocator>,
    pub previous: Option<PageLocator>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_first_name() {
        let mut id = Identity {
            email: "a@b.com".into(),
            first_name: "Anna".into(),
            last_name: String::new(),
            is_verified: true,
        };
        assert_eq!(id.display_name(), "Anna");
        id.first_name.clear();
        assert_eq!(id.display_name(), "a@b.com");
    }

    #[test]
    fn first_with_builds_query_string() {
        let q = ListQuery {
            search: Some("two rooms".into()),
            price_min: Some("100.00".into()),
            rooms: Some(2),
            available: Some(true),
            ..Default::default()
        };
        assert_eq!(
            PageLocator::first_with(&q).as_str(),
            "apartments/?search=two%20rooms&price_min=100.00&number_of_rooms=2&availability=true"
        );
        assert_eq!(PageLocator::first_with(&ListQuery::default()), PageLocator::first());
    }

    #[test]
    fn page_decodes_listing_envelope() {
        let body = r#"{
            "results": [{
                "id": 1, "name": "Studio", "slug": "studio",
                "description": "small", "price": "850.00",
                "number_of_rooms": 1, "square": "28.50", "availability": true,
                "owner_email": "o@b.com",
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z"
            }],
            "next": "http://testserver/api/v1/apartments/?page=2",
            "previous": null
        }"#;
        let page: Page = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug, "studio");
        assert_eq!(
            page.next.as_ref().map(PageLocator::as_str),
            Some("http://testserver/api/v1/apartments/?page=2")
        );
        assert!(page.previous.is_none());
    }
}
