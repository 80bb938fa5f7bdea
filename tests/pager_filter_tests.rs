//! Pager cursor discipline and page-local filtering against a scripted
//! transport.

mod common;

use arenda::error::ApiError;
use arenda::filter::{FilterCriteria, ListFilter};
use arenda::model::{ListQuery, PageLocator};
use arenda::pager::ResourcePager;

use common::{MockTransport, apartment, page};

#[tokio::test]
async fn advance_without_next_cursor_is_a_noop() {
    let mock = MockTransport::new();
    mock.page_outcomes.lock().push_back(Ok(page(vec![apartment("only", 2, true)], None, None)));

    let mut pager = ResourcePager::new(mock.clone());
    pager.load_current().await.unwrap();

    assert!(!pager.has_next());
    assert_eq!(pager.advance().await.unwrap(), false);
    // No second fetch went out.
    assert_eq!(mock.fetched_locators.lock().len(), 1);
}

#[tokio::test]
async fn advance_passes_the_server_cursor_verbatim() {
    let mock = MockTransport::new();
    mock.page_outcomes
        .lock()
        .push_back(Ok(page(vec![apartment("r1", 1, true)], Some("cursor2"), None)));
    mock.page_outcomes
        .lock()
        .push_back(Ok(page(vec![apartment("r2", 2, true)], None, Some("cursor1"))));

    let mut pager = ResourcePager::new(mock.clone());
    pager.load_current().await.unwrap();
    assert!(pager.has_next());

    assert_eq!(pager.advance().await.unwrap(), true);
    let locators = mock.fetched_locators.lock().clone();
    assert_eq!(locators, vec!["apartments/".to_string(), "cursor2".to_string()]);
    assert_eq!(pager.current_locator().as_str(), "cursor2");
}

#[tokio::test]
async fn retreat_is_symmetric_with_absolute_urls() {
    let mock = MockTransport::new();
    // Servers hand back absolute URLs; they must go through untouched, with
    // no path prefix stripping in either direction.
    let prev = "http://testserver/api/v1/apartments/?page=1";
    mock.page_outcomes
        .lock()
        .push_back(Ok(page(vec![apartment("r3", 3, true)], None, Some(prev))));
    mock.page_outcomes.lock().push_back(Ok(page(vec![apartment("r1", 1, true)], None, None)));

    let mut pager = ResourcePager::new(mock.clone());
    pager.load_current().await.unwrap();
    assert!(pager.has_prev());

    assert_eq!(pager.retreat().await.unwrap(), true);
    assert_eq!(mock.fetched_locators.lock()[1], prev);
    assert_eq!(pager.current_locator().as_str(), prev);
}

#[tokio::test]
async fn failed_load_keeps_the_previous_page() {
    let mock = MockTransport::new();
    mock.page_outcomes
        .lock()
        .push_back(Ok(page(vec![apartment("r1", 1, true), apartment("r2", 3, true)], Some("cursor2"), None)));
    mock.page_outcomes
        .lock()
        .push_back(Err(ApiError::Http { status: 503, body: "unavailable".into() }));

    let mut pager = ResourcePager::new(mock.clone());
    pager.load_current().await.unwrap();

    let err = pager.advance().await.unwrap_err();
    assert!(matches!(err, ApiError::PageLoad { .. }));
    assert!(err.is_retryable());

    // Display state is untouched: same items, same position, next still
    // offered so the user can retry.
    let slugs: Vec<_> = pager.items().iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["r1", "r2"]);
    assert_eq!(pager.current_locator(), &PageLocator::first());
    assert!(pager.has_next());

    // The retry succeeds.
    mock.page_outcomes.lock().push_back(Ok(page(vec![apartment("r3", 2, true)], None, None)));
    assert_eq!(pager.advance().await.unwrap(), true);
    assert_eq!(pager.current_locator().as_str(), "cursor2");
}

#[tokio::test]
async fn filtering_narrows_the_loaded_page_only() {
    let mock = MockTransport::new();
    mock.page_outcomes
        .lock()
        .push_back(Ok(page(vec![apartment("r1", 1, true), apartment("r2", 3, true)], Some("cursor2"), None)));

    let mut pager = ResourcePager::new(mock.clone());
    pager.load_current().await.unwrap();

    let mut filter = ListFilter::default();
    filter.set_criteria(FilterCriteria { min_rooms: Some(2), ..Default::default() });
    let visible = filter.apply(pager.items());

    let slugs: Vec<_> = visible.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["r2"]);
    // The source page is not mutated and no extra request went out.
    assert_eq!(pager.items().len(), 2);
    assert_eq!(mock.fetched_locators.lock().len(), 1);
}

#[tokio::test]
async fn query_narrowed_pager_builds_the_initial_locator() {
    let mock = MockTransport::new();
    mock.page_outcomes.lock().push_back(Ok(page(vec![], None, None)));

    let query = ListQuery { search: Some("loft".into()), rooms: Some(2), ..Default::default() };
    let mut pager = ResourcePager::with_query(mock.clone(), &query);
    pager.load_current().await.unwrap();

    assert_eq!(
        mock.fetched_locators.lock()[0],
        "apartments/?search=loft&number_of_rooms=2"
    );
}
