//! End-to-end search behaviour over the fixture collaborators.

use std::sync::Arc;
use std::time::Duration;

use fedi_core::errors::{ErrorClass, FediError, FediResult, SearchError};
use fedi_core::traits::{ILocalStore, IRemoteFetcher, ITypeConverter};
use fedi_core::{Account, FediConfig, SearchQuery, SearchResult, Status};
use fedi_search::SearchProcessor;
use test_fixtures::{account, status, test_config, MemoryStore, MockFetcher, PlainConverter};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Harness {
    store: Arc<MemoryStore>,
    fetcher: Arc<MockFetcher>,
    converter: Arc<PlainConverter>,
    processor: SearchProcessor<MemoryStore, MockFetcher, PlainConverter>,
}

fn harness_with(config: FediConfig) -> Harness {
    let store = Arc::new(MemoryStore::from_fixtures());
    let fetcher = Arc::new(MockFetcher::new());
    let converter = Arc::new(PlainConverter::new());
    let processor = SearchProcessor::new(
        Arc::clone(&store),
        Arc::clone(&fetcher),
        Arc::clone(&converter),
        &config,
    );
    Harness {
        store,
        fetcher,
        converter,
        processor,
    }
}

fn harness() -> Harness {
    harness_with(test_config())
}

fn zork() -> Account {
    account("local_account_1")
}

fn remote_status() -> Status {
    let mut remote = status("remote_account_1_status_1");
    remote.id = "01HQ0B0BSTATUSXXXXXXXXXXXX".into();
    remote.uri = "https://remote.example/users/bob/statuses/01HQ0B0BSTATUSXXXXXXXXXXXX".into();
    remote.url = "https://remote.example/@bob/01HQ0B0BSTATUSXXXXXXXXXXXX".into();
    remote.account_id = account("remote_account_2").id;
    remote
}

async fn search(
    h: &Harness,
    requester: &Account,
    q: &str,
    resolve: bool,
) -> Result<SearchResult, FediError> {
    h.processor
        .search(requester, &SearchQuery::new(q, resolve), &CancellationToken::new())
        .await
}

#[tokio::test]
async fn blank_queries_are_rejected() {
    let h = harness();
    for q in ["", "   ", "\t\n"] {
        let err = search(&h, &zork(), q, false).await.unwrap_err();
        assert!(matches!(err, FediError::SearchError(SearchError::EmptyQuery)));
        assert_eq!(err.class(), ErrorClass::ClientInput);
        assert_eq!(err.http_status(), 400);
        assert_eq!(
            err.to_string(),
            "search query was empty string after trimming space"
        );
    }
    assert_eq!(h.processor.metrics().snapshot().searches, 0);
}

#[tokio::test]
async fn known_remote_account_found_without_fetch() {
    let h = harness();

    let result = search(&h, &zork(), "@bob@remote.example", false).await.unwrap();

    assert_eq!(result.accounts.len(), 1);
    assert_eq!(result.accounts[0].acct, "bob@remote.example");
    assert!(result.statuses.is_empty());
    assert!(result.hashtags.is_empty());
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn query_is_trimmed_before_resolving() {
    let h = harness();

    let result = search(&h, &zork(), "  the_mighty_zork \n", false).await.unwrap();

    assert_eq!(result.accounts[0].username, "the_mighty_zork");
}

#[tokio::test]
async fn unmatched_query_is_an_empty_result() {
    let h = harness();

    let result = search(&h, &zork(), "just some words", true).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn blocked_account_is_not_returned() {
    // Fixture: local_account_2 blocks remote_account_1.
    let h = harness();

    let result = search(
        &h,
        &account("local_account_2"),
        "foss_satan@fossbros-anonymous.io",
        false,
    )
    .await
    .unwrap();

    assert!(result.accounts.is_empty());
    assert_eq!(h.processor.metrics().snapshot().filtered, 1);

    // The blocked side cannot find the blocker either.
    let result = search(&h, &account("remote_account_1"), "1happyturtle", false)
        .await
        .unwrap();
    assert!(result.accounts.is_empty());
}

#[tokio::test]
async fn block_check_failure_hides_account() {
    let h = harness();
    h.store.fail_block_checks();

    let result = search(&h, &zork(), "admin", false).await.unwrap();

    assert!(result.accounts.is_empty());
}

#[tokio::test]
async fn invisible_status_is_not_returned() {
    let h = harness();
    let followers_only = status("local_account_2_status_1");

    let result = search(&h, &zork(), &followers_only.uri, false).await.unwrap();
    assert!(result.statuses.is_empty());

    h.store.follow(&zork().id, &followers_only.account_id);
    let result = search(&h, &zork(), &followers_only.uri, false).await.unwrap();
    assert_eq!(result.statuses[0].id, followers_only.id);
}

#[tokio::test]
async fn visibility_error_hides_status() {
    let h = harness();
    let public = status("local_account_1_status_1");
    h.store.fail_visibility_for(&public.id);

    let result = search(&h, &account("admin_account"), &public.url, false)
        .await
        .unwrap();

    assert!(result.statuses.is_empty());
}

#[tokio::test]
async fn conversion_failure_drops_only_that_entity() {
    let h = harness();
    let bob = account("remote_account_2");
    h.converter.fail_for(&bob.id);

    let result = search(&h, &zork(), "bob@remote.example", false).await.unwrap();
    assert!(result.accounts.is_empty());

    let result = search(&h, &zork(), "1happyturtle", false).await.unwrap();
    assert_eq!(result.accounts.len(), 1);
}

#[tokio::test]
async fn remote_status_is_dereferenced_when_resolving() {
    let h = harness();
    let wanted = remote_status();
    h.fetcher.serve_status(wanted.clone());

    let result = search(&h, &zork(), &wanted.uri, true).await.unwrap();

    assert_eq!(result.statuses.len(), 1);
    assert_eq!(result.statuses[0].uri, wanted.uri);
    assert_eq!(h.fetcher.thread_calls(), 1);

    let snapshot = h.processor.metrics().snapshot();
    assert_eq!(snapshot.searches, 1);
    assert_eq!(snapshot.remote_fetches, 1);
}

#[tokio::test]
async fn cancelled_search_is_an_error() {
    let h = harness();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = h
        .processor
        .search(&zork(), &SearchQuery::new("admin", false), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.http_status(), 499);
    assert_eq!(h.processor.metrics().snapshot().cancelled_searches, 1);
}

#[tokio::test]
async fn cancellation_after_resolution_returns_partial_result() {
    let h = harness();
    let wanted = remote_status();
    h.fetcher.serve_status(wanted.clone());
    // Status arrives at ~100ms, the token fires during the back-fill.
    h.fetcher.delay_by(Duration::from_millis(100));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        trigger.cancel();
    });

    let result = h
        .processor
        .search(&zork(), &SearchQuery::new(wanted.uri.clone(), true), &cancel)
        .await
        .unwrap();

    assert!(result.statuses.is_empty());
    assert!(result.hashtags.is_empty());
    assert_eq!(h.processor.metrics().snapshot().cancelled_searches, 1);
}

/// Spawn a search from code that only knows the collaborator traits.
fn spawn_search<S, F, C>(
    processor: Arc<SearchProcessor<S, F, C>>,
    requester: Account,
    query: SearchQuery,
) -> JoinHandle<FediResult<SearchResult>>
where
    S: ILocalStore + 'static,
    F: IRemoteFetcher + 'static,
    C: ITypeConverter + 'static,
{
    tokio::spawn(async move {
        processor
            .search(&requester, &query, &CancellationToken::new())
            .await
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn searches_run_as_spawned_tasks() {
    let Harness {
        fetcher, processor, ..
    } = harness();
    let wanted = remote_status();
    fetcher.serve_status(wanted.clone());
    let processor = Arc::new(processor);

    let by_mention = spawn_search(
        Arc::clone(&processor),
        zork(),
        SearchQuery::new("@bob@remote.example", false),
    );
    let by_uri = spawn_search(
        Arc::clone(&processor),
        zork(),
        SearchQuery::new(wanted.uri.clone(), true),
    );

    let by_mention = by_mention.await.unwrap().unwrap();
    let by_uri = by_uri.await.unwrap().unwrap();
    assert_eq!(by_mention.accounts[0].acct, "bob@remote.example");
    assert_eq!(by_uri.statuses[0].id, wanted.id);
    assert_eq!(processor.metrics().snapshot().searches, 2);
}
