use std::sync::Arc;
use std::thread;

use fedi_cache::{AccountCache, StatusCache};
use fedi_core::{Account, Status};

fn status_is(a: &Status, b: &Status) -> bool {
    a.id == b.id && a.uri == b.uri && a.url == b.url
}

fn account_is(a: &Account, b: &Account) -> bool {
    a.id == b.id && a.uri == b.uri && a.url == b.url
}

// ── Multi-index consistency ───────────────────────────────────────────────

#[test]
fn status_cache_serves_every_index() {
    let cache = StatusCache::new();
    let data = test_fixtures::statuses();
    for status in data.values() {
        cache.put(status);
    }

    for status in data.values() {
        let check = cache.get_by_id(&status.id).expect("by id");
        assert!(status_is(status, &check));

        let by_uri = cache.get_by_uri(&status.uri);
        if status.uri.is_empty() {
            assert!(by_uri.is_none());
        } else {
            assert!(status_is(status, &by_uri.expect("by uri")));
        }

        let by_url = cache.get_by_url(&status.url);
        if status.url.is_empty() {
            assert!(by_url.is_none());
        } else {
            assert!(status_is(status, &by_url.expect("by url")));
        }
    }
}

#[test]
fn empty_url_is_never_indexed() {
    let cache = StatusCache::new();
    let reply = test_fixtures::status("local_account_2_status_2");
    assert!(reply.url.is_empty());
    cache.put(&reply);

    assert!(cache.get_by_url("").is_none());
    assert!(cache.get_by_id(&reply.id).is_some());
}

#[test]
fn account_cache_serves_every_index_including_handle() {
    let cache = AccountCache::new();
    let data = test_fixtures::accounts();
    for account in data.values() {
        cache.put(account);
    }

    for account in data.values() {
        assert!(account_is(account, &cache.get_by_id(&account.id).unwrap()));
        assert!(account_is(account, &cache.get_by_uri(&account.uri).unwrap()));
        assert!(account_is(account, &cache.get_by_url(&account.url).unwrap()));

        let domain = account.domain.as_deref().unwrap_or_default();
        let by_handle = cache.get_by_handle(&account.username, domain).unwrap();
        assert!(account_is(account, &by_handle));
    }
}

#[test]
fn handle_lookup_distinguishes_local_from_remote() {
    let cache = AccountCache::new();
    let zork = test_fixtures::account("local_account_1");
    let mut remote_zork = test_fixtures::account("remote_account_2");
    remote_zork.username = zork.username.clone();
    cache.put(&zork);
    cache.put(&remote_zork);

    assert_eq!(cache.get_by_handle(&zork.username, "").unwrap().id, zork.id);
    assert_eq!(
        cache
            .get_by_handle(&zork.username, "REMOTE.example")
            .unwrap()
            .id,
        remote_zork.id
    );
}

// ── Copy isolation ────────────────────────────────────────────────────────

#[test]
fn pinned_flag_is_not_shared_between_caller_and_cache() {
    let cache = StatusCache::new();
    let mut original = test_fixtures::status("local_account_1_status_1");

    // mark the status as pinned + cache it
    original.pinned = Some(true);
    cache.put(&original);

    let mut cached = cache.get_by_id(&original.id).expect("retrievable");
    assert_eq!(cached.pinned, Some(true));

    original.pinned = Some(false);
    assert_eq!(cached.pinned, Some(true));
    assert_eq!(cache.get_by_id(&original.id).unwrap().pinned, Some(true));

    original.pinned = Some(true);
    cached.pinned = Some(false);
    assert_eq!(original.pinned, Some(true));
    assert_eq!(cache.get_by_id(&original.id).unwrap().pinned, Some(true));
}

#[test]
fn reput_replaces_previous_value() {
    let cache = AccountCache::new();
    let mut bob = test_fixtures::account("remote_account_2");
    cache.put(&bob);

    bob.display_name = "bob, renamed".into();
    bob.url = "https://remote.example/profiles/bob".into();
    cache.put(&bob);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_by_id(&bob.id).unwrap().display_name, "bob, renamed");
    assert!(cache.get_by_url("https://remote.example/@bob").is_none());
    assert!(cache.get_by_url(&bob.url).is_some());
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn concurrent_writers_never_tear_indices() {
    let cache = Arc::new(StatusCache::new());
    let base = test_fixtures::status("remote_account_1_status_1");

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let cache = Arc::clone(&cache);
            let base = base.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let mut status = base.clone();
                    status.url = format!("https://remote.example/w{w}/{i}");
                    status.content = status.url.clone();
                    cache.put(&status);
                }
            })
        })
        .collect();

    let reader = {
        let cache = Arc::clone(&cache);
        let base = base.clone();
        thread::spawn(move || {
            for _ in 0..2_000 {
                if let Some(status) = cache.get_by_uri(&base.uri) {
                    // content mirrors url in every write, so a torn entry would differ
                    assert_eq!(status.content, status.url);
                    let by_url = cache.get_by_url(&status.url);
                    if let Some(by_url) = by_url {
                        assert_eq!(by_url.id, base.id);
                    }
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let last = cache.get_by_id(&base.id).unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_by_url(&last.url).unwrap().id, base.id);
}
