use chrono::Utc;
use fedi_cache::StatusCache;
use fedi_core::{Status, Visibility};
use proptest::prelude::*;

fn make_status(id: &str, uri: &str, url: &str, pinned: Option<bool>) -> Status {
    Status {
        id: id.to_string(),
        uri: uri.to_string(),
        url: url.to_string(),
        content: String::new(),
        account_id: "01F8MH1H7YV1Z7D2C8K2730QBF".to_string(),
        account_uri: String::new(),
        in_reply_to_id: None,
        in_reply_to_uri: None,
        visibility: Visibility::Public,
        local: Some(false),
        sensitive: None,
        pinned,
        created_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn every_nonempty_key_finds_the_entity(
        id in "[A-Z0-9]{26}",
        uri in "(https://[a-z]{3,10}\\.example/[a-z0-9]{1,12})?",
        url in "(https://[a-z]{3,10}\\.example/@[a-z0-9]{1,12})?",
    ) {
        let cache = StatusCache::new();
        let status = make_status(&id, &uri, &url, None);
        cache.put(&status);

        prop_assert_eq!(cache.get_by_id(&id).map(|s| s.id), Some(id.clone()));
        prop_assert_eq!(cache.get_by_uri(&uri).is_some(), !uri.is_empty());
        prop_assert_eq!(cache.get_by_url(&url).is_some(), !url.is_empty());
    }

    #[test]
    fn last_put_wins_for_a_shared_id(
        urls in proptest::collection::vec("https://[a-z]{3,8}\\.example/[0-9]{1,6}", 1..10),
    ) {
        let cache = StatusCache::new();
        for url in &urls {
            cache.put(&make_status("01FVW7JHQFSFK166WWKR8CBA6M", "", url, None));
        }
        let last = urls.last().unwrap();

        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.get_by_id("01FVW7JHQFSFK166WWKR8CBA6M").unwrap().url, last.clone());
        for url in urls.iter().filter(|u| *u != last) {
            prop_assert!(cache.get_by_url(url).is_none());
        }
    }

    #[test]
    fn caller_mutation_never_reaches_cache(pinned in any::<bool>()) {
        let cache = StatusCache::new();
        let mut status = make_status("01F8MHAMCHF6Y650WCRSCP4WMY", "https://a.example/1", "", Some(pinned));
        cache.put(&status);

        status.pinned = Some(!pinned);
        let mut fetched = cache.get_by_uri("https://a.example/1").unwrap();
        prop_assert_eq!(fetched.pinned, Some(pinned));

        fetched.pinned = None;
        prop_assert_eq!(cache.get_by_uri("https://a.example/1").unwrap().pinned, Some(pinned));
    }
}
