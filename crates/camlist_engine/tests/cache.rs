use std::time::{Duration, Instant};

use camlist_core::FilterSet;
use camlist_engine::{page_cache_key, ResponseCache, DEFAULT_CACHE_TTL};
use pretty_assertions::assert_eq;

#[test]
fn fresh_entries_hit_until_the_ttl() {
    let mut cache: ResponseCache<Vec<u64>> = ResponseCache::new(Duration::from_secs(60));
    let t0 = Instant::now();
    cache.insert("cams?page=1", vec![1, 2, 3], t0);

    assert_eq!(cache.get("cams?page=1", t0), Some(&vec![1, 2, 3]));
    assert_eq!(
        cache.get("cams?page=1", t0 + Duration::from_secs(59)),
        Some(&vec![1, 2, 3])
    );
    assert_eq!(cache.get("cams?page=1", t0 + Duration::from_secs(60)), None);
}

#[test]
fn expired_entries_stay_reachable_as_stale() {
    let mut cache: ResponseCache<Vec<u64>> = ResponseCache::new(Duration::from_secs(60));
    let t0 = Instant::now();
    cache.insert("cams?page=1", vec![1], t0);

    let later = t0 + Duration::from_secs(120);
    assert_eq!(cache.get("cams?page=1", later), None);
    // The expired entry still backs the degraded-mode fallback.
    assert_eq!(cache.get_stale("cams?page=1"), Some(&vec![1]));
}

#[test]
fn purge_drops_only_expired_entries() {
    let mut cache: ResponseCache<Vec<u64>> = ResponseCache::new(Duration::from_secs(60));
    let t0 = Instant::now();
    cache.insert("old", vec![1], t0);
    cache.insert("new", vec![2], t0 + Duration::from_secs(30));

    cache.purge_expired(t0 + Duration::from_secs(61));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_stale("old"), None);
    assert_eq!(cache.get_stale("new"), Some(&vec![2]));
}

#[test]
fn insert_refreshes_an_existing_entry() {
    let mut cache: ResponseCache<Vec<u64>> = ResponseCache::new(Duration::from_secs(60));
    let t0 = Instant::now();
    cache.insert("cams?page=1", vec![1], t0);
    cache.insert("cams?page=1", vec![2], t0 + Duration::from_secs(59));

    assert_eq!(
        cache.get("cams?page=1", t0 + Duration::from_secs(90)),
        Some(&vec![2])
    );
    assert_eq!(cache.len(), 1);
}

#[test]
fn default_ttl_is_one_minute() {
    let cache: ResponseCache<Vec<u64>> = ResponseCache::default();
    assert_eq!(cache.ttl(), DEFAULT_CACHE_TTL);
    assert_eq!(DEFAULT_CACHE_TTL, Duration::from_secs(60));
    assert!(cache.is_empty());
}

#[test]
fn page_cache_key_normalizes_filters() {
    let filters = FilterSet {
        gender: Some("female".to_string()),
        country: Some("us".to_string()),
        ..FilterSet::default()
    };
    let key = page_cache_key("cams/online.json", 2, 36, &filters);
    assert_eq!(key, "cams/online.json?page=2&limit=36&country=us&gender=female");

    // Same filters, different page: distinct entry.
    let other = page_cache_key("cams/online.json", 3, 36, &filters);
    assert_ne!(key, other);
}
