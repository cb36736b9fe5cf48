//! Integration Tests for the TTL cache
//!
//! Exercises expiry in real time and concurrent access from many tasks.

use std::sync::Arc;
use std::time::Duration;

use pokedex::TtlCache;
use tokio::sync::Barrier;

// == Expiry ==

#[tokio::test]
async fn test_add_get_and_expire() {
    let cases: [(&str, &[u8]); 2] = [
        ("https://example.com", b"testdata"),
        ("https://example.com/path", b"moretestdata"),
    ];
    let interval = Duration::from_secs(1);

    for (key, value) in cases {
        let cache = TtlCache::new(interval);

        cache.put(key, value);
        assert_eq!(cache.get(key).as_deref(), Some(value), "expected to find {key}");

        tokio::time::sleep(interval + Duration::from_millis(100)).await;
        assert_eq!(cache.get(key), None, "expected {key} to be cleared by now");

        cache.shutdown().await;
    }
}

#[tokio::test]
async fn test_scenario_expiry_and_overwrite() {
    let cache = TtlCache::new(Duration::from_secs(1));

    cache.put("A", "x");
    assert_eq!(cache.get("A"), Some(b"x".to_vec()));

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(cache.get("A"), None);

    cache.put("B", "y");
    cache.put("B", "z");
    assert_eq!(cache.get("B"), Some(b"z".to_vec()));

    cache.shutdown().await;
}

#[tokio::test]
async fn test_sweep_reclaims_within_two_ttls() {
    let ttl = Duration::from_millis(200);
    let cache = TtlCache::new(ttl);

    cache.put("never-read", "value");
    tokio::time::sleep(ttl * 2 + Duration::from_millis(150)).await;

    // Gone without any lookup touching it
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.stats().swept, 1);
    assert!(cache.stats().sweeps >= 2);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_keys_expire_independently() {
    let ttl = Duration::from_millis(400);
    let cache = TtlCache::new(ttl);

    cache.put("k1", "first");
    tokio::time::sleep(Duration::from_millis(250)).await;
    cache.put("k2", "second");
    tokio::time::sleep(Duration::from_millis(250)).await;

    // k1 is 500ms old, k2 250ms
    assert_eq!(cache.get("k1"), None);
    assert_eq!(cache.get("k2"), Some(b"second".to_vec()));

    cache.shutdown().await;
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_put_get_never_corrupts() {
    const WRITERS: usize = 8;
    const OPS: usize = 500;
    const KEYS: usize = 10;

    let cache = TtlCache::new(Duration::from_secs(60));
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                for i in 0..OPS {
                    let key = format!("key_{}", i % KEYS);
                    cache.put(key.clone(), format!("{writer}:{i}"));

                    if let Some(payload) = cache.get(&key) {
                        let text = String::from_utf8(payload).expect("payload must stay intact");
                        let (w, n) = text.split_once(':').expect("payload must be whole");
                        assert!(w.parse::<usize>().unwrap() < WRITERS);
                        assert!(n.parse::<usize>().unwrap() < OPS);
                    }
                    if i % 50 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.len(), KEYS);
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, (WRITERS * OPS) as u64);
    assert_eq!(stats.misses, 0, "every get follows a put of the same key");

    // Each key holds the final write of some writer
    for k in 0..KEYS {
        let payload = String::from_utf8(cache.get(&format!("key_{k}")).unwrap()).unwrap();
        let (_, n) = payload.split_once(':').unwrap();
        assert_eq!(n.parse::<usize>().unwrap() % KEYS, k);
        assert!(n.parse::<usize>().unwrap() >= OPS - KEYS);
    }

    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sweeps_interleave_with_writers() {
    let ttl = Duration::from_millis(20);
    let cache = TtlCache::new(ttl);

    let writers: Vec<_> = (0..4)
        .map(|writer| {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    cache.put(format!("{writer}-{}", i % 16), vec![writer as u8; 64]);
                    let _ = cache.get(&format!("{writer}-{}", (i + 1) % 16));
                    if i % 10 == 0 {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                    }
                }
            })
        })
        .collect();

    let sweeper = {
        let cache = cache.clone();
        std::thread::spawn(move || (0..50).map(|_| cache.sweep()).sum::<usize>())
    };

    for writer in writers {
        writer.await.unwrap();
    }
    sweeper.join().unwrap();

    // Everything written has aged out and been reclaimed
    tokio::time::sleep(ttl * 2 + Duration::from_millis(100)).await;
    assert!(cache.is_empty());

    cache.shutdown().await;
}
