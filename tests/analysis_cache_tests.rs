use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use chan_chart::api::RequestKey;
use chan_chart::cache::AnalysisCache;
use chan_chart::config::{DisplayConfig, Timeframe};
use chan_chart::error::ChartError;
use chan_chart::render::VisualizationBundle;

fn key(instrument: &str) -> RequestKey {
    RequestKey {
        instrument: instrument.to_owned(),
        timeframe: Timeframe::Day,
        options: DisplayConfig::default().engine,
    }
}

#[test]
fn second_call_before_expiry_never_recomputes() {
    let cache = AnalysisCache::new(Duration::from_secs(60));
    let calls = AtomicUsize::new(0);

    for _ in 0..5 {
        let bundle = cache
            .get_or_compute(key("sz.000001"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(VisualizationBundle::default())
            })
            .expect("compute succeeds");
        assert_eq!(bundle.bar_count(), 0);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.stats().hits, 4);
}

#[test]
fn expired_entry_triggers_a_fresh_compute() {
    let cache = AnalysisCache::new(Duration::from_millis(30));
    let calls = AtomicUsize::new(0);
    let compute = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(VisualizationBundle::default())
    };

    cache
        .get_or_compute(key("sz.000001"), compute)
        .expect("first compute");
    thread::sleep(Duration::from_millis(60));
    cache
        .get_or_compute(key("sz.000001"), compute)
        .expect("recompute after expiry");

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_callers_coalesce_into_one_compute() {
    let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
    let calls = Arc::new(AtomicUsize::new(0));
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_compute(key("sh.600000"), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Hold the flight open long enough for every other
                    // caller to arrive and wait on it.
                    thread::sleep(Duration::from_millis(150));
                    Ok(VisualizationBundle::default())
                })
            })
        })
        .collect();

    let bundles: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker").expect("compute succeeds"))
        .collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // Every caller observes the same snapshot, not a copy of it.
    for bundle in &bundles[1..] {
        assert!(Arc::ptr_eq(&bundles[0], bundle));
    }
}

#[test]
fn distinct_keys_do_not_coalesce() {
    let cache = AnalysisCache::new(Duration::from_secs(60));
    let calls = AtomicUsize::new(0);
    let compute = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(VisualizationBundle::default())
    };

    cache
        .get_or_compute(key("sz.000001"), compute)
        .expect("first key");
    cache
        .get_or_compute(key("sz.000002"), compute)
        .expect("second key");

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn failed_compute_leaves_no_entry() {
    let cache = AnalysisCache::new(Duration::from_secs(60));
    let calls = AtomicUsize::new(0);

    let failure = cache.get_or_compute(key("sz.000001"), || {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(ChartError::engine_failure("feed unavailable"))
    });
    assert!(matches!(failure, Err(ChartError::EngineFailure(_))));
    assert!(cache.is_empty());

    // The next call retries from scratch and can succeed.
    let bundle = cache.get_or_compute(key("sz.000001"), || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(VisualizationBundle::default())
    });
    assert!(bundle.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn waiters_observe_the_leaders_failure() {
    let cache = Arc::new(AnalysisCache::new(Duration::from_secs(60)));
    let calls = Arc::new(AtomicUsize::new(0));
    let workers = 4;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_compute(key("sh.600000"), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(150));
                    Err(ChartError::engine_failure("feed unavailable"))
                })
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().expect("worker");
        assert!(matches!(outcome, Err(ChartError::EngineFailure(_))));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_empty());
}

#[test]
fn purge_expired_sweeps_only_dead_entries() {
    let cache = AnalysisCache::new(Duration::from_millis(30));
    cache
        .get_or_compute(key("sz.000001"), || Ok(VisualizationBundle::default()))
        .expect("seed entry");
    assert_eq!(cache.purge_expired(), 0);

    thread::sleep(Duration::from_millis(60));
    assert_eq!(cache.purge_expired(), 1);
    assert!(cache.is_empty());
}
