//! Process-wide instances under concurrent first access.

use std::sync::{Arc, Barrier};
use std::thread;

use netgame_diagnostics::config::parse_config;
use netgame_diagnostics::{LogFacade, PrngService};

const THREADS: usize = 16;

/// Start `THREADS` threads together and collect what each one returns.
fn race<T, F>(f: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(THREADS));
    let f = Arc::new(f);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = barrier.clone();
            let f = f.clone();
            thread::spawn(move || {
                barrier.wait();
                f()
            })
        })
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn test_log_facade_constructed_once() {
    let seen = race(|| LogFacade::global() as *const LogFacade as usize);
    let first = seen[0];
    assert!(seen.iter().all(|&p| p == first), "threads saw distinct facades");
    assert!(std::ptr::eq(LogFacade::global(), LogFacade::global()));
}

#[test]
fn test_prng_constructed_once() {
    let seen = race(|| PrngService::instance() as *const PrngService as usize);
    let first = seen[0];
    assert!(seen.iter().all(|&p| p == first), "threads saw distinct generators");
    assert!(std::ptr::eq(PrngService::instance(), PrngService::instance()));
}

#[test]
fn test_concurrent_draws_stay_in_range() {
    let results = race(|| {
        let prng = PrngService::instance();
        (0..2_000)
            .map(|_| prng.next_in(-10, 10))
            .collect::<Result<Vec<i32>, _>>()
            .unwrap()
    });

    for draws in results {
        assert_eq!(draws.len(), 2_000);
        assert!(draws.iter().all(|v| (-10..10).contains(v)));
    }
}

#[test]
fn test_global_bounds_are_checked() {
    let prng = PrngService::instance();
    assert!(prng.next_below(-1).is_err());
    assert!(prng.next_in(3, 2).is_err());
    assert_eq!(prng.next_below(0), Ok(0));
    for _ in 0..1_000 {
        let v = prng.next_below(10).unwrap();
        assert!((0..10).contains(&v));
    }
}

#[test]
fn test_config_seed_replays_draws() {
    let config = parse_config("[random]\nseed = 42\n").unwrap();
    let replay = PrngService::from_config(&config.random);
    let reference = PrngService::with_seed(42);

    for _ in 0..64 {
        assert_eq!(replay.next_in(-100, 100), reference.next_in(-100, 100));
    }
}
