//! Concurrency tests for the atomic word and the acquire/release handshake.

use std::sync::Arc;
use std::thread;

use archprim::sync::{cpu_pause, SyncWord};

const THREADS: usize = 8;
const INCREMENTS: u64 = 1_000_000;

#[test]
fn fetch_add_loses_no_updates() {
    let word = Arc::new(SyncWord::new(0));

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let word = Arc::clone(&word);
            thread::spawn(move || {
                for _ in 0..INCREMENTS {
                    word.fetch_add(1);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(word.load(), THREADS as u64 * INCREMENTS);
}

#[test]
fn fetch_add_returns_unique_previous_values() {
    // With increments of 1 from zero, every returned previous value must be
    // distinct: two threads observing the same one would be a lost update.
    let word = Arc::new(SyncWord::new(0));
    let per_thread = 50_000u64;

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let word = Arc::clone(&word);
            thread::spawn(move || {
                let mut previous = Vec::with_capacity(per_thread as usize);
                for _ in 0..per_thread {
                    previous.push(word.fetch_add(1));
                }
                previous
            })
        })
        .collect();

    let mut seen: Vec<u64> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    seen.sort_unstable();

    let expected: Vec<u64> = (0..THREADS as u64 * per_thread).collect();
    assert_eq!(seen, expected);
}

#[test]
fn release_store_publishes_prior_writes() {
    // The producer/consumer handshake: data written with plain
    // stores, published with a release-store, observed after an
    // acquire-load. Repeated to give a racy implementation a chance to fail.
    for round in 0..200u64 {
        let flag = Arc::new(SyncWord::new(0));
        let data = Arc::new(std::sync::atomic::AtomicU64::new(0));

        let producer = {
            let flag = Arc::clone(&flag);
            let data = Arc::clone(&data);
            thread::spawn(move || {
                data.store(round + 1, std::sync::atomic::Ordering::Relaxed);
                flag.store(1); // release
            })
        };

        while flag.load() == 0 {
            cpu_pause(); // acquire-load spin
        }
        assert_eq!(
            data.load(std::sync::atomic::Ordering::Relaxed),
            round + 1,
            "round {round}"
        );

        producer.join().unwrap();
    }
}

#[test]
fn exchange_returns_previous_under_contention() {
    // Every value 0..N is swapped in exactly once; the multiset of returned
    // previous values must be a permutation of {initial} ∪ {0..N} \ {final}.
    let word = Arc::new(SyncWord::new(u64::MAX));
    let per_thread = 1000u64;

    let workers: Vec<_> = (0..4u64)
        .map(|t| {
            let word = Arc::clone(&word);
            thread::spawn(move || {
                let mut previous = Vec::with_capacity(per_thread as usize);
                for i in 0..per_thread {
                    previous.push(word.exchange(t * per_thread + i));
                }
                previous
            })
        })
        .collect();

    let mut seen: Vec<u64> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    seen.push(word.load());
    seen.sort_unstable();

    let mut expected: Vec<u64> = (0..4 * per_thread).collect();
    expected.push(u64::MAX);
    expected.sort_unstable();

    // No previous value duplicated, none dropped: full RMW atomicity.
    assert_eq!(seen, expected);
}
