use std::sync::Arc;
use std::thread;

use rollwin_core::weight::POSITIONAL;
use rollwin_core::{Accumulator, SynchronizedAccumulator};

const ITERATIONS: usize = 100_000;

#[test]
fn test_synchronises_producer_and_reader() {
    let window = SynchronizedAccumulator::new(2);

    // Pre-fill so every overwrite replaces a value with an equal one.
    window.insert(2.0);
    window.insert(3.0);

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ITERATIONS {
                window.insert(2.0);
                window.insert(3.0);
            }
        });

        s.spawn(|| {
            for _ in 0..ITERATIONS {
                assert_eq!(window.sum(), 5.0);
                assert_eq!(window.mean(), 2.5);
            }
        });
    });

    assert_eq!(window.count(), 2);
}

#[test]
fn test_concurrent_readers_see_whole_snapshots() {
    let window = Arc::new(SynchronizedAccumulator::new(4));
    for _ in 0..4 {
        window.insert(1.0);
    }

    let writer = {
        let window = window.clone();
        thread::spawn(move || {
            for _ in 0..ITERATIONS {
                window.insert(1.0);
            }
        })
    };

    let readers = (0..4)
        .map(|_| {
            let window = window.clone();
            thread::spawn(move || {
                for _ in 0..ITERATIONS / 10 {
                    assert_eq!(window.count(), 4);
                    assert_eq!(window.sum(), 4.0);
                    assert_eq!(window.weighted_mean(POSITIONAL), 1.0);
                }
            })
        })
        .collect::<Vec<_>>();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_many_producers_fill_window() {
    let window = Arc::new(SynchronizedAccumulator::new(64));

    let producers = (0..8)
        .map(|_| {
            let window = window.clone();
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let mut handle: &SynchronizedAccumulator = &window;
                    Accumulator::insert(&mut handle, 0.5);
                }
            })
        })
        .collect::<Vec<_>>();

    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(window.count(), 64);
    assert_eq!(window.sum(), 32.0);
    assert_eq!(window.mean(), 0.5);
}
