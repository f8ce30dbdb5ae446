//! Concurrency Tests
//!
//! Tests verify:
//! - Concurrent readers see consistent, sorted snapshots
//! - Concurrent writers do not lose updates
//! - Filters racing with writers leave a valid state

use std::sync::Arc;
use std::thread;

use envstore::Environ;

#[test]
fn test_concurrent_readers() {
    let env = Environ::new((0..100).map(|i| format!("KEY_{i:03}=value_{i}")));

    crossbeam::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|_| {
                for _ in 0..100 {
                    let slice = env.as_slice();
                    assert_eq!(slice.len(), 100);
                    assert!(slice.windows(2).all(|w| w[0] < w[1]));
                    assert_eq!(env.get("KEY_042"), "value_42");
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_concurrent_writers() {
    let env: Arc<Environ> = Arc::new(Environ::default());
    let mut handles = vec![];

    for t in 0..8 {
        let env = Arc::clone(&env);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                env.set(format!("T{t}_{i}"), i.to_string());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(env.len(), 8 * 50);
    assert_eq!(env.get("T3_7"), "7");
}

#[test]
fn test_filters_racing_with_writers() {
    let env = Environ::new((0..50).map(|i| format!("KEEP_{i}=x")));

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..50 {
                env.set(format!("OTHER_{i}"), "y");
            }
        });
        s.spawn(|_| {
            for _ in 0..20 {
                env.keep(&["KEEP_.*", "OTHER_.*"]).unwrap();
                env.drop(&["NOPE"]).unwrap();
            }
        });
    })
    .unwrap();

    // Every surviving key came from one of the two writers
    assert!(env
        .keys()
        .iter()
        .all(|k| k.starts_with("KEEP_") || k.starts_with("OTHER_")));
    assert_eq!(env.keys().iter().filter(|k| k.starts_with("KEEP_")).count(), 50);
}
