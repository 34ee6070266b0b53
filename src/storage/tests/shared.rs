use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::*;

#[test]
fn test_gate_runs_only_on_new_data() {
    let mut dataset = test_dataset(2);
    let mut gate = UpdateGate::new("OZONE");
    let mut runs = 0;

    assert!(gate.poll(&dataset, |_| runs += 1).unwrap());
    assert_eq!(gate.last_seen(), ts(1));
    assert!(!gate.poll(&dataset, |_| runs += 1).unwrap());
    assert!(!gate.updated());

    dataset.add_data(vec![Record::new(ts(20), vec![0.0, 0.0, 0.0])]).unwrap();
    assert!(gate.poll(&dataset, |_| runs += 1).unwrap());
    assert_eq!(runs, 2);
}

#[test]
fn test_gate_ignores_empty_reference() {
    let dataset: Dataset<f64> = Dataset::new(&["ozone"]).unwrap();
    let mut gate = UpdateGate::new("ozone");
    assert!(!gate.poll(&dataset, |_| panic!("nothing to process")).unwrap());

    let mut missing = UpdateGate::new("nox");
    assert!(matches!(missing.poll(&dataset, |_| {}), Err(Error::Lookup(_))));
}

#[test]
fn test_gate_reset_reruns_setup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut gate = UpdateGate::new("ozone").with_setup(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    gate.reset();
    gate.reset();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_dataset_serializes_writers() {
    let shared = SharedDataset::new(Dataset::<f64>::new(&["ozone"]).unwrap());

    let handles: Vec<_> = (0..4u32)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..10u32 {
                    let secs = worker * 600 + i;
                    shared.add_data(vec![Record::new(ts(secs), vec![secs as f64])]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.read().len(), 40);
    let mut gate = UpdateGate::new("ozone");
    assert!(gate.poll_shared(&shared, |d| assert_eq!(d.len(), 40)).unwrap());
}
