use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use multigen::channel;

#[test]
fn test_result_channel_survives_worker_handoff() {
    let (tx, rx) = channel::create::<(usize, u64)>();
    drop(tx);

    thread::scope(|s| {
        for producer in 0..8 {
            let out = channel::open(&rx);
            s.spawn(move || {
                for i in 0..250u64 {
                    out.send((producer, i)).unwrap();
                }
            });
        }
    });

    let mut per_producer: HashMap<usize, Vec<u64>> = HashMap::new();
    for (producer, i) in rx.iter() {
        per_producer.entry(producer).or_default().push(i);
    }
    assert_eq!(per_producer.len(), 8);
    for seen in per_producer.values() {
        assert_eq!(*seen, (0..250).collect::<Vec<_>>());
    }
}

#[test]
fn test_receive_for_returns_early_on_value() {
    let (tx, rx) = channel::create::<&'static str>();

    thread::scope(|s| {
        s.spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send("late").unwrap();
        });

        let started = Instant::now();
        let mut got = None;
        while got.is_none() && rx.is_open() {
            got = rx.receive_for(Duration::from_millis(5));
        }
        let got = got.or_else(|| rx.try_receive());
        assert_eq!(got, Some("late"));
        assert!(started.elapsed() < Duration::from_secs(5));
    });
}

#[test]
fn test_dropping_all_receivers_fails_sends() {
    let (tx, rx) = channel::create::<u8>();
    let rx2 = rx.clone();
    assert_eq!(tx.receiver_count(), 2);

    drop(rx);
    assert!(tx.send(1).is_ok());
    drop(rx2);

    let err = tx.send(2).unwrap_err();
    assert_eq!(err.0, 2);
    assert!(!tx.is_open());
}
