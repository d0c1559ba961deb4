//! Races between threads delivering notifications and disposing.

extern crate rand;
extern crate reagent;

use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use rand::Rng;

use reagent::testing::{CountingDisposable, Recorder};
use reagent::{Disposable, Notification, Observable, Observer, ObserverRef, Sink, Subject};


fn jitter() {
    let micros = rand::thread_rng().gen_range(0..50);
    thread::sleep(Duration::from_micros(micros));
}

#[test]
fn amb_race_has_exactly_one_winner() {
    for _ in 0..200 {
        let (left, right) = (Subject::<i32>::new(), Subject::<i32>::new());
        let recorder = Recorder::<i32>::new();
        left.observable().amb(&right.observable()).subscribe(recorder.clone());
        let barrier = Arc::new(Barrier::new(2));
        let workers: Vec<_> = vec![(left.clone(), 0), (right.clone(), 10)]
            .into_iter()
            .map(|(subject, base)| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    jitter();
                    for k in 0..3 {
                        subject.on_next(base + k);
                    }
                    subject.on_completed();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        let values = recorder.values();
        assert!(values == vec![0, 1, 2] || values == vec![10, 11, 12], "{:?}", values);
        assert_eq!(recorder.terminal_count(), 1);
        assert!(recorder.is_completed());
    }
}

#[test]
fn amb_value_races_completion() {
    for _ in 0..200 {
        let left = Subject::<i32>::new();
        let slot: Arc<Mutex<Option<ObserverRef<i32>>>> = Arc::new(Mutex::new(None));
        let right_upstream = CountingDisposable::new();
        let right = {
            let (slot, right_upstream) = (slot.clone(), right_upstream.clone());
            Observable::<i32>::create(move |observer| {
                *slot.lock().unwrap() = Some(observer);
                Box::new(right_upstream.clone())
            })
        };
        let recorder = Recorder::<i32>::new();
        left.observable().amb(&right).subscribe(recorder.clone());
        let right_observer = slot.lock().unwrap().take().unwrap();
        let barrier = Arc::new(Barrier::new(2));
        let sender = {
            let (left, barrier) = (left.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                jitter();
                left.on_next(1);
            })
        };
        let completer = {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                jitter();
                right_observer.on_completed();
            })
        };
        sender.join().unwrap();
        completer.join().unwrap();
        let notifications = recorder.notifications();
        if notifications == vec![Notification::Next(1)] {
            assert!(left.has_observers());
        } else {
            assert_eq!(notifications, vec![Notification::Completed]);
            assert!(!left.has_observers());
        }
        // Released by losing the race or by completing, never twice.
        assert_eq!(right_upstream.count(), 1);
    }
}

#[test]
fn concurrent_terminals_are_forwarded_once() {
    for _ in 0..200 {
        let recorder = Recorder::<i32>::new();
        let sink = Arc::new(Sink::new(recorder.clone()));
        let barrier = Arc::new(Barrier::new(3));
        let workers: Vec<_> = (0..3)
            .map(|k| {
                let (sink, barrier) = (sink.clone(), barrier.clone());
                thread::spawn(move || {
                    barrier.wait();
                    jitter();
                    match k {
                        0 => sink.forward_on_completed(),
                        1 => sink.forward_on_error(reagent::Error::Overflow),
                        _ => sink.dispose(),
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert!(recorder.terminal_count() <= 1);
        assert!(sink.is_disposed());
    }
}

#[test]
fn dispose_races_with_values() {
    for _ in 0..100 {
        let subject = Subject::<u32>::new();
        let recorder = Recorder::<u32>::new();
        let handle = subject.observable().map(|x| x + 1).subscribe(recorder.clone());
        let barrier = Arc::new(Barrier::new(2));
        let producer = {
            let (subject, barrier) = (subject.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                for x in 0..100 {
                    subject.on_next(x);
                }
            })
        };
        barrier.wait();
        jitter();
        handle.dispose();
        producer.join().unwrap();
        let values = recorder.values();
        assert_eq!(values, (1..values.len() as u32 + 1).collect::<Vec<_>>());
        assert!(!recorder.notifications().contains(&Notification::Completed));
        assert!(!subject.has_observers());
    }
}
