use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::{BoxedCallback, CallbackQueue};

#[test]
fn single_producer_fifo() {
    let queue = CallbackQueue::new().unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..32usize {
        let order = Arc::clone(&order);
        queue
            .push(BoxedCallback::new(move || order.lock().unwrap().push(i)))
            .unwrap();
    }

    drop(queue);
    assert_eq!(*order.lock().unwrap(), (0..32).collect::<Vec<_>>());
}

/// Interleaving across producers is arbitrary, but each producer's own
/// callbacks must run in its program order.
#[test]
fn multi_producer_preserves_program_order() {
    let queue = Arc::new(CallbackQueue::new().unwrap());
    let observed = Arc::new(Mutex::new(Vec::new()));

    let mut producers = Vec::new();
    for thread_id in 0..4usize {
        let queue = Arc::clone(&queue);
        let observed = Arc::clone(&observed);
        producers.push(thread::spawn(move || {
            for seq in 0..25usize {
                let observed = Arc::clone(&observed);
                queue
                    .push(BoxedCallback::new(move || {
                        observed.lock().unwrap().push((thread_id, seq));
                    }))
                    .unwrap();
            }
        }));
    }
    for producer in producers {
        producer.join().unwrap();
    }
    drop(queue);

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 100);
    for thread_id in 0..4usize {
        let sequence: Vec<usize> = observed
            .iter()
            .filter(|(t, _)| *t == thread_id)
            .map(|(_, seq)| *seq)
            .collect();
        assert_eq!(sequence, (0..25).collect::<Vec<_>>());
    }
}

/// Global delivery order matches the order in which pushes completed, even
/// with several producers racing: the worker must observe strictly
/// increasing tickets.
#[test]
fn delivery_follows_push_completion_order() {
    let queue = Arc::new(CallbackQueue::new().unwrap());
    let tickets = Arc::new(Mutex::new(0u64));
    let last_seen = Arc::new(AtomicU64::new(0));

    let mut producers = Vec::new();
    for _ in 0..4 {
        let queue = Arc::clone(&queue);
        let tickets = Arc::clone(&tickets);
        let last_seen = Arc::clone(&last_seen);
        producers.push(thread::spawn(move || {
            for _ in 0..25 {
                // Ticket draw and push share one guard, so ticket order is
                // exactly push-completion order.
                let mut next = tickets.lock().unwrap();
                *next += 1;
                let ticket = *next;
                let last_seen = Arc::clone(&last_seen);
                queue
                    .push(BoxedCallback::new(move || {
                        let previous = last_seen.swap(ticket, Ordering::SeqCst);
                        assert!(previous < ticket, "{previous} delivered before {ticket}");
                    }))
                    .unwrap();
            }
        }));
    }
    for producer in producers {
        producer.join().unwrap();
    }

    drop(queue);
    assert_eq!(last_seen.load(Ordering::SeqCst), 100);
}

/// Pushing K callbacks then dropping the queue invokes all K before the
/// destructor returns, even with a backlog staged behind a slow callback.
#[test]
fn drop_flushes_every_staged_callback() {
    let queue = CallbackQueue::new().unwrap();
    let ran = Arc::new(AtomicU64::new(0));

    // Gate the worker inside the first callback so the rest pile up.
    let (gate_tx, gate_rx) = mpsc::channel::<()>();
    {
        let ran = ran.clone();
        queue
            .push(BoxedCallback::new(move || {
                gate_rx.recv().unwrap();
                ran.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
    }
    for _ in 0..99 {
        let ran = ran.clone();
        queue
            .push(BoxedCallback::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
    }

    // The worker holds at most the one callback it already claimed; the
    // rest are still staged, and none of the pushes above blocked on it.
    assert!(queue.len() >= 99);

    gate_tx.send(()).unwrap();
    drop(queue);
    assert_eq!(ran.load(Ordering::SeqCst), 100);
}

/// A callback running on the worker may push again without deadlocking:
/// invocation happens outside any queue lock.
#[test]
fn callback_may_push_reentrantly() {
    let queue = Arc::new(CallbackQueue::new().unwrap());
    let ran = Arc::new(AtomicU64::new(0));
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let weak = Arc::downgrade(&queue);
    {
        let ran = ran.clone();
        queue
            .push(BoxedCallback::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                let queue = weak.upgrade().expect("queue still alive");
                let ran = ran.clone();
                let done_tx = done_tx.clone();
                queue
                    .push(BoxedCallback::new(move || {
                        ran.fetch_add(1, Ordering::SeqCst);
                        done_tx.send(()).unwrap();
                    }))
                    .unwrap();
            }))
            .unwrap();
    }

    done_rx.recv().unwrap();
    drop(queue);
    assert_eq!(ran.load(Ordering::SeqCst), 2);
}

/// A panicking callback kills the worker: later pushes report the queue as
/// closed instead of silently dropping work.
#[test]
fn push_after_worker_panic_reports_closed() {
    let queue = CallbackQueue::new().unwrap();
    queue
        .push(BoxedCallback::new(|| panic!("handler blew up")))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if queue.push(BoxedCallback::new(|| {})).is_err() {
            break;
        }
        assert!(Instant::now() < deadline, "worker did not shut down");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn starts_empty() {
    let queue = CallbackQueue::new().unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
}
