//! Worker Pool Demo

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thread_pool::Pool;

fn main() {
    println!("=== Worker Pool Demo ===\n");

    let pool = Pool::new(4).expect("worker count is non-zero");
    let counter = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for i in 0..8 {
        let counter = Arc::clone(&counter);
        handles.push(pool.submit(move || {
            std::thread::sleep(Duration::from_millis(10));
            counter.fetch_add(1, Ordering::SeqCst);
            i * i
        }).expect("pool accepts work before shutdown"));
    }

    let squares: Vec<usize> = handles.into_iter().map(|h| h.join().expect("task did not panic")).collect();

    println!("workers: {}", pool.worker_count());
    println!("jobs completed: {}", counter.load(Ordering::SeqCst));
    println!("squares: {squares:?}");

    // A panicking task's payload is resumed (re-raised), not returned as
    // `Err` -- `join()` only returns `Err` for cancellation. Catch it here
    // just to demonstrate the propagation without crashing the demo.
    let panicking = pool.submit(|| -> () { panic!("demo panic") }).expect("pool accepts work");
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| panicking.join())) {
        Ok(_) => println!("unexpected: panic did not propagate"),
        Err(_) => println!("panicking task's panic was resumed on join, as expected"),
    }

    pool.shutdown();
    println!("\n=== Demo Complete! ===");
}
