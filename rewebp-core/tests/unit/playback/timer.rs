use super::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn fires_after_the_delay() {
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    let _task = ScheduledTask::spawn(Duration::from_millis(10), move || {
        flag.store(true, Ordering::SeqCst);
    });
    thread::sleep(Duration::from_millis(200));
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn cancel_prevents_the_shot() {
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    let task = ScheduledTask::spawn(Duration::from_millis(50), move || {
        flag.store(true, Ordering::SeqCst);
    });
    task.cancel();
    thread::sleep(Duration::from_millis(200));
    assert!(!fired.load(Ordering::SeqCst));
}

#[test]
fn dropping_the_handle_cancels() {
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    {
        let _task = ScheduledTask::spawn(Duration::from_millis(50), move || {
            flag.store(true, Ordering::SeqCst);
        });
    }
    thread::sleep(Duration::from_millis(200));
    assert!(!fired.load(Ordering::SeqCst));
}
