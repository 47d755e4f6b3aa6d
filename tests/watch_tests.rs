#![allow(clippy::unwrap_used, clippy::expect_used)]

use fsrouter::watch::watch_api_root;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;
use common::api_tree::ApiTree;

fn wait_for(events: &Arc<Mutex<Vec<PathBuf>>>, pred: impl Fn(&[PathBuf]) -> bool) -> bool {
    for _ in 0..40 {
        if pred(&events.lock().unwrap()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn test_watch_reports_new_handler() {
    let api = ApiTree::with_files(&["users/get.go"]);
    let events: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let watcher = watch_api_root(api.api_root(), None, move |path| {
        events_clone.lock().unwrap().push(path);
    })
    .expect("watch_api_root");

    // allow watcher thread to start
    std::thread::sleep(Duration::from_millis(100));

    api.add_file("users/[userId]/get.go");

    assert!(wait_for(&events, |evs| evs
        .iter()
        .any(|p| p.to_string_lossy().contains("userId"))));
    drop(watcher);
}

#[test]
fn test_watch_ignores_output_file() {
    let api = ApiTree::with_files(&["users/get.go"]);
    let output = api.api_root().join("routes_gen.go");
    std::fs::write(&output, "package main\n").unwrap();

    let events: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let watcher = watch_api_root(api.api_root(), Some(output.clone()), move |path| {
        events_clone.lock().unwrap().push(path);
    })
    .expect("watch_api_root");

    std::thread::sleep(Duration::from_millis(100));
    std::fs::write(&output, "package main\n\n// regenerated\n").unwrap();
    api.add_file("admin/get.go");

    assert!(wait_for(&events, |evs| evs
        .iter()
        .any(|p| p.to_string_lossy().contains("admin"))));
    let evs = events.lock().unwrap();
    assert!(!evs.iter().any(|p| p.ends_with("routes_gen.go")), "{evs:?}");
    drop(evs);
    drop(watcher);
}
