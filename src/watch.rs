//! # Watch Module
//!
//! Regenerates the routes file while a developer adds, renames or removes
//! handler files.
//!
//! [`watch_api_root`] installs a recursive filesystem watcher on the API
//! directory and forwards every relevant event to a callback. The CLI feeds
//! those events into a channel, waits for the burst an editor save produces
//! to settle, then runs one generation.
//!
//! ```rust,ignore
//! use fsrouter::watch::watch_api_root;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let _watcher = watch_api_root("api", Some("routes_gen.go".into()), move |path| {
//!     let _ = tx.send(path);
//! })?;
//! for changed in rx {
//!     println!("changed: {}", changed.display());
//! }
//! ```
//!
//! A failed regeneration is reported and the previous routes file stays in
//! place; the watcher keeps running.

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Watch `api_root` recursively and call `on_change` with the first path of
/// every create, modify or remove event.
///
/// Events touching `ignore` (normally the generated file, which may live
/// inside the API directory) are dropped so a write does not retrigger itself.
/// The watcher stops when the returned value is dropped.
pub fn watch_api_root<P, F>(
    api_root: P,
    ignore: Option<PathBuf>,
    mut on_change: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(PathBuf) + Send + 'static,
{
    let root = api_root.as_ref().to_path_buf();
    let ignore = ignore.map(|p| absolute(&p));

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !is_relevant(&event.kind) {
                    return;
                }
                let Some(path) = event
                    .paths
                    .into_iter()
                    .find(|p| ignore.as_deref() != Some(absolute(p).as_path()))
                else {
                    return;
                };
                debug!(path = %path.display(), kind = ?event.kind, "api tree changed");
                on_change(path);
            }
            Err(e) => warn!(error = %e, "watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
