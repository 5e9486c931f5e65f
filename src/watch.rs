use notify::{recommended_watcher, Event, EventKind, RecursiveMode, Watcher};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::build::{is_markdown, perform_build};
use crate::config::BuildOptions;
use crate::error::Result;

/// How long to wait after a change for the rest of a burst to arrive.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Returns the first Markdown path touched by `event`, if the event is a
/// content change worth rebuilding for.
pub fn markdown_change(event: &Event) -> Option<&Path> {
    let relevant = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    if !relevant {
        return None;
    }
    event.paths.iter().map(|p| p.as_path()).find(|p| is_markdown(p))
}

/// Drains everything already queued, returning how many events were dropped.
fn drain<T>(rx: &mut UnboundedReceiver<T>) -> usize {
    let mut dropped = 0;
    while rx.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

/// Runs `rebuild` once per burst of Markdown changes.
///
/// Rebuilds are awaited inline, so two never run at the same time. Changes
/// that land while one is running queue up and collapse into a single
/// follow-up rebuild. Returns the number of rebuilds once the channel closes.
async fn rebuild_loop<F, Fut>(
    mut rx: UnboundedReceiver<notify::Result<Event>>,
    mut rebuild: F,
) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut rebuilds = 0;
    while let Some(res) = rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {e}");
                continue;
            }
        };
        let Some(changed) = markdown_change(&event) else {
            log::debug!("Ignoring {:?} on {:?}", event.kind, event.paths);
            continue;
        };

        log::info!("File changed: {}", changed.display());
        tokio::time::sleep(DEBOUNCE).await;
        let coalesced = drain(&mut rx);
        if coalesced > 0 {
            log::debug!("Coalesced {coalesced} further events into this rebuild");
        }

        log::info!("Rebuilding...");
        rebuild().await;
        rebuilds += 1;
    }
    rebuilds
}

/// Watches the input tree and rebuilds the whole site on every Markdown
/// change. Only returns if the watcher stops delivering events.
pub async fn watch(opts: &BuildOptions) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
        // the receiver only goes away when the loop below has ended
        let _ = tx.send(res);
    })?;
    watcher.watch(&opts.input_dir, RecursiveMode::Recursive)?;

    log::info!(
        "Watching {} for changes... Press Ctrl+C to stop",
        opts.input_dir.display()
    );

    let rebuild_opts = BuildOptions {
        watch: false,
        ..opts.clone()
    };
    let rebuild_opts = &rebuild_opts;
    rebuild_loop(rx, move || async move {
        if let Err(e) = perform_build(rebuild_opts).await {
            log::error!("Rebuild failed: {}", e.detailed());
        }
    })
    .await;

    Ok(())
}
