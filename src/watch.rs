//! `--watch` mode: re-evaluate a file of expressions on every change.
//!
//! The file is evaluated top to bottom against a fresh context per run,
//! one expression per line; blank lines and `#` comments are skipped.
//! The parent directory is watched rather than the file itself so that
//! editors which save by rename-and-replace keep triggering.

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{EventKind, RecursiveMode, Watcher};

use bmath::output::DisplayOptions;
use bmath::parser::parse::Context;

const DEBOUNCE: Duration = Duration::from_millis(300);

pub fn run(path: &Path, options: &DisplayOptions) -> io::Result<()> {
    if !path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("'{}' is not a file", path.display()),
        ));
    }
    let watch_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    evaluate_file(path, options)?;
    eprintln!("\nWatching {} for changes...", path.display());

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })
    .map_err(io::Error::other)?;
    watcher
        .watch(watch_dir, RecursiveMode::NonRecursive)
        .map_err(io::Error::other)?;

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        if !is_relevant(&event, &canonical) {
            continue;
        }

        // trailing-edge debounce: wait until the burst of events an
        // editor emits on save has settled
        let mut last_event = Instant::now();
        loop {
            match rx.recv_timeout(DEBOUNCE) {
                Ok(event) if is_relevant(&event, &canonical) => last_event = Instant::now(),
                _ => {
                    if last_event.elapsed() >= DEBOUNCE {
                        break;
                    }
                }
            }
        }

        eprintln!("\nChanged: {}", path.display());
        evaluate_file(path, options)?;
        eprintln!("\nWatching {} for changes...", path.display());
    }

    Ok(())
}

fn is_relevant(event: &notify::Event, target: &Path) -> bool {
    match event.kind {
        EventKind::Modify(notify::event::ModifyKind::Data(_))
        | EventKind::Modify(notify::event::ModifyKind::Name(_))
        | EventKind::Create(_) => {}
        _ => return false,
    }

    let name = target.file_name();
    event
        .paths
        .iter()
        .any(|path| path == target || (name.is_some() && path.file_name() == name))
}

fn evaluate_file(path: &Path, options: &DisplayOptions) -> io::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut ctx = Context::new(crate::MAX_EXPR_LEN);
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if crate::evaluate(&mut ctx, line, options, true) {
            println!();
        }
    }
    Ok(())
}
