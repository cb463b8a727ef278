//! Live progress line and error drain.
//!
//! One background task owns the console: it redraws a single
//! `Progress: <done>/<total>` line on stdout and drains the error channel
//! onto stderr between redraws. A newline is emitted before error text
//! whenever the progress line is mid-draw, so the line is never corrupted.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

const SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Run until every unit has exited the pipeline.
///
/// `attempted` counts units that left the pipeline whether or not they
/// produced output, so the loop always terminates and the final line reads
/// `total/total`.
pub(crate) async fn report(
    total: usize,
    attempted: Arc<AtomicUsize>,
    mut errors: UnboundedReceiver<String>,
) {
    let mut needs_newline = false;
    let mut last_drawn = None;

    loop {
        drain(&mut errors, &mut needs_newline);

        let done = attempted.load(Ordering::Acquire);
        if done >= total {
            break;
        }

        if last_drawn != Some(done) {
            print!("\rProgress: {done}/{total}");
            let _ = std::io::stdout().flush();
            needs_newline = true;
            last_drawn = Some(done);
        }

        tokio::time::sleep(SAMPLE_INTERVAL).await;
    }

    drain(&mut errors, &mut needs_newline);
    println!("\rProgress: {total}/{total}");
    let _ = std::io::stdout().flush();
}

fn drain(errors: &mut UnboundedReceiver<String>, needs_newline: &mut bool) {
    while let Ok(message) = errors.try_recv() {
        if *needs_newline {
            eprintln!();
            *needs_newline = false;
        }
        eprintln!("{message}");
    }
}
