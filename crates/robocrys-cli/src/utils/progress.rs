use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Events emitted while a batch of files is described.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchProgress {
    Started { total: u64 },
    FileDone { name: String },
    FileFailed { name: String },
    Finished,
}

pub type BatchCallback = Box<dyn Fn(BatchProgress) + Send + Sync>;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    failures: Arc<Mutex<u64>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            failures: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_callback(&self) -> BatchCallback {
        let pb_clone = self.pb.clone();
        let failures = self.failures.clone();

        Box::new(move |progress: BatchProgress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                BatchProgress::Started { total } => {
                    pb_guard.reset();
                    pb_guard.set_length(total);
                    pb_guard.set_position(0);
                    pb_guard.set_message("Describing");
                }
                BatchProgress::FileDone { name } => {
                    pb_guard.set_message(name);
                    pb_guard.inc(1);
                }
                BatchProgress::FileFailed { name } => {
                    if let Ok(mut count) = failures.lock() {
                        *count += 1;
                    }
                    pb_guard.println(format!("  ✗ {}", name));
                    pb_guard.inc(1);
                }
                BatchProgress::Finished => {
                    let total = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < total {
                        pb_guard.set_position(total);
                    }
                    pb_guard.finish_with_message("✓ Done");
                }
            }
        })
    }

    pub fn failures(&self) -> u64 {
        self.failures.lock().map(|count| *count).unwrap_or(0)
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
