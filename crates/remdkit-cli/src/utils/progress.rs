use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use remdkit::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;
const STAGE_TEMPLATE: &str = "{spinner:.green} {msg}";
const REPLICA_TEMPLATE: &str = "{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} replicas ({elapsed})";

/// Renders core generation progress on stderr: a spinner per stage and a bar
/// while replicas are being resolved.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(style(STAGE_TEMPLATE))
            .with_message("Initializing...");
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        Box::new(move |progress: Progress| match pb.lock() {
            Ok(guard) => render(&guard, progress),
            Err(_) => warn!("Progress bar mutex was poisoned. Cannot update progress."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .expect("Progress templates are static and valid")
        .progress_chars("##-")
}

fn render(pb: &ProgressBar, progress: Progress) {
    match progress {
        Progress::StageStart { name } => {
            pb.reset();
            pb.set_length(0);
            pb.set_style(style(STAGE_TEMPLATE));
            pb.set_message(name);
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::StageFinish => {
            pb.disable_steady_tick();
            pb.finish_with_message("✓ Done");
        }
        Progress::ReplicasStart { total } => {
            pb.disable_steady_tick();
            pb.reset();
            pb.set_length(total);
            pb.set_style(style(REPLICA_TEMPLATE));
            pb.set_message("Resolving replicas");
        }
        Progress::ReplicaResolved => pb.inc(1),
        // A bar always ends full, even if some replicas reported no progress.
        Progress::ReplicasFinish => {
            if let Some(length) = pb.length() {
                pb.set_position(length);
            }
            pb.finish();
        }
        Progress::Warning(msg) => pb.suspend(|| eprintln!("  ⚠ {}", msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_stages_and_replicas() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::StageStart {
            name: "Enumerating replicas",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Enumerating replicas");
            assert!(!pb.is_finished());
        }

        callback(Progress::ReplicasStart { total: 12 });
        callback(Progress::ReplicaResolved);
        callback(Progress::ReplicaResolved);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(12));
            assert_eq!(pb.position(), 2);
        }

        callback(Progress::ReplicasFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 12);
        }

        callback(Progress::Warning("No temperature".to_string()));
        callback(Progress::StageFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "✓ Done");
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::StageStart {
                name: "Building exchange groups",
            });
            callback(Progress::StageFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }
}
