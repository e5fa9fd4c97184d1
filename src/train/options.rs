use std::path::PathBuf;

/// Verbosity and export knobs for a `Network::train` run.
///
/// - `time_execution` — log the total wall-clock training duration
/// - `print_loss` / `print_every` — log the loss every N epochs
/// - `export_loss` / `export_every` / `export_path` — record the loss every
///   N epochs and write the history as pretty JSON when training finishes
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub time_execution: bool,
    pub print_loss: bool,
    pub print_every: usize,
    pub export_loss: bool,
    pub export_every: usize,
    pub export_path: Option<PathBuf>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            time_execution: false,
            print_loss: false,
            print_every: 100,
            export_loss: false,
            export_every: 1,
            export_path: None,
        }
    }
}

impl TrainOptions {
    /// Quiet run: no logging, no export.
    pub fn silent() -> Self {
        TrainOptions::default()
    }

    /// Logs the loss every `every` epochs plus the total duration.
    pub fn verbose(every: usize) -> Self {
        TrainOptions {
            time_execution: true,
            print_loss: true,
            print_every: every,
            ..TrainOptions::default()
        }
    }
}
