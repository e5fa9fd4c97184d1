use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One recorded point of the training loss curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch number.
    pub epoch: usize,
    /// Full-batch training loss at the start of this epoch.
    pub loss: f64,
    /// Wall-clock milliseconds since training started.
    pub elapsed_ms: u64,
}

/// Writes the recorded loss history as a pretty-printed JSON array.
pub fn save_loss_history(path: &Path, history: &[EpochStats]) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, history)?;
    Ok(())
}
