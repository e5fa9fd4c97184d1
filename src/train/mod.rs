pub mod epoch_stats;
pub mod options;

pub use epoch_stats::{save_loss_history, EpochStats};
pub use options::TrainOptions;
