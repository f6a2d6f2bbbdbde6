pub mod evaluate;

pub use evaluate::{EpisodeOutcome, EvaluateMode, EvaluationConfig};
