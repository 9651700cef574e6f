use crate::core::models::RecognitionOutcome;

/// Where a finished recognition goes once the pipeline is done with it.
pub trait ResultSink: Send + Sync {
    fn deliver(&self, outcome: &RecognitionOutcome);
}
