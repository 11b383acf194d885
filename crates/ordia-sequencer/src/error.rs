use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("Oversized fragment: {size} bytes (max {max})")]
    OversizedFragment { size: usize, max: usize },

    #[error("Insufficient scratch memory: need {need} bytes, have {have}")]
    InsufficientScratch { need: usize, have: usize },

    #[error("Queue error: {0}")]
    Queue(#[from] ordia_queue::QueueError),

    #[error("Core error: {0}")]
    Core(#[from] ordia_core::CoreError),
}
