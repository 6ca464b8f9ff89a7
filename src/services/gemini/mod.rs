pub mod client;
pub mod retry;
pub mod schema;

pub use client::{GeminiClient, PlanError, MODEL_PRIORITY};
pub use retry::{FailureKind, FallbackSequencer, NextStep, RetryPolicy};
