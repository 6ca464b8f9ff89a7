//! Retry/fallback sequencing for the model priority list.
//!
//! The sequencer owns the (model index, attempt index) pair and nothing
//! else; the client feeds it classified failures and obeys the step it
//! hands back. Ordering and termination are decided entirely here.

use std::time::Duration;

/// Classification of a failed generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 503-class: the service expects to recover, the same model is worth
    /// retrying after a wait.
    Transient,
    /// 429-class or a quota message: retrying the same model cannot help.
    Quota,
    /// Everything else (rejected request, malformed response, transport).
    Other,
}

/// What the caller must do after reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Wait out the delay, then re-attempt the current model.
    RetryAfter(Duration),
    /// Move on to the model at this index in the priority list.
    AdvanceModel(usize),
    /// Every model has been exhausted.
    GiveUp,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per model, the first one included.
    pub max_attempts_per_model: u32,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts_per_model: 3,
            backoff_base: Duration::from_secs(1),
            backoff_cap: Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
pub struct FallbackSequencer {
    model_count: usize,
    policy: RetryPolicy,
    model_index: usize,
    /// Attempts begun against the current model.
    attempt: u32,
}

impl FallbackSequencer {
    pub fn new(model_count: usize, policy: RetryPolicy) -> Self {
        Self {
            model_count,
            policy,
            model_index: 0,
            attempt: 0,
        }
    }

    pub fn current_model(&self) -> usize {
        self.model_index
    }

    /// 1-based attempt number for the current model, for logs.
    pub fn attempt_number(&self) -> u32 {
        self.attempt
    }

    /// Record that an attempt against the current model is starting.
    pub fn begin_attempt(&mut self) {
        self.attempt += 1;
    }

    /// Decide what follows the failure of the attempt begun last. A quota
    /// failure never burns remaining retries; only transient failures do.
    pub fn after_failure(&mut self, kind: FailureKind) -> NextStep {
        match kind {
            FailureKind::Transient if self.attempt < self.policy.max_attempts_per_model => {
                NextStep::RetryAfter(self.backoff_delay())
            }
            _ => self.advance_model(),
        }
    }

    /// Delay before retry N doubles from the base: 1s, 2s, 4s, ... capped.
    fn backoff_delay(&self) -> Duration {
        let exponent = self.attempt.saturating_sub(1).min(31);
        let delay = self.policy.backoff_base * 2u32.pow(exponent);
        delay.min(self.policy.backoff_cap)
    }

    fn advance_model(&mut self) -> NextStep {
        self.model_index += 1;
        self.attempt = 0;
        if self.model_index >= self.model_count {
            NextStep::GiveUp
        } else {
            NextStep::AdvanceModel(self.model_index)
        }
    }
}
