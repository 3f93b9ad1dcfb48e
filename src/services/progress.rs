//! Simulated progress reporting for long-running, non-streaming operations.
//!
//! The SVGMaker call is a single opaque request/response, so a
//! [`ProgressSession`] synthesizes what the client sees while it is
//! outstanding: one notification per phase plus a periodic "processing"
//! tick whose value creeps towards the saving step without reaching it.
//!
//! Delivery is fire-and-forget with respect to the tool call. Phase methods
//! return `Result<(), ProgressError>` so callers can log a failed
//! notification, but nothing here ever fails the underlying operation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rmcp::model::ProgressToken;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Total steps reported to the client (initial, preparing, processing, saving).
pub const TOTAL_STEPS: u32 = 4;

/// Step value at which the processing phase starts ticking.
pub const PROCESSING_STEP: u32 = 2;

/// Period between simulated processing notifications.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// A single progress notification bound for the client.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub token: ProgressToken,
    pub progress: f64,
    pub total: f64,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Failed to deliver progress notification: {0}")]
    Delivery(String),

    #[error("Progress phase {attempted:?} cannot follow {current:?}")]
    OutOfOrder { current: Phase, attempted: Phase },
}

/// Delivers progress notifications to whoever is listening.
#[async_trait]
pub trait ProgressNotifier: Send + Sync {
    async fn notify(&self, update: ProgressUpdate) -> Result<(), ProgressError>;
}

/// Lifecycle of one session. Ordering is the only legal transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    NotStarted,
    Initial,
    Preparing,
    Processing,
    Saving,
    Complete,
}

impl Phase {
    fn successor(self) -> Option<Phase> {
        match self {
            Phase::NotStarted => Some(Phase::Initial),
            Phase::Initial => Some(Phase::Preparing),
            Phase::Preparing => Some(Phase::Processing),
            Phase::Processing => Some(Phase::Saving),
            Phase::Saving => Some(Phase::Complete),
            Phase::Complete => None,
        }
    }
}

/// Human-readable message for each phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseMessages {
    pub initial: String,
    pub preparing: String,
    pub processing: String,
    pub saving: String,
    pub complete: String,
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub total_steps: u32,
    pub tick_interval: Duration,
    pub messages: PhaseMessages,
}

impl ProgressConfig {
    pub fn new(messages: PhaseMessages) -> Self {
        Self {
            total_steps: TOTAL_STEPS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            messages,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

/// Next simulated value during processing, or `None` once saturated.
///
/// Below `step + 0.9` the value grows by 0.1, below `step + 0.99` by 0.01 and
/// below `step + 0.999` by 0.001. Arithmetic is done in thousandths so the
/// result is always rounded to three decimals and never reaches `step + 1`.
pub fn next_processing_value(current: f64, step: u32) -> Option<f64> {
    let base = i64::from(step) * 1000;
    let offset = (current * 1000.0).round() as i64 - base;
    let increment = if offset < 900 {
        100
    } else if offset < 990 {
        10
    } else if offset < 999 {
        1
    } else {
        return None;
    };
    Some((base + offset + increment) as f64 / 1000.0)
}

/// Per-invocation progress state machine.
///
/// Owned exclusively by the tool call that created it. At most one processing
/// ticker runs at a time, and dropping the session aborts it.
pub struct ProgressSession {
    token: Option<ProgressToken>,
    notifier: Arc<dyn ProgressNotifier>,
    config: ProgressConfig,
    phase: Phase,
    current: Arc<Mutex<f64>>,
    ticker: Option<JoinHandle<()>>,
}

impl ProgressSession {
    /// Create a session in the `NotStarted` phase. No notifications, no timers.
    pub fn new(
        token: Option<ProgressToken>,
        notifier: Arc<dyn ProgressNotifier>,
        config: ProgressConfig,
    ) -> Self {
        match &token {
            Some(token) => tracing::debug!(?token, "Progress token received"),
            None => tracing::debug!("No progress token; progress reporting disabled"),
        }
        Self {
            token,
            notifier,
            config,
            phase: Phase::NotStarted,
            current: Arc::new(Mutex::new(0.0)),
            ticker: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last progress value set by a phase transition or processing tick.
    pub fn current_progress(&self) -> f64 {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a processing ticker is still running. False once it saturates.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|ticker| !ticker.is_finished())
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn send_initial(&mut self) -> Result<(), ProgressError> {
        self.advance(Phase::Initial)?;
        let message = self.config.messages.initial.clone();
        self.emit(0.0, message).await
    }

    pub async fn send_preparing(&mut self) -> Result<(), ProgressError> {
        self.advance(Phase::Preparing)?;
        let message = self.config.messages.preparing.clone();
        self.emit(1.0, message).await
    }

    /// Emit the processing step and, when a token is bound, start the ticker.
    ///
    /// The ticker is started even if the first notification failed to deliver.
    pub async fn start_processing(&mut self) -> Result<(), ProgressError> {
        self.advance(Phase::Processing)?;
        let message = self.config.messages.processing.clone();
        let result = self.emit(f64::from(PROCESSING_STEP), message).await;
        if let Some(token) = self.token.clone() {
            self.stop_processing().await;
            self.spawn_ticker(token);
        }
        result
    }

    /// Cancel the processing ticker. Idempotent.
    ///
    /// Waits for the ticker task to finish, so no processing notification can
    /// be delivered after this returns.
    pub async fn stop_processing(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            let _ = ticker.await;
            tracing::debug!(
                progress = self.current_progress(),
                "Processing progress ticker stopped"
            );
        }
    }

    pub async fn send_saving(&mut self) -> Result<(), ProgressError> {
        self.stop_processing().await;
        self.advance(Phase::Saving)?;
        let message = self.config.messages.saving.clone();
        self.emit(f64::from(PROCESSING_STEP + 1), message).await
    }

    pub async fn send_final(&mut self) -> Result<(), ProgressError> {
        self.stop_processing().await;
        self.advance(Phase::Complete)?;
        let message = self.config.messages.complete.clone();
        self.emit(f64::from(self.config.total_steps), message).await
    }

    /// Unconditional teardown, safe whether or not a ticker ever started.
    pub async fn cleanup(&mut self) {
        self.stop_processing().await;
    }

    fn advance(&mut self, next: Phase) -> Result<(), ProgressError> {
        if self.phase.successor() != Some(next) {
            return Err(ProgressError::OutOfOrder {
                current: self.phase,
                attempted: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    async fn emit(&self, progress: f64, message: String) -> Result<(), ProgressError> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = progress;
        let Some(token) = self.token.clone() else {
            return Ok(());
        };
        tracing::debug!(
            progress,
            total = self.config.total_steps,
            phase = ?self.phase,
            "Sending progress notification"
        );
        self.notifier
            .notify(ProgressUpdate {
                token,
                progress,
                total: f64::from(self.config.total_steps),
                message,
            })
            .await
    }

    fn spawn_ticker(&mut self, token: ProgressToken) {
        let notifier = Arc::clone(&self.notifier);
        let current = Arc::clone(&self.current);
        let period = self.config.tick_interval;
        let total = f64::from(self.config.total_steps);
        let message = self.config.messages.processing.clone();

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let progress = {
                    let mut value = current.lock().unwrap_or_else(PoisonError::into_inner);
                    match next_processing_value(*value, PROCESSING_STEP) {
                        Some(next) => {
                            *value = next;
                            next
                        }
                        None => {
                            tracing::debug!(progress = *value, "Processing progress saturated");
                            break;
                        }
                    }
                };
                tracing::debug!(progress, total, "Sending periodic progress notification");
                let update = ProgressUpdate {
                    token: token.clone(),
                    progress,
                    total,
                    message: message.clone(),
                };
                if let Err(e) = notifier.notify(update).await {
                    tracing::warn!("Error sending progress notification: {}", e);
                }
            }
        }));
    }
}

impl Drop for ProgressSession {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
