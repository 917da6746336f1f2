use crate::{
    cancel::{CancellationContext, WaitOutcome},
    error::{CoreError, Result},
    metrics::CpuSource,
    sampler::Sampler,
    table::ThreadTable,
};
use std::time::Duration;

/// Where the sampling loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Sampling,
    Waiting,
    Stopped,
}

/// Why the sampling loop ended
#[derive(Debug)]
pub enum StopReason {
    /// Quit key or termination signal
    Canceled,
    /// A required source failed, or the cycle output could not be written
    Failed(CoreError),
}

/// Drives sample, render and wait cycles until canceled
pub struct Scheduler {
    cancel: CancellationContext,
    period: Duration,
    state: SchedulerState,
    cycles: u64,
}

impl Scheduler {
    pub fn new(cancel: CancellationContext, period: Duration) -> Self {
        Self {
            cancel,
            period,
            state: SchedulerState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Completed cycles so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run cycles until the context is canceled or a cycle fails.
    ///
    /// `on_cycle` is handed the refreshed table after every successful
    /// sample. A failure cancels the shared context so the other roles wind
    /// down too; no cycle is ever retried.
    pub fn run<S, F>(&mut self, sampler: &mut Sampler<S>, mut on_cycle: F) -> StopReason
    where
        S: CpuSource,
        F: FnMut(&ThreadTable) -> Result<()>,
    {
        let reason = loop {
            if self.cancel.is_canceled() {
                break StopReason::Canceled;
            }

            self.state = SchedulerState::Sampling;
            if let Err(e) = sampler.refresh().and_then(|()| on_cycle(sampler.table())) {
                log::error!("sampling stopped after {} cycles: {}", self.cycles, e);
                self.cancel.cancel();
                break StopReason::Failed(e);
            }
            self.cycles += 1;

            self.state = SchedulerState::Waiting;
            if self.cancel.wait(self.period) == WaitOutcome::Canceled {
                break StopReason::Canceled;
            }
        };

        self.state = SchedulerState::Stopped;
        reason
    }
}
