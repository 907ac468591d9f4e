//! Per-step single-flight guard.

use intake_core::session::WizardStep;
use intake_core::{IntakeError, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Allows at most one outstanding request per wizard step.
///
/// A second request for the same step is rejected with
/// [`IntakeError::Busy`] rather than queued; the first one is never
/// cancelled.
#[derive(Clone, Default)]
pub struct SingleFlight {
    in_flight: Arc<Mutex<HashSet<WizardStep>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `step` busy until the returned guard is dropped.
    pub fn begin(&self, step: WizardStep) -> Result<FlightGuard> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|e| IntakeError::internal(format!("Single-flight lock poisoned: {}", e)))?;
        if !in_flight.insert(step) {
            return Err(IntakeError::busy(step));
        }
        Ok(FlightGuard {
            step,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_busy(&self, step: WizardStep) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| in_flight.contains(&step))
            .unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct FlightGuard {
    step: WizardStep,
    in_flight: Arc<Mutex<HashSet<WizardStep>>>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.step);
        }
    }
}
