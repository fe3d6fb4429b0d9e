//! Per-call lifecycle trace.
//!
//! One [`CallTrace`] exists per call invocation, is appended to
//! synchronously at each phase boundary the transport exposes, and is
//! dropped after the completion log line. It is never shared between
//! concurrent calls.

use std::fmt;
use std::time::{Duration, Instant};

/// Phase boundaries observable at the call layer. DNS and connect timing
/// are logged separately by the resolver adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Request constructed, body serialized.
    RequestBuilt,
    /// Handed to the transport; connection acquisition begins here.
    SendStart,
    /// Response headers arrived (first response byte).
    HeadersReceived,
    /// Success body fully read.
    BodyRead,
    /// Non-success body fully drained for connection reuse.
    BodyDrained,
}

impl CallPhase {
    fn as_str(self) -> &'static str {
        match self {
            CallPhase::RequestBuilt => "request_built",
            CallPhase::SendStart => "send_start",
            CallPhase::HeadersReceived => "headers_received",
            CallPhase::BodyRead => "body_read",
            CallPhase::BodyDrained => "body_drained",
        }
    }
}

/// Ordered record of (phase, offset since call start).
pub struct CallTrace {
    started: Instant,
    phases: Vec<(CallPhase, Duration)>,
}

impl CallTrace {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            phases: Vec::with_capacity(4),
        }
    }

    pub fn record(&mut self, phase: CallPhase) {
        self.phases.push((phase, self.started.elapsed()));
    }

    pub fn phases(&self) -> impl Iterator<Item = CallPhase> + '_ {
        self.phases.iter().map(|(phase, _)| *phase)
    }
}

impl fmt::Display for CallTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (phase, offset)) in self.phases.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}=+{:.1}ms", phase.as_str(), offset.as_secs_f64() * 1000.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_keep_recording_order() {
        let mut trace = CallTrace::start();
        trace.record(CallPhase::RequestBuilt);
        trace.record(CallPhase::SendStart);
        trace.record(CallPhase::HeadersReceived);

        let phases: Vec<_> = trace.phases().collect();
        assert_eq!(
            phases,
            vec![
                CallPhase::RequestBuilt,
                CallPhase::SendStart,
                CallPhase::HeadersReceived,
            ]
        );
    }

    #[test]
    fn display_lists_each_phase_once() {
        let mut trace = CallTrace::start();
        trace.record(CallPhase::RequestBuilt);
        trace.record(CallPhase::SendStart);

        let rendered = trace.to_string();
        assert!(rendered.starts_with("request_built=+"));
        assert!(rendered.contains(" send_start=+"));
    }
}
