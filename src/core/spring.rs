//! Spring animation collaborator.
//!
//! The engine never integrates physics itself.  It asks a [`SpringDriver`]
//! to run from one offset to another and is fed [`SpringFrame`]s back, each
//! tagged with the [`SpringRun`] it belongs to.  Cancelling a run is a single
//! call; frames that arrive for any run other than the active one are
//! dropped by the engine.
//!
//! [`PhysicsSpring`] is the stock driver: a damped harmonic oscillator
//! stepped at a fixed 60 Hz, pumped by the host once per animation frame.

use std::time::Duration;

/// Identifies one spring run.  Runs are numbered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpringRun(pub u64);

/// One animation frame of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringFrame {
    pub run: SpringRun,
    /// Live animated offset.
    pub value: f64,
    /// The integrator has converged; `value` equals the target.
    pub at_rest: bool,
}

/// Black-box spring service driven by the engine.
pub trait SpringDriver {
    /// Begin animating from `from` toward `to`.  Replaces any run in flight.
    fn start(&mut self, run: SpringRun, from: f64, to: f64);

    /// Stop `run`; no further frames for it may be delivered.
    fn cancel(&mut self, run: SpringRun);
}

// ───────────────────────────────────────── physics ───────────

/// Integrator step: 60 frames per second.
const STEP_SECS: f64 = 1.0 / 60.0;

/// Upper bound on simulated time per `advance`, so a stalled host does not
/// burn through thousands of steps in one frame.
const MAX_CATCH_UP_SECS: f64 = 0.25;

/// Spring constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Both the displacement from target and the velocity must fall below
    /// this for the spring to report rest.
    pub precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            precision: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    run: SpringRun,
    value: f64,
    velocity: f64,
    target: f64,
}

/// Damped harmonic oscillator driver.
#[derive(Debug, Clone)]
pub struct PhysicsSpring {
    config: SpringConfig,
    motion: Option<Motion>,
    /// Unsimulated time carried between frames.
    pending: f64,
}

impl PhysicsSpring {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            motion: None,
            pending: 0.0,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// `true` while a run is in flight.
    pub fn is_running(&self) -> bool {
        self.motion.is_some()
    }

    /// Simulate `elapsed` wall time and report the resulting frame.
    ///
    /// Returns `None` when no run is in flight.  The frame that reports rest
    /// ends the run.
    pub fn advance(&mut self, elapsed: Duration) -> Option<SpringFrame> {
        let mut motion = self.motion?;

        self.pending = (self.pending + elapsed.as_secs_f64()).min(MAX_CATCH_UP_SECS);
        let mut at_rest = false;
        while self.pending >= STEP_SECS {
            self.pending -= STEP_SECS;
            at_rest = step(&self.config, &mut motion);
            if at_rest {
                break;
            }
        }

        let frame = SpringFrame {
            run: motion.run,
            value: motion.value,
            at_rest,
        };
        if at_rest {
            self.motion = None;
            self.pending = 0.0;
            tracing::trace!(run = motion.run.0, value = motion.value, "spring at rest");
        } else {
            self.motion = Some(motion);
        }
        Some(frame)
    }
}

impl Default for PhysicsSpring {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

impl SpringDriver for PhysicsSpring {
    fn start(&mut self, run: SpringRun, from: f64, to: f64) {
        tracing::trace!(run = run.0, from, to, "spring start");
        self.motion = Some(Motion {
            run,
            value: from,
            velocity: 0.0,
            target: to,
        });
        self.pending = 0.0;
    }

    fn cancel(&mut self, run: SpringRun) {
        if self.motion.is_some_and(|m| m.run == run) {
            tracing::trace!(run = run.0, "spring cancelled");
            self.motion = None;
            self.pending = 0.0;
        }
    }
}

/// One semi-implicit Euler step.  Returns `true` (and snaps to target) once
/// the motion has converged.
fn step(config: &SpringConfig, m: &mut Motion) -> bool {
    let force = -config.stiffness * (m.value - m.target);
    let damper = -config.damping * m.velocity;
    let velocity = m.velocity + (force + damper) * STEP_SECS;
    let value = m.value + velocity * STEP_SECS;

    if velocity.abs() < config.precision && (value - m.target).abs() < config.precision {
        m.value = m.target;
        m.velocity = 0.0;
        return true;
    }
    m.value = value;
    m.velocity = velocity;
    false
}
