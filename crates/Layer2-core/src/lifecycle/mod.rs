//! Host lifecycle checks

mod phase_gate;

pub use phase_gate::{resolve_goals, PhaseGate, IGNORED_PHASES, REQUIRED_PHASES};
