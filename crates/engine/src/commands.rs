//! Control Commands
//!
//! Discrete control inputs from a driver (UI, runner, script). They take
//! `&mut SimulationSession`, so they can only run between ticks.

use jungle_core::AgentKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Pause,
    Resume,
    TogglePause,
    /// Restore the initial market and forget everything learned
    Reset,
    /// Enable or disable one agent
    ToggleAgent { kind: AgentKind },
    /// Replace an agent's profile with a registered one
    SwitchProfile { kind: AgentKind, name: String },
    /// Change the slingshot an agent fires with
    SelectSlingshot { kind: AgentKind, name: String },
}
