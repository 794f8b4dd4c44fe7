//! Player commands and input sources

use std::collections::BTreeMap;

use crate::sim::Snapshot;

/// Commands the input collaborator can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flap (ignored after a crash)
    Flap,
    /// Start a new run (only honoured after a crash)
    Reset,
    /// The single-button control: flap while playing, reset after a crash
    Action,
    /// Toggle demo mode
    ToggleAutopilot,
    /// Stop the frame loop
    Quit,
}

/// Polled once per frame by the loop
pub trait InputSource {
    /// Append this frame's commands to `out`
    ///
    /// `snapshot` is the state the player last saw.
    fn poll(&mut self, snapshot: &Snapshot, out: &mut Vec<Command>);
}

/// Commands scheduled by frame number
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: BTreeMap<u64, Vec<Command>>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `command` on frame `frame` (0-based)
    pub fn at(mut self, frame: u64, command: Command) -> Self {
        self.script.entry(frame).or_default().push(command);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &Snapshot, out: &mut Vec<Command>) {
        if let Some(commands) = self.script.remove(&self.frame) {
            out.extend(commands);
        }
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_scripted_input_fires_on_schedule() {
        let snapshot = GameState::with_seed(1).snapshot();
        let mut input = ScriptedInput::new()
            .at(1, Command::Flap)
            .at(1, Command::ToggleAutopilot)
            .at(3, Command::Quit);

        let mut out = Vec::new();
        input.poll(&snapshot, &mut out);
        assert!(out.is_empty());
        input.poll(&snapshot, &mut out);
        assert_eq!(out, vec![Command::Flap, Command::ToggleAutopilot]);
        out.clear();
        input.poll(&snapshot, &mut out);
        assert!(out.is_empty());
        input.poll(&snapshot, &mut out);
        assert_eq!(out, vec![Command::Quit]);
    }
}
