//! Run-scoped state handed from initialization to deinitialization.
//!
//! [`ProcessState`] is owned by the [`Runtime`](crate::lifecycle::Runtime)
//! and passed explicitly to the phases that need it; nothing here is global.
use std::collections::HashMap;

/// Keys understood by [`ProcessState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Outcome of hook-manager initialization.
    Hooks,
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hooks => f.write_str("HOOKS"),
        }
    }
}

/// Outcome of the initialization phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookSetup {
    /// `true` when the hooks directory already existed and the hook-manager
    /// init command was not run.
    pub skip: bool,
}

impl HookSetup {
    /// The hooks directory pre-existed; nothing was freshly initialized.
    pub const SKIPPED: Self = Self { skip: true };
    /// The hook-manager init command ran in this invocation.
    pub const FRESH: Self = Self { skip: false };
}

/// Key/value store living for exactly one run.
///
/// Empty at start, populated after initialization, read once by
/// deinitialization and cleared at the end of the run.
#[derive(Debug, Default)]
pub struct ProcessState {
    entries: HashMap<StateKey, HookSetup>,
}

impl ProcessState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: StateKey, value: HookSetup) {
        self.entries.insert(key, value);
    }

    /// Return the last value written under `key`.
    #[must_use]
    pub fn get(&self, key: StateKey) -> Option<HookSetup> {
        self.entries.get(&key).copied()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` when nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = ProcessState::new();
        assert!(state.is_empty());
        assert_eq!(state.get(StateKey::Hooks), None);
    }

    #[test]
    fn reads_last_written_value() {
        let mut state = ProcessState::new();
        state.set(StateKey::Hooks, HookSetup::FRESH);
        state.set(StateKey::Hooks, HookSetup::SKIPPED);
        assert_eq!(state.get(StateKey::Hooks), Some(HookSetup { skip: true }));
    }

    #[test]
    fn clear_removes_everything() {
        let mut state = ProcessState::new();
        state.set(StateKey::Hooks, HookSetup::FRESH);
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn key_displays_as_hooks() {
        assert_eq!(StateKey::Hooks.to_string(), "HOOKS");
    }
}
