//! Logical navigation actions.
//!
//! Hardware buttons on the table's bezel are opaque identifiers; the event
//! router translates them into these closed, device-independent actions.
//! Keeping the enum here (and not in the host) lets applications react to
//! navigation without depending on any hardware plumbing.

use serde::{Deserialize, Serialize};

/// A device-independent navigation input.
///
/// Serde renames use `snake_case` so the TOML binding table reads
/// naturally (`action = "move_up"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    /// Move the menu cursor up one entry.
    MoveUp,
    /// Move the menu cursor down one entry.
    MoveDown,
    /// Activate the entry under the cursor.
    Select,
    /// Leave the active application / go back.
    Back,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
