// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Sequence Identifier
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two self-referential sequences a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sequence {
    /// Hofstadter's a(n) = a(a(n-1)) + a(n - a(n-1)).
    A,
    /// Hofstadter–Conway Q(n) = Q(n - Q(n-1)) + Q(n - Q(n-2)).
    Q,
}

impl Sequence {
    pub const ALL: [Sequence; 2] = [Sequence::A, Sequence::Q];

    pub fn name(self) -> &'static str {
        match self {
            Sequence::A => "a",
            Sequence::Q => "Q",
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
