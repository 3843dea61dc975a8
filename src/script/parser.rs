//! Line splitting for raw script text.

/// An ordered sequence of trimmed, non-blank script lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split raw text into trimmed lines, dropping blank ones.
///
/// Handles `\n`, `\r\n`, and lone `\r` line endings. Never fails; empty
/// input gives an empty [`Script`].
pub fn parse_script(raw: &str) -> Script {
    let lines = raw
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Script { lines }
}
