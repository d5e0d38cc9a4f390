//! Human-readable duel log.

/// Lines kept when a log is folded into a report summary.
pub const SUMMARY_LINES: usize = 12;

#[derive(Debug, Clone, Default)]
pub struct DuelLog {
    lines: Vec<String>,
}

impl DuelLog {
    pub fn new() -> DuelLog {
        DuelLog::default()
    }

    /// Records a charged throw for one side ("A" or "B").
    pub fn throw(&mut self, side: &str, move_id: &str, shielded: bool) {
        let line = if shielded {
            format!("{side} throws {move_id} (shielded)")
        } else {
            format!("{side} throws {move_id}")
        };
        self.lines.push(line);
    }

    pub fn note(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the log, keeping at most [`SUMMARY_LINES`] lines.
    pub fn into_summary(self) -> Vec<String> {
        let mut lines = self.lines;
        lines.truncate(SUMMARY_LINES);
        lines
    }
}
