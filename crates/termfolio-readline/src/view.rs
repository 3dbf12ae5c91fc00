//! Incremental transcript printing.
//!
//! The terminal is append-only, so each new transcript is diffed against
//! what is already on screen. Growth of the last line (the typing reveal)
//! and appended lines print in place; anything else needs a redraw.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Clear the screen and print everything again.
    Redraw,
    /// Write text at the cursor.
    Text(String),
    /// End the current line.
    Break,
}

#[derive(Debug, Default)]
pub struct TranscriptView {
    shown: Vec<String>,
    /// The cursor sits at the end of the last shown line.
    open: bool,
    /// The next `$ ` line is already on screen as the prompt line.
    expect_echo: bool,
}

impl TranscriptView {
    /// Forgets the screen, after a redraw has printed `lines`.
    pub fn reset(&mut self, lines: &[String]) {
        self.shown = lines.to_vec();
        self.open = !lines.is_empty();
        self.expect_echo = false;
    }

    /// Called after the prompt consumed a line of input.
    pub fn expect_echo(&mut self) {
        self.open = false;
        self.expect_echo = true;
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        self.open
    }

    /// Ends the open line before the prompt is drawn.
    pub fn close_line(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Works out how to bring the screen to `next`.
    pub fn diff(&mut self, next: &[String]) -> Vec<Op> {
        if !self.continues_into(next) {
            self.reset(next);
            return vec![Op::Redraw];
        }

        let mut ops = Vec::new();
        if let Some(last) = self.shown.len().checked_sub(1) {
            let suffix = &next[last][self.shown[last].len()..];
            if !suffix.is_empty() {
                if self.open {
                    ops.push(Op::Text(suffix.to_string()));
                } else {
                    self.reset(next);
                    return vec![Op::Redraw];
                }
            }
        }

        for line in &next[self.shown.len()..] {
            if self.expect_echo && line.starts_with("$ ") {
                self.expect_echo = false;
                continue;
            }
            if self.open {
                ops.push(Op::Break);
            }
            ops.push(Op::Text(line.clone()));
            self.open = true;
        }

        self.shown = next.to_vec();
        ops
    }

    fn continues_into(&self, next: &[String]) -> bool {
        if next.len() < self.shown.len() {
            return false;
        }
        match self.shown.split_last() {
            None => true,
            Some((last, settled)) => {
                settled.iter().zip(next).all(|(a, b)| a == b)
                    && next[settled.len()].starts_with(last.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_echo_is_skipped_and_reply_printed() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["Welcome"]));
        view.expect_echo();

        let ops = view.diff(&lines(&["Welcome", "$ help", "Available commands: ..."]));
        assert_eq!(ops, vec![Op::Text("Available commands: ...".into())]);
        assert!(view.is_open());
    }

    #[test]
    fn test_typing_line_extends_in_place() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["$ about", "Learn more about me", ""]));

        assert_eq!(
            view.diff(&lines(&["$ about", "Learn more about me", "N"])),
            vec![Op::Text("N".into())]
        );
        assert_eq!(
            view.diff(&lines(&["$ about", "Learn more about me", "Na"])),
            vec![Op::Text("a".into())]
        );
    }

    #[test]
    fn test_new_lines_break_after_open_line() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["Welcome"]));
        view.expect_echo();

        let ops = view.diff(&lines(&["Welcome", "$ about", "Learn more about me", ""]));
        assert_eq!(
            ops,
            vec![
                Op::Text("Learn more about me".into()),
                Op::Break,
                Op::Text(String::new()),
            ]
        );
    }

    #[test]
    fn test_shrinking_transcript_redraws() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["a", "b"]));
        assert_eq!(view.diff(&[]), vec![Op::Redraw]);
    }

    #[test]
    fn test_unchanged_transcript_is_a_no_op() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["a"]));
        assert!(view.diff(&lines(&["a"])).is_empty());
    }

    #[test]
    fn test_growth_after_prompt_redraws() {
        let mut view = TranscriptView::default();
        view.reset(&lines(&["Navigating"]));
        view.close_line();
        assert_eq!(view.diff(&lines(&["Navigating to"])), vec![Op::Redraw]);
    }
}
