use std::io::{self, BufRead, Write};

use quiz_core::model::{MenuStatus, QuizResult};
use services::{Confirm, FeedbackView, Notice, Presenter, QuestionView};

/// Plain-text presenter for the `status` and `reset` commands.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    lines: Vec<String>,
}

impl ConsolePresenter {
    /// Write everything rendered so far to stdout.
    pub fn flush(&mut self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in self.lines.drain(..) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl Presenter for ConsolePresenter {
    fn render_question(&mut self, view: &QuestionView) {
        self.lines.push(format!(
            "[{}] {}",
            view.progress.label(),
            view.question.prompt()
        ));
    }

    fn render_feedback(&mut self, view: &FeedbackView) {
        let verdict = if view.is_correct { "Correct!" } else { "Incorrect" };
        self.lines.push(format!(
            "{verdict} The answer is {}. {}",
            view.correct_index + 1,
            view.correct_option
        ));
    }

    fn render_final(&mut self, result: &QuizResult) {
        self.lines
            .push(format!("Score: {} / {}", result.correct(), result.total()));
    }

    fn render_menu_status(&mut self, status: &MenuStatus) {
        self.lines.push(format!(
            "Unanswered: {}  Weak: {}  Progress: {} / {} correct",
            status.unanswered, status.weak, status.solved, status.total
        ));
    }

    fn notify(&mut self, notice: Notice) {
        self.lines.push(notice.message().to_string());
    }
}

/// Asks on stderr and reads the answer from stdin. Anything but `y`/`yes` is a no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        is_yes(&line)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
