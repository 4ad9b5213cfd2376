use itertools::Itertools;

use crate::output::{Message, QuizOutput};

const PROGRESS_BAR_WIDTH: usize = 30;

#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }

    fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            Welcome => "Answer a few questions to find the support that suits you.\nPress Enter to start, or type `q` to quit.".into(),
            QuestionBegins(question) => {
                let options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| format!("  {}) {}", index + 1, option.label))
                    .join("\n");
                format!("\n{}\n{}", question.text, options)
            }
            Progress(percent) => {
                let filled = ((percent / 100.0) * PROGRESS_BAR_WIDTH as f32).round() as usize;
                let filled = filled.min(PROGRESS_BAR_WIDTH);
                format!(
                    "[{}{}] {:>3.0}%",
                    "#".repeat(filled),
                    "-".repeat(PROGRESS_BAR_WIDTH - filled),
                    percent
                )
            }
            SelectionRequired => "Please choose one of the options (number or label).".into(),
            Recommendation(text) => format!("\n{}\n\nPress Enter to start over, or type `q` to quit.", text),
            NoMatch(fallback) => format!("\n{}\n\nPress Enter to start over, or type `q` to quit.", fallback),
            LoadFailed(reason) => format!("Could not load the quiz data. Please check the data files.\n({})", reason),
        }
    }
}

impl QuizOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        match message {
            Message::LoadFailed(_) => eprintln!("{}", self.interpret_message(message)),
            _ => println!("{}", self.interpret_message(message)),
        }
    }
}
