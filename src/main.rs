use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use crate::output::terminal::TerminalOutput;
use crate::output::{Message, QuizOutput};
use crate::quiz::definition::{QuizDefinition, Shape};
use crate::quiz::{Phase, Session};
use crate::settings::{Format, Settings, DEFAULT_NO_MATCH_MESSAGE};

mod output;
mod quiz;
mod settings;

const QUIT_COMMAND: &str = "q";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeArg {
    Rows,
    Grouped,
}

impl From<ShapeArg> for Shape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Rows => Shape::Rows,
            ShapeArg::Grouped => Shape::Grouped,
        }
    }
}

/// Walks through a diagnostic questionnaire and recommends the first
/// support whose conditions match your answers.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Where the question and recommendation data comes from
    #[arg(long, value_enum, default_value = "json")]
    format: FormatArg,

    /// Directory holding questions.<ext> and recommendations.<ext>
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to the question data, overriding the data directory
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Path to the recommendation data, overriding the data directory
    #[arg(long)]
    recommendations: Option<PathBuf>,

    /// Layout of the JSON question file
    #[arg(long, value_enum, default_value = "rows")]
    question_shape: ShapeArg,

    /// Layout of the JSON recommendation file
    #[arg(long, value_enum, default_value = "rows")]
    rule_shape: ShapeArg,

    /// Text shown when no recommendation matches
    #[arg(long, default_value = DEFAULT_NO_MATCH_MESSAGE)]
    no_match_message: String,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            format: match args.format {
                FormatArg::Csv => Format::Spreadsheet,
                FormatArg::Json => Format::Json,
            },
            data_dir: args.data_dir,
            questions: args.questions,
            recommendations: args.recommendations,
            question_shape: args.question_shape.into(),
            rule_shape: args.rule_shape.into(),
            no_match_message: args.no_match_message,
        }
    }
}

fn load(settings: &Settings) -> Result<QuizDefinition> {
    let source = settings.data_source()?;
    QuizDefinition::open(&source)
}

/// `q` quits unless it names an option of the question being asked.
fn wants_to_quit<O: QuizOutput>(session: &Session<O>, input: &str) -> bool {
    input.eq_ignore_ascii_case(QUIT_COMMAND)
        && session
            .current_question()
            .and_then(|question| question.find_option(input))
            .is_none()
}

fn run<O: QuizOutput>(session: &mut Session<O>) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if wants_to_quit(session, input) {
            break;
        }
        if session.is_over() {
            session.restart();
            session.start()?;
        } else if *session.get_phase() == Phase::Startup {
            session.start()?;
        } else {
            session.select(input)?;
            if session.is_over() {
                log::info!("Quiz finished with answers {}", session.get_answers());
            }
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();

    let settings: Settings = Args::parse().into();
    let output = TerminalOutput::new();

    let definition = match load(&settings) {
        Ok(definition) => definition,
        Err(e) => {
            log::error!("Could not load quiz data: {:#}", e);
            output.say(&Message::LoadFailed(format!("{:#}", e)));
            process::exit(1);
        }
    };

    let mut session = Session::new(Arc::new(definition), &settings.no_match_message, output);
    if let Err(e) = run(&mut session) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}
