use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::path::{Path, PathBuf};

use crate::quiz::definition::{DataSource, Shape};

const LOCAL_DATA_DIR: &str = "data";
const APPLICATION_DIR: &str = "diagnostic-quiz";

pub const DEFAULT_NO_MATCH_MESSAGE: &str = "We could not find any support that fits your answers.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Spreadsheet,
    Json,
}

impl Format {
    fn extension(&self) -> &'static str {
        match self {
            Format::Spreadsheet => "csv",
            Format::Json => "json",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub format: Format,
    pub data_dir: Option<PathBuf>,
    pub questions: Option<PathBuf>,
    pub recommendations: Option<PathBuf>,
    pub question_shape: Shape,
    pub rule_shape: Shape,
    pub no_match_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format: Format::Json,
            data_dir: None,
            questions: None,
            recommendations: None,
            question_shape: Shape::Rows,
            rule_shape: Shape::Rows,
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_owned(),
        }
    }
}

fn get_default_data_dir() -> Result<PathBuf> {
    let local = Path::new(LOCAL_DATA_DIR);
    if local.is_dir() {
        return Ok(local.to_path_buf());
    }
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push(APPLICATION_DIR);
    Ok(dir)
}

impl Settings {
    pub fn data_source(&self) -> Result<DataSource> {
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => get_default_data_dir()?,
        };
        let extension = self.format.extension();
        let questions = self
            .questions
            .clone()
            .unwrap_or_else(|| data_dir.join(format!("questions.{}", extension)));
        let recommendations = self
            .recommendations
            .clone()
            .unwrap_or_else(|| data_dir.join(format!("recommendations.{}", extension)));

        Ok(match self.format {
            Format::Spreadsheet => DataSource::Spreadsheet {
                questions,
                recommendations,
            },
            Format::Json => DataSource::Json {
                questions,
                recommendations,
                question_shape: self.question_shape,
                rule_shape: self.rule_shape,
            },
        })
    }
}
