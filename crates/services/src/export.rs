//! Offline exports: per-question result rows as CSV and quiz sets as JSON.

use std::io::Write;

use chrono::{Duration, NaiveDate};

use chartquiz_core::model::{Dataset, QuizResult, QuizSet};

use crate::error::ExportError;
use crate::sessions::running_totals;

/// Name written for results recorded without a user name.
pub const ANONYMOUS_USER: &str = "anonymous";

const HEADER: [&str; 11] = [
    "user",
    "question",
    "chart",
    "question_text",
    "data",
    "user_answer",
    "correct_answer",
    "verdict",
    "time_seconds",
    "cumulative_accuracy",
    "cumulative_time_seconds",
];

/// Write one CSV row per result, with running accuracy and time columns.
///
/// # Errors
///
/// Returns `ExportError` if writing to `out` fails.
pub fn write_results_csv<W: Write>(results: &[QuizResult], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for (result, running) in results.iter().zip(running_totals(results)) {
        let user = if result.user_name.is_empty() {
            ANONYMOUS_USER
        } else {
            result.user_name.as_str()
        };
        writer.write_record([
            user.to_string(),
            result.question_number.to_string(),
            result.chart.to_string(),
            result.question_text.clone(),
            data_details(&result.dataset),
            result.user_answer.clone(),
            result.correct_answer.clone(),
            verdict(result.is_correct).to_string(),
            format!("{:.2}", seconds(result.time_spent)),
            format!("{:.1}%", running.accuracy_percent),
            format!("{:.1}", seconds(running.elapsed)),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Results rendered as a CSV document.
///
/// # Errors
///
/// See [`write_results_csv`].
pub fn results_csv(results: &[QuizResult]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_results_csv(results, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Suggested download name, e.g. `quiz-results-kim-2024-05-01.csv`.
#[must_use]
pub fn export_file_name(user_name: &str, date: NaiveDate) -> String {
    let user = user_name.trim();
    let user = if user.is_empty() { ANONYMOUS_USER } else { user };
    format!("quiz-results-{user}-{}.csv", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON snapshot of a quiz set.
///
/// # Errors
///
/// Returns `ExportError::Json` if serialization fails.
pub fn quiz_set_json(quiz: &QuizSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(quiz)?)
}

/// Reads a quiz set back from its JSON snapshot. Every question is checked
/// against its dataset the same way it was when composed.
///
/// # Errors
///
/// Returns `ExportError::Json` for malformed JSON, invalid datasets or
/// questions that disagree with their dataset.
pub fn read_quiz_set_json(raw: &str) -> Result<QuizSet, ExportError> {
    Ok(serde_json::from_str(raw)?)
}

fn data_details(dataset: &Dataset) -> String {
    dataset
        .categories()
        .iter()
        .map(|c| format!("{}:{}%", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn verdict(is_correct: bool) -> &'static str {
    if is_correct { "correct" } else { "incorrect" }
}

#[allow(clippy::cast_precision_loss)]
fn seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}
