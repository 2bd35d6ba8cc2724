use chrono::Duration;

use chartquiz_core::model::QuizResult;

/// Score card for a finished (or partially finished) quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub total: usize,
    pub correct: usize,
    pub accuracy_percent: f64,
    pub total_time: Duration,
}

impl QuizSummary {
    #[must_use]
    pub fn from_results(results: &[QuizResult]) -> Self {
        let correct = results.iter().filter(|r| r.is_correct).count();
        let total_time = results
            .iter()
            .fold(Duration::zero(), |acc, r| acc + r.time_spent);
        Self {
            total: results.len(),
            correct,
            accuracy_percent: accuracy(correct, results.len()),
            total_time,
        }
    }
}

/// Accuracy and elapsed time up to and including one result.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningTotal {
    pub accuracy_percent: f64,
    pub elapsed: Duration,
}

/// Cumulative accuracy and time after each result, in order.
#[must_use]
pub fn running_totals(results: &[QuizResult]) -> Vec<RunningTotal> {
    let mut correct = 0;
    let mut elapsed = Duration::zero();
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            if result.is_correct {
                correct += 1;
            }
            elapsed += result.time_spent;
            RunningTotal {
                accuracy_percent: accuracy(correct, index + 1),
                elapsed,
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}
