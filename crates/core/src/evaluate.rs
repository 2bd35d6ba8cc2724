use thiserror::Error;

use crate::model::{Question, QuestionKind};

/// Accepted distance, in percentage points, between an estimate and the truth.
pub const PERCENTAGE_TOLERANCE: f64 = 5.0;

/// Scores a submitted answer against a question's ground truth.
///
/// Percentage questions accept any estimate within
/// [`PERCENTAGE_TOLERANCE`] points; input that does not parse as a number is
/// simply wrong. Rank questions require the exact option string.
#[must_use]
pub fn evaluate(question: &Question, submitted: &str) -> bool {
    match question.kind() {
        QuestionKind::Percentage => {
            let (Some(answer), Some(truth)) = (
                parse_percentage(submitted),
                parse_percentage(question.correct_answer()),
            ) else {
                return false;
            };
            (answer - truth).abs() <= PERCENTAGE_TOLERANCE
        }
        QuestionKind::Rank => submitted == question.correct_answer(),
    }
}

/// Parses `"40"`, `"40%"` or `" 40.5 % "` into a finite number.
#[must_use]
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

//
// ─── INPUT VALIDATION ──────────────────────────────────────────────────────────
//

/// Problems with free-text percentage input, reported while the user types.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnswerInputError {
    #[error("enter a percentage")]
    Empty,

    #[error("enter a number")]
    NotANumber,

    #[error("enter a number between 0 and 100, got {0}")]
    OutOfRange(f64),
}

/// Validates a percentage field before it is submitted.
///
/// # Errors
///
/// Returns `AnswerInputError` for empty, non-numeric or out-of-range input.
pub fn validate_percentage_input(raw: &str) -> Result<f64, AnswerInputError> {
    if raw.trim().is_empty() {
        return Err(AnswerInputError::Empty);
    }
    let value = parse_percentage(raw).ok_or(AnswerInputError::NotANumber)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(AnswerInputError::OutOfRange(value));
    }
    Ok(value)
}

/// Canonical submission string for a percentage estimate.
#[must_use]
pub fn format_percentage_answer(value: f64) -> String {
    format!("{value}%")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose_percentage_question, compose_rank_question};
    use crate::model::Dataset;
    use crate::random::ScriptedSource;

    fn forty_percent() -> Question {
        let dataset = Dataset::from_values(&[60, 40]).unwrap();
        let question = compose_percentage_question(dataset, &mut ScriptedSource::default());
        assert_eq!(question.correct_answer(), "40%");
        question
    }

    fn answer_c() -> Question {
        // C is the largest category, rank draw 0 -> rank 1
        let dataset = Dataset::from_values(&[20, 30, 50]).unwrap();
        let question = compose_rank_question(dataset, &mut ScriptedSource::new([0])).unwrap();
        assert_eq!(question.correct_answer(), "C");
        question
    }

    #[test]
    fn percentage_within_tolerance_is_correct() {
        let question = forty_percent();
        for answer in ["35", "40", "45", "40%", " 42 % ", "44.9"] {
            assert!(evaluate(&question, answer), "{answer} should pass");
        }
    }

    #[test]
    fn percentage_outside_tolerance_is_wrong() {
        let question = forty_percent();
        for answer in ["34", "46", "0", "100", "-40"] {
            assert!(!evaluate(&question, answer), "{answer} should fail");
        }
    }

    #[test]
    fn unparsable_percentage_is_wrong() {
        let question = forty_percent();
        for answer in ["abc", "", "%", "NaN", "inf", "4o"] {
            assert!(!evaluate(&question, answer), "{answer:?} should fail");
        }
    }

    #[test]
    fn numeric_prefix_alone_does_not_count() {
        // the whole answer must be a number, not just its leading digits
        let question = forty_percent();
        for answer in ["40abc", "40%%", "40 40", "40%abc"] {
            assert_eq!(parse_percentage(answer), None, "{answer:?}");
            assert!(!evaluate(&question, answer), "{answer:?} should fail");
        }
    }

    #[test]
    fn rank_requires_exact_match() {
        let question = answer_c();
        assert!(evaluate(&question, "C"));
        assert!(!evaluate(&question, "c"));
        assert!(!evaluate(&question, "C "));
        assert!(!evaluate(&question, "A"));
    }

    #[test]
    fn scoring_is_repeatable() {
        let percentage = forty_percent();
        let rank = answer_c();
        for _ in 0..3 {
            assert!(evaluate(&percentage, "37"));
            assert!(!evaluate(&percentage, "47"));
            assert!(evaluate(&rank, "C"));
        }
    }

    #[test]
    fn input_validation() {
        assert_eq!(validate_percentage_input("25"), Ok(25.0));
        assert_eq!(validate_percentage_input("12.5%"), Ok(12.5));
        assert_eq!(validate_percentage_input("  "), Err(AnswerInputError::Empty));
        assert_eq!(
            validate_percentage_input("lots"),
            Err(AnswerInputError::NotANumber)
        );
        assert_eq!(
            validate_percentage_input("120"),
            Err(AnswerInputError::OutOfRange(120.0))
        );
    }

    #[test]
    fn formatted_answers_round_trip_through_evaluation() {
        let question = forty_percent();
        assert_eq!(format_percentage_answer(38.0), "38%");
        assert_eq!(format_percentage_answer(38.5), "38.5%");
        assert!(evaluate(&question, &format_percentage_answer(38.5)));
    }
}
