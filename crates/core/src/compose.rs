use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::model::{ChartKind, Dataset, Question, QuestionParams};

/// Deepest rank a question may ask for.
///
/// Beyond the third largest, near-equal slices are not reliably readable.
pub const MAX_ASKED_RANK: usize = 3;

/// Smallest dataset a rank question can be asked about.
pub const MIN_RANK_CATEGORIES: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComposeError {
    #[error("rank questions need at least 3 categories, got {len}")]
    TooFewCategories { len: usize },
}

/// Asks for one category's share of the whole.
///
/// With exactly two categories the second one is always the subject;
/// otherwise the subject is drawn uniformly. The chart tag is drawn after the
/// subject and has no influence on it.
pub fn compose_percentage_question<R: Rng + ?Sized>(dataset: Dataset, rng: &mut R) -> Question {
    let index = if dataset.len() == 2 {
        1
    } else {
        rng.random_range(..dataset.len())
    };
    let target = &dataset.categories()[index];
    let params = QuestionParams::Percentage {
        target: target.name.clone(),
    };
    let correct_answer = format!("{}%", target.value);
    let chart = pick_chart(rng);

    Question::new(dataset, chart, params, Vec::new(), correct_answer)
}

/// Asks which category holds the 1st, 2nd or 3rd largest share.
///
/// Ties are broken by original category order, so the answer is fully
/// determined by the dataset and the drawn rank. Options keep the original
/// order and never hint at the ranking.
///
/// # Errors
///
/// Returns `ComposeError::TooFewCategories` for datasets with fewer than 3
/// categories.
pub fn compose_rank_question<R: Rng + ?Sized>(
    dataset: Dataset,
    rng: &mut R,
) -> Result<Question, ComposeError> {
    let len = dataset.len();
    if len < MIN_RANK_CATEGORIES {
        return Err(ComposeError::TooFewCategories { len });
    }

    let rank = rng.random_range(1..=len.min(MAX_ASKED_RANK));
    let correct_answer = dataset.ranked()[rank - 1].name.clone();
    let options = dataset.names();
    let chart = pick_chart(rng);
    let params = QuestionParams::Rank {
        rank: u8::try_from(rank).unwrap_or(1),
    };

    Ok(Question::new(dataset, chart, params, options, correct_answer))
}

fn pick_chart<R: Rng + ?Sized>(rng: &mut R) -> ChartKind {
    ChartKind::ALL.choose(rng).copied().unwrap_or(ChartKind::Pie)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;
    use crate::random::ScriptedSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tied() -> Dataset {
        Dataset::from_values(&[30, 30, 20, 20]).unwrap()
    }

    #[test]
    fn rank_one_breaks_ties_by_original_order() {
        for _ in 0..3 {
            // lowest rank draw -> rank 1
            let mut rng = ScriptedSource::new([0, 0]);
            let question = compose_rank_question(tied(), &mut rng).unwrap();
            assert_eq!(question.params(), &QuestionParams::Rank { rank: 1 });
            assert_eq!(question.correct_answer(), "A");
        }
    }

    #[test]
    fn rank_two_and_three_follow_stable_order() {
        let mut rng = ScriptedSource::from_picks(&[(1, 3), (0, 2)]);
        let second = compose_rank_question(tied(), &mut rng).unwrap();
        assert_eq!(second.correct_answer(), "B");

        let mut rng = ScriptedSource::from_picks(&[(2, 3), (0, 2)]);
        let third = compose_rank_question(tied(), &mut rng).unwrap();
        assert_eq!(third.correct_answer(), "C");
    }

    #[test]
    fn rank_is_capped_at_three() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let dataset = Dataset::from_values(&[10, 20, 30, 15, 25]).unwrap();
            let question = compose_rank_question(dataset, &mut rng).unwrap();
            let QuestionParams::Rank { rank } = question.params() else {
                panic!("expected a rank question");
            };
            assert!((1..=3).contains(rank));
        }
    }

    #[test]
    fn rank_options_keep_original_order() {
        let dataset = Dataset::from_values(&[10, 40, 30, 20]).unwrap();
        let question = compose_rank_question(dataset, &mut ScriptedSource::new([0])).unwrap();
        assert_eq!(question.options(), ["A", "B", "C", "D"]);
        assert_eq!(question.correct_answer(), "B");
        assert_eq!(question.kind(), QuestionKind::Rank);
    }

    #[test]
    fn rank_rejects_two_categories() {
        let dataset = Dataset::from_values(&[60, 40]).unwrap();
        let err = compose_rank_question(dataset, &mut ScriptedSource::default()).unwrap_err();
        assert_eq!(err, ComposeError::TooFewCategories { len: 2 });
    }

    #[test]
    fn two_category_percentage_targets_second() {
        let dataset = Dataset::from_values(&[63, 37]).unwrap();
        let mut rng = ScriptedSource::new([0]);
        let question = compose_percentage_question(dataset, &mut rng);
        assert_eq!(
            question.params(),
            &QuestionParams::Percentage { target: "B".into() }
        );
        assert_eq!(question.correct_answer(), "37%");
        assert!(question.options().is_empty());
        // only the chart tag was drawn
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn multi_category_percentage_draws_target() {
        let dataset = Dataset::from_values(&[20, 45, 35]).unwrap();
        let question = compose_percentage_question(dataset, &mut ScriptedSource::new([u32::MAX]));
        assert_eq!(
            question.params(),
            &QuestionParams::Percentage { target: "C".into() }
        );
        assert_eq!(question.correct_answer(), "35%");
        assert_eq!(question.chart(), ChartKind::Bar);
    }

    #[test]
    fn chart_tag_does_not_change_answer() {
        let mut pie_rng = ScriptedSource::from_picks(&[(1, 3), (0, 2)]);
        let mut bar_rng = ScriptedSource::from_picks(&[(1, 3), (1, 2)]);
        let pie = compose_rank_question(tied(), &mut pie_rng).unwrap();
        let bar = compose_rank_question(tied(), &mut bar_rng).unwrap();
        assert_eq!(pie.chart(), ChartKind::Pie);
        assert_eq!(bar.chart(), ChartKind::Bar);
        assert_eq!(pie.correct_answer(), bar.correct_answer());
        assert_eq!(pie.options(), bar.options());
    }
}
