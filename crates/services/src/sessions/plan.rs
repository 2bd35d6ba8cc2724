use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use chartquiz_core::compose::{compose_percentage_question, compose_rank_question};
use chartquiz_core::model::{ChartKind, Question, QuizSet, QuizSetId, QuizSettings};
use chartquiz_core::synth::Synthesizer;

use crate::error::QuizBuildError;

/// Highest display id a quiz set can be given.
pub const MAX_SET_ID: u32 = 10;

/// Assembles a balanced, shuffled quiz set.
///
/// For each chart kind the builder emits the configured number of percentage
/// questions, each from a fresh dataset of 3-4 categories, and as many rank
/// questions, each from a fresh 4-category dataset. The chart tag drawn by
/// the composer is replaced so the balance is exact; the final shuffle
/// interleaves chart kinds and families.
pub struct QuizSetBuilder<'a> {
    settings: &'a QuizSettings,
    shuffle: bool,
}

impl<'a> QuizSetBuilder<'a> {
    #[must_use]
    pub fn new(settings: &'a QuizSettings) -> Self {
        Self {
            settings,
            shuffle: true,
        }
    }

    /// Enable or disable the final shuffle. Unshuffled sets list pie
    /// questions first, alternating percentage and rank.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build a quiz set drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `QuizBuildError` only if the settings bypassed validation.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<QuizSet, QuizBuildError> {
        let synth = Synthesizer::new(self.settings.policy());
        let (min_categories, max_categories) = self.settings.percentage_categories();
        let per_kind = self.settings.questions_per_kind();

        let set_id = QuizSetId::new(rng.random_range(1..=MAX_SET_ID));
        let mut questions: Vec<Question> = Vec::with_capacity(self.settings.total_questions());

        for chart in ChartKind::ALL {
            for _ in 0..per_kind {
                let count = rng.random_range(min_categories..=max_categories);
                let dataset = synth.synthesize(count, rng)?;
                questions.push(compose_percentage_question(dataset, rng).with_chart(chart));

                let dataset = synth.synthesize(self.settings.rank_categories(), rng)?;
                questions.push(compose_rank_question(dataset, rng)?.with_chart(chart));
            }
        }

        if self.shuffle {
            questions.shuffle(rng);
        }

        debug!(
            "built quiz set {set_id} with {} questions (shuffled: {})",
            questions.len(),
            self.shuffle
        );

        Ok(QuizSet::new(set_id, questions))
    }
}

/// Builds the standard 20-question quiz from the thread-local generator.
///
/// # Errors
///
/// Never fails with the standard settings; see [`QuizSetBuilder::build`].
pub fn build_quiz_set() -> Result<QuizSet, QuizBuildError> {
    let settings = QuizSettings::default_standard();
    QuizSetBuilder::new(&settings).build(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartquiz_core::model::{QuestionKind, QuestionParams};
    use chartquiz_core::random::ScriptedSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_balanced(set: &QuizSet) {
        assert_eq!(set.len(), 20);
        assert_eq!(set.count_chart(ChartKind::Pie), 10);
        assert_eq!(set.count_chart(ChartKind::Bar), 10);
        assert_eq!(set.count_kind(QuestionKind::Percentage), 10);
        assert_eq!(set.count_kind(QuestionKind::Rank), 10);
        for chart in ChartKind::ALL {
            for kind in [QuestionKind::Percentage, QuestionKind::Rank] {
                let n = set
                    .questions()
                    .iter()
                    .filter(|q| q.chart() == chart && q.kind() == kind)
                    .count();
                assert_eq!(n, 5, "{chart} / {kind:?}");
            }
        }
    }

    #[test]
    fn shuffled_sets_stay_balanced() {
        let settings = QuizSettings::default_standard();
        for seed in 0..50 {
            let set = QuizSetBuilder::new(&settings)
                .build(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert_balanced(&set);
            assert!((1..=MAX_SET_ID).contains(&set.id().value()));
        }
    }

    #[test]
    fn scripted_sets_stay_balanced() {
        let settings = QuizSettings::default_standard();
        for script in [
            vec![0],
            vec![u32::MAX],
            vec![3 << 28, 1 << 30, 4 << 28, 1 << 31, 5 << 28, 9 << 28],
        ] {
            let set = QuizSetBuilder::new(&settings)
                .build(&mut ScriptedSource::new(script))
                .unwrap();
            assert_balanced(&set);
        }
    }

    #[test]
    fn dataset_sizes_follow_question_family() {
        let settings = QuizSettings::default_standard();
        let set = QuizSetBuilder::new(&settings)
            .build(&mut StdRng::seed_from_u64(9))
            .unwrap();
        for question in set.questions() {
            let len = question.dataset().len();
            match question.kind() {
                QuestionKind::Percentage => assert!((3..=4).contains(&len)),
                QuestionKind::Rank => assert_eq!(len, 4),
            }
            assert!(
                question
                    .dataset()
                    .categories()
                    .iter()
                    .all(|c| (5..=49).contains(&c.value))
            );
        }
    }

    #[test]
    fn unshuffled_order_is_pie_then_bar_alternating_families() {
        let settings = QuizSettings::default_standard();
        let set = QuizSetBuilder::new(&settings)
            .with_shuffle(false)
            .build(&mut StdRng::seed_from_u64(3))
            .unwrap();
        let questions = set.questions();
        assert!(questions[..10].iter().all(|q| q.chart() == ChartKind::Pie));
        assert!(questions[10..].iter().all(|q| q.chart() == ChartKind::Bar));
        for pair in questions.chunks(2) {
            assert!(matches!(pair[0].params(), QuestionParams::Percentage { .. }));
            assert!(matches!(pair[1].params(), QuestionParams::Rank { .. }));
        }
    }

    #[test]
    fn same_seed_builds_same_set() {
        let settings = QuizSettings::default_standard();
        let a = QuizSetBuilder::new(&settings)
            .build(&mut StdRng::seed_from_u64(21))
            .unwrap();
        let b = QuizSetBuilder::new(&settings)
            .build(&mut StdRng::seed_from_u64(21))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn thread_rng_builds_standard_set() {
        let set = build_quiz_set().unwrap();
        assert_balanced(&set);
    }
}
