//! Procedural question generation.
//!
//! Every topic implements [`TaskGenerator`]. A topic has one or more question
//! shapes; shapes are unlocked by grade and one is picked uniformly per call.

pub mod arithmetic;
pub mod geometry;
pub mod logic;
pub mod patterns;

use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::{pick, Randomizer};
use crate::topic::TopicId;

pub use arithmetic::{Addition, Division, Multiplication, Subtraction};
pub use geometry::Geometry;
pub use logic::Logic;
pub use patterns::Patterns;

/// Produces questions for one topic
pub trait TaskGenerator {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question;
}

/// Delegates to a uniformly chosen non-mixed topic offered for the grade
pub struct Mixed;

impl TaskGenerator for Mixed {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        let topics: Vec<TopicId> = TopicId::available_for(grade)
            .into_iter()
            .filter(|t| *t != TopicId::Mixed)
            .collect();
        let topic = *pick(rng, &topics);
        tracing::trace!(%topic, "mixed delegates");
        generator_for(topic).generate(grade, rng)
    }
}

pub fn generator_for(topic: TopicId) -> Box<dyn TaskGenerator> {
    match topic {
        TopicId::Addition => Box::new(Addition),
        TopicId::Subtraction => Box::new(Subtraction),
        TopicId::Multiplication => Box::new(Multiplication),
        TopicId::Division => Box::new(Division),
        TopicId::Geometry => Box::new(Geometry),
        TopicId::Logic => Box::new(Logic),
        TopicId::Patterns => Box::new(Patterns),
        TopicId::Mixed => Box::new(Mixed),
    }
}

/// Generate a fresh question for `topic` at `grade`
pub fn generate(topic: TopicId, grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let question = generator_for(topic).generate(grade, rng);
    tracing::debug!(
        %topic,
        %grade,
        question = %question.question,
        answer = %question.correct_option(),
        "generated question"
    );
    question
}

/// A question template within a topic
pub(crate) trait Shape: Copy + 'static {
    const ALL: &'static [Self];

    /// Lowest grade at which the shape is offered
    fn min_grade(self) -> u8;
}

pub(crate) fn pick_shape<S: Shape>(grade: Grade, rng: &mut dyn Randomizer) -> S {
    let shapes: Vec<S> = S::ALL
        .iter()
        .copied()
        .filter(|s| s.min_grade() <= grade.level())
        .collect();
    // single-shape topics don't consume a draw
    match shapes.as_slice() {
        [only] => *only,
        _ => *pick(rng, &shapes),
    }
}

/// Look up a per-grade constant
pub(crate) fn by_grade(grade: Grade, table: [i64; 4]) -> i64 {
    table[usize::from(grade.level() - 1)]
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::question::Question;
    use itertools::Itertools;

    /// All unsigned integers appearing in a text, in order
    pub fn numbers(text: &str) -> Vec<i64> {
        text.split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    pub fn assert_well_formed(q: &Question) {
        assert!(q.options.len() >= 2, "too few options: {q:?}");
        assert!(q.correct_answer < q.options.len(), "bad index: {q:?}");
        assert_eq!(
            q.options.iter().unique().count(),
            q.options.len(),
            "duplicate options: {q:?}"
        );
        assert!(!q.question.is_empty());
        assert!(!q.explanation.is_empty());
        assert!(!q.hint.is_empty());
    }

    pub fn answer(q: &Question) -> i64 {
        q.correct_option()
            .parse()
            .unwrap_or_else(|_| panic!("non-numeric answer in {q:?}"))
    }
}
