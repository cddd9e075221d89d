//! Candidate answer construction.
//!
//! Numeric topics derive wrong answers from the correct one by a per-shape
//! offset set; symbolic topics shuffle a curated list. Either way the result
//! holds the correct value exactly once and is shuffled with Fisher-Yates.

use crate::question::Choices;
use crate::randomizer::{shuffle, Randomizer};

/// Number of options numeric questions always carry
pub const OPTION_COUNT: usize = 4;

/// Which candidate values make sense for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Strictly greater than zero
    Positive,
    /// Zero or more
    NonNegative,
}

impl Domain {
    pub fn admits(self, value: i64) -> bool {
        match self {
            Domain::Positive => value > 0,
            Domain::NonNegative => value >= 0,
        }
    }
}

/// Build four shuffled numeric options around `correct`.
///
/// Offsets that land outside `domain` or collide with an earlier candidate are
/// dropped, then the set is topped up with the nearest unused valid values.
pub fn numeric(correct: i64, offsets: &[i64], domain: Domain, rng: &mut dyn Randomizer) -> Choices {
    let mut values = vec![correct];
    for offset in offsets {
        let candidate = correct + offset;
        if domain.admits(candidate) && !values.contains(&candidate) {
            values.push(candidate);
        }
    }

    let mut step = 1;
    while values.len() < OPTION_COUNT {
        for candidate in [correct + step, correct - step] {
            if values.len() < OPTION_COUNT && domain.admits(candidate) && !values.contains(&candidate) {
                values.push(candidate);
            }
        }
        step += 1;
    }
    values.truncate(OPTION_COUNT);

    shuffle(rng, &mut values);
    let correct_answer = values.iter().position(|v| *v == correct).unwrap_or(0);

    Choices {
        options: values.iter().map(i64::to_string).collect(),
        correct_answer,
    }
}

/// Shuffle a curated option list that should contain `correct`.
pub fn symbolic(correct: &str, candidates: &[&str], rng: &mut dyn Randomizer) -> Choices {
    let mut options: Vec<String> = Vec::with_capacity(candidates.len() + 1);
    if !candidates.contains(&correct) {
        options.push(correct.to_string());
    }
    for candidate in candidates {
        if !options.iter().any(|o| o == candidate) {
            options.push(candidate.to_string());
        }
    }

    shuffle(rng, &mut options);
    let correct_answer = options.iter().position(|o| o == correct).unwrap_or(0);

    Choices {
        options,
        correct_answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::{ScriptedRandomizer, SeededRandomizer};
    use itertools::Itertools;

    fn assert_valid(choices: &Choices, correct: &str) {
        assert!(choices.correct_answer < choices.options.len());
        assert_eq!(choices.options[choices.correct_answer], correct);
        assert_eq!(
            choices.options.iter().unique().count(),
            choices.options.len(),
            "duplicate options in {:?}",
            choices.options
        );
    }

    #[test]
    fn test_numeric_uses_offsets_when_valid() {
        let mut rng = SeededRandomizer::new(1);
        let choices = numeric(10, &[-2, -1, 0, 1], Domain::Positive, &mut rng);

        assert_valid(&choices, "10");
        let mut sorted: Vec<i64> = choices.options.iter().map(|o| o.parse().unwrap()).collect();
        sorted.sort();
        assert_eq!(sorted, vec![8, 9, 10, 11]);
    }

    #[test]
    fn test_numeric_backfills_after_domain_filter() {
        let mut rng = SeededRandomizer::new(2);
        // 1 - 2 and 1 - 1 are not positive
        let choices = numeric(1, &[-2, -1, 0, 1], Domain::Positive, &mut rng);

        assert_valid(&choices, "1");
        assert_eq!(choices.options.len(), OPTION_COUNT);
        assert!(choices.options.iter().all(|o| o.parse::<i64>().unwrap() > 0));
    }

    #[test]
    fn test_numeric_zero_allowed_for_non_negative() {
        let mut rng = SeededRandomizer::new(3);
        let choices = numeric(0, &[-1, 0, 1, 2], Domain::NonNegative, &mut rng);

        assert_valid(&choices, "0");
        assert_eq!(choices.options.len(), OPTION_COUNT);
        assert!(choices.options.iter().all(|o| o.parse::<i64>().unwrap() >= 0));
    }

    #[test]
    fn test_numeric_dedupes_repeated_offsets() {
        let mut rng = SeededRandomizer::new(4);
        let choices = numeric(6, &[0, 0, 2, 2], Domain::Positive, &mut rng);

        assert_valid(&choices, "6");
        assert_eq!(choices.options.len(), OPTION_COUNT);
    }

    #[test]
    fn test_numeric_correct_index_follows_shuffle() {
        // Fisher-Yates over 4 elements draws j for i = 3, 2, 1
        let mut rng = ScriptedRandomizer::new([0, 0, 0]);
        let choices = numeric(5, &[-1, 0, 1, 2], Domain::Positive, &mut rng);

        assert_valid(&choices, "5");
    }

    #[test]
    fn test_symbolic_inserts_missing_correct() {
        let mut rng = SeededRandomizer::new(5);
        let choices = symbolic("Квадрат", &["Круг", "Треугольник", "Овал"], &mut rng);

        assert_eq!(choices.options.len(), 4);
        assert_valid(&choices, "Квадрат");
    }

    #[test]
    fn test_symbolic_drops_duplicates() {
        let mut rng = SeededRandomizer::new(6);
        let choices = symbolic("🔴", &["🔴", "🔵", "🔵", "🟡"], &mut rng);

        assert_eq!(choices.options.len(), 3);
        assert_valid(&choices, "🔴");
    }

    #[test]
    fn test_domain_admits() {
        assert!(Domain::Positive.admits(1));
        assert!(!Domain::Positive.admits(0));
        assert!(Domain::NonNegative.admits(0));
        assert!(!Domain::NonNegative.admits(-1));
    }
}
