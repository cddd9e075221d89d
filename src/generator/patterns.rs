use super::{by_grade, pick_shape, Shape, TaskGenerator};
use crate::distractors::{self, Domain};
use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::Randomizer;
use itertools::Itertools;

const START_MAX: [i64; 4] = [5, 10, 20, 50];
const STEP_MAX: [i64; 4] = [3, 5, 10, 10];
const TABLE_MAX: [i64; 4] = [2, 5, 9, 10];

/// Terms shown before the question mark
const SHOWN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PatternShape {
    Ascending,
    Descending,
    Table,
    Accelerating,
}

impl Shape for PatternShape {
    const ALL: &'static [Self] = &[
        PatternShape::Ascending,
        PatternShape::Descending,
        PatternShape::Table,
        PatternShape::Accelerating,
    ];

    fn min_grade(self) -> u8 {
        match self {
            PatternShape::Ascending | PatternShape::Descending => 1,
            PatternShape::Table => 2,
            PatternShape::Accelerating => 3,
        }
    }
}

pub struct Patterns;

impl TaskGenerator for Patterns {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        match pick_shape::<PatternShape>(grade, rng) {
            PatternShape::Ascending => {
                let start = rng.rand_int(1, by_grade(grade, START_MAX));
                let step = rng.rand_int(1, by_grade(grade, STEP_MAX));
                let terms: Vec<i64> = (0..=SHOWN as i64).map(|i| start + i * step).collect();
                sequence_question(
                    &terms,
                    &[-1, 0, 1, step],
                    Domain::Positive,
                    format!("Прибавляем по {step}: следующее число {}! 📊", terms[SHOWN]),
                    "Посмотри, на сколько каждое число больше предыдущего.",
                    rng,
                )
            }
            PatternShape::Descending => {
                let step = rng.rand_int(1, by_grade(grade, STEP_MAX));
                let last = rng.rand_int(0, by_grade(grade, START_MAX));
                let terms: Vec<i64> = (0..=SHOWN as i64)
                    .rev()
                    .map(|i| last + i * step)
                    .collect();
                sequence_question(
                    &terms,
                    &[-1, 0, 1, step],
                    Domain::NonNegative,
                    format!("Каждый раз вычитаем {step}: следующее число {last}! 📉"),
                    "Посмотри, на сколько каждое число меньше предыдущего.",
                    rng,
                )
            }
            PatternShape::Table => {
                let base = rng.rand_int(2, by_grade(grade, TABLE_MAX).max(2));
                let from = rng.rand_int(1, 3);
                let terms: Vec<i64> = (0..=SHOWN as i64).map(|i| base * (from + i)).collect();
                sequence_question(
                    &terms,
                    &[-1, 0, 1, base],
                    Domain::Positive,
                    format!("Это таблица умножения на {base}: следующее число {}! ✖️", terms[SHOWN]),
                    format!("Все числа делятся на {base}."),
                    rng,
                )
            }
            PatternShape::Accelerating => {
                let start = rng.rand_int(1, by_grade(grade, START_MAX));
                let terms: Vec<i64> = (0..=SHOWN as i64)
                    .scan(start, |acc, i| {
                        *acc += i;
                        Some(*acc)
                    })
                    .collect();
                sequence_question(
                    &terms,
                    &[-1, 0, 1, 2],
                    Domain::Positive,
                    format!("Прибавляем 1, 2, 3, 4: следующее число {}! 🚀", terms[SHOWN]),
                    "Разница между соседними числами каждый раз растёт на 1.",
                    rng,
                )
            }
        }
    }
}

/// Show the first terms and ask for the last one
fn sequence_question(
    terms: &[i64],
    offsets: &[i64],
    domain: Domain,
    explanation: String,
    hint: impl Into<String>,
    rng: &mut dyn Randomizer,
) -> Question {
    let (shown, next) = terms.split_at(SHOWN);
    distractors::numeric(next[0], offsets, domain, rng).into_question(
        format!("Какое число продолжит ряд: {}, ?", shown.iter().join(", ")),
        explanation,
        hint,
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{answer, assert_well_formed, numbers};
    use super::*;
    use crate::randomizer::SeededRandomizer;

    fn classify(terms: &[i64]) -> Vec<i64> {
        terms.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[test]
    fn test_sequences_continue_their_rule() {
        let mut rng = SeededRandomizer::new(31);
        for grade in Grade::ALL {
            for _ in 0..10_000 / 4 {
                let q = Patterns.generate(grade, &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.options.len(), 4);

                let mut terms = numbers(&q.question);
                assert_eq!(terms.len(), SHOWN);
                terms.push(answer(&q));
                let diffs = classify(&terms);

                let constant = diffs.iter().all_equal();
                let accelerating = diffs == vec![1, 2, 3, 4];
                assert!(constant || accelerating, "{q:?}");
                assert!(terms.iter().all(|t| *t >= 0));
            }
        }
    }

    #[test]
    fn test_grade_one_sequences_are_linear() {
        let mut rng = SeededRandomizer::new(32);
        let grade = Grade::new(1).unwrap();
        for _ in 0..2000 {
            let q = Patterns.generate(grade, &mut rng);
            let mut terms = numbers(&q.question);
            terms.push(answer(&q));
            assert!(classify(&terms).iter().all_equal(), "{q:?}");
            assert!(!q.explanation.contains("таблица"));
        }
    }

    #[test]
    fn test_descending_never_goes_negative() {
        let mut rng = SeededRandomizer::new(33);
        for _ in 0..5000 {
            let q = Patterns.generate(Grade::new(2).unwrap(), &mut rng);
            assert!(q
                .options
                .iter()
                .all(|o| o.parse::<i64>().map(|v| v >= 0).unwrap_or(false)));
        }
    }
}
