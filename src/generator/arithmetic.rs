use super::{by_grade, pick_shape, Shape, TaskGenerator};
use crate::distractors::{self, Domain};
use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::{pick, Randomizer};

const ADDITION_OFFSETS: [i64; 4] = [-2, -1, 0, 1];
const SUBTRACTION_OFFSETS: [i64; 4] = [-1, 0, 1, 2];
const MULTIPLICATION_OFFSETS: [i64; 4] = [-2, 0, 2, 4];
const DIVISION_OFFSETS: [i64; 4] = [-1, 0, 1, 2];

/// Largest operand for sums and minuends
const OPERAND_MAX: [i64; 4] = [10, 20, 50, 100];
const FACTOR_MAX: [i64; 4] = [5, 5, 9, 10];
const DIVISOR_MAX: [i64; 4] = [3, 5, 9, 10];
const QUOTIENT_MAX: [i64; 4] = [5, 6, 9, 10];

const NAMES: [&str; 6] = ["Маши", "Пети", "Ани", "Димы", "Кати", "Миши"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum AdditionShape {
    TwoOperands,
    ThreeOperands,
    MissingAddend,
    WordProblem,
}

impl Shape for AdditionShape {
    const ALL: &'static [Self] = &[
        AdditionShape::TwoOperands,
        AdditionShape::ThreeOperands,
        AdditionShape::MissingAddend,
        AdditionShape::WordProblem,
    ];

    fn min_grade(self) -> u8 {
        match self {
            AdditionShape::ThreeOperands => 2,
            _ => 1,
        }
    }
}

pub struct Addition;

impl TaskGenerator for Addition {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        let max = by_grade(grade, OPERAND_MAX);
        match pick_shape::<AdditionShape>(grade, rng) {
            AdditionShape::TwoOperands => {
                let a = rng.rand_int(1, max);
                let b = rng.rand_int(1, max);
                let sum = a + b;
                distractors::numeric(sum, &ADDITION_OFFSETS, Domain::Positive, rng).into_question(
                    format!("Сколько будет {a} + {b}?"),
                    format!("{a} + {b} = {sum}. Отлично! 🌟"),
                    format!("Начни с числа {a} и прибавь к нему {b}."),
                )
            }
            AdditionShape::ThreeOperands => {
                let part = (max / 2).max(1);
                let a = rng.rand_int(1, part);
                let b = rng.rand_int(1, part);
                let c = rng.rand_int(1, part);
                let sum = a + b + c;
                distractors::numeric(sum, &ADDITION_OFFSETS, Domain::Positive, rng).into_question(
                    format!("Сколько будет {a} + {b} + {c}?"),
                    format!("{a} + {b} = {}, и ещё + {c} = {sum}.", a + b),
                    "Сложи сначала первые два числа, потом прибавь третье.",
                )
            }
            AdditionShape::MissingAddend => {
                let a = rng.rand_int(1, max);
                let b = rng.rand_int(1, max);
                let total = a + b;
                distractors::numeric(b, &ADDITION_OFFSETS, Domain::Positive, rng).into_question(
                    format!("Какое число пропущено: {a} + ? = {total}"),
                    format!("{total} - {a} = {b}, значит {a} + {b} = {total}."),
                    format!("Чтобы найти неизвестное слагаемое, вычти {a} из {total}."),
                )
            }
            AdditionShape::WordProblem => {
                let name = *pick(rng, &NAMES);
                let a = rng.rand_int(1, max);
                let b = rng.rand_int(1, max);
                let sum = a + b;
                distractors::numeric(sum, &ADDITION_OFFSETS, Domain::Positive, rng).into_question(
                    format!("У {name} было {a} конфет, мама дала ещё {b}. Сколько конфет стало?"),
                    format!("{a} + {b} = {sum} конфет! 🍬"),
                    "Когда чего-то становится больше, нужно сложить.",
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SubtractionShape {
    TwoOperands,
    Chained,
    Reverse,
    WordProblem,
}

impl Shape for SubtractionShape {
    const ALL: &'static [Self] = &[
        SubtractionShape::TwoOperands,
        SubtractionShape::Chained,
        SubtractionShape::Reverse,
        SubtractionShape::WordProblem,
    ];

    fn min_grade(self) -> u8 {
        match self {
            SubtractionShape::Chained => 2,
            _ => 1,
        }
    }
}

pub struct Subtraction;

impl TaskGenerator for Subtraction {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        let max = by_grade(grade, OPERAND_MAX);
        match pick_shape::<SubtractionShape>(grade, rng) {
            SubtractionShape::TwoOperands => {
                let a = rng.rand_int(2, max);
                let b = rng.rand_int(1, a);
                let diff = a - b;
                distractors::numeric(diff, &SUBTRACTION_OFFSETS, Domain::NonNegative, rng).into_question(
                    format!("Сколько будет {a} - {b}?"),
                    format!("{a} - {b} = {diff}. Молодец! 🌟"),
                    format!("Проверь сложением: ответ + {b} должно дать {a}."),
                )
            }
            SubtractionShape::Chained => {
                let a = rng.rand_int(max / 2, max);
                let b = rng.rand_int(1, a / 2);
                let c = rng.rand_int(1, a - b);
                let diff = a - b - c;
                distractors::numeric(diff, &SUBTRACTION_OFFSETS, Domain::NonNegative, rng).into_question(
                    format!("Сколько будет {a} - {b} - {c}?"),
                    format!("{a} - {b} = {}, потом {} - {c} = {diff}.", a - b, a - b),
                    "Вычитай по очереди: сначала второе число, потом третье.",
                )
            }
            SubtractionShape::Reverse => {
                let diff = rng.rand_int(0, max / 2);
                let b = rng.rand_int(1, max / 2);
                let a = diff + b;
                distractors::numeric(diff, &SUBTRACTION_OFFSETS, Domain::NonNegative, rng).into_question(
                    format!("Сколько будет {a} - {b}?"),
                    format!("{a} - {b} = {diff}, ведь {diff} + {b} = {a}."),
                    format!("Подумай, какое число нужно прибавить к {b}, чтобы получить {a}."),
                )
            }
            SubtractionShape::WordProblem => {
                let name = *pick(rng, &NAMES);
                let a = rng.rand_int(2, max);
                let b = rng.rand_int(1, a);
                let left = a - b;
                distractors::numeric(left, &SUBTRACTION_OFFSETS, Domain::NonNegative, rng).into_question(
                    format!("У {name} было {a} шариков, {b} улетело. Сколько осталось?"),
                    format!("{a} - {b} = {left} шариков осталось! 🎈"),
                    "Когда что-то улетает или теряется, нужно вычесть.",
                )
            }
        }
    }
}

pub struct Multiplication;

impl TaskGenerator for Multiplication {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        let max = by_grade(grade, FACTOR_MAX);
        let a = rng.rand_int(1, max);
        let b = rng.rand_int(1, max);
        let product = a * b;
        distractors::numeric(product, &MULTIPLICATION_OFFSETS, Domain::Positive, rng).into_question(
            format!("Сколько будет {a} × {b}?"),
            format!("{a} × {b} = {product}. Это как {a} группы по {b}! ⭐"),
            format!("Сложи число {b} само с собой {a} раз."),
        )
    }
}

pub struct Division;

impl TaskGenerator for Division {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        let divisor = rng.rand_int(2, by_grade(grade, DIVISOR_MAX));
        let quotient = rng.rand_int(1, by_grade(grade, QUOTIENT_MAX));
        let dividend = divisor * quotient;
        distractors::numeric(quotient, &DIVISION_OFFSETS, Domain::Positive, rng).into_question(
            format!("Сколько будет {dividend} ÷ {divisor}?"),
            format!("{dividend} ÷ {divisor} = {quotient}, потому что {quotient} × {divisor} = {dividend}."),
            format!("Какое число нужно умножить на {divisor}, чтобы получить {dividend}?"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{answer, assert_well_formed, numbers};
    use super::*;
    use crate::randomizer::SeededRandomizer;

    const TRIALS: usize = 10_000;

    fn grades() -> impl Iterator<Item = Grade> {
        Grade::ALL.into_iter()
    }

    #[test]
    fn test_addition_answers_match_question() {
        let mut rng = SeededRandomizer::new(1);
        for grade in grades() {
            for _ in 0..TRIALS / 4 {
                let q = Addition.generate(grade, &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.options.len(), 4);
                let n = numbers(&q.question);
                let expected = if q.question.contains('?') && q.question.contains("= ") {
                    // a + ? = total
                    n[1] - n[0]
                } else {
                    n.iter().sum()
                };
                assert_eq!(answer(&q), expected, "{q:?}");
            }
        }
    }

    #[test]
    fn test_addition_three_operands_locked_for_grade_one() {
        let mut rng = SeededRandomizer::new(2);
        let grade = Grade::new(1).unwrap();
        for _ in 0..2000 {
            let q = Addition.generate(grade, &mut rng);
            assert!(numbers(&q.question).len() <= 2, "{}", q.question);
            assert!(numbers(&q.question).iter().all(|n| *n <= 20));
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = SeededRandomizer::new(3);
        for grade in grades() {
            for _ in 0..TRIALS / 4 {
                let q = Subtraction.generate(grade, &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.options.len(), 4);
                let n = numbers(&q.question);
                let expected = n[0] - n[1..].iter().sum::<i64>();
                assert!(expected >= 0, "{q:?}");
                assert_eq!(answer(&q), expected, "{q:?}");
                assert!(q.options.iter().all(|o| o.parse::<i64>().unwrap() >= 0));
            }
        }
    }

    #[test]
    fn test_multiplication_answers_and_positive_options() {
        let mut rng = SeededRandomizer::new(4);
        for grade in grades() {
            for _ in 0..TRIALS / 4 {
                let q = Multiplication.generate(grade, &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.options.len(), 4);
                let n = numbers(&q.question);
                assert_eq!(answer(&q), n[0] * n[1]);
                assert!(q.options.iter().all(|o| o.parse::<i64>().unwrap() > 0));
            }
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = SeededRandomizer::new(5);
        for grade in grades() {
            for _ in 0..TRIALS / 4 {
                let q = Division.generate(grade, &mut rng);
                assert_well_formed(&q);
                assert_eq!(q.options.len(), 4);
                let n = numbers(&q.question);
                let (dividend, divisor) = (n[0], n[1]);
                assert!(divisor >= 2);
                assert_eq!(dividend % divisor, 0, "{q:?}");
                assert_eq!(answer(&q), dividend / divisor);
            }
        }
    }

    #[test]
    fn test_operand_ranges_grow_with_grade() {
        let mut rng = SeededRandomizer::new(6);
        let largest = |grade: u8, rng: &mut SeededRandomizer| {
            (0..3000)
                .map(|_| {
                    let q = Multiplication.generate(Grade::new(grade).unwrap(), rng);
                    numbers(&q.question).into_iter().max().unwrap_or(0)
                })
                .max()
                .unwrap_or(0)
        };
        assert!(largest(2, &mut rng) <= 5);
        assert!(largest(4, &mut rng) > 5);
    }
}
