use super::{by_grade, pick_shape, Shape, TaskGenerator};
use crate::distractors::{self, Domain};
use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::{pick, shuffle, Randomizer};
use itertools::Itertools;

const COLOURS: [&str; 4] = ["🔴", "🔵", "🟡", "🟢"];
const FRUITS: [&str; 3] = ["🍎", "🍌", "🍐"];
const NUMBER_MAX: [i64; 4] = [10, 20, 50, 100];

const ITEMS: [&str; 4] = ["марок", "наклеек", "машинок", "открыток"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum LogicShape {
    ColourPattern,
    OddOneOut,
    Majority,
    Maximum,
    RepeatingSequence,
    Comparison,
}

impl Shape for LogicShape {
    const ALL: &'static [Self] = &[
        LogicShape::ColourPattern,
        LogicShape::OddOneOut,
        LogicShape::Majority,
        LogicShape::Maximum,
        LogicShape::RepeatingSequence,
        LogicShape::Comparison,
    ];

    fn min_grade(self) -> u8 {
        1
    }
}

pub struct Logic;

impl TaskGenerator for Logic {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        match pick_shape::<LogicShape>(grade, rng) {
            LogicShape::ColourPattern => colour_pattern(grade, rng),
            LogicShape::OddOneOut => odd_one_out(grade, rng),
            LogicShape::Majority => majority(grade, rng),
            LogicShape::Maximum => maximum(grade, rng),
            LogicShape::RepeatingSequence => repeating_sequence(grade, rng),
            LogicShape::Comparison => comparison(grade, rng),
        }
    }
}

/// `count` distinct items from `pool`, in random order
fn distinct<T: Clone>(rng: &mut dyn Randomizer, pool: &[T], count: usize) -> Vec<T> {
    let mut items = pool.to_vec();
    shuffle(rng, &mut items);
    items.truncate(count);
    items
}

fn colour_pattern(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let period = if grade.level() >= 3 { 3 } else { 2 };
    let motif = distinct(rng, &COLOURS, period);
    let shown = period * 2 + 1;
    let sequence = motif.iter().cycle().take(shown).join(" ");
    let next = motif[shown % period];

    distractors::symbolic(next, &COLOURS, rng).into_question(
        format!("Продолжи закономерность: {sequence} ?"),
        format!("Цвета повторяются: {}! 🎨", motif.join(" ")),
        format!("Найди, через сколько шагов цвета начинают повторяться (подсказка: через {period})."),
    )
}

fn odd_one_out(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let max = by_grade(grade, NUMBER_MAX);
    let even_majority = rng.rand_int(0, 1) == 0;
    let (majority_parity, word_odd, word_rest) = if even_majority {
        (0, "нечётное", "чётные")
    } else {
        (1, "чётное", "нечётные")
    };

    let same: Vec<i64> = (1..=max).filter(|n| n % 2 == majority_parity).collect();
    let other: Vec<i64> = (1..=max).filter(|n| n % 2 != majority_parity).collect();
    let group = distinct(rng, &same, 4);
    let odd = *pick(rng, &other);

    let mut all = group.clone();
    all.push(odd);
    all.sort_unstable();
    let listing = all.iter().join(", ");

    let odd_text = odd.to_string();
    let candidates: Vec<String> = group.iter().take(3).map(i64::to_string).collect();
    let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();

    distractors::symbolic(&odd_text, &candidate_refs, rng).into_question(
        format!("Какое число лишнее: {listing}?"),
        format!("{odd} — {word_odd} число, остальные {word_rest}! 🧮"),
        "Посмотри, какие числа делятся на 2 без остатка.",
    )
}

fn majority(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let fruits = distinct(rng, &FRUITS, FRUITS.len());
    let winner_count = rng.rand_int(3, 3 + grade.factor());
    let mut bag: Vec<&str> = Vec::new();
    for (i, fruit) in fruits.iter().enumerate() {
        let count = if i == 0 {
            winner_count
        } else {
            rng.rand_int(1, winner_count - 1)
        };
        bag.extend(std::iter::repeat(*fruit).take(count as usize));
    }
    shuffle(rng, &mut bag);

    let counts = bag.iter().counts();
    let (winner, most) = counts
        .iter()
        .max_by_key(|(_, n)| **n)
        .map(|(fruit, n)| (**fruit, *n))
        .unwrap_or((fruits[0], winner_count as usize));

    distractors::symbolic(winner, &FRUITS, rng).into_question(
        format!("Каких фруктов больше всего: {}?", bag.join(" ")),
        format!("{winner} встречается {most} раз — больше всех! 🧺"),
        "Посчитай каждый фрукт по отдельности.",
    )
}

fn maximum(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let max = by_grade(grade, NUMBER_MAX);
    let pool: Vec<i64> = (1..=max).collect();
    let numbers = distinct(rng, &pool, 4);
    let biggest = numbers.iter().copied().max().unwrap_or(max);

    let listing = numbers.iter().join(", ");
    let options: Vec<String> = numbers.iter().map(i64::to_string).collect();
    let option_refs: Vec<&str> = options.iter().map(String::as_str).collect();

    distractors::symbolic(&biggest.to_string(), &option_refs, rng).into_question(
        format!("Какое число самое большое: {listing}?"),
        format!("{biggest} больше всех остальных чисел! 🏔️"),
        "Сравни сначала десятки, потом единицы.",
    )
}

fn repeating_sequence(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let period = if grade.level() >= 2 { 3 } else { 2 };
    let digits: Vec<i64> = (1..=9).collect();
    let picked = distinct(rng, &digits, 4);
    let motif = &picked[..period];
    let shown = period * 2 + 1;
    let sequence = motif.iter().cycle().take(shown).join(", ");
    let next = motif[shown % period].to_string();

    let candidates: Vec<String> = picked.iter().map(i64::to_string).collect();
    let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();

    distractors::symbolic(&next, &candidate_refs, rng).into_question(
        format!("Какое число следующее: {sequence}, ?"),
        format!("Числа повторяются по кругу: {}. Дальше {next}!", motif.iter().join(", ")),
        "Найди начало повтора и продолжи с нужного места.",
    )
}

fn comparison(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let half = by_grade(grade, NUMBER_MAX) / 2;
    let smaller = rng.rand_int(1, half);
    let difference = rng.rand_int(1, half);
    let bigger = smaller + difference;
    let item = *pick(rng, &ITEMS);

    // adding instead of subtracting is the usual slip
    let offsets = [-1, 0, 1, bigger + smaller - difference];
    distractors::numeric(difference, &offsets, Domain::Positive, rng).into_question(
        format!("У Ани {bigger} {item}, а у Бори {smaller}. На сколько у Ани больше?"),
        format!("{bigger} - {smaller} = {difference}. У Ани на {difference} больше!"),
        "Чтобы узнать, на сколько одно число больше другого, из большего вычитают меньшее.",
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{answer, assert_well_formed, numbers};
    use super::*;
    use crate::randomizer::SeededRandomizer;

    const TRIALS: usize = 2_500;

    fn each_grade(mut f: impl FnMut(Grade, &mut SeededRandomizer)) {
        let mut rng = SeededRandomizer::new(77);
        for grade in Grade::ALL {
            for _ in 0..TRIALS {
                f(grade, &mut rng);
            }
        }
    }

    #[test]
    fn test_colour_pattern_continues_cycle() {
        each_grade(|grade, rng| {
            let q = colour_pattern(grade, rng);
            assert_well_formed(&q);
            let seq: Vec<&str> = q
                .question
                .trim_start_matches("Продолжи закономерность: ")
                .trim_end_matches(" ?")
                .split(' ')
                .collect();
            let period = if grade.level() >= 3 { 3 } else { 2 };
            assert_eq!(q.correct_option(), seq[seq.len() - period]);
            assert_eq!(q.options.len(), 4);
        });
    }

    #[test]
    fn test_odd_one_out_has_unique_parity() {
        each_grade(|grade, rng| {
            let q = odd_one_out(grade, rng);
            assert_well_formed(&q);
            let listed = numbers(&q.question);
            assert_eq!(listed.len(), 5);
            let odd = answer(&q);
            let same_parity = listed.iter().filter(|n| *n % 2 == odd % 2).count();
            assert_eq!(same_parity, 1, "{q:?}");
            assert_eq!(q.options.len(), 4);
        });
    }

    #[test]
    fn test_majority_winner_is_strict() {
        each_grade(|grade, rng| {
            let q = majority(grade, rng);
            assert_well_formed(&q);
            let winner = q.correct_option();
            let counts = FRUITS.map(|f| q.question.matches(f).count());
            let winner_count = q.question.matches(winner).count();
            assert_eq!(counts.iter().filter(|c| **c == winner_count).count(), 1);
            assert_eq!(*counts.iter().max().unwrap(), winner_count);
        });
    }

    #[test]
    fn test_maximum_is_largest_listed() {
        each_grade(|grade, rng| {
            let q = maximum(grade, rng);
            assert_well_formed(&q);
            let listed = numbers(&q.question);
            assert_eq!(answer(&q), *listed.iter().max().unwrap());
            assert_eq!(q.options.len(), 4);
        });
    }

    #[test]
    fn test_repeating_sequence_answer() {
        each_grade(|grade, rng| {
            let q = repeating_sequence(grade, rng);
            assert_well_formed(&q);
            let listed = numbers(&q.question);
            let period = if grade.level() >= 2 { 3 } else { 2 };
            assert_eq!(answer(&q), listed[listed.len() - period]);
            assert_eq!(q.options.len(), 4);
        });
    }

    #[test]
    fn test_comparison_difference() {
        each_grade(|grade, rng| {
            let q = comparison(grade, rng);
            assert_well_formed(&q);
            let n = numbers(&q.question);
            assert_eq!(answer(&q), n[0] - n[1]);
            assert!(answer(&q) > 0);
            assert_eq!(q.options.len(), 4);
        });
    }
}
