use super::{by_grade, pick_shape, Shape, TaskGenerator};
use crate::distractors::{self, Domain};
use crate::grade::Grade;
use crate::question::Question;
use crate::randomizer::{pick, Randomizer};

const ANGLE_OFFSETS: [i64; 4] = [-1, 0, 1, 2];
const SIDE_MAX: [i64; 4] = [5, 5, 10, 15];
const AREA_SIDE_MAX: [i64; 4] = [5, 6, 9, 12];

struct Figure {
    /// Name in the genitive, as in "у треугольника"
    genitive: &'static str,
    corners: i64,
}

const BASIC_FIGURES: [Figure; 3] = [
    Figure {
        genitive: "треугольника",
        corners: 3,
    },
    Figure {
        genitive: "квадрата",
        corners: 4,
    },
    Figure {
        genitive: "прямоугольника",
        corners: 4,
    },
];

const MORE_FIGURES: [Figure; 2] = [
    Figure {
        genitive: "пятиугольника",
        corners: 5,
    },
    Figure {
        genitive: "шестиугольника",
        corners: 6,
    },
];

/// Regular polygons usable for perimeter questions
const REGULAR: [(&str, i64); 4] = [
    ("равностороннего треугольника", 3),
    ("квадрата", 4),
    ("правильного пятиугольника", 5),
    ("правильного шестиугольника", 6),
];

struct Fact {
    question: &'static str,
    answer: &'static str,
    explanation: &'static str,
    hint: &'static str,
}

const FACTS: [Fact; 3] = [
    Fact {
        question: "Какая фигура имеет 4 равные стороны?",
        answer: "Квадрат",
        explanation: "Квадрат имеет 4 равные стороны! 🟦",
        hint: "У прямоугольника равны только противоположные стороны.",
    },
    Fact {
        question: "У какой фигуры нет ни одного угла?",
        answer: "Круг",
        explanation: "Круг совсем круглый, у него нет углов! ⚪",
        hint: "Представь колесо или монетку.",
    },
    Fact {
        question: "У какой фигуры 3 стороны?",
        answer: "Треугольник",
        explanation: "Треугольник: три стороны и три угла! 📐",
        hint: "Название фигуры подсказывает число углов.",
    },
];

const FIGURE_NAMES: [&str; 4] = ["Треугольник", "Круг", "Квадрат", "Прямоугольник"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum GeometryShape {
    AngleCount,
    FigureFact,
    Perimeter,
    Area,
}

impl Shape for GeometryShape {
    const ALL: &'static [Self] = &[
        GeometryShape::AngleCount,
        GeometryShape::FigureFact,
        GeometryShape::Perimeter,
        GeometryShape::Area,
    ];

    fn min_grade(self) -> u8 {
        match self {
            GeometryShape::AngleCount => 1,
            GeometryShape::FigureFact | GeometryShape::Perimeter => 2,
            GeometryShape::Area => 3,
        }
    }
}

pub struct Geometry;

impl TaskGenerator for Geometry {
    fn generate(&self, grade: Grade, rng: &mut dyn Randomizer) -> Question {
        match pick_shape::<GeometryShape>(grade, rng) {
            GeometryShape::AngleCount => angle_count(grade, rng),
            GeometryShape::FigureFact => {
                let fact = pick(rng, &FACTS);
                distractors::symbolic(fact.answer, &FIGURE_NAMES, rng).into_question(
                    fact.question,
                    fact.explanation,
                    fact.hint,
                )
            }
            GeometryShape::Perimeter => {
                let (name, sides) = *pick(rng, &REGULAR);
                let side = rng.rand_int(2, by_grade(grade, SIDE_MAX));
                let perimeter = sides * side;
                // wrong side count, and a plain sum of two sides
                let offsets = [-side, 0, side, 2 * side - perimeter];
                distractors::numeric(perimeter, &offsets, Domain::Positive, rng).into_question(
                    format!("Сторона {name} равна {side} см. Чему равен его периметр?"),
                    format!("Сторон {sides}, каждая по {side} см: {sides} × {side} = {perimeter} см."),
                    "Периметр — это сумма длин всех сторон.",
                )
            }
            GeometryShape::Area => {
                let max = by_grade(grade, AREA_SIDE_MAX);
                let a = rng.rand_int(2, max);
                let b = rng.rand_int(2, max);
                let area = a * b;
                // perimeter is the classic mix-up
                let offsets = [-a, 0, b, 2 * (a + b) - area];
                distractors::numeric(area, &offsets, Domain::Positive, rng).into_question(
                    format!("Длина прямоугольника {a} см, ширина {b} см. Чему равна его площадь (в кв. см)?"),
                    format!("Площадь = длина × ширина = {a} × {b} = {area} кв. см."),
                    "Не путай площадь с периметром: площадь находят умножением.",
                )
            }
        }
    }
}

fn angle_count(grade: Grade, rng: &mut dyn Randomizer) -> Question {
    let figures: Vec<&Figure> = if grade.level() >= 2 {
        BASIC_FIGURES.iter().chain(MORE_FIGURES.iter()).collect()
    } else {
        BASIC_FIGURES.iter().collect()
    };
    let figure = *pick(rng, &figures);
    let corners = figure.corners;
    distractors::numeric(corners, &ANGLE_OFFSETS, Domain::Positive, rng).into_question(
        format!("Сколько углов у {}?", figure.genitive),
        format!("У {} {corners} {}! 📐", figure.genitive, corners_word(corners)),
        "Обведи фигуру пальцем и посчитай повороты.",
    )
}

fn corners_word(n: i64) -> &'static str {
    match n {
        1 => "угол",
        2..=4 => "угла",
        _ => "углов",
    }
}
