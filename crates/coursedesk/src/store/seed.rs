//! Built-in demo content.
//!
//! Ids and timestamps are fixed so that the same catalog is produced on every
//! run: ids are `Uuid::from_u128` values whose high half tags the entity kind.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::Catalog;
use crate::model::{
    Chapter, Difficulty, EntityKind, Exercise, ExerciseKind, Level, PublishStatus, Subject,
};

/// Deterministic id of the `n`th demo record of `kind`.
pub fn demo_id(kind: EntityKind, n: u128) -> Uuid {
    let tag = kind.depth() as u128 + 1;
    Uuid::from_u128((tag << 64) | n)
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .unwrap_or_default()
}

const LEVELS: &[(&str, &str, &str)] = &[
    ("Grade 10", "G10", "First year of upper secondary"),
    ("Grade 11", "G11", "Second year, specialisation starts"),
    ("Grade 12", "G12", "Final year and exam preparation"),
];

const SUBJECTS: &[(&str, &str, f64, &str)] = &[
    ("Mathematics", "Numbers, functions and proofs", 4.0, "#3b82f6"),
    ("Physics", "Mechanics, waves and electricity", 3.0, "#f59e0b"),
    ("French", "Language and literature", 2.0, "#10b981"),
];

/// Chapters per subject index, shared by every level.
const CHAPTERS: &[&[(&str, &str)]] = &[
    &[
        ("Algebra", "Equations, inequalities and polynomials"),
        ("Geometry", "Vectors and plane figures"),
        ("Functions", "Variations and reference functions"),
        ("Statistics", "Data series and probability"),
    ],
    &[
        ("Mechanics", "Motion and forces"),
        ("Optics", "Light and lenses"),
    ],
    &[
        ("Grammar", "Sentence structure and agreement"),
        ("Poetry", "Reading and commenting poems"),
    ],
];

const ALGEBRA_TOPICS: &[&str] = &[
    "Linear equations",
    "Systems of equations",
    "Inequalities",
    "Factoring",
    "Quadratic equations",
    "Polynomial division",
    "Absolute value",
    "Rational expressions",
    "Exponent rules",
    "Square roots",
    "Proportions",
    "Word problems",
    "Identities",
];

/// Number of exercises in Grade 10 Algebra, enough to span several pages.
pub const ALGEBRA_EXERCISES: usize = 25;

/// Build the demo catalog.
pub fn demo_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    let mut subject_n = 0u128;
    let mut chapter_n = 0u128;

    for (li, (name, code, description)) in LEVELS.iter().enumerate() {
        let level_id = demo_id(EntityKind::Level, li as u128 + 1);
        catalog.levels.push(Level {
            id: level_id,
            name: name.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            order: li as u32 + 1,
            created_at: at(2024, 8, 20, 9, li as u32),
        });

        for (si, (name, description, coefficient, color)) in SUBJECTS.iter().enumerate() {
            subject_n += 1;
            let subject_id = demo_id(EntityKind::Subject, subject_n);
            catalog.subjects.push(Subject {
                id: subject_id,
                level_id,
                name: name.to_string(),
                description: description.to_string(),
                coefficient: coefficient + li as f64,
                color: Some(color.to_string()),
                created_at: at(2024, 8, 21, 10, subject_n as u32),
            });

            for (ci, (title, description)) in CHAPTERS[si].iter().enumerate() {
                chapter_n += 1;
                catalog.chapters.push(Chapter {
                    id: demo_id(EntityKind::Chapter, chapter_n),
                    subject_id,
                    title: title.to_string(),
                    description: description.to_string(),
                    order: ci as u32 + 1,
                    created_at: at(2024, 8, 22, 11, chapter_n as u32),
                });
            }
        }
    }

    // Grade 10 Mathematics is subject 1, its Algebra chapter is chapter 1.
    let algebra = demo_id(EntityKind::Chapter, 1);
    for i in 0..ALGEBRA_EXERCISES {
        catalog.exercises.push(algebra_exercise(algebra, i));
    }

    // A few exercises elsewhere so every chapter list is not empty.
    let mut n = ALGEBRA_EXERCISES as u128;
    for chapter in catalog.chapters.iter().skip(1) {
        n += 1;
        catalog.exercises.push(Exercise {
            id: demo_id(EntityKind::Exercise, n),
            chapter_id: chapter.id,
            title: format!("{} review", chapter.title),
            description: format!("Check your understanding of {}", chapter.title.to_lowercase()),
            difficulty: Difficulty::Medium,
            kind: ExerciseKind::Quiz,
            points: 10,
            status: PublishStatus::Published,
            publish_date: Some(at(2025, 3, 1, 8, 0) + Duration::days(n as i64 % 30)),
            created_at: at(2025, 2, 1, 8, 0),
        });
    }

    catalog
}

fn algebra_exercise(chapter_id: Uuid, i: usize) -> Exercise {
    let difficulty = match i % 3 {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    };
    let kind = match i % 4 {
        0 => ExerciseKind::Quiz,
        1 => ExerciseKind::Problem,
        2 => ExerciseKind::Essay,
        _ => ExerciseKind::Practical,
    };
    // Every fifth exercise is an unpublished draft.
    let (status, publish_date) = if i % 5 == 4 {
        (PublishStatus::Draft, None)
    } else {
        let status = if i % 7 == 6 {
            PublishStatus::Archived
        } else {
            PublishStatus::Published
        };
        let date = at(2025, 1, 6, 9, 0) + Duration::days(i as i64 * 5) + Duration::minutes(i as i64);
        (status, Some(date))
    };
    let topic = ALGEBRA_TOPICS[i % ALGEBRA_TOPICS.len()];
    let title = if i < ALGEBRA_TOPICS.len() {
        topic.to_string()
    } else {
        format!("{} II", topic)
    };

    Exercise {
        id: demo_id(EntityKind::Exercise, i as u128 + 1),
        chapter_id,
        title,
        description: format!("Practice set {} on {}", i + 1, topic.to_lowercase()),
        difficulty,
        kind,
        points: 5 * (i as u32 % 4 + 1),
        status,
        publish_date,
        created_at: at(2024, 12, 15, 8, 0) + Duration::hours(i as i64),
    }
}
