use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AchievementId {
    FirstStep,
    TenCorrect,
    FiftyCorrect,
    HotStreak,
    Perfectionist,
    SpeedRunner,
    Lightning,
}

/// Counter an achievement threshold is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Correct answers since the app started
    TotalCorrect,
    /// Correct answers in a row
    Streak,
    /// Correct answers in the current timed drill
    TimerCorrect,
}

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub metric: Metric,
    pub threshold: u32,
}

pub const ACHIEVEMENTS: [Achievement; 7] = [
    Achievement {
        id: AchievementId::FirstStep,
        title: "Первый шаг",
        description: "Реши первую задачу правильно",
        icon: "🌱",
        metric: Metric::TotalCorrect,
        threshold: 1,
    },
    Achievement {
        id: AchievementId::TenCorrect,
        title: "Знаток",
        description: "Реши правильно 10 задач",
        icon: "📚",
        metric: Metric::TotalCorrect,
        threshold: 10,
    },
    Achievement {
        id: AchievementId::FiftyCorrect,
        title: "Гений математики",
        description: "Реши правильно 50 задач",
        icon: "🎓",
        metric: Metric::TotalCorrect,
        threshold: 50,
    },
    Achievement {
        id: AchievementId::HotStreak,
        title: "В ударе",
        description: "5 правильных ответов подряд",
        icon: "🔥",
        metric: Metric::Streak,
        threshold: 5,
    },
    Achievement {
        id: AchievementId::Perfectionist,
        title: "Перфекционист",
        description: "10 правильных ответов подряд без единой ошибки",
        icon: "💎",
        metric: Metric::Streak,
        threshold: 10,
    },
    Achievement {
        id: AchievementId::SpeedRunner,
        title: "Быстрый счёт",
        description: "10 правильных ответов за одну игру на время",
        icon: "⚡",
        metric: Metric::TimerCorrect,
        threshold: 10,
    },
    Achievement {
        id: AchievementId::Lightning,
        title: "Молния",
        description: "20 правильных ответов за одну игру на время",
        icon: "🌩️",
        metric: Metric::TimerCorrect,
        threshold: 20,
    },
];

impl Achievement {
    pub fn get(id: AchievementId) -> &'static Achievement {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .unwrap_or(&ACHIEVEMENTS[0])
    }
}

/// Performance counters achievements are measured against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total_correct: u32,
    pub streak: u32,
    pub timer_correct: u32,
}

impl Progress {
    pub fn value(&self, metric: Metric) -> u32 {
        match metric {
            Metric::TotalCorrect => self.total_correct,
            Metric::Streak => self.streak,
            Metric::TimerCorrect => self.timer_correct,
        }
    }
}

/// Payload for the "achievement unlocked" toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementUnlocked {
    pub id: AchievementId,
    pub title: &'static str,
    pub icon: &'static str,
}

/// Monotonic record of unlocked achievements
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    unlocked: BTreeMap<AchievementId, DateTime<Local>>,
}

impl AchievementTracker {
    /// Unlock every achievement whose threshold `progress` has reached.
    /// Returns only the ones unlocked by this call.
    pub fn check(&mut self, progress: &Progress) -> Vec<AchievementUnlocked> {
        let mut fresh = Vec::new();
        for achievement in &ACHIEVEMENTS {
            if self.unlocked.contains_key(&achievement.id) {
                continue;
            }
            if progress.value(achievement.metric) >= achievement.threshold {
                self.unlocked.insert(achievement.id, Local::now());
                tracing::info!(achievement = %achievement.id, "achievement unlocked");
                fresh.push(AchievementUnlocked {
                    id: achievement.id,
                    title: achievement.title,
                    icon: achievement.icon,
                });
            }
        }
        fresh
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<DateTime<Local>> {
        self.unlocked.get(&id).copied()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Every achievement paired with its unlock state, in catalogue order
    pub fn overview(&self) -> impl Iterator<Item = (&'static Achievement, bool)> + '_ {
        ACHIEVEMENTS
            .iter()
            .map(move |a| (a, self.unlocked.contains_key(&a.id)))
    }
}
