use crate::error::{MathFunError, Result};
use crate::grade::Grade;
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

const TOPICS_FILE: &str = "topics.json";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TopicId {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Geometry,
    Logic,
    Patterns,
    Mixed,
}

impl TopicId {
    pub const ALL: [TopicId; 8] = [
        TopicId::Addition,
        TopicId::Subtraction,
        TopicId::Multiplication,
        TopicId::Division,
        TopicId::Geometry,
        TopicId::Logic,
        TopicId::Patterns,
        TopicId::Mixed,
    ];

    /// Grades for which the topic is offered
    pub fn grades(self) -> &'static [u8] {
        match self {
            TopicId::Multiplication | TopicId::Division => &[2, 3, 4],
            _ => &[1, 2, 3, 4],
        }
    }

    pub fn is_available_for(self, grade: Grade) -> bool {
        self.grades().contains(&grade.level())
    }

    /// Topics offered for `grade`, in menu order
    pub fn available_for(grade: Grade) -> Vec<TopicId> {
        Self::ALL
            .into_iter()
            .filter(|t| t.is_available_for(grade))
            .collect()
    }
}

/// Display metadata for a topic
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopicInfo {
    pub id: TopicId,
    pub title: String,
    pub emoji: String,
    pub theory: String,
}

#[derive(Deserialize)]
struct CatalogueFile {
    topics: Vec<TopicInfo>,
}

/// Titles and theory texts for every topic, loaded from the embedded data dir
#[derive(Debug, Clone)]
pub struct Catalogue {
    topics: HashMap<TopicId, TopicInfo>,
}

impl Catalogue {
    pub fn embedded() -> Result<Self> {
        let file = DATA_DIR
            .get_file(TOPICS_FILE)
            .ok_or_else(|| MathFunError::MissingAsset(TOPICS_FILE.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| MathFunError::MissingAsset(TOPICS_FILE.to_string()))?;
        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: CatalogueFile = serde_json::from_str(json).map_err(|source| MathFunError::Json {
            what: TOPICS_FILE.to_string(),
            source,
        })?;

        let topics = parsed.topics.into_iter().map(|t| (t.id, t)).collect();
        Ok(Self { topics })
    }

    pub fn info(&self, id: TopicId) -> Option<&TopicInfo> {
        self.topics.get(&id)
    }

    /// Title for menus, falling back to the id when metadata is missing
    pub fn title(&self, id: TopicId) -> String {
        self.info(id)
            .map(|t| format!("{} {}", t.emoji, t.title))
            .unwrap_or_else(|| id.to_string())
    }
}
