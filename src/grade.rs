use serde::{Deserialize, Serialize};
use std::fmt;

/// School grade, 1 through 4. Only used to scale question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const ALL: [Grade; 4] = [Grade(1), Grade(2), Grade(3), Grade(4)];

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Grade level as a signed factor for range arithmetic
    pub fn factor(self) -> i64 {
        i64::from(self.0)
    }

    pub fn label(self) -> String {
        format!("{} класс", self.0)
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade(Self::MIN)
    }
}

impl TryFrom<u8> for Grade {
    type Error = crate::error::MathFunError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Grade::new(level).ok_or(crate::error::MathFunError::InvalidGrade(level))
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bounds() {
        assert!(Grade::new(0).is_none());
        assert!(Grade::new(5).is_none());
        for level in 1..=4 {
            assert_eq!(Grade::new(level).unwrap().level(), level);
        }
    }

    #[test]
    fn test_grade_all_is_sorted() {
        let levels: Vec<u8> = Grade::ALL.iter().map(|g| g.level()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_grade_label() {
        assert_eq!(Grade::new(3).unwrap().label(), "3 класс");
    }

    #[test]
    fn test_grade_serde_rejects_out_of_range() {
        let ok: Grade = serde_json::from_str("2").unwrap();
        assert_eq!(ok.level(), 2);
        assert!(serde_json::from_str::<Grade>("9").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "2");
    }
}
