use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::Tone;

pub const MAX_SAFETY_SCORE: u8 = 100;

/// A safety score in the closed range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SafetyScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("safety score {0} is outside 0..=100")]
pub struct ScoreOutOfRange(pub i64);

impl SafetyScore {
    pub fn new(value: i64) -> Result<Self, ScoreOutOfRange> {
        u8::try_from(value)
            .ok()
            .filter(|score| *score <= MAX_SAFETY_SCORE)
            .map(Self)
            .ok_or(ScoreOutOfRange(value))
    }

    /// Clamp into range instead of rejecting.
    pub fn saturating(value: i64) -> Self {
        // Clamped into 0..=100, so the cast cannot truncate.
        Self(value.clamp(0, i64::from(MAX_SAFETY_SCORE)) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for SafetyScore {
    type Error = ScoreOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SafetyScore> for u8 {
    fn from(score: SafetyScore) -> Self {
        score.0
    }
}

impl fmt::Display for SafetyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five-step letter grade. Ordering follows quality: `A < B < ... < F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SafetyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl SafetyGrade {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::F]
    }

    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Exceptional",
            Self::B => "Safety First",
            Self::C => "Average",
            Self::D => "At Risk",
            Self::F => "Critical",
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            Self::A => "90-100",
            Self::B => "80-89",
            Self::C => "70-79",
            Self::D => "60-69",
            Self::F => "0-59",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::A | Self::B => Tone::Positive,
            Self::C => Tone::Neutral,
            Self::D | Self::F => Tone::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeAssessment {
    pub score: SafetyScore,
    pub grade: SafetyGrade,
    pub grade_label: &'static str,
    pub tone: Tone,
}

/// Map a score onto the five-step grade scale used on score-bearing pages.
pub fn grade_of(score: SafetyScore) -> GradeAssessment {
    let grade = match score.value() {
        90..=100 => SafetyGrade::A,
        80..=89 => SafetyGrade::B,
        70..=79 => SafetyGrade::C,
        60..=69 => SafetyGrade::D,
        _ => SafetyGrade::F,
    };

    GradeAssessment {
        score,
        grade,
        grade_label: grade.label(),
        tone: grade.tone(),
    }
}

/// One row of the grade legend shown beside score-bearing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeBand {
    pub grade: SafetyGrade,
    pub label: &'static str,
    pub range: &'static str,
    pub tone: Tone,
}

/// Every grade, best first.
pub fn grade_legend() -> Vec<GradeBand> {
    SafetyGrade::ordered()
        .into_iter()
        .map(|grade| GradeBand {
            grade,
            label: grade.label(),
            range: grade.range_label(),
            tone: grade.tone(),
        })
        .collect()
}

/// Three-step variant shown on compact score badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompactGrade {
    pub grade: SafetyGrade,
    pub label: &'static str,
    pub tone: Tone,
}

pub fn compact_grade(score: SafetyScore) -> CompactGrade {
    match score.value() {
        80..=100 => CompactGrade {
            grade: SafetyGrade::A,
            label: "Meets Safety Standards",
            tone: Tone::Positive,
        },
        60..=79 => CompactGrade {
            grade: SafetyGrade::C,
            label: "Below Average Safety",
            tone: Tone::Neutral,
        },
        _ => CompactGrade {
            grade: SafetyGrade::F,
            label: "Critical Deficiencies Found",
            tone: Tone::Warning,
        },
    }
}
