//! Fame scoring
//!
//! Maps an aggregate signal onto a bounded score with a log transform and a
//! small bonus for mononyms, then bands the score into categories.

use serde::{Deserialize, Serialize};

use crate::{Query, Signal};

/// Hard floor of the final score
pub const MIN_SCORE: f64 = 5.0;

/// Hard ceiling of the final score
pub const MAX_SCORE: f64 = 99.0;

/// Points per decade of signal
const LOG_SCALE: f64 = 14.0;

/// Bonus multiplier for single-word names
const MONONYM_BONUS: f64 = 1.2;

/// Score before the final clamp: `min(100, max(1, 14 * log10(max(1, signal))))`,
/// with the mononym bonus applied and capped at 100 again
pub fn adjusted_base_score(signal: u64, query: &Query) -> f64 {
    let base = (LOG_SCALE * (signal.max(1) as f64).log10()).clamp(1.0, 100.0);
    if query.is_mononym() {
        (base * MONONYM_BONUS).min(100.0)
    } else {
        base
    }
}

/// Final score clamped to [5, 99]
pub fn fame_score(signal: u64, query: &Query) -> f64 {
    adjusted_base_score(signal, query).clamp(MIN_SCORE, MAX_SCORE)
}

/// Ten fixed bands over the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FameCategory {
    #[serde(rename = "GLOBAL ICON")]
    GlobalIcon,
    Superstar,
    Celebrity,
    Notable,
    Recognized,
    Emerging,
    #[serde(rename = "NICHE FAME")]
    NicheFame,
    #[serde(rename = "LOCAL FIGURE")]
    LocalFigure,
    #[serde(rename = "LIMITED REACH")]
    LimitedReach,
    Private,
}

/// Thresholds in descending order; the first one met wins
const CATEGORY_BANDS: &[(f64, FameCategory)] = &[
    (95.0, FameCategory::GlobalIcon),
    (85.0, FameCategory::Superstar),
    (75.0, FameCategory::Celebrity),
    (65.0, FameCategory::Notable),
    (55.0, FameCategory::Recognized),
    (45.0, FameCategory::Emerging),
    (35.0, FameCategory::NicheFame),
    (25.0, FameCategory::LocalFigure),
    (15.0, FameCategory::LimitedReach),
];

impl FameCategory {
    /// Every category, highest first
    pub const ALL: [FameCategory; 10] = [
        FameCategory::GlobalIcon,
        FameCategory::Superstar,
        FameCategory::Celebrity,
        FameCategory::Notable,
        FameCategory::Recognized,
        FameCategory::Emerging,
        FameCategory::NicheFame,
        FameCategory::LocalFigure,
        FameCategory::LimitedReach,
        FameCategory::Private,
    ];

    pub fn from_score(score: f64) -> Self {
        CATEGORY_BANDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, category)| *category)
            .unwrap_or(FameCategory::Private)
    }

    /// Lowest score that falls in this band
    pub fn threshold(&self) -> f64 {
        CATEGORY_BANDS
            .iter()
            .find(|(_, category)| category == self)
            .map(|(threshold, _)| *threshold)
            .unwrap_or(f64::NEG_INFINITY)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FameCategory::GlobalIcon => "GLOBAL ICON",
            FameCategory::Superstar => "SUPERSTAR",
            FameCategory::Celebrity => "CELEBRITY",
            FameCategory::Notable => "NOTABLE",
            FameCategory::Recognized => "RECOGNIZED",
            FameCategory::Emerging => "EMERGING",
            FameCategory::NicheFame => "NICHE FAME",
            FameCategory::LocalFigure => "LOCAL FIGURE",
            FameCategory::LimitedReach => "LIMITED REACH",
            FameCategory::Private => "PRIVATE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FameCategory::GlobalIcon => "Worldwide household name",
            FameCategory::Superstar => "Highly renowned figure",
            FameCategory::Celebrity => "Well-known public figure",
            FameCategory::Notable => "Recognized in their field",
            FameCategory::Recognized => "Known in their industry",
            FameCategory::Emerging => "Growing recognition",
            FameCategory::NicheFame => "Known in specific communities",
            FameCategory::LocalFigure => "Limited to local areas",
            FameCategory::LimitedReach => "Minimal awareness",
            FameCategory::Private => "Little recognition",
        }
    }
}

/// Coarse status banner shown under the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FameStatus {
    MegaStar,
    Celebrity,
    NotableFigure,
    EmergingRecognition,
    LimitedExposure,
}

impl FameStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            FameStatus::MegaStar
        } else if score >= 65.0 {
            FameStatus::Celebrity
        } else if score >= 45.0 {
            FameStatus::NotableFigure
        } else if score >= 25.0 {
            FameStatus::EmergingRecognition
        } else {
            FameStatus::LimitedExposure
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            FameStatus::MegaStar => "🔥 MEGA STAR STATUS! 🔥",
            FameStatus::Celebrity => "✨ CELEBRITY STATUS! ✨",
            FameStatus::NotableFigure => "👍 NOTABLE FIGURE! 👍",
            FameStatus::EmergingRecognition => "🔍 EMERGING RECOGNITION",
            FameStatus::LimitedExposure => "📝 LIMITED PUBLIC EXPOSURE",
        }
    }
}

/// Score with its bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FameScore {
    pub score: f64,
    pub category: FameCategory,
    pub status: FameStatus,
}

impl FameScore {
    /// Score a resolved signal for a query
    pub fn compute(signal: Signal, query: &Query) -> Self {
        let score = fame_score(signal.value(), query);
        Self {
            score,
            category: FameCategory::from_score(score),
            status: FameStatus::from_score(score),
        }
    }
}
