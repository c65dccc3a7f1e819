use serde::Serialize;

use super::domain::EnhancedFacility;

/// Cities at or below this size get one unified list instead of two panels.
pub const UNIFIED_LIST_MAX: usize = 4;
/// Upper bound on entries in each ranking panel.
pub const PANEL_SIZE: usize = 5;
/// Best score needed before the top panel is labelled as top rated.
pub const TOP_RATED_THRESHOLD: u8 = 70;

pub const TOP_RATED_TITLE: &str = "Top Rated Facilities";
pub const TOP_RATED_SUBTITLE: &str = "Safest options based on inspection history";
pub const BEST_AVAILABLE_TITLE: &str = "Best Available Care";
pub const BEST_AVAILABLE_SUBTITLE: &str = "Highest scoring options in a weaker regional pool";
pub const WATCH_TITLE: &str = "Facilities to Watch";
pub const WATCH_SUBTITLE: &str = "Higher volume of recent citations";

/// How a city's facilities are laid out for ranking display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum RankingLayout {
    Unified {
        facilities: Vec<EnhancedFacility>,
    },
    Split(RankingPanels),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingPanels {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Best first.
    pub top: Vec<EnhancedFacility>,
    pub watch_title: &'static str,
    pub watch_subtitle: &'static str,
    /// Worst first.
    pub worst: Vec<EnhancedFacility>,
}

impl RankingLayout {
    pub fn is_unified(&self) -> bool {
        matches!(self, Self::Unified { .. })
    }
}

/// Split a city's facilities into best and worst cohorts.
///
/// Small cities keep their stored order as a single list. Larger cities are
/// cut by index, so the cohorts never share a facility even when scores tie.
pub fn partition(facilities: &[EnhancedFacility]) -> RankingLayout {
    let total = facilities.len();
    if total <= UNIFIED_LIST_MAX {
        return RankingLayout::Unified {
            facilities: facilities.to_vec(),
        };
    }

    let mut ranked = facilities.to_vec();
    ranked.sort_by(|a, b| b.safety_score().cmp(&a.safety_score()));

    let half = total.div_ceil(2);
    let top_len = half.min(PANEL_SIZE);
    let worst_start = half.max(total.saturating_sub(PANEL_SIZE)).min(total);

    let mut worst = ranked.split_off(worst_start);
    worst.sort_by(|a, b| a.safety_score().cmp(&b.safety_score()));
    ranked.truncate(top_len);
    let top = ranked;

    let best_score = top
        .first()
        .map(|facility| facility.safety_score().value())
        .unwrap_or_default();
    let (title, subtitle) = if best_score >= TOP_RATED_THRESHOLD {
        (TOP_RATED_TITLE, TOP_RATED_SUBTITLE)
    } else {
        (BEST_AVAILABLE_TITLE, BEST_AVAILABLE_SUBTITLE)
    };

    RankingLayout::Split(RankingPanels {
        title,
        subtitle,
        top,
        watch_title: WATCH_TITLE,
        watch_subtitle: WATCH_SUBTITLE,
        worst,
    })
}
