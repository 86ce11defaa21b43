//! Pose classification
//!
//! Maps the poses performed in a session onto a demand profile:
//! - Keyword substring matching per demand category
//! - One pose may count toward several categories
//! - Primary focus is the category with the highest non-zero count

use crate::types::{DemandProfile, FocusCategory, PoseEntry};

/// Keywords that mark a pose as flexibility work
pub const FLEXIBILITY_KEYWORDS: &[&str] = &["tree", "warrior2", "goddess"];
/// Keywords that mark a pose as strength work
pub const STRENGTH_KEYWORDS: &[&str] = &["plank", "downdog"];
/// Keywords that mark a pose as balance work
pub const BALANCE_KEYWORDS: &[&str] = &["tree", "goddess"];
/// Keywords that mark a pose as cardio work
pub const CARDIO_KEYWORDS: &[&str] = &["warrior2", "downdog"];

fn keywords(category: FocusCategory) -> &'static [&'static str] {
    match category {
        FocusCategory::Flexibility => FLEXIBILITY_KEYWORDS,
        FocusCategory::Strength => STRENGTH_KEYWORDS,
        FocusCategory::Balance => BALANCE_KEYWORDS,
        FocusCategory::Cardio => CARDIO_KEYWORDS,
    }
}

/// Pose classifier for building demand profiles
pub struct PoseClassifier;

impl PoseClassifier {
    /// Classify a list of poses into a demand profile
    pub fn classify(poses: &[PoseEntry]) -> DemandProfile {
        let mut profile = DemandProfile::default();

        for pose in poses {
            let name = pose.pose_name.as_deref().unwrap_or("").to_lowercase();

            for category in FocusCategory::ORDER {
                if keywords(category).iter().any(|k| name.contains(k)) {
                    *count_mut(&mut profile, category) += 1;
                }
            }
        }

        if let Some(primary) = primary_focus(&profile) {
            profile.primary_focus.push(primary);
        }

        tracing::debug!(
            flexibility = profile.flexibility,
            strength = profile.strength,
            balance = profile.balance,
            cardio = profile.cardio,
            primary = profile.primary().map(|c| c.as_str()),
            "classified session poses"
        );

        profile
    }
}

fn count_mut(profile: &mut DemandProfile, category: FocusCategory) -> &mut u32 {
    match category {
        FocusCategory::Flexibility => &mut profile.flexibility,
        FocusCategory::Strength => &mut profile.strength,
        FocusCategory::Balance => &mut profile.balance,
        FocusCategory::Cardio => &mut profile.cardio,
    }
}

/// Highest count wins; on a tie the category earliest in
/// [`FocusCategory::ORDER`] is kept. All-zero profiles have no focus.
fn primary_focus(profile: &DemandProfile) -> Option<FocusCategory> {
    let mut best: Option<(FocusCategory, u32)> = None;

    for category in FocusCategory::ORDER {
        let count = profile.count(category);
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((category, count)),
        }
    }

    best.filter(|(_, count)| *count > 0)
        .map(|(category, _)| category)
}
