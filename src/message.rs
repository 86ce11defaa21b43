//! Human-readable summaries for session reports

use crate::recovery::round_half_up;
use crate::types::{DemandProfile, FocusCategory};

/// Post-session summary from metrics and primary focus
pub fn post_session_message(calories_burned: f64, accuracy: f64, profile: &DemandProfile) -> String {
    let mut message = format!("🧘 Great session! You burned {calories_burned} calories");

    if accuracy >= 85.0 {
        message.push_str(&format!(" with excellent {accuracy}% accuracy! 🎯"));
    } else if accuracy >= 70.0 {
        message.push_str(&format!(" with good {accuracy}% accuracy! 👍"));
    } else {
        message.push_str(". Keep practicing to improve your form! 💪");
    }

    if profile.is_focused_on(FocusCategory::Strength) {
        message.push_str(
            "\n\n💪 Your strength-focused session needs high protein for muscle recovery.",
        );
    } else if profile.is_focused_on(FocusCategory::Flexibility) {
        message.push_str(
            "\n\n🤸 Your flexibility work benefits from anti-inflammatory foods for joint health.",
        );
    } else if profile.is_focused_on(FocusCategory::Balance) {
        message.push_str("\n\n🧠 Balance poses benefit from omega-3 rich foods for brain health.");
    }

    message
}

/// Pre-session hint from the unrounded lead time
pub fn pre_session_message(minutes_until: f64) -> String {
    if minutes_until > 120.0 {
        format!(
            "⏰ Yoga in {} hours. Have a light, energizing meal now.",
            round_half_up(minutes_until / 60.0)
        )
    } else if minutes_until > 60.0 {
        format!(
            "⏰ Yoga in {} minutes. Have a quick, easily digestible snack.",
            round_half_up(minutes_until)
        )
    } else {
        "⏰ Yoga starting soon! Just have water or a very light snack if needed.".to_string()
    }
}
