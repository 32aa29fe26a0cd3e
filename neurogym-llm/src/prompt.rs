//! Prompt templates for coach operations.
//!
//! Every prompt is a testable constant. The coach never shows raw model
//! output structure to the player, so the templates ask for plain prose.

use neurogym_core::record::TrainingRecord;
use neurogym_core::stats::TrainingStats;

/// System prompt for post-session feedback.
pub const SESSION_FEEDBACK_SYSTEM: &str = r"You are an encouraging cognitive-training coach.
A player has just finished one training session.

RULES:
- Address the player directly, in second person.
- Mention one concrete number from the session.
- Give exactly one actionable tip for the next session.
- Keep the whole response under 3 sentences.
- Plain prose only. No lists, no headings, no emoji.";

/// User prompt for post-session feedback.
pub const SESSION_FEEDBACK_USER: &str = r"The session just played:
Module: {module}
Difficulty: {difficulty}
Score: {score}
Accuracy: {accuracy}%
Duration: {duration} seconds
Extra metrics: {details}

Write the feedback.";

/// System prompt for a cross-module training recommendation.
pub const RECOMMENDATION_SYSTEM: &str = r"You are an encouraging cognitive-training coach.
You are reviewing a player's recent training history to suggest what to play next.

RULES:
- Recommend exactly one module to focus on, by name.
- Justify the pick with one number from the history.
- Keep the whole response under 4 sentences.
- Plain prose only. No lists, no headings, no emoji.";

/// User prompt for a cross-module training recommendation.
pub const RECOMMENDATION_USER: &str = r"The player's history ({total} sessions):
{module_lines}

Weakest module so far: {weakest}

Write the recommendation.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Render the feedback user prompt from a stored record.
#[must_use]
pub fn render_session_feedback(record: &TrainingRecord) -> String {
    let details = record
        .details
        .as_ref()
        .map_or_else(|| "none".to_string(), |map| {
            serde_json::Value::Object(map.clone()).to_string()
        });
    render_template(
        SESSION_FEEDBACK_USER,
        &[
            ("module", record.module_type.as_str()),
            ("difficulty", &record.difficulty.to_string()),
            ("score", &record.score.to_string()),
            ("accuracy", &format!("{:.0}", record.accuracy * 100.0)),
            ("duration", &format!("{:.0}", record.duration)),
            ("details", &details),
        ],
    )
}

/// Render the recommendation user prompt from aggregated stats.
#[must_use]
pub fn render_recommendation(stats: &TrainingStats) -> String {
    let module_lines = stats.summary_lines().join("\n");
    let weakest = stats
        .weakest_module()
        .map_or_else(|| "none yet".to_string(), |m| m.module.to_string());
    render_template(
        RECOMMENDATION_USER,
        &[
            ("total", &stats.total_sessions.to_string()),
            ("module_lines", &module_lines),
            ("weakest", &weakest),
        ],
    )
}
