use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One student's global risk profile, as produced by the analytics service.
///
/// All wire names are already lower-snake-case, so the field names match the
/// wire directly. Missing fields default rather than abort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentDetail {
    pub user_id: String,
    pub user_name: String,
    pub is_at_risk: bool,
    pub overall_evasion_score: i64,
    pub overall_evasion_risk_pct: f64,
    pub overall_evasion_reasons: Vec<String>,
    pub days_since_last_access_global: i64,
    pub total_actions_global: i64,
    pub unique_courses_accessed_global: i64,
    pub forum_interactions_global: i64,
    pub quiz_interactions_global: i64,
    pub presence_score_global: f64,
    pub courses_details: Vec<CourseDetail>,
    /// Counts of recent action categories, keyed by action label.
    /// Keys are data and preserved verbatim.
    pub recent_actions_summary_global: HashMap<String, i64>,
    pub all_recent_actions_detailed: Vec<RecentActionDetail>,
}

/// One student's risk profile scoped to a single course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseDetail {
    pub course_fullname: String,
    pub evasion_score: i64,
    pub evasion_risk_pct: f64,
    pub is_at_risk_in_this_course: bool,
    pub evasion_reasons_course: Vec<String>,
    pub days_since_course_last_access: i64,
    pub course_total_actions: i64,
    pub viewed_count_course: i64,
    pub graded_count_course: i64,
}

/// A single recent action taken by a student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentActionDetail {
    /// Event timestamp as emitted by the analytics service (no timezone).
    /// Unparseable or missing values degrade to `None`.
    #[serde(deserialize_with = "lenient_datetime")]
    pub date: Option<NaiveDateTime>,
    pub mapped_action: String,
    pub course_fullname: String,
    pub timestamp_moodle: Option<i64>,
    pub course_id: Option<i64>,
}

/// A student profile: a [`StudentDetail`] extended with its own sequence of
/// recent actions.
///
/// When the payload carries `all_recent_actions_detailed` at the top level
/// it lands here; any other field falls through to the flattened detail.
/// Deserialize-only: the flattened detail would duplicate the recent-action
/// key on the way out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub all_recent_actions_detailed: Vec<RecentActionDetail>,

    #[serde(flatten)]
    pub detail: StudentDetail,
}

/// Accept an ISO-8601-ish timestamp string, or anything else as `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(parse_datetime))
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::decode::from_lenient_json;

    #[test]
    fn student_detail_decodes_with_partial_payload() {
        let body = r#"{
            "user_id": "42",
            "user_name": "Maria Souza",
            "is_at_risk": true,
            "overall_evasion_score": 7,
            "courses_details": [
                {"course_fullname": "Algoritmos I", "evasion_score": 5, "is_at_risk_in_this_course": true}
            ],
            "recent_actions_summary_global": {"Viewed": 12, "Graded": 2}
        }"#;

        let detail: StudentDetail = from_lenient_json(body).expect("detail should decode");
        assert_eq!(detail.user_id, "42");
        assert!(detail.is_at_risk);
        assert_eq!(detail.overall_evasion_score, 7);
        // defaulted fields
        assert_eq!(detail.total_actions_global, 0);
        assert!(detail.overall_evasion_reasons.is_empty());
        // summary keys are data, preserved verbatim
        assert_eq!(detail.recent_actions_summary_global.get("Viewed"), Some(&12));
        assert_eq!(detail.courses_details.len(), 1);
        assert_eq!(detail.courses_details[0].course_fullname, "Algoritmos I");
    }

    #[test]
    fn recent_action_timestamp_is_lenient() {
        let good: RecentActionDetail =
            from_lenient_json(r#"{"date": "2024-05-01T13:00:00", "mapped_action": "Viewed"}"#)
                .expect("should decode");
        assert!(good.date.is_some());

        let bad: RecentActionDetail =
            from_lenient_json(r#"{"date": "not a timestamp", "mapped_action": "Viewed"}"#)
                .expect("should decode");
        assert!(bad.date.is_none());

        let absent: RecentActionDetail =
            from_lenient_json(r#"{"mapped_action": "Viewed"}"#).expect("should decode");
        assert!(absent.date.is_none());
    }

    #[test]
    fn student_profile_extends_student_detail() {
        let body = r#"{
            "user_id": "42",
            "user_name": "Maria Souza",
            "all_recent_actions_detailed": [
                {"date": "2024-05-01T13:00:00", "mapped_action": "Viewed",
                 "course_fullname": "Algoritmos I", "course_id": 3}
            ]
        }"#;

        let profile: StudentProfile = from_lenient_json(body).expect("profile should decode");
        assert_eq!(profile.detail.user_id, "42");
        assert_eq!(profile.all_recent_actions_detailed.len(), 1);
        assert_eq!(profile.all_recent_actions_detailed[0].course_id, Some(3));
    }
}
