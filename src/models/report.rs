use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::student::StudentDetail;

/// Aggregate evasion snapshot returned by `GET /api/evasion-report`.
///
/// The wire names are Portuguese; internal names are not. Every field
/// defaults when absent so a partial payload decodes instead of aborting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionReport {
    #[serde(rename = "total_alunos_analisados")]
    pub total_students_analyzed: i64,

    #[serde(rename = "alunos_em_risco")]
    pub students_at_risk: i64,

    #[serde(rename = "evasao_estimada_percentual")]
    pub estimated_evasion_pct: f64,

    /// Per-course summaries keyed by course full name. Keys are data and
    /// preserved verbatim from the wire.
    #[serde(rename = "evasao_por_curso")]
    pub evasion_by_course: HashMap<String, CourseEvasionSummary>,

    #[serde(rename = "alunos_detalhes")]
    pub student_details: Vec<StudentDetail>,
}

/// One course's slice of the aggregate report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseEvasionSummary {
    #[serde(rename = "total_alunos")]
    pub total_students: i64,

    #[serde(rename = "alunos_em_risco")]
    pub students_at_risk: i64,

    #[serde(rename = "percentual_risco")]
    pub risk_pct: f64,
}
