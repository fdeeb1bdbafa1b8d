use tracing::{info, warn};

use crate::clients::AnalyticsClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::StudentDetail;
use crate::services::MappingCache;

/// Application shell: owns the shared components and wires them together.
///
/// The mapping cache is loaded here, once, before any request is served;
/// consumers receive it by reference rather than through global state.
pub struct App {
    mapping: MappingCache,
    analytics: AnalyticsClient,
}

impl App {
    /// Build the gateway and await the one-time mapping load.
    ///
    /// Only genuine misconfiguration (missing base URL upstream, client
    /// build failure) errors out here; a missing mapping file does not.
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let analytics = AnalyticsClient::new(&config)?;
        let mapping = MappingCache::load(&config).await;

        info!("{}", "=".repeat(60));
        info!("evasion gateway ready");
        info!("analytics API: {}", analytics.base_url());
        info!("professors mapped: {}", mapping.len());
        info!("{}", "=".repeat(60));

        Ok(Self { mapping, analytics })
    }

    pub fn mapping(&self) -> &MappingCache {
        &self.mapping
    }

    pub fn analytics(&self) -> &AnalyticsClient {
        &self.analytics
    }

    /// Print a dashboard snapshot: the aggregate report, plus the permitted
    /// risk list when a professor name is given.
    ///
    /// Degraded results render as "data unavailable" lines; nothing here
    /// can fail because of the remote dependency.
    pub async fn run(&self, professor_name: Option<&str>) -> AppResult<()> {
        match self.analytics.evasion_report().await {
            Some(report) => {
                info!(
                    "evasion report: {} students analyzed, {} at risk ({:.1}%)",
                    report.total_students_analyzed,
                    report.students_at_risk,
                    report.estimated_evasion_pct
                );
                for (course, summary) in &report.evasion_by_course {
                    info!(
                        "  {}: {}/{} at risk ({:.1}%)",
                        course, summary.students_at_risk, summary.total_students, summary.risk_pct
                    );
                }
            }
            None => warn!("evasion report unavailable"),
        }

        let Some(professor) = professor_name else {
            return Ok(());
        };

        let allowed = self.mapping.courses_for_professor(professor);
        if allowed.is_empty() {
            warn!("professor '{}' has no mapped courses", professor);
            return Ok(());
        }
        info!("professor '{}' may see {} courses", professor, allowed.len());

        match self.analytics.professor_evasion_risk(professor).await {
            Some(students) => {
                // filtering to the permitted courses happens here, on the
                // caller's side, not in the gateway
                let visible = filter_students_by_courses(students, allowed);
                info!(
                    "{} at-risk students visible to '{}'",
                    visible.len(),
                    professor
                );
                for student in &visible {
                    info!(
                        "  {} ({}): score {}, {:.1}%",
                        student.user_name,
                        student.user_id,
                        student.overall_evasion_score,
                        student.overall_evasion_risk_pct
                    );
                }
            }
            None => warn!("risk list unavailable for professor '{}'", professor),
        }

        Ok(())
    }
}

/// Keep only students with at least one per-course detail inside the
/// allowed course set. An empty allowed set keeps nobody.
pub fn filter_students_by_courses(
    students: Vec<StudentDetail>,
    allowed: &[String],
) -> Vec<StudentDetail> {
    students
        .into_iter()
        .filter(|student| {
            student
                .courses_details
                .iter()
                .any(|course| allowed.contains(&course.course_fullname))
        })
        .collect()
}
