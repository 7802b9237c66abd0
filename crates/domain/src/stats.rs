//! Dashboard statistics types.

use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;

/// One slice of the disease distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseSlice {
    /// Disease name, or "Normal".
    pub name: String,
    /// Number of completed analyses with this finding.
    pub value: u64,
    /// Display color assigned by the server.
    #[serde(default)]
    pub color: String,
}

/// One point of the analyses-per-day trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Day label, e.g. "Mon".
    pub name: String,
    /// Total analyses completed that day.
    pub analyses: u64,
    /// Abnormal findings that day.
    pub abnormal: u64,
}

/// Aggregate statistics from `/dashboard/stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total completed analyses.
    pub total_analyses: u64,
    /// Completed analyses with abnormal findings.
    pub abnormal_cases: u64,
    /// Reported accuracy over confirmed predictions.
    pub accuracy_rate: f64,
    /// Users active in the last thirty days.
    pub active_users: u64,
    /// Most recent completed analyses.
    #[serde(default)]
    pub recent_analyses: Vec<Prediction>,
    /// Distribution of findings by disease.
    #[serde(default)]
    pub disease_distribution: Vec<DiseaseSlice>,
    /// Per-day analysis counts for the trailing week.
    #[serde(default)]
    pub monthly_trends: Vec<TrendPoint>,
}

impl DashboardStats {
    /// Share of abnormal cases among all completed analyses.
    #[must_use]
    pub fn abnormal_ratio(&self) -> f64 {
        if self.total_analyses == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                self.abnormal_cases as f64 / self.total_analyses as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_deserialize_minimal() {
        let json = r#"{
            "total_analyses": 10,
            "abnormal_cases": 4,
            "accuracy_rate": 0.942,
            "active_users": 2
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.recent_analyses.len(), 0);
        assert!((stats.abnormal_ratio() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_abnormal_ratio_with_no_analyses() {
        let stats = DashboardStats {
            total_analyses: 0,
            abnormal_cases: 0,
            accuracy_rate: 0.0,
            active_users: 0,
            recent_analyses: vec![],
            disease_distribution: vec![],
            monthly_trends: vec![],
        };
        assert!(stats.abnormal_ratio().abs() < f64::EPSILON);
    }
}
