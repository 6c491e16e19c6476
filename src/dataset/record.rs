use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric measurement carried by every student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Attention,
    Focus,
    Comprehension,
    Retention,
    EngagementTime,
    AssessmentScore,
}

impl Metric {
    /// Metrics correlated pairwise, in output order
    pub const CORRELATION: [Metric; 6] = [
        Metric::Attention,
        Metric::Focus,
        Metric::Comprehension,
        Metric::Retention,
        Metric::EngagementTime,
        Metric::AssessmentScore,
    ];

    /// Regression features (design matrix column order after the intercept)
    pub const REGRESSION_FEATURES: [Metric; 5] = [
        Metric::Attention,
        Metric::Focus,
        Metric::Comprehension,
        Metric::Retention,
        Metric::EngagementTime,
    ];

    /// Features used for persona clustering
    ///
    /// Engagement time and the assessment score are excluded.
    pub const CLUSTER_FEATURES: [Metric; 4] = [
        Metric::Attention,
        Metric::Focus,
        Metric::Comprehension,
        Metric::Retention,
    ];

    /// Regression target
    pub const TARGET: Metric = Metric::AssessmentScore;

    /// Canonical column name, as used in CSV headers and JSON keys
    pub const fn name(self) -> &'static str {
        match self {
            Metric::Attention => "attention",
            Metric::Focus => "focus",
            Metric::Comprehension => "comprehension",
            Metric::Retention => "retention",
            Metric::EngagementTime => "engagement_time",
            Metric::AssessmentScore => "assessment_score",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::CORRELATION
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown metric `{}`", s))
    }
}

/// One row of the input dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecord {
    pub student_id: i64,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub attention: f64,
    pub focus: f64,
    pub comprehension: f64,
    pub retention: f64,
    pub engagement_time: f64,
    pub assessment_score: f64,
}

impl StudentRecord {
    /// Exact CSV header, in column order
    pub const HEADER: [&'static str; 9] = [
        "student_id",
        "name",
        "class",
        "attention",
        "focus",
        "comprehension",
        "retention",
        "engagement_time",
        "assessment_score",
    ];

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Attention => self.attention,
            Metric::Focus => self.focus,
            Metric::Comprehension => self.comprehension,
            Metric::Retention => self.retention,
            Metric::EngagementTime => self.engagement_time,
            Metric::AssessmentScore => self.assessment_score,
        }
    }

    /// Values of `metrics`, in the given order
    pub fn features(&self, metrics: &[Metric]) -> Vec<f64> {
        metrics.iter().map(|&m| self.value(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_match_header() {
        for metric in Metric::CORRELATION {
            assert!(StudentRecord::HEADER.contains(&metric.name()));
        }
    }

    #[test]
    fn test_metric_from_str_roundtrips_names() {
        assert_eq!("engagement_time".parse::<Metric>(), Ok(Metric::EngagementTime));
        assert!("score".parse::<Metric>().is_err());
    }

    #[test]
    fn test_cluster_features_exclude_engagement_and_target() {
        assert!(!Metric::CLUSTER_FEATURES.contains(&Metric::EngagementTime));
        assert!(!Metric::CLUSTER_FEATURES.contains(&Metric::TARGET));
    }

    #[test]
    fn test_features_follow_requested_order() {
        let record = StudentRecord {
            student_id: 1,
            name: "Ada".to_string(),
            class_name: "7A".to_string(),
            attention: 1.0,
            focus: 2.0,
            comprehension: 3.0,
            retention: 4.0,
            engagement_time: 5.0,
            assessment_score: 6.0,
        };
        assert_eq!(
            record.features(&[Metric::Retention, Metric::Attention]),
            vec![4.0, 1.0]
        );
    }

    #[test]
    fn test_metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::AssessmentScore).unwrap();
        assert_eq!(json, "\"assessment_score\"");
    }
}
