//! RunAnalysisHandler - Query handler for one inferential test or reliability check.
//!
//! Loads participants through the reader, scores them, builds the samples the
//! request names, and hands them to the statistics engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::samples::{ScoredParticipants, Variable};
use super::AnalysisError;
use crate::config::AnalysisConfig;
use crate::domain::statistics::{
    chi_squared_test, domain_reliability, kruskal_wallis, labelled_welch_t_test, linear_regression,
    mann_whitney_u, one_way_anova, pearson_correlation, GroupedSample, StatisticsError, TestResult,
};
use crate::domain::survey::ScoreDomain;
use crate::ports::{ParticipantFilter, ParticipantReader};

/// Test used to compare two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoGroupMethod {
    #[default]
    Welch,
    MannWhitney,
}

/// Test used to compare two or more groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiGroupMethod {
    #[default]
    Anova,
    KruskalWallis,
}

/// What to analyse.
///
/// Groups are the categories of a socioeconomic field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
    CompareTwoGroups {
        variable: Variable,
        field: String,
        group_a: String,
        group_b: String,
        #[serde(default)]
        method: TwoGroupMethod,
    },
    CompareGroups {
        variable: Variable,
        field: String,
        #[serde(default)]
        method: MultiGroupMethod,
    },
    Correlate {
        x: Variable,
        y: Variable,
    },
    Regress {
        x: Variable,
        y: Variable,
    },
    CrossTabulate {
        row_field: String,
        column_field: String,
    },
    Reliability {
        domain: ScoreDomain,
    },
}

/// Query to run one analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisQuery {
    pub filter: ParticipantFilter,
    pub request: AnalysisRequest,
}

impl RunAnalysisQuery {
    /// Runs the request over every participant.
    pub fn new(request: AnalysisRequest) -> Self {
        Self {
            filter: ParticipantFilter::all(),
            request,
        }
    }
}

/// Result of an analysis query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub participant_count: usize,
    pub result: TestResult,
}

/// Handler for analysis requests.
///
/// Significance level, post-hoc and minimum group size come from `AnalysisConfig`.
pub struct RunAnalysisHandler {
    reader: Arc<dyn ParticipantReader>,
    config: AnalysisConfig,
}

impl RunAnalysisHandler {
    pub fn new(reader: Arc<dyn ParticipantReader>, config: AnalysisConfig) -> Self {
        Self { reader, config }
    }

    pub async fn handle(&self, query: RunAnalysisQuery) -> Result<AnalysisOutcome, AnalysisError> {
        let records = self.reader.list_participants(&query.filter).await?;
        let scored = ScoredParticipants::new(&records);

        let result = if scored.is_empty() {
            TestResult::InsufficientData {
                message: "No participants match the filter".to_string(),
            }
        } else {
            self.run(&query.request, &scored)?
        };

        self.log_outcome(&query.request, &result, scored.len());

        Ok(AnalysisOutcome {
            participant_count: scored.len(),
            result,
        })
    }

    fn run(
        &self,
        request: &AnalysisRequest,
        scored: &ScoredParticipants<'_>,
    ) -> Result<TestResult, AnalysisError> {
        let alpha = self.config.significance_level;

        let result: TestResult = match request {
            AnalysisRequest::CompareTwoGroups {
                variable,
                field,
                group_a,
                group_b,
                method,
            } => {
                scored.require_variable(variable)?;
                scored.require_field(field)?;
                if group_a.trim() == group_b.trim() {
                    return Ok(StatisticsError::invalid(format!(
                        "Cannot compare group '{}' of '{}' with itself",
                        group_a.trim(),
                        field
                    ))
                    .into());
                }
                let groups = scored.grouped(field, variable);
                let a = self.group_sample(&groups, field, group_a)?;
                let b = self.group_sample(&groups, field, group_b)?;
                match method {
                    TwoGroupMethod::Welch => {
                        labelled_welch_t_test(
                            (group_a.as_str(), a.as_slice()),
                            (group_b.as_str(), b.as_slice()),
                            alpha,
                        )
                        .into()
                    }
                    TwoGroupMethod::MannWhitney => mann_whitney_u(&a, &b, alpha).into(),
                }
            }
            AnalysisRequest::CompareGroups {
                variable,
                field,
                method,
            } => {
                scored.require_variable(variable)?;
                scored.require_field(field)?;
                let mut groups = scored.grouped(field, variable);
                groups.retain(|_, sample| sample.len() >= self.config.min_group_size);
                match method {
                    MultiGroupMethod::Anova => {
                        one_way_anova(&groups, alpha, self.config.post_hoc).into()
                    }
                    MultiGroupMethod::KruskalWallis => kruskal_wallis(&groups, alpha).into(),
                }
            }
            AnalysisRequest::Correlate { x, y } => {
                scored.require_variable(x)?;
                scored.require_variable(y)?;
                let (xs, ys) = scored.paired(x, y);
                pearson_correlation(&xs, &ys, alpha).into()
            }
            AnalysisRequest::Regress { x, y } => {
                scored.require_variable(x)?;
                scored.require_variable(y)?;
                let (xs, ys) = scored.paired(x, y);
                linear_regression(&xs, &ys, alpha).into()
            }
            AnalysisRequest::CrossTabulate {
                row_field,
                column_field,
            } => {
                scored.require_field(row_field)?;
                scored.require_field(column_field)?;
                chi_squared_test(
                    &scored.categorical(row_field),
                    &scored.categorical(column_field),
                    alpha,
                )
                .into()
            }
            AnalysisRequest::Reliability { domain } => {
                domain_reliability(scored.records().map(|r| &r.responses), *domain).into()
            }
        };

        Ok(result)
    }

    /// The group's sample, emptied when it is below the minimum group size.
    fn group_sample(
        &self,
        groups: &GroupedSample,
        field: &str,
        label: &str,
    ) -> Result<Vec<f64>, AnalysisError> {
        let sample = groups
            .get(label.trim())
            .ok_or_else(|| AnalysisError::UnknownGroup {
                field: field.to_string(),
                label: label.to_string(),
            })?;

        if sample.len() < self.config.min_group_size {
            Ok(Vec::new())
        } else {
            Ok(sample.clone())
        }
    }

    fn log_outcome(&self, request: &AnalysisRequest, result: &TestResult, participants: usize) {
        if let Some(message) = result.failure_message() {
            info!(
                test_type = result.test_type(),
                participants,
                reason = message,
                "Analysis produced no result"
            );
            return;
        }

        match result {
            TestResult::ChiSquared(chi) => {
                if let Some(warning) = &chi.warning {
                    warn!(cells = chi.table.cell_count(), "{}", warning);
                }
            }
            TestResult::CronbachAlpha(reliability) if reliability.alpha < 0.0 => {
                warn!(
                    alpha = reliability.alpha,
                    items = reliability.item_count,
                    "Negative Cronbach's alpha; items may be miskeyed"
                );
            }
            _ => {}
        }

        debug!(
            test_type = result.test_type(),
            participants,
            p_value = ?result.p_value(),
            significant = result.is_significant(),
            request = ?request,
            "Analysis completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::LikertValue;
    use crate::domain::survey::{
        ParticipantRecord, QuestionId, RawResponse, SocioeconomicRecord,
    };
    use crate::ports::ParticipantReaderError;
    use async_trait::async_trait;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct MockParticipantReader {
        records: Vec<ParticipantRecord>,
    }

    #[async_trait]
    impl ParticipantReader for MockParticipantReader {
        async fn list_participants(
            &self,
            _filter: &ParticipantFilter,
        ) -> Result<Vec<ParticipantRecord>, ParticipantReaderError> {
            Ok(self.records.clone())
        }
    }

    /// Social domain answered uniformly; the score is (value - 1) * 25.
    fn participant(social: u8, sex: &str, age: f64) -> ParticipantRecord {
        let value = LikertValue::try_new(social).unwrap();
        let responses = [QuestionId::Q20, QuestionId::Q21, QuestionId::Q22]
            .iter()
            .fold(RawResponse::new(), |r, &q| r.answer(q, value));
        ParticipantRecord::new(responses).with_socioeconomic(
            SocioeconomicRecord::new()
                .with_category("sex", sex)
                .with_number("age", age),
        )
    }

    fn cohort() -> Vec<ParticipantRecord> {
        vec![
            participant(1, "M", 20.0),
            participant(2, "M", 25.0),
            participant(1, "M", 30.0),
            participant(2, "M", 35.0),
            participant(4, "F", 40.0),
            participant(5, "F", 45.0),
            participant(4, "F", 50.0),
            participant(5, "F", 55.0),
        ]
    }

    fn handler_with(records: Vec<ParticipantRecord>, config: AnalysisConfig) -> RunAnalysisHandler {
        RunAnalysisHandler::new(Arc::new(MockParticipantReader { records }), config)
    }

    fn handler(records: Vec<ParticipantRecord>) -> RunAnalysisHandler {
        handler_with(records, AnalysisConfig::default())
    }

    fn compare_sex(method: TwoGroupMethod) -> AnalysisRequest {
        AnalysisRequest::CompareTwoGroups {
            variable: ScoreDomain::Social.into(),
            field: "sex".to_string(),
            group_a: "F".to_string(),
            group_b: "M".to_string(),
            method,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn welch_compares_groups_of_a_field() {
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(compare_sex(TwoGroupMethod::Welch)))
            .await
            .unwrap();

        assert_eq!(outcome.participant_count, 8);
        match outcome.result {
            TestResult::TTest(t) => {
                assert_eq!(t.group_a.label, "F");
                assert_eq!(t.group_a.mean, 87.5);
                assert_eq!(t.group_b.mean, 12.5);
                assert!(t.significant);
            }
            other => panic!("expected t-test, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn mann_whitney_on_request() {
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(compare_sex(TwoGroupMethod::MannWhitney)))
            .await
            .unwrap();

        match outcome.result {
            TestResult::MannWhitneyU(u) => {
                assert_eq!(u.u_statistic, 0.0);
                assert_eq!(u.u_a + u.u_b, 16.0);
            }
            other => panic!("expected Mann-Whitney, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_group_is_an_error() {
        let request = AnalysisRequest::CompareTwoGroups {
            variable: ScoreDomain::Social.into(),
            field: "sex".to_string(),
            group_a: "F".to_string(),
            group_b: "X".to_string(),
            method: TwoGroupMethod::Welch,
        };
        let result = handler(cohort()).handle(RunAnalysisQuery::new(request)).await;
        assert!(matches!(
            result,
            Err(AnalysisError::UnknownGroup { label, .. }) if label == "X"
        ));
    }

    #[tokio::test]
    async fn comparing_a_group_with_itself_is_invalid_input() {
        for method in [TwoGroupMethod::Welch, TwoGroupMethod::MannWhitney] {
            let request = AnalysisRequest::CompareTwoGroups {
                variable: ScoreDomain::Social.into(),
                field: "sex".to_string(),
                group_a: "F".to_string(),
                group_b: " F ".to_string(),
                method,
            };
            let outcome = handler(cohort())
                .handle(RunAnalysisQuery::new(request))
                .await
                .unwrap();
            assert!(matches!(outcome.result, TestResult::InvalidInput { .. }));
        }
    }

    #[tokio::test]
    async fn small_groups_are_dropped_before_testing() {
        let config = AnalysisConfig {
            min_group_size: 5,
            ..Default::default()
        };
        let outcome = handler_with(cohort(), config)
            .handle(RunAnalysisQuery::new(compare_sex(TwoGroupMethod::Welch)))
            .await
            .unwrap();

        assert!(matches!(outcome.result, TestResult::InsufficientData { .. }));
    }

    #[tokio::test]
    async fn anova_across_categories() {
        let request = AnalysisRequest::CompareGroups {
            variable: ScoreDomain::Social.into(),
            field: "sex".to_string(),
            method: MultiGroupMethod::Anova,
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();

        match outcome.result {
            TestResult::Anova(anova) => {
                assert_eq!(anova.groups.len(), 2);
                assert!(anova.significant);
                assert!(anova.post_hoc.is_some());
            }
            other => panic!("expected ANOVA, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn kruskal_wallis_on_request() {
        let request = AnalysisRequest::CompareGroups {
            variable: ScoreDomain::Social.into(),
            field: "sex".to_string(),
            method: MultiGroupMethod::KruskalWallis,
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();
        assert_eq!(outcome.result.test_type(), "kruskalWallis");
    }

    #[tokio::test]
    async fn correlates_numeric_field_with_domain() {
        let request = AnalysisRequest::Correlate {
            x: Variable::field("age"),
            y: ScoreDomain::Social.into(),
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();

        match outcome.result {
            TestResult::Correlation(c) => {
                assert_eq!(c.n, 8);
                assert!(c.r.unwrap() > 0.8);
            }
            other => panic!("expected correlation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn regresses_domain_on_field() {
        let request = AnalysisRequest::Regress {
            x: Variable::field("age"),
            y: ScoreDomain::Social.into(),
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();

        match outcome.result {
            TestResult::Regression(r) => assert!(r.slope > 0.0),
            other => panic!("expected regression, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cross_tabulating_a_field_with_itself_is_invalid_input() {
        let request = AnalysisRequest::CrossTabulate {
            row_field: "sex".to_string(),
            column_field: "sex".to_string(),
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();
        assert!(matches!(outcome.result, TestResult::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn unknown_variable_field_is_an_error() {
        let request = AnalysisRequest::Correlate {
            x: Variable::field("income"),
            y: ScoreDomain::Social.into(),
        };
        let result = handler(cohort()).handle(RunAnalysisQuery::new(request)).await;
        assert!(matches!(result, Err(AnalysisError::UnknownField(_))));
    }

    #[tokio::test]
    async fn reliability_of_a_domain() {
        let request = AnalysisRequest::Reliability {
            domain: ScoreDomain::Social,
        };
        let outcome = handler(cohort())
            .handle(RunAnalysisQuery::new(request))
            .await
            .unwrap();

        match outcome.result {
            TestResult::CronbachAlpha(alpha) => {
                assert_eq!(alpha.complete_cases, 8);
                assert!((alpha.alpha - 1.0).abs() < 1e-12);
            }
            other => panic!("expected Cronbach's alpha, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_population_is_insufficient_data() {
        let outcome = handler(Vec::new())
            .handle(RunAnalysisQuery::new(compare_sex(TwoGroupMethod::Welch)))
            .await
            .unwrap();

        assert_eq!(outcome.participant_count, 0);
        assert!(matches!(outcome.result, TestResult::InsufficientData { .. }));
    }

    #[test]
    fn request_deserializes_from_tagged_json() {
        let json = r#"{
            "kind": "compare_groups",
            "variable": { "domain": "physical" },
            "field": "education"
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            AnalysisRequest::CompareGroups {
                variable: ScoreDomain::Physical.into(),
                field: "education".to_string(),
                method: MultiGroupMethod::Anova,
            }
        );
    }
}
