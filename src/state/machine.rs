/// The three-state UI controller
///
/// `Idle -> Analyzing -> Report`, with every failure falling back to
/// `Idle` carrying a user-facing error. The state is a single tagged union
/// so a report screen without a report cannot be represented.
use chrono::{DateTime, Local};

use super::data::AnalysisReport;
use crate::analysis::AnalysisError;

/// Error shown on the upload screen after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    /// The service did not recognize the image as a test result
    NotPersonalityTest,
    /// Network, service or response failure
    AnalysisFailed,
    /// The picked file could not be read or is not an image
    FileUnreadable,
}

impl UserError {
    pub fn message(&self) -> &'static str {
        match self {
            UserError::NotPersonalityTest => {
                "检测到图片内容与性格测评结果不符。请上传包含测评分数或类型结果的截图。"
            }
            UserError::AnalysisFailed => {
                "分析过程中遇到错误，请重试。可能是图片太模糊或 API 连接异常。"
            }
            UserError::FileUnreadable => {
                "无法读取所选文件，请重新选择一张 PNG、JPG 或 WEBP 图片。"
            }
        }
    }
}

impl From<&AnalysisError> for UserError {
    fn from(err: &AnalysisError) -> Self {
        if err.is_local_input() {
            UserError::FileUnreadable
        } else {
            UserError::AnalysisFailed
        }
    }
}

/// Current screen
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Upload prompt, optionally with the error of the last attempt
    Idle { error: Option<UserError> },
    /// Exactly one analysis is in flight
    Analyzing,
    /// A report whose validity flag is true
    Report {
        report: Box<AnalysisReport>,
        received_at: DateTime<Local>,
    },
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Idle { error: None }
    }
}

/// Token for one analysis attempt; results carrying an older token are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt(u64);

/// Owns the `AppState` and applies the allowed transitions
#[derive(Debug, Default)]
pub struct Controller {
    state: AppState,
    attempts: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The report being shown, if any
    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            AppState::Report { report, .. } => Some(report.as_ref()),
            _ => None,
        }
    }

    /// The pending error on the upload screen, if any
    pub fn error(&self) -> Option<UserError> {
        match self.state {
            AppState::Idle { error } => error,
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, AppState::Analyzing)
    }

    /// Start an analysis. Only allowed from `Idle`; returns `None` and
    /// leaves the state alone otherwise.
    pub fn begin_analysis(&mut self) -> Option<Attempt> {
        match self.state {
            AppState::Idle { .. } => {
                self.attempts += 1;
                self.state = AppState::Analyzing;
                Some(Attempt(self.attempts))
            }
            _ => {
                tracing::warn!(state = self.state_name(), "analysis already in progress or report open");
                None
            }
        }
    }

    /// Apply the outcome of an analysis started with `begin_analysis`
    pub fn finish_analysis(
        &mut self,
        attempt: Attempt,
        result: Result<AnalysisReport, AnalysisError>,
    ) {
        if !self.is_busy() || attempt != Attempt(self.attempts) {
            tracing::debug!(state = self.state_name(), ?attempt, "dropping stale analysis result");
            return;
        }

        self.state = match result {
            Ok(report) if report.is_valid() => {
                tracing::info!(
                    test_type = %report.test_type,
                    title = %report.overall_title,
                    traits = report.traits.len(),
                    "analysis complete"
                );
                AppState::Report {
                    report: Box::new(report),
                    received_at: Local::now(),
                }
            }
            Ok(_) => {
                tracing::warn!("image was not recognized as a personality-test result");
                AppState::Idle {
                    error: Some(UserError::NotPersonalityTest),
                }
            }
            Err(err) => {
                if err.is_local_input() {
                    tracing::warn!(error = %err, "could not prepare image");
                } else {
                    tracing::error!(error = %err, "analysis failed");
                }
                AppState::Idle {
                    error: Some(UserError::from(&err)),
                }
            }
        };
    }

    /// Back to an empty upload screen, from any state
    pub fn reset(&mut self) {
        self.state = AppState::default();
    }

    /// Clear the error banner without leaving `Idle`
    pub fn dismiss_error(&mut self) {
        if let AppState::Idle { error } = &mut self.state {
            *error = None;
        }
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            AppState::Idle { .. } => "Idle",
            AppState::Analyzing => "Analyzing",
            AppState::Report { .. } => "Report",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::{disc_report, rejected_report};

    fn analyzing() -> (Controller, Attempt) {
        let mut controller = Controller::new();
        let attempt = controller.begin_analysis().unwrap();
        (controller, attempt)
    }

    #[test]
    fn test_starts_idle_without_error() {
        let controller = Controller::new();
        assert_eq!(controller.state(), &AppState::Idle { error: None });
        assert!(controller.report().is_none());
    }

    #[test]
    fn test_valid_report_is_shown_verbatim() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Ok(disc_report()));

        assert_eq!(controller.report(), Some(&disc_report()));
        assert_eq!(controller.report().unwrap().traits.len(), 8);
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_invalid_image_returns_to_idle() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Ok(rejected_report()));

        assert!(controller.report().is_none());
        assert_eq!(controller.error(), Some(UserError::NotPersonalityTest));
        assert!(!UserError::NotPersonalityTest.message().is_empty());
    }

    #[test]
    fn test_invalid_image_with_partial_fields_is_not_shown() {
        let mut partial = disc_report();
        partial.is_personality_test = false;

        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Ok(partial));

        assert!(controller.report().is_none());
        assert_eq!(controller.error(), Some(UserError::NotPersonalityTest));
    }

    #[test]
    fn test_transport_failure_message_differs_from_mismatch() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Err(AnalysisError::Transport("connection refused".into())));

        assert!(controller.report().is_none());
        let error = controller.error().unwrap();
        assert_eq!(error, UserError::AnalysisFailed);
        assert!(!error.message().is_empty());
        assert_ne!(error.message(), UserError::NotPersonalityTest.message());
    }

    #[test]
    fn test_malformed_response_is_treated_as_failure() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Err(AnalysisError::MalformedResponse("empty".into())));
        assert_eq!(controller.error(), Some(UserError::AnalysisFailed));
    }

    #[test]
    fn test_file_read_failure_has_its_own_message() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Err(AnalysisError::FileRead("denied".into())));

        let error = controller.error().unwrap();
        assert_eq!(error, UserError::FileUnreadable);
        assert_ne!(error.message(), UserError::AnalysisFailed.message());
        assert_ne!(error.message(), UserError::NotPersonalityTest.message());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Ok(rejected_report()));
        assert!(controller.error().is_some());

        assert!(controller.begin_analysis().is_some());
        assert!(controller.error().is_none());
        assert!(controller.is_busy());
    }

    #[test]
    fn test_no_second_analysis_while_busy() {
        let (mut controller, _attempt) = analyzing();
        assert!(controller.begin_analysis().is_none());
        assert!(controller.is_busy());
    }

    #[test]
    fn test_no_analysis_from_report() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Ok(disc_report()));
        assert!(controller.begin_analysis().is_none());
        assert!(controller.report().is_some());
    }

    #[test]
    fn test_reset_from_every_state() {
        let (mut from_report, attempt) = analyzing();
        from_report.finish_analysis(attempt, Ok(disc_report()));

        let (mut from_error, attempt) = analyzing();
        from_error.finish_analysis(attempt, Err(AnalysisError::Transport("x".into())));

        let (from_busy, _) = analyzing();
        let from_idle = Controller::new();

        for mut controller in [from_report, from_error, from_busy, from_idle] {
            controller.reset();
            assert_eq!(controller.state(), &AppState::Idle { error: None });
            assert!(controller.report().is_none());
            assert!(controller.error().is_none());
            controller.reset();
            assert_eq!(controller.state(), &AppState::Idle { error: None });
        }
    }

    #[test]
    fn test_stale_result_after_reset_is_ignored() {
        let (mut controller, attempt) = analyzing();
        controller.reset();
        controller.finish_analysis(attempt, Ok(disc_report()));

        assert_eq!(controller.state(), &AppState::Idle { error: None });
    }

    #[test]
    fn test_stale_result_does_not_finish_newer_attempt() {
        let (mut controller, first) = analyzing();
        controller.reset();
        let second = controller.begin_analysis().unwrap();

        controller.finish_analysis(first, Ok(disc_report()));
        assert!(controller.is_busy());

        controller.finish_analysis(second, Ok(rejected_report()));
        assert_eq!(controller.error(), Some(UserError::NotPersonalityTest));
    }

    #[test]
    fn test_dismiss_error() {
        let (mut controller, attempt) = analyzing();
        controller.finish_analysis(attempt, Err(AnalysisError::Transport("x".into())));
        controller.dismiss_error();
        assert_eq!(controller.state(), &AppState::Idle { error: None });
    }
}
