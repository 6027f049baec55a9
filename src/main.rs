use iced::widget::column;
use iced::{time, Element, Subscription, Task, Theme};
use rfd::FileDialog;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod state;
mod ui;

use analysis::{AnalysisError, Analyzer, GeminiClient};
use state::{AnalysisReport, AppState, Attempt, Controller};
use ui::spinner::Spinner;

/// Spinner frame interval while analyzing
const TICK: Duration = Duration::from_millis(16);

/// Main application state
struct PersonaLens {
    /// Idle / Analyzing / Report
    controller: Controller,
    /// Backend that turns an image into a report
    analyzer: Arc<dyn Analyzer>,
    spinner: Spinner,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the upload button
    PickImage,
    /// Background analysis finished
    AnalysisComplete(Attempt, Result<AnalysisReport, AnalysisError>),
    /// Back to the upload screen
    Reset,
    /// Close the error banner
    DismissError,
    /// Spinner animation frame
    Tick,
}

impl PersonaLens {
    fn new() -> (Self, Task<Message>) {
        let settings = config::Settings::load();
        let analyzer: Arc<dyn Analyzer> = Arc::new(GeminiClient::new(settings));

        tracing::info!("persona-lens ready");

        (
            PersonaLens {
                controller: Controller::new(),
                analyzer,
                spinner: Spinner::default(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // The upload control only exists on the Idle screen
                if !matches!(self.controller.state(), AppState::Idle { .. }) {
                    return Task::none();
                }

                // A fresh dialog every time, so the same file can be picked again
                let file = FileDialog::new()
                    .set_title("选择测评结果截图")
                    .add_filter("图片", &analysis::encode::SUPPORTED_EXTENSIONS)
                    .pick_file();

                let Some(path) = file else {
                    return Task::none();
                };

                let Some(attempt) = self.controller.begin_analysis() else {
                    return Task::none();
                };

                tracing::info!(path = %path.display(), "image selected");
                self.spinner.reset();

                Task::perform(
                    analysis::analyze_file(Arc::clone(&self.analyzer), path),
                    move |result| Message::AnalysisComplete(attempt, result),
                )
            }
            Message::AnalysisComplete(attempt, result) => {
                self.controller.finish_analysis(attempt, result);
                Task::none()
            }
            Message::Reset => {
                self.controller.reset();
                Task::none()
            }
            Message::DismissError => {
                self.controller.dismiss_error();
                Task::none()
            }
            Message::Tick => {
                self.spinner.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let body = match self.controller.state() {
            AppState::Idle { .. } => ui::upload::view(self.controller.error()),
            AppState::Analyzing => ui::loading::view(self.spinner),
            AppState::Report {
                report,
                received_at,
            } => ui::report::view(report, received_at),
        };

        column![ui::top_bar(self.controller.is_busy()), body].into()
    }

    /// Animation ticks only while a request is in flight
    fn subscription(&self) -> Subscription<Message> {
        if self.controller.is_busy() {
            time::every(TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("persona_lens=info")),
        )
        .init();

    iced::application("AI 性格测评专家", PersonaLens::update, PersonaLens::view)
        .subscription(PersonaLens::subscription)
        .theme(PersonaLens::theme)
        .centered()
        .run_with(PersonaLens::new)
}
