/// User interface module
///
/// One view per `AppState` variant plus the shared top bar:
/// - `upload.rs` - Idle: upload prompt and error banner
/// - `loading.rs` - Analyzing: canvas spinner
/// - `report.rs` - Report: the structured report
pub mod loading;
pub mod report;
pub mod spinner;
pub mod upload;

use iced::font::Weight;
use iced::widget::{button, container, horizontal_space, row, text, Container};
use iced::{Alignment, Color, Element, Font, Length};

use crate::Message;

pub const TITLE: Color = Color { r: 0.067, g: 0.094, b: 0.153, a: 1.0 };
pub const MUTED: Color = Color { r: 0.420, g: 0.447, b: 0.502, a: 1.0 };
pub const ACCENT: Color = Color { r: 0.310, g: 0.275, b: 0.898, a: 1.0 };
pub const WARNING: Color = Color { r: 0.761, g: 0.255, b: 0.047, a: 1.0 };

pub const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// Navigation bar shown on every screen
/// The reset button is disabled while an analysis is in flight
pub fn top_bar(busy: bool) -> Element<'static, Message> {
    let reset = button(text("开始新测试").size(14))
        .on_press_maybe((!busy).then_some(Message::Reset))
        .style(button::text);

    container(
        row![
            text("AI 性格测评专家").size(20).font(BOLD).color(TITLE),
            horizontal_space(),
            reset,
        ]
        .align_y(Alignment::Center),
    )
    .padding([14, 24])
    .width(Length::Fill)
    .into()
}

/// Rounded panel used for cards and report sections
pub fn card<'a>(content: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    container(content)
        .padding(24)
        .style(container::rounded_box)
}
