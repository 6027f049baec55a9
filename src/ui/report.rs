/// The Report screen
///
/// Renders every field of an `AnalysisReport` in the order the model
/// returned it. Scrollable, since summaries run long.
use chrono::{DateTime, Local};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::{card, ACCENT, BOLD, MUTED, TITLE};
use crate::state::AnalysisReport;
use crate::Message;

/// Shown under the reset button on every report
pub const DISCLAIMER: &str = "此报告由 AI 基于截图内容进行心理学推理，仅供个人成长参考";

pub fn view<'a>(report: &'a AnalysisReport, received_at: &DateTime<Local>) -> Element<'a, Message> {
    let header = column![
        text(format!("基于 {} 的深度分析", report.test_label()))
            .size(14)
            .font(BOLD)
            .color(ACCENT),
        text(format!("您是一个 {}", report.overall_title))
            .size(40)
            .font(BOLD)
            .color(TITLE),
        text(&report.summary)
            .size(17)
            .color(MUTED)
            .width(Length::Fill),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    let lists = row![
        list_section("核心行为特质", &report.traits),
        column![
            list_section("独特优势", &report.strengths),
            list_section("成长空间", &report.growth_areas),
        ]
        .spacing(20)
        .width(Length::FillPortion(1)),
    ]
    .spacing(20);

    let advice = row![
        text_section("人际沟通指南", &report.interpersonal_advice),
        text_section("职业发展建议", &report.career_advice),
    ]
    .spacing(20);

    let footer = column![
        button(text("开始新测试").size(16))
            .on_press(Message::Reset)
            .padding([10, 28]),
        text(DISCLAIMER).size(13).color(MUTED),
        text(generated_at(received_at)).size(12).color(MUTED),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    let content = column![header, lists, advice, footer]
        .spacing(32)
        .padding(40)
        .max_width(960.0);

    scrollable(
        container(content)
            .width(Length::Fill)
            .center_x(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

/// A titled card with one bullet per entry
fn list_section<'a>(title: &'a str, items: &'a [String]) -> Element<'a, Message> {
    let entries = items.iter().map(|item| -> Element<'a, Message> {
        row![
            text("•").color(ACCENT),
            text(item).size(15).color(TITLE).width(Length::Fill),
        ]
        .spacing(10)
        .into()
    });

    card(
        column![
            text(title).size(20).font(BOLD).color(TITLE),
            Column::with_children(entries).spacing(12),
        ]
        .spacing(16),
    )
    .width(Length::FillPortion(1))
    .into()
}

fn text_section<'a>(title: &'a str, body: &'a str) -> Element<'a, Message> {
    card(
        column![
            text(title).size(20).font(BOLD).color(TITLE),
            text(body).size(15).color(MUTED).width(Length::Fill),
        ]
        .spacing(16),
    )
    .width(Length::FillPortion(1))
    .into()
}

fn generated_at(received_at: &DateTime<Local>) -> String {
    format!("报告生成于 {}", received_at.format("%Y-%m-%d %H:%M"))
}
