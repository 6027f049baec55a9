/// The Idle screen: upload prompt, error banner and feature cards
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use super::{card, BOLD, MUTED, TITLE, WARNING};
use crate::state::UserError;
use crate::Message;

pub fn view(error: Option<UserError>) -> Element<'static, Message> {
    let header = column![
        text("看见真实的自己").size(48).font(BOLD).color(TITLE),
        text("上传您的性格测试结果截图（DISC、MBTI、九型人格等），让 AI 心理顾问为您揭示数据背后的性格深度、职业偏好与人际密码。")
            .size(18)
            .color(MUTED)
            .width(Length::Fixed(640.0)),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    let upload = card(
        column![
            text("📷").size(36),
            text("上传结果截图").size(18).font(BOLD).color(TITLE),
            text("支持 PNG, JPG, JPEG, WEBP 格式").size(13).color(MUTED),
            button(text("选择图片").size(16))
                .on_press(Message::PickImage)
                .padding([10, 24]),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fixed(480.0));

    let mut content: Column<Message> = column![header, upload]
        .spacing(40)
        .align_x(Alignment::Center);

    if let Some(error) = error {
        content = content.push(error_banner(error));
    }

    let features = row![
        feature("深度解读", "不仅是分数，更从心理学角度剖析您的潜意识行为模式。"),
        feature("职场指南", "提供精准的职业匹配建议与职场生存法则。"),
        feature("沟通策略", "针对您的性格特点，量身定制的人际互动方案。"),
    ]
    .spacing(20);

    container(content.push(features))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(40)
        .into()
}

fn error_banner(error: UserError) -> Element<'static, Message> {
    container(
        row![
            text(format!("⚠️ {}", error.message()))
                .size(14)
                .color(WARNING)
                .width(Length::Fill),
            button(text("×").size(14))
                .on_press(Message::DismissError)
                .style(button::text),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding(14)
    .width(Length::Fixed(480.0))
    .style(container::rounded_box)
    .into()
}

fn feature(title: &'static str, body: &'static str) -> Element<'static, Message> {
    card(
        column![
            text(title).size(16).font(BOLD).color(TITLE),
            text(body).size(13).color(MUTED),
        ]
        .spacing(8),
    )
    .width(Length::Fixed(220.0))
    .into()
}
