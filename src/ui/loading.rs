/// The Analyzing screen: spinner plus waiting copy
use iced::widget::{canvas, column, container, text};
use iced::{Alignment, Element, Length};

use super::spinner::Spinner;
use super::{MUTED, TITLE};
use crate::Message;

pub fn view(spinner: Spinner) -> Element<'static, Message> {
    let content = column![
        canvas(spinner)
            .width(Length::Fixed(96.0))
            .height(Length::Fixed(96.0)),
        text("AI 心理专家正在深入解析您的性格色彩...")
            .size(22)
            .color(TITLE),
        text("正在通过心理学模型生成您的专属报告")
            .size(15)
            .color(MUTED),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
