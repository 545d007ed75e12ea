// SPDX-License-Identifier: MPL-2.0
//! Conversation area: message bubbles, the thinking indicator and the
//! input row.

use crate::chat::{ChatMessage, Conversation, Role};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, container, scrollable, text_input, Column, Row, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Color, Element, Length, Theme,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub conversation: &'a Conversation,
    pub input: &'a str,
    pub streaming: bool,
    pub can_send: bool,
    pub spinner_rotation: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Submit,
    Stop,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut messages = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .width(Length::Fill);

    for message in ctx.conversation.messages() {
        // The placeholder stays hidden until text arrives; the indicator stands in for it.
        if message.role == Role::Assistant && message.content.is_empty() {
            continue;
        }
        messages = messages.push(bubble(ctx.i18n, message));
    }

    if ctx.streaming {
        messages = messages.push(thinking(ctx.i18n, ctx.spinner_rotation));
    }

    let history = scrollable(messages)
        .anchor_bottom()
        .width(Length::Fill)
        .height(Length::Fill);

    Column::new()
        .push(history)
        .push(input_row(&ctx))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn bubble<'a>(i18n: &I18n, message: &'a ChatMessage) -> Element<'a, Message> {
    let (author, align, style): (String, Horizontal, fn(&Theme) -> container::Style) =
        match message.role {
            Role::User => (
                i18n.tr("role-user"),
                Horizontal::Right,
                styles::container::user_bubble,
            ),
            Role::Assistant => (
                i18n.tr("role-assistant"),
                Horizontal::Left,
                styles::container::assistant_bubble,
            ),
        };

    let caption = format!("{} · {}", author, message.sent_at.format("%H:%M"));
    let body = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(caption).size(typography::CAPTION))
        .push(Text::new(message.content.as_str()).size(typography::BODY_LG));

    let card = container(body)
        .padding(spacing::SM)
        .max_width(sizing::BUBBLE_MAX_WIDTH)
        .style(style);

    container(card).width(Length::Fill).align_x(align).into()
}

fn thinking<'a>(i18n: &I18n, rotation: f32) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(
            AnimatedSpinner::new(palette::PRIMARY_500, rotation)
                .size(sizing::ICON_SM)
                .into_element(),
        )
        .push(
            Text::new(i18n.tr("thinking"))
                .size(typography::BODY)
                .color(Color {
                    a: opacity::OVERLAY_STRONG,
                    ..palette::GRAY_400
                }),
        )
        .into()
}

fn input_row<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut input = text_input(&ctx.i18n.tr("input-placeholder"), ctx.input)
        .size(typography::BODY_LG)
        .padding(spacing::SM)
        .width(Length::Fill);
    if !ctx.streaming {
        input = input.on_input(Message::InputChanged);
        if ctx.can_send {
            input = input.on_submit(Message::Submit);
        }
    }

    let action = if ctx.streaming {
        button(Text::new(ctx.i18n.tr("stop-button")).size(typography::BODY))
            .on_press(Message::Stop)
            .padding([spacing::SM, spacing::MD])
            .style(styles::button::danger)
    } else {
        button(Text::new(ctx.i18n.tr("send-button")).size(typography::BODY))
            .on_press_maybe(ctx.can_send.then_some(Message::Submit))
            .padding([spacing::SM, spacing::MD])
            .style(styles::button::primary)
    };

    Row::new()
        .spacing(spacing::XS)
        .padding(spacing::MD)
        .align_y(Vertical::Center)
        .push(input)
        .push(action)
        .into()
}
