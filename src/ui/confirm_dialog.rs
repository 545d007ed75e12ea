// SPDX-License-Identifier: MPL-2.0
//! Yes/no confirmation for destructive actions.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Row, Space, Text};
use iced::{Element, Length, Padding};

/// Action waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    ClearStore,
    DeleteSource(String),
}

impl Pending {
    /// Localized question asked for this action.
    #[must_use]
    pub fn question(&self, i18n: &I18n) -> String {
        match self {
            Pending::ClearStore => i18n.tr("confirm-delete-vector"),
            Pending::DeleteSource(source) => {
                i18n.tr_with_args("confirm-delete-source", &[("source", source.as_str())])
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Confirm,
    Cancel,
}

pub fn view<'a>(i18n: &'a I18n, pending: &'a Pending) -> Element<'a, Message> {
    let actions = Row::new()
        .spacing(spacing::XS)
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new(i18n.tr("dialog-cancel")).size(typography::BODY))
                .on_press(Message::Cancel)
                .style(styles::button::secondary),
        )
        .push(
            button(Text::new(i18n.tr("dialog-confirm")).size(typography::BODY))
                .on_press(Message::Confirm)
                .style(styles::button::danger),
        );

    container(
        Column::new()
            .spacing(spacing::LG)
            .push(Text::new(pending.question(i18n)).size(typography::BODY_LG))
            .push(actions),
    )
    .padding(Padding::new(spacing::LG))
    .width(Length::Fixed(sizing::MODAL_WIDTH))
    .style(styles::container::panel)
    .into()
}
