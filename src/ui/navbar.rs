// SPDX-License-Identifier: MPL-2.0
//! Top bar with the application title, the dashboard button, the theme
//! toggle and the language picker.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, pick_list, tooltip, Container, Row, Space, Text},
    Element, Length,
};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub is_dark: bool,
}

/// Entry of the language picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub locale: LanguageIdentifier,
    pub label: String,
}

impl fmt::Display for LanguageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenDashboard,
    ToggleTheme,
    LanguageSelected(LanguageIdentifier),
}

/// Builds the picker entries, labelled in the current language.
#[must_use]
pub fn language_options(i18n: &I18n) -> Vec<LanguageOption> {
    i18n.available_locales
        .iter()
        .map(|locale| LanguageOption {
            locale: locale.clone(),
            label: i18n.tr(&format!("language-name-{locale}")),
        })
        .collect()
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("app-title")).size(typography::TITLE_MD);

    let dashboard_button = button(Text::new(ctx.i18n.tr("dashboard-open")).size(typography::BODY))
        .on_press(Message::OpenDashboard)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary);

    let theme_icon = if ctx.is_dark { "☀" } else { "☾" };
    let theme_button = button(Text::new(theme_icon).size(typography::BODY_LG))
        .on_press(Message::ToggleTheme)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary);
    let theme_button = tooltip(
        theme_button,
        Container::new(Text::new(ctx.i18n.tr("theme-toggle")).size(typography::CAPTION))
            .padding(spacing::XXS)
            .style(styles::container::panel),
        tooltip::Position::Bottom,
    );

    let options = language_options(ctx.i18n);
    let selected = options
        .iter()
        .find(|opt| &opt.locale == ctx.i18n.current_locale())
        .cloned();
    let language_picker = pick_list(options, selected, |opt: LanguageOption| {
        Message::LanguageSelected(opt.locale)
    })
    .placeholder(ctx.i18n.tr("language-label"))
    .text_size(typography::BODY)
    .padding(spacing::XXS)
    .width(Length::Fixed(sizing::LANGUAGE_PICKER_WIDTH));

    let row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(title)
        .push(Space::new().width(Length::Fill))
        .push(dashboard_button)
        .push(theme_button)
        .push(language_picker);

    Container::new(row)
        .width(Length::Fill)
        .align_x(Horizontal::Left)
        .style(styles::container::toolbar)
        .into()
}
