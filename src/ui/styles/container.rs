// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic raised surface for the toolbar, dropdown and dialogs.
///
/// The color is derived from the active Iced `Theme` background so panels
/// stay readable in both light and dark modes without hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(extended.background.base.color)),
        text_color: Some(extended.background.base.text),
        border: Border {
            color: extended.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Bar above the conversation.
pub fn toolbar(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(extended.background.weak.color)),
        text_color: Some(extended.background.weak.text),
        ..Default::default()
    }
}

pub fn user_bubble(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PRIMARY_500)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn assistant_bubble(theme: &Theme) -> container::Style {
    let (background, text_color) = if theme.extended_palette().is_dark {
        (palette::GRAY_800, palette::WHITE)
    } else {
        (palette::GRAY_100, palette::BLACK)
    };

    container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text_color),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Pill showing a health status, green when `up`.
pub fn status_badge(up: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| {
        let color = if up {
            palette::SUCCESS_500
        } else {
            palette::ERROR_500
        };
        container::Style {
            background: Some(Background::Color(color)),
            text_color: Some(palette::WHITE),
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Dimmed layer behind modal dialogs.
pub fn modal_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Toast card with a severity-colored outline.
pub fn toast(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let extended = theme.extended_palette();
        container::Style {
            background: Some(Background::Color(extended.background.base.color)),
            border: Border {
                color: accent,
                width: border::WIDTH_MD,
                radius: radius::MD.into(),
            },
            shadow: shadow::MD,
            text_color: Some(extended.background.base.text),
            ..Default::default()
        }
    }
}
