// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main action of a view (Send, Ingest, Confirm).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    filled(status, palette::PRIMARY_500, palette::PRIMARY_400, palette::PRIMARY_600)
}

/// Destructive action (Stop, Clear DB, Delete).
pub fn danger(_theme: &Theme, status: button::Status) -> button::Style {
    filled(
        status,
        palette::ERROR_500,
        Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::ERROR_500
        },
        palette::ERROR_500,
    )
}

/// Neutral action that follows the theme (Prev/Next, Cancel, Choose file).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let extended = theme.extended_palette();
    let (background, text_color) = match status {
        button::Status::Hovered => (
            extended.background.strong.color,
            extended.background.strong.text,
        ),
        button::Status::Disabled => (
            extended.background.weak.color,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..extended.background.weak.text
            },
        ),
        button::Status::Active | button::Status::Pressed => (
            extended.background.weak.color,
            extended.background.weak.text,
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: extended.background.strong.color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Text-only button used inside lists and toasts.
pub fn plain(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };
    let text_color = if status == button::Status::Disabled {
        Color {
            a: opacity::OVERLAY_MEDIUM,
            ..base.text
        }
    } else {
        base.text
    };

    button::Style {
        background,
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn filled(status: button::Status, base: Color, hover: Color, edge: Color) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(base)),
            text_color: WHITE,
            border: Border {
                color: edge,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(hover)),
            text_color: WHITE,
            border: Border {
                color: base,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::GRAY_200)),
            text_color: palette::GRAY_400,
            border: Border {
                color: palette::GRAY_400,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
