// SPDX-License-Identifier: MPL-2.0
//! Bar above the conversation: source filter, sources dropdown toggle,
//! file ingestion and vector store reset.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::{
    alignment::Vertical,
    widget::{button, text_input, tooltip, Container, Row, Space, Text},
    Element, Length,
};

/// Contextual data needed to render the toolbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Source the chat is restricted to; empty for all sources.
    pub filter: &'a str,
    pub sources_open: bool,
    /// File name of the document picked for ingestion.
    pub selected_file: Option<&'a str>,
    /// i18n key of the running upload/delete status.
    pub status_key: Option<&'a str>,
    /// Spinner next to the status; only the vector store reset shows one.
    pub show_spinner: bool,
    pub can_ingest: bool,
    pub can_clear_store: bool,
    pub can_pick_file: bool,
    pub spinner_rotation: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    FilterChanged(String),
    ClearFilter,
    ToggleSources,
    PickFile,
    Ingest,
    ClearStore,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let filter_input = text_input(&ctx.i18n.tr("filter-placeholder"), ctx.filter)
        .on_input(Message::FilterChanged)
        .size(typography::BODY)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::FILTER_INPUT_WIDTH));

    let clear_filter = button(Text::new("×").size(typography::BODY_LG))
        .on_press_maybe((!ctx.filter.is_empty()).then_some(Message::ClearFilter))
        .padding([0.0, spacing::XS])
        .style(styles::button::plain);
    let clear_filter = tooltip(
        clear_filter,
        Container::new(Text::new(ctx.i18n.tr("filter-clear")).size(typography::CAPTION))
            .padding(spacing::XXS)
            .style(styles::container::panel),
        tooltip::Position::Bottom,
    );

    let toggle_label = format!(
        "{} {}",
        ctx.i18n.tr("sources-toggle"),
        if ctx.sources_open { "▴" } else { "▾" }
    );
    let sources_toggle = button(Text::new(toggle_label).size(typography::BODY))
        .on_press(Message::ToggleSources)
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::secondary);

    let pick_button = button(Text::new(ctx.i18n.tr("file-pick-button")).size(typography::BODY))
        .on_press_maybe(ctx.can_pick_file.then_some(Message::PickFile))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::secondary);

    let file_label = match ctx.selected_file {
        Some(name) => name.to_string(),
        None => ctx.i18n.tr("file-none-selected"),
    };

    let ingest_button = button(Text::new(ctx.i18n.tr("ingest-button")).size(typography::BODY))
        .on_press_maybe(ctx.can_ingest.then_some(Message::Ingest))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::primary);

    let clear_button = button(Text::new(ctx.i18n.tr("clear-db-button")).size(typography::BODY))
        .on_press_maybe(ctx.can_clear_store.then_some(Message::ClearStore))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::danger);

    let mut row = Row::new()
        .spacing(spacing::XS)
        .padding([spacing::XS, spacing::SM])
        .align_y(Vertical::Center)
        .push(filter_input)
        .push(clear_filter)
        .push(sources_toggle)
        .push(Space::new().width(Length::Fill))
        .push(pick_button)
        .push(Text::new(file_label).size(typography::CAPTION))
        .push(ingest_button)
        .push(clear_button);

    if ctx.show_spinner {
        row = row.push(
            AnimatedSpinner::new(palette::PRIMARY_500, ctx.spinner_rotation)
                .size(sizing::ICON_MD)
                .into_element(),
        );
    }
    if let Some(key) = ctx.status_key {
        row = row.push(Text::new(ctx.i18n.tr(key)).size(typography::CAPTION));
    }

    Container::new(row)
        .width(Length::Fill)
        .style(styles::container::toolbar)
        .into()
}
