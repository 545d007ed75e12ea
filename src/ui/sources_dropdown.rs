// SPDX-License-Identifier: MPL-2.0
//! Dropdown panel listing the ingested sources.
//!
//! The panel owns no state of its own: it renders a [`SourceBrowser`] and
//! turns clicks into [`Event`]s for the application, which runs the page
//! loads and the confirmed deletions.

use crate::i18n::fluent::I18n;
use crate::sources::{PageRequest, SourceBrowser};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, scrollable, text_input, Column, Row, Space, Text};
use iced::{alignment::Vertical, Element, Length, Padding};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub browser: &'a SourceBrowser,
    /// Currently selected chat filter, highlighted in the list.
    pub filter: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SearchChanged(String),
    ClearSearch,
    Select(String),
    Delete(String),
    PreviousPage,
    NextPage,
    Close,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Load the page described by the request.
    Fetch(PageRequest),
    /// Restrict the chat to this source.
    Select(String),
    /// Ask the user to confirm deleting this source.
    ConfirmDelete(String),
}

/// Process a dropdown message against the browser state.
pub fn update(message: Message, browser: &mut SourceBrowser) -> Event {
    match message {
        Message::SearchChanged(term) => Event::Fetch(browser.set_search(term)),
        Message::ClearSearch => Event::Fetch(browser.clear_search()),
        Message::Select(source) => {
            browser.close();
            Event::Select(source)
        }
        Message::Delete(source) => Event::ConfirmDelete(source),
        Message::PreviousPage => browser.previous_page().map_or(Event::None, Event::Fetch),
        Message::NextPage => browser.next_page().map_or(Event::None, Event::Fetch),
        Message::Close => {
            browser.close();
            Event::None
        }
    }
}

/// Render the panel, or nothing when the dropdown is closed.
#[must_use]
pub fn view_panel(ctx: ViewContext<'_>) -> Option<Element<'_, Message>> {
    if !ctx.browser.is_open() {
        return None;
    }
    Some(build_panel(&ctx))
}

fn build_panel<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let search = Row::new()
        .spacing(spacing::XXS)
        .align_y(Vertical::Center)
        .push(
            text_input(&ctx.i18n.tr("search-placeholder"), ctx.browser.search())
                .on_input(Message::SearchChanged)
                .size(typography::BODY)
                .padding(spacing::XS)
                .width(Length::Fill),
        )
        .push(
            button(Text::new("×").size(typography::BODY_LG))
                .on_press_maybe(
                    (!ctx.browser.search().is_empty()).then_some(Message::ClearSearch),
                )
                .padding([0.0, spacing::XS])
                .style(styles::button::plain),
        );

    let list: Element<'a, Message> = if ctx.browser.items().is_empty() {
        Text::new(ctx.i18n.tr("sources-no-found"))
            .size(typography::BODY)
            .into()
    } else {
        let rows = ctx
            .browser
            .items()
            .iter()
            .map(|source| build_row(ctx, source));
        scrollable(Column::with_children(rows).spacing(spacing::XXS))
            .height(Length::Shrink)
            .into()
    };

    let pagination = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(
            button(Text::new(ctx.i18n.tr("sources-prev")).size(typography::CAPTION))
                .on_press_maybe(ctx.browser.has_previous().then_some(Message::PreviousPage))
                .style(styles::button::secondary),
        )
        .push(Space::new().width(Length::Fill))
        .push(Text::new(page_label(ctx.i18n, ctx.browser)).size(typography::CAPTION))
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new(ctx.i18n.tr("sources-next")).size(typography::CAPTION))
                .on_press_maybe(ctx.browser.has_next().then_some(Message::NextPage))
                .style(styles::button::secondary),
        );

    let content = Column::new()
        .spacing(spacing::SM)
        .push(search)
        .push(list)
        .push(pagination);

    container(content)
        .padding(Padding::new(spacing::SM))
        .width(Length::Fixed(sizing::DROPDOWN_WIDTH))
        .style(styles::container::panel)
        .into()
}

fn build_row<'a>(ctx: &ViewContext<'a>, source: &'a str) -> Element<'a, Message> {
    let selected = source == ctx.filter;
    let label = Text::new(source).size(typography::BODY);

    let select = button(label)
        .on_press(Message::Select(source.to_string()))
        .width(Length::Fill)
        .padding(spacing::XXS)
        .style(if selected {
            styles::button::secondary
        } else {
            styles::button::plain
        });

    let delete = button(Text::new(ctx.i18n.tr("sources-delete")).size(typography::CAPTION))
        .on_press(Message::Delete(source.to_string()))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::danger);

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(select)
        .push(delete)
        .into()
}

fn page_label(i18n: &I18n, browser: &SourceBrowser) -> String {
    let page = (browser.page() + 1).to_string();
    let pages = browser.page_count().to_string();
    i18n.tr_with_args("sources-page", &[("page", &page), ("pages", &pages)])
}
