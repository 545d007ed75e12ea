// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The main column (navbar, toolbar, sources panel, conversation) sits at
//! the bottom of a stack; modal dialogs and the toast overlay are layered
//! above it.

use super::Message;
use crate::chat::{Activity, Conversation};
use crate::i18n::fluent::I18n;
use crate::sources::SourceBrowser;
use crate::ui::confirm_dialog::{self, Pending};
use crate::ui::dashboard;
use crate::ui::design_tokens::spacing;
use crate::ui::navbar;
use crate::ui::notifications::{Manager, Toast};
use crate::ui::sources_dropdown;
use crate::ui::styles;
use crate::ui::{chat_view, toolbar};
use iced::widget::{center, container, mouse_area, opaque, Column, Stack};
use iced::{Element, Length};
use std::path::Path;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub is_dark: bool,
    pub conversation: &'a Conversation,
    pub activity: &'a Activity,
    pub input: &'a str,
    pub filter: &'a str,
    pub browser: &'a SourceBrowser,
    pub selected_file: Option<&'a Path>,
    pub dashboard: &'a dashboard::State,
    pub pending_confirm: Option<&'a Pending>,
    pub notifications: &'a Manager,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(main_column(&ctx));

    if ctx.dashboard.is_open() {
        let dialog = dashboard::view(dashboard::ViewContext {
            i18n: ctx.i18n,
            state: ctx.dashboard,
        })
        .map(Message::Dashboard);
        stack = stack.push(modal(dialog, Message::Dashboard(dashboard::Message::Close)));
    }

    if let Some(pending) = ctx.pending_confirm {
        let dialog = confirm_dialog::view(ctx.i18n, pending).map(Message::Confirm);
        stack = stack.push(modal(dialog, Message::Confirm(confirm_dialog::Message::Cancel)));
    }

    stack
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .into()
}

fn main_column<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let navbar_view = navbar::view(navbar::ViewContext {
        i18n: ctx.i18n,
        is_dark: ctx.is_dark,
    })
    .map(Message::Navbar);

    let (status_key, show_spinner) = toolbar_status(ctx.activity);

    let toolbar_view = toolbar::view(toolbar::ViewContext {
        i18n: ctx.i18n,
        filter: ctx.filter,
        sources_open: ctx.browser.is_open(),
        selected_file: ctx
            .selected_file
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str()),
        status_key,
        show_spinner,
        can_ingest: ctx.activity.can_upload(ctx.selected_file.is_some()),
        can_clear_store: ctx.activity.can_clear_store(),
        can_pick_file: !ctx.activity.is_uploading(),
        spinner_rotation: ctx.spinner_rotation,
    })
    .map(Message::Toolbar);

    let chat = chat_view::view(chat_view::ViewContext {
        i18n: ctx.i18n,
        conversation: ctx.conversation,
        input: ctx.input,
        streaming: ctx.activity.is_streaming(),
        can_send: ctx.activity.can_send(ctx.input),
        spinner_rotation: ctx.spinner_rotation,
    })
    .map(Message::Chat);

    let mut column = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(navbar_view)
        .push(toolbar_view);

    if let Some(panel) = sources_dropdown::view_panel(sources_dropdown::ViewContext {
        i18n: ctx.i18n,
        browser: ctx.browser,
        filter: ctx.filter,
    }) {
        column = column.push(
            container(panel.map(Message::Sources)).padding([spacing::XXS, spacing::SM]),
        );
    }

    column.push(chat).into()
}

/// Status text of the toolbar and whether a spinner goes with it.
/// Uploads only show their text.
fn toolbar_status(activity: &Activity) -> (Option<&'static str>, bool) {
    if activity.is_uploading() {
        (Some("upload-uploading"), false)
    } else if activity.is_deleting() {
        (Some("delete-deleting"), true)
    } else {
        (None, false)
    }
}

/// Centers `dialog` above a dimmed backdrop; clicking the backdrop sends
/// `on_dismiss`.
fn modal<'a>(dialog: Element<'a, Message>, on_dismiss: Message) -> Element<'a, Message> {
    let backdrop = mouse_area(
        center(opaque(dialog))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::modal_backdrop),
    )
    .on_press(on_dismiss);

    opaque(backdrop)
}
