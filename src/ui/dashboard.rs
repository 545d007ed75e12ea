// SPDX-License-Identifier: MPL-2.0
//! Backend health dashboard shown as a modal dialog.
//!
//! While open, metrics are reloaded on every poll tick and on demand.
//! Each load carries a sequence number so that an answer to an older load,
//! or one arriving after the dialog was closed, is dropped.

use crate::api::{format_bytes, format_uptime, Metrics};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, Column, Row, Space, Text};
use iced::{alignment::Vertical, Element, Length, Padding};

#[derive(Debug, Clone, Default)]
pub struct State {
    open: bool,
    metrics: Option<Metrics>,
    seq: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Close,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Load metrics, tagging the answer with this sequence number.
    Fetch(u64),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog with empty metrics and requests the first load.
    pub fn open(&mut self) -> u64 {
        self.open = true;
        self.metrics = None;
        self.next_seq()
    }

    pub fn close(&mut self) {
        self.open = false;
        // Invalidate the load in flight.
        self.seq += 1;
    }

    /// Requests a reload when the dialog is open.
    pub fn poll(&mut self) -> Option<u64> {
        self.open.then(|| self.next_seq())
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Refresh => self.poll().map_or(Event::None, Event::Fetch),
            Message::Close => {
                self.close();
                Event::None
            }
        }
    }

    /// Applies the answer to load `seq`. Returns the error to report, if
    /// the answer is current and failed.
    pub fn apply(&mut self, seq: u64, result: Result<Metrics, Error>) -> Option<Error> {
        if !self.open || seq != self.seq {
            return None;
        }
        match result {
            Ok(metrics) => {
                self.metrics = Some(metrics);
                None
            }
            Err(err) => Some(err),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Renders the dialog body; the caller places it above a backdrop.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("dashboard-title")).size(typography::TITLE_SM);

    let body: Element<'a, Message> = match ctx.state.metrics() {
        None => Text::new(ctx.i18n.tr("status-loading"))
            .size(typography::BODY)
            .into(),
        Some(metrics) => Column::new()
            .spacing(spacing::SM)
            .push(badge_row(ctx.i18n.tr("status-app"), &metrics.status))
            .push(badge_row(ctx.i18n.tr("status-ollama"), &metrics.ollama_status))
            .push(value_row(
                ctx.i18n.tr("status-uptime"),
                format_uptime(metrics.uptime_secs),
            ))
            .push(value_row(
                ctx.i18n.tr("status-memory"),
                format_bytes(metrics.memory_used_bytes),
            ))
            .into(),
    };

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new(ctx.i18n.tr("dashboard-refresh")).size(typography::BODY))
                .on_press(Message::Refresh)
                .style(styles::button::primary),
        )
        .push(
            button(Text::new(ctx.i18n.tr("dashboard-close")).size(typography::BODY))
                .on_press(Message::Close)
                .style(styles::button::secondary),
        );

    container(
        Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(body)
            .push(actions),
    )
    .padding(Padding::new(spacing::LG))
    .width(Length::Fixed(sizing::MODAL_WIDTH))
    .style(styles::container::panel)
    .into()
}

fn badge_row<'a>(label: String, status: &str) -> Element<'a, Message> {
    let badge = container(Text::new(status.to_string()).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::container::status_badge(Metrics::is_up(status)));

    Row::new()
        .align_y(Vertical::Center)
        .push(Text::new(label).size(typography::BODY))
        .push(Space::new().width(Length::Fill))
        .push(badge)
        .into()
}

fn value_row<'a>(label: String, value: String) -> Element<'a, Message> {
    Row::new()
        .align_y(Vertical::Center)
        .push(Text::new(label).size(typography::BODY))
        .push(Space::new().width(Length::Fill))
        .push(Text::new(value).size(typography::BODY))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(status: &str) -> Metrics {
        Metrics {
            status: status.into(),
            ollama_status: "UP".into(),
            uptime_secs: 61.0,
            memory_used_bytes: 1024.0 * 1024.0,
        }
    }

    #[test]
    fn opening_resets_metrics_and_requests_a_load() {
        let mut state = State::new();
        let seq = state.open();
        assert_eq!(state.apply(seq, Ok(metrics("UP"))), None);
        assert!(state.metrics().is_some());

        state.close();
        state.open();
        assert!(state.is_open());
        assert!(state.metrics().is_none());
    }

    #[test]
    fn answers_after_close_are_ignored() {
        let mut state = State::new();
        let seq = state.open();
        state.update(Message::Close);

        let err = Error::Http("refused".into());
        assert_eq!(state.apply(seq, Err(err)), None);
        assert!(state.metrics().is_none());
        assert!(!state.is_open());
    }

    #[test]
    fn stale_answers_are_ignored() {
        let mut state = State::new();
        let first = state.open();
        let Event::Fetch(second) = state.update(Message::Refresh) else {
            panic!("refresh should fetch while open");
        };

        assert_eq!(state.apply(first, Ok(metrics("DOWN"))), None);
        assert!(state.metrics().is_none());
        assert_eq!(state.apply(second, Ok(metrics("UP"))), None);
        assert_eq!(state.metrics().map(|m| m.status.as_str()), Some("UP"));
    }

    #[test]
    fn current_failure_is_reported_and_keeps_previous_metrics() {
        let mut state = State::new();
        let seq = state.open();
        state.apply(seq, Ok(metrics("UP")));

        let seq = state.poll().expect("open dialog polls");
        let err = Error::Server { status: 503 };
        assert_eq!(state.apply(seq, Err(err.clone())), Some(err));
        assert!(state.metrics().is_some());
    }

    #[test]
    fn closed_dialog_does_not_poll() {
        let mut state = State::new();
        assert_eq!(state.poll(), None);
        assert_eq!(state.update(Message::Refresh), Event::None);
    }
}
