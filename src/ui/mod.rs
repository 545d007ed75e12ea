// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one renders from a `ViewContext` and emits its own `Message`, which the
//! application maps into its own.
//!
//! # Components
//!
//! - [`navbar`] - Title, dashboard button, theme toggle and language picker
//! - [`toolbar`] - Source filter, ingestion and vector store reset
//! - [`sources_dropdown`] - Paginated, searchable list of ingested sources
//! - [`chat_view`] - Conversation bubbles and the message input
//! - [`dashboard`] - Backend health modal
//! - [`confirm_dialog`] - Confirmation of destructive actions
//! - [`notifications`] - Toast notification system for user feedback
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod chat_view;
pub mod confirm_dialog;
pub mod dashboard;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod sources_dropdown;
pub mod styles;
pub mod theming;
pub mod toolbar;
pub mod widgets;
