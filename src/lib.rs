// SPDX-License-Identifier: MPL-2.0
//! `ragchat` is a desktop chat client for a retrieval-augmented chat
//! backend, built with the Iced GUI framework.
//!
//! It streams assistant answers as they are generated, manages the
//! documents ingested into the backend's vector store, and shows the
//! backend's health dashboard. The interface is localized with Fluent.

pub mod api;
pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod i18n;
pub mod sources;
pub mod ui;

#[cfg(test)]
mod test_utils;
