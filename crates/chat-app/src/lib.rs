#![deny(unsafe_code)]

/// Desktop chat widget built with GPUI and gpui-component.
///
/// The view layer only; conversation state lives in `nova-conversation` and
/// the wire client in `nova-transport`.
pub mod app;
/// Chat views and the events wiring them together.
pub mod chat;
pub mod theme;
