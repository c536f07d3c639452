//! SpaceX launch records dashboard.
//!
//! The dataset is loaded once and shared read-only. Two bindings turn the
//! current site / payload selection into chart specifications: a success
//! pie and a payload vs. outcome scatter. The `spacex-dash` binary renders
//! them with egui; `serve` hands them to Plotly.js over HTTP.

pub mod config;
pub mod controller;
pub mod data;
pub mod layout;
pub mod server;
pub mod view;
