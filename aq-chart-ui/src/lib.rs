//! Shared Dioxus components and JS widget bridge for the air quality app.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js line chart and Leaflet grid
//!   widgets via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (forms, slider, legend, etc.)

pub mod components;
pub mod js_bridge;
pub mod state;
