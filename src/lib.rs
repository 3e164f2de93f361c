//! Library entrypoint for HotDoksBoard.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod models;

pub mod services;

// Keep these modules at crate root because the codebase references them as
// `crate::render` and `crate::templates`.
#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub hotdoks: services::hotdoks::HotdoksClient,
    pub store: Arc<services::refresh_monitor::DashboardStore>,
}
