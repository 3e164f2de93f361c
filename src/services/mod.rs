pub mod hotdoks;

pub mod dashboard_service;
pub mod refresh_monitor;
