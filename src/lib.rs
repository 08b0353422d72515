//! Headless client for an attendance-tracking REST API: session storage,
//! typed gateway functions, geolocation/capture adapters, per-screen form
//! controllers, a paginated report query controller and route guards. All
//! business logic lives on the server; this crate orchestrates forms,
//! notifications and navigation around it.

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod geo;
pub mod models;
pub mod notify;
pub mod report;
pub mod routes;
pub mod session;
