//! Browser client for the tally todo
//! service: state sync against the REST
//! api plus the yew views that render it.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod coordinator;
pub mod drafts;
pub mod filters;
pub mod notify;
pub mod render;
pub mod store;

pub use app::App;
