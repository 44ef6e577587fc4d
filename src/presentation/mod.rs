// Presentation layer - HTTP handlers and HTML page
pub mod app_state;
pub mod handlers;
pub mod page;
