pub mod calendar_view;
pub mod host;
pub mod render;
