pub mod app;
pub mod controls_panel;
pub mod fps_panel;
