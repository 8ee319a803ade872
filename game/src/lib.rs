pub mod actor;
pub mod debug;
pub mod event;
pub mod geometry;
pub mod headful;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;
