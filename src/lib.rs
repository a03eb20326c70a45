pub mod annotation;
pub mod args;
pub mod camera;
pub mod config;
pub mod debounce;
pub mod detector;
pub mod dispatch;
pub mod draw;
pub mod driver;
pub mod font;
pub mod gesture;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod presenter;
pub mod session;
pub mod types;
