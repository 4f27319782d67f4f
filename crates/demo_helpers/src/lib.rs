mod app;
pub use app::*;

pub mod input;
pub mod motion;

mod window_resizing;
pub use window_resizing::*;
