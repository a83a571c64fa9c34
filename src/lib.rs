//! paperpad: a freehand notepad with a paper background and a transparent writing layer.
//!
//! The library is headless. Both layers render into Cairo image surfaces, pointer
//! events arrive as plain values, and the writing layer exports as a transparent PNG
//! through the clipboard or a file fallback.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod notepad;
pub mod replay;

pub use config::Config;
pub use notepad::Notepad;
