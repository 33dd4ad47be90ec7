//! Input handling: terminal key mapping, the event handler and key scripts.

pub mod handler;
pub mod keys;
pub mod script;

pub use handler::InputHandler;
pub use keys::InputEvent;
