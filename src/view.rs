pub mod overlay;

pub use overlay::{OverlayHost, TerminalHost};
