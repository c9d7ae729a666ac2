pub mod context;
pub mod controller;
pub mod message;
pub mod model;
pub mod update;

pub use context::{GitRemoteContext, RepoContext};
pub use controller::OverlayController;
pub use message::Message;
pub use model::App;
pub use update::update;
