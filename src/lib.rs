pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod icons;
pub mod services;
pub mod utils;
pub mod view;

pub use app::{update, App, GitRemoteContext, Message, OverlayController, RepoContext};
pub use config::{get_config_path, load_config, Config};
pub use data::{Overlay, Overlays, PullRequestRecord, RecordSet, Timestamp};
pub use error::{Error, Result};
pub use services::{format_line, Fetcher, GhCli, StatusCache};
pub use view::{OverlayHost, TerminalHost};
