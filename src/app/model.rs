use crate::error::Result;
use crate::services::Fetcher;
use crate::view::OverlayHost;

use super::context::RepoContext;
use super::controller::OverlayController;

pub struct App<'a, F, C, H> {
    pub controller: OverlayController<'a, F>,
    pub context: C,
    pub host: H,

    /// Whether host refresh events trigger a best-effort `Show`.
    pub auto_refresh: bool,

    /// Last error swallowed by a best-effort refresh.
    pub error: Option<String>,
}

impl<'a, F, C, H> App<'a, F, C, H>
where
    F: Fetcher,
    C: RepoContext,
    H: OverlayHost,
{
    pub fn new(controller: OverlayController<'a, F>, context: C, host: H) -> Self {
        Self {
            controller,
            context,
            host,
            auto_refresh: false,
            error: None,
        }
    }

    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Resolve the active repository, refresh, and hand the result to the host.
    /// On error nothing is rendered and the host keeps what it had.
    pub fn show(&mut self, force: bool) -> Result<usize> {
        let repo = self.context.active()?;
        let overlays = self
            .controller
            .refresh(&repo.key, &repo.updated_at, force)?;
        self.host.render(&overlays);
        self.error = None;
        Ok(overlays.len())
    }
}
