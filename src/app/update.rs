use crate::error::Result;
use crate::services::Fetcher;
use crate::view::OverlayHost;

use super::context::RepoContext;
use super::message::Message;
use super::model::App;

/// Apply a message to the app.
///
/// User-triggered messages return their errors. `RefreshEvent` logs and
/// continues so a background refresh never interrupts the host.
pub fn update<F, C, H>(app: &mut App<'_, F, C, H>, msg: Message) -> Result<()>
where
    F: Fetcher,
    C: RepoContext,
    H: OverlayHost,
{
    match msg {
        Message::Show => {
            app.show(false)?;
        }
        Message::ShowForced => {
            app.show(true)?;
        }
        Message::Clear => {
            app.host.clear();
        }
        Message::RefreshEvent => {
            if !app.auto_refresh {
                return Ok(());
            }
            if let Err(e) = app.show(false) {
                tracing::warn!(error = %e, "auto-refresh failed, keeping previous overlays");
                app.error = Some(e.to_string());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::tests::{fixture_records, FixtureFetcher};
    use crate::app::controller::OverlayController;
    use crate::data::{ActiveRepository, Overlays, Timestamp};
    use crate::error::Error;
    use crate::services::StatusCache;
    use std::cell::Cell;

    struct StubContext {
        key: Option<&'static str>,
        updated_at: Timestamp,
    }

    impl RepoContext for StubContext {
        fn active(&self) -> Result<ActiveRepository> {
            let key = self.key.ok_or(Error::NoActiveRepository)?;
            Ok(ActiveRepository {
                key: key.to_string(),
                updated_at: self.updated_at.clone(),
            })
        }
    }

    #[derive(Default)]
    struct MemoryHost {
        shown: Overlays,
        renders: Cell<usize>,
    }

    impl OverlayHost for MemoryHost {
        fn render(&mut self, overlays: &Overlays) {
            self.renders.set(self.renders.get() + 1);
            self.shown = overlays.clone();
        }

        fn clear(&mut self) {
            self.shown.clear();
        }
    }

    fn context() -> StubContext {
        StubContext {
            key: Some("octo/widgets"),
            updated_at: Timestamp::epoch(),
        }
    }

    #[test]
    fn show_renders_and_clear_removes() {
        let cache = StatusCache::new();
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let mut app = App::new(controller, context(), MemoryHost::default());

        update(&mut app, Message::Show).unwrap();
        assert_eq!(app.host.shown.len(), 3);

        update(&mut app, Message::Clear).unwrap();
        assert!(app.host.shown.is_empty());
        assert_eq!(cache.len(), 1);

        update(&mut app, Message::Show).unwrap();
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(app.host.shown.len(), 3);
    }

    #[test]
    fn forced_show_error_is_surfaced_and_display_kept() {
        let cache = StatusCache::new();
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let mut app = App::new(controller, context(), MemoryHost::default());

        update(&mut app, Message::Show).unwrap();
        fetcher.fail_next("rate limited");
        let err = update(&mut app, Message::ShowForced).unwrap_err();

        assert!(matches!(err, Error::Fetch { .. }));
        assert_eq!(app.host.shown.len(), 3);
        assert_eq!(app.host.renders.get(), 1);
    }

    #[test]
    fn no_active_repository_is_reported() {
        let cache = StatusCache::new();
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let ctx = StubContext {
            key: None,
            updated_at: Timestamp::epoch(),
        };
        let mut app = App::new(controller, ctx, MemoryHost::default());

        let err = update(&mut app, Message::Show).unwrap_err();
        assert!(matches!(err, Error::NoActiveRepository));
        assert_eq!(fetcher.calls.get(), 0);
        assert_eq!(app.host.renders.get(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn failed_update_time_lookup_is_not_served_from_cache() {
        use crate::app::GitRemoteContext;
        use crate::services::github::tests::fake_gh;
        use crate::services::GhCli;

        let dir = tempfile::tempdir().unwrap();
        let gh = fake_gh(dir.path(), "echo 'HTTP 503' >&2\nexit 1");
        let ctx = GitRemoteContext::new(GhCli::new().with_program(gh.to_string_lossy()))
            .with_repo(Some("octo/widgets".to_string()));

        let cache = StatusCache::new();
        cache.put("octo/widgets", fixture_records());
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let mut app = App::new(controller, ctx, MemoryHost::default());

        let err = update(&mut app, Message::Show).unwrap_err();
        assert!(matches!(err, Error::Fetch { ref message, .. } if message == "HTTP 503"));
        assert_eq!(fetcher.calls.get(), 0);
        assert_eq!(app.host.renders.get(), 0);

        // The same failure during auto-refresh is logged, not raised.
        app.auto_refresh = true;
        update(&mut app, Message::RefreshEvent).unwrap();
        assert!(app.error.as_deref().unwrap().contains("HTTP 503"));
        assert_eq!(app.host.renders.get(), 0);
    }

    #[test]
    fn refresh_event_ignored_without_auto_refresh() {
        let cache = StatusCache::new();
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let mut app = App::new(controller, context(), MemoryHost::default());

        update(&mut app, Message::RefreshEvent).unwrap();
        assert_eq!(fetcher.calls.get(), 0);
        assert!(app.host.shown.is_empty());
    }

    #[test]
    fn auto_refresh_logs_and_continues_on_failure() {
        let cache = StatusCache::new();
        let fetcher = FixtureFetcher::new(fixture_records());
        let controller = OverlayController::new(&cache, &fetcher, vec![]);
        let mut app =
            App::new(controller, context(), MemoryHost::default()).with_auto_refresh(true);

        update(&mut app, Message::RefreshEvent).unwrap();
        assert_eq!(app.host.shown.len(), 3);

        // Make the cached entry stale so the next event has to fetch.
        app.context.updated_at = Timestamp::parse("2999-01-01T00:00:00Z").unwrap();
        fetcher.fail_next("network down");

        update(&mut app, Message::RefreshEvent).unwrap();
        assert_eq!(fetcher.calls.get(), 2);
        assert_eq!(app.host.shown.len(), 3);
        assert!(app.error.as_deref().unwrap().contains("network down"));
    }
}
