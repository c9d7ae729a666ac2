/// Entry points the host can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Show overlays, reusing the cache while it is valid.
    Show,
    /// Show overlays after an unconditional fetch.
    ShowForced,
    /// Remove every rendered overlay. The cache is untouched.
    Clear,
    /// Host-side refresh signal. Only acted on when auto-refresh is on.
    RefreshEvent,
}
