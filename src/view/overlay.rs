use crossterm::style::Stylize;
use std::collections::BTreeSet;
use std::io::Write;

use crate::data::{CiSeverity, Overlay, Overlays};

/// The UI that owns the PR rows and draws annotations next to them.
pub trait OverlayHost {
    /// Replace annotations on the rows this host displays.
    fn render(&mut self, overlays: &Overlays);
    /// Remove all annotations.
    fn clear(&mut self);
}

/// Prints one `#<number><annotation>` line per annotated row.
pub struct TerminalHost<W> {
    out: W,
    rows: Option<BTreeSet<u64>>,
    rendered: Overlays,
    color: bool,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: None,
            rendered: Overlays::new(),
            color: false,
        }
    }

    /// Restrict output to these PR numbers. Empty means every PR.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = u64>) -> Self {
        let rows: BTreeSet<u64> = rows.into_iter().collect();
        self.rows = (!rows.is_empty()).then_some(rows);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn rendered(&self) -> &Overlays {
        &self.rendered
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn displays(&self, number: u64) -> bool {
        self.rows.as_ref().map_or(true, |rows| rows.contains(&number))
    }

    fn styled(&self, overlay: &Overlay) -> String {
        if !self.color {
            return overlay.text.clone();
        }
        match overlay.severity {
            Some(CiSeverity::Error) => overlay.text.as_str().red().to_string(),
            Some(CiSeverity::Warning) => overlay.text.as_str().yellow().to_string(),
            Some(CiSeverity::Success) => overlay.text.as_str().green().to_string(),
            None => overlay.text.clone(),
        }
    }

    fn write_rendered(&mut self) -> std::io::Result<()> {
        if self.rendered.is_empty() {
            writeln!(self.out, "No review or CI status to show")?;
        }
        let lines: Vec<String> = self
            .rendered
            .iter()
            .map(|(number, overlay)| format!("#{}{}", number, self.styled(overlay)))
            .collect();
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

impl<W: Write> OverlayHost for TerminalHost<W> {
    fn render(&mut self, overlays: &Overlays) {
        self.rendered = overlays
            .iter()
            .filter(|(number, _)| self.displays(**number))
            .map(|(number, overlay)| (*number, overlay.clone()))
            .collect();

        if let Err(e) = self.write_rendered() {
            tracing::warn!(error = %e, "failed to write overlays");
        }
    }

    fn clear(&mut self) {
        let count = self.rendered.len();
        self.rendered.clear();
        if let Err(e) = writeln!(self.out, "Cleared {} overlays", count) {
            tracing::warn!(error = %e, "failed to write overlays");
        }
    }
}
