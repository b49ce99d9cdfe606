//! Presentation surface driven by the session.

use crate::chart::ChartSurface;
use crate::platform::Platform;

/// Top-level page sections; exactly one is visible per view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Form,
    Loading,
    Result,
}

/// Text elements of the result section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Price,
    ReviewsAnalyzed,
    PositivePct,
    NeutralPct,
    NegativePct,
}

/// Placeholder shown on the URL input when it is submitted empty.
pub const EMPTY_URL_PLACEHOLDER: &str = "Please enter a product URL!";

/// Commands the page emits. Implementations own the actual widgets.
pub trait View: ChartSurface {
    fn show(&mut self, section: Section);
    fn hide(&mut self, section: Section);

    /// Set a text element; `None` clears and hides it.
    fn set_text(&mut self, field: Field, text: Option<&str>);

    /// Set the product image; `None` hides it.
    fn set_image(&mut self, src: Option<&str>);

    fn set_url_input(&mut self, value: &str);
    fn focus_url_input(&mut self);

    /// Mark the URL input as invalid with a placeholder, or clear the mark.
    fn flag_url_input(&mut self, placeholder: Option<&str>);

    fn highlight_platform(&mut self, platform: Platform);

    /// Blocking user-facing notification.
    fn notify(&mut self, message: &str);
}
