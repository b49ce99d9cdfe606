//! Page session: the Form → Loading → Result state machine.
//!
//! All mutable page state lives here: the URL field, the platform selection,
//! the token of the in-flight request and the live chart. The session is
//! synchronous; whoever performs the fetch hands the outcome back through
//! [`Session::complete`] together with the token it was issued.

use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chart::{ChartData, ChartHandle, ChartSlot};
use crate::dispatcher::ScrapeRequest;
use crate::error::FlowError;
use crate::normalizer::{normalize, NormalizedResult, RawResult};
use crate::platform::{Platform, PlatformSelection};
use crate::view::{Field, Section, View, EMPTY_URL_PLACEHOLDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Form,
    Loading,
    Result,
}

/// Identifies one submission; only the latest one may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(Uuid);

impl RequestToken {
    fn issue() -> Self {
        RequestToken(Uuid::new_v4())
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission waiting for its backend response
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub request: ScrapeRequest,
}

/// What a completed response did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Result section shown
    Rendered,
    /// Back on the form, user notified
    Failed(FlowError),
    /// Superseded or unknown token; nothing changed
    Stale,
}

#[derive(Debug)]
pub struct Session {
    state: ViewState,
    selection: PlatformSelection,
    url_input: String,
    pending: Option<RequestToken>,
    chart: ChartSlot,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ViewState::Form,
            selection: PlatformSelection::default(),
            url_input: String::new(),
            pending: None,
            chart: ChartSlot::default(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn platform(&self) -> Platform {
        self.selection.current()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn chart_handle(&self) -> Option<ChartHandle> {
        self.chart.current()
    }

    /// Put the view into the initial form state.
    pub fn mount<V: View + ?Sized>(&mut self, view: &mut V) {
        view.hide(Section::Loading);
        view.hide(Section::Result);
        view.show(Section::Form);
        view.set_url_input(&self.url_input);
        view.highlight_platform(self.selection.current());
    }

    /// URL field edited: store the text and re-detect the platform.
    pub fn input_url<V: View + ?Sized>(&mut self, view: &mut V, text: &str) {
        self.url_input = text.to_string();
        let platform = self.selection.url_edited(text);
        view.highlight_platform(platform);
    }

    /// Platform control clicked: overrides detection until the URL changes.
    pub fn click_platform<V: View + ?Sized>(&mut self, view: &mut V, platform: Platform) {
        self.selection.manual_pick(platform);
        view.highlight_platform(platform);
    }

    /// Submit the form. On success the session is `Loading` and the caller
    /// must dispatch the returned request; any earlier token is invalidated.
    /// A rejected submission always leaves the form on screen.
    pub fn submit<V: View + ?Sized>(&mut self, view: &mut V) -> Result<PendingRequest, FlowError> {
        let request = match ScrapeRequest::new(self.selection.current(), &self.url_input) {
            Ok(request) => request,
            Err(err) => {
                warn!("⚠️ Submission rejected: {}", err);
                if self.state == ViewState::Result {
                    view.hide(Section::Result);
                    view.show(Section::Form);
                    self.transition(ViewState::Form);
                }
                view.flag_url_input(Some(EMPTY_URL_PLACEHOLDER));
                view.notify(&err.notification());
                return Err(err);
            }
        };

        if let Some(previous) = self.pending {
            debug!("Superseding pending request {}", previous);
        }
        let token = RequestToken::issue();
        self.pending = Some(token);

        view.flag_url_input(None);
        view.hide(Section::Form);
        view.hide(Section::Result);
        view.show(Section::Loading);
        self.transition(ViewState::Loading);

        info!("🚀 Submitting {} for {} ({})", request.raw_url, request.platform, token);
        Ok(PendingRequest { token, request })
    }

    /// Feed a backend outcome back. Outcomes for anything but the latest
    /// submission are dropped.
    pub fn complete<V: View + ?Sized>(
        &mut self,
        view: &mut V,
        token: RequestToken,
        outcome: Result<RawResult, FlowError>,
    ) -> Completion {
        if self.pending != Some(token) || self.state != ViewState::Loading {
            debug!("Ignoring stale response {}", token);
            return Completion::Stale;
        }
        self.pending = None;
        view.hide(Section::Loading);

        match outcome {
            Ok(raw) => {
                let result = normalize(&raw);
                self.render(view, &result);
                self.transition(ViewState::Result);
                Completion::Rendered
            }
            Err(err) => {
                warn!("❌ Submission failed ({}): {}", err.kind(), err);
                view.show(Section::Form);
                view.notify(&err.notification());
                self.transition(ViewState::Form);
                Completion::Failed(err)
            }
        }
    }

    /// "Analyze another": back to an empty, focused form. Only valid from `Result`.
    pub fn analyze_another<V: View + ?Sized>(&mut self, view: &mut V) -> bool {
        if self.state != ViewState::Result {
            return false;
        }
        view.hide(Section::Result);
        view.show(Section::Form);
        self.url_input.clear();
        view.set_url_input("");
        view.focus_url_input();
        self.transition(ViewState::Form);
        true
    }

    fn render<V: View + ?Sized>(&mut self, view: &mut V, result: &NormalizedResult) {
        let metadata = &result.metadata;
        view.set_text(Field::Title, metadata.title.as_deref());
        view.set_text(Field::Description, metadata.description.as_deref());
        view.set_image(metadata.image_url.as_deref());
        view.set_text(Field::Price, metadata.price.as_deref());
        let reviews = metadata.reviews_analyzed.map(|n| format!("{} reviews analyzed", n));
        view.set_text(Field::ReviewsAnalyzed, reviews.as_deref());

        let [positive, neutral, negative] = result.sentiment.percentages().texts();
        view.set_text(Field::PositivePct, Some(positive.as_str()));
        view.set_text(Field::NeutralPct, Some(neutral.as_str()));
        view.set_text(Field::NegativePct, Some(negative.as_str()));

        let data = ChartData::from(&result.sentiment);
        self.chart.replace(&mut *view, &data);
        view.show(Section::Result);
    }

    fn transition(&mut self, next: ViewState) {
        debug!("View state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
