use tracing::info;

use crate::dispatcher::ScrapeBackend;
use crate::error::FlowError;
use crate::platform::Platform;
use crate::session::{Completion, Session, ViewState};
use crate::view::View;

/// Page controller: routes user events into the session and performs the
/// fetch for each submission.
pub struct Page<B, V> {
    session: Session,
    backend: B,
    view: V,
}

impl<B: ScrapeBackend, V: View> Page<B, V> {
    pub fn new(backend: B, mut view: V) -> Self {
        let mut session = Session::new();
        session.mount(&mut view);
        Self {
            session,
            backend,
            view,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> ViewState {
        self.session.state()
    }

    pub fn input_url(&mut self, text: &str) {
        self.session.input_url(&mut self.view, text);
    }

    pub fn click_platform(&mut self, platform: Platform) {
        self.session.click_platform(&mut self.view, platform);
    }

    /// Submit the form and wait for the backend. Returns the failure that was
    /// shown to the user, if any.
    pub async fn submit(&mut self) -> Result<(), FlowError> {
        let pending = self.session.submit(&mut self.view)?;
        let outcome = self.backend.fetch(&pending.request).await;

        match self.session.complete(&mut self.view, pending.token, outcome) {
            Completion::Rendered => {
                info!("✅ Result rendered for {}", pending.request.raw_url);
                Ok(())
            }
            Completion::Failed(err) => Err(err),
            Completion::Stale => Ok(()),
        }
    }

    pub fn analyze_another(&mut self) -> bool {
        self.session.analyze_another(&mut self.view)
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
