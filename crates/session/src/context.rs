//! Composition-root wiring for gated surfaces.

use std::sync::Arc;

use crate::api::Navigator;
use crate::gate::GateController;
use crate::store::SessionStore;

/// Everything a gated surface needs, threaded explicitly from the
/// composition root.
///
/// Construction requires every dependency, so a missing one is a compile
/// error rather than a runtime lookup failure.
#[derive(Clone)]
pub struct PortalContext {
    pub session: SessionStore,
    pub navigator: Arc<dyn Navigator>,
    pub upsell_path: String,
}

impl PortalContext {
    pub fn new(
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        upsell_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            navigator,
            upsell_path: upsell_path.into(),
        }
    }

    /// A gate controller bound to this context's navigator and upsell path.
    pub fn gate(&self) -> GateController {
        GateController::new(self.navigator.clone(), self.upsell_path.clone())
    }
}
