use crate::local_store::WidgetStorage;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const AUTO_OPEN_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetView {
    Onboarding,
    Form,
    Success,
}

/// Session state for the floating widget: open flag, onboarding flag and
/// the view inside the panel. Lives for the whole session; there is no
/// terminal state.
#[derive(Debug)]
pub struct WidgetController {
    storage: Arc<WidgetStorage>,
    is_open: bool,
    has_completed_onboarding: bool,
    current_view: WidgetView,
}

impl WidgetController {
    /// Reads the persisted onboarding flag; returning visitors land on the
    /// form, first-time visitors on the onboarding view.
    pub async fn init(storage: Arc<WidgetStorage>) -> Self {
        let has_completed_onboarding = storage.onboarding_complete().await;
        let current_view = if has_completed_onboarding {
            WidgetView::Form
        } else {
            WidgetView::Onboarding
        };

        Self {
            storage,
            is_open: false,
            has_completed_onboarding,
            current_view,
        }
    }

    /// First-time visitors get the widget opened for them shortly after
    /// load; the host owns the timer.
    pub fn auto_open_delay(&self) -> Option<Duration> {
        (!self.has_completed_onboarding).then_some(AUTO_OPEN_DELAY)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_view(&self) -> WidgetView {
        self.current_view
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.has_completed_onboarding
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.current_view = if self.has_completed_onboarding {
            WidgetView::Form
        } else {
            WidgetView::Onboarding
        };
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn trigger_click(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn outside_click(&mut self) {
        self.close();
    }

    pub fn escape_key(&mut self) {
        self.close();
    }

    /// Leaves onboarding for good: the flag is persisted so later sessions
    /// land on the form. A persist failure never interrupts the session.
    pub async fn start_exploring(&mut self) {
        self.has_completed_onboarding = true;
        if let Err(err) = self.storage.set_onboarding_complete().await {
            warn!(error = %err, "failed to persist onboarding flag");
        }
        self.current_view = WidgetView::Form;
        self.close();
    }

    pub fn submit_another(&mut self) {
        self.current_view = WidgetView::Form;
    }

    pub fn submission_succeeded(&mut self) {
        self.current_view = WidgetView::Success;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn fresh_controller(dir: &std::path::Path) -> WidgetController {
        WidgetController::init(Arc::new(WidgetStorage::new(dir))).await
    }

    #[tokio::test]
    async fn first_session_starts_on_onboarding() {
        let dir = tempdir().expect("tempdir");
        let controller = fresh_controller(dir.path()).await;

        assert!(!controller.is_open());
        assert!(!controller.has_completed_onboarding());
        assert_eq!(controller.current_view(), WidgetView::Onboarding);
        assert_eq!(
            controller.auto_open_delay(),
            Some(Duration::from_millis(1500))
        );
    }

    #[tokio::test]
    async fn trigger_toggles_the_panel() {
        let dir = tempdir().expect("tempdir");
        let mut controller = fresh_controller(dir.path()).await;

        controller.trigger_click();
        assert!(controller.is_open());
        assert_eq!(controller.current_view(), WidgetView::Onboarding);

        controller.trigger_click();
        assert!(!controller.is_open());
    }

    #[tokio::test]
    async fn escape_and_outside_click_force_close() {
        let dir = tempdir().expect("tempdir");
        let mut controller = fresh_controller(dir.path()).await;

        controller.open();
        controller.escape_key();
        assert!(!controller.is_open());

        controller.open();
        controller.outside_click();
        assert!(!controller.is_open());

        controller.escape_key();
        assert!(!controller.is_open());
    }

    #[tokio::test]
    async fn start_exploring_persists_and_closes() {
        let dir = tempdir().expect("tempdir");
        let mut controller = fresh_controller(dir.path()).await;

        controller.open();
        controller.start_exploring().await;

        assert!(!controller.is_open());
        assert!(controller.has_completed_onboarding());
        assert_eq!(controller.auto_open_delay(), None);

        controller.trigger_click();
        assert_eq!(controller.current_view(), WidgetView::Form);
    }

    #[tokio::test]
    async fn reload_after_onboarding_lands_on_the_form() {
        let dir = tempdir().expect("tempdir");

        let mut first_session = fresh_controller(dir.path()).await;
        first_session.start_exploring().await;

        let second_session = fresh_controller(dir.path()).await;
        assert!(second_session.has_completed_onboarding());
        assert_eq!(second_session.current_view(), WidgetView::Form);
        assert_eq!(second_session.auto_open_delay(), None);
    }

    #[tokio::test]
    async fn success_view_offers_another_round() {
        let dir = tempdir().expect("tempdir");
        let mut controller = fresh_controller(dir.path()).await;

        controller.open();
        controller.start_exploring().await;
        controller.trigger_click();

        controller.submission_succeeded();
        assert_eq!(controller.current_view(), WidgetView::Success);

        controller.submit_another();
        assert_eq!(controller.current_view(), WidgetView::Form);

        controller.close();
        assert!(!controller.is_open());
    }
}
