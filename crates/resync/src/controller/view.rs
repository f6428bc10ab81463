//! Presentation snapshot of a resync dialog

use super::OverrideInput;
use crate::models::{AppSnapshot, CodedError};

const RESYNC_LABEL: &str = "Resync app";
const MIGRATE_LABEL: &str = "Migrate to serve";

/// Everything a host needs to render the dialog for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ResyncView {
    pub title: &'static str,
    pub confirm_label: &'static str,
    pub confirm_disabled: bool,
    pub cancel_disabled: bool,
    /// Spinner on the confirm button
    pub is_loading: bool,
    pub override_checked: bool,
    pub override_toggle_disabled: bool,
    /// Text shown in the URL field
    pub url_value: String,
    pub url_read_only: bool,
    /// Warn about deployment protection on platforms that enable it
    pub show_platform_banner: bool,
    /// Failure detail. Never set while a resync is in flight.
    pub failure: Option<CodedError>,
}

impl ResyncView {
    pub(crate) fn build(
        app: &AppSnapshot,
        input: &OverrideInput,
        is_syncing: bool,
        can_submit: bool,
        failure: Option<&CodedError>,
    ) -> Self {
        let label = if app.method.is_migration() {
            MIGRATE_LABEL
        } else {
            RESYNC_LABEL
        };

        Self {
            title: label,
            confirm_label: label,
            confirm_disabled: !can_submit,
            cancel_disabled: is_syncing,
            is_loading: is_syncing,
            override_checked: input.is_enabled(),
            override_toggle_disabled: is_syncing,
            url_value: if input.is_enabled() {
                input.value().to_string()
            } else {
                input.original().to_string()
            },
            url_read_only: !input.is_enabled() || is_syncing,
            show_platform_banner: app.is_vercel(),
            failure: if is_syncing { None } else { failure.cloned() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppMethod;

    fn app() -> AppSnapshot {
        AppSnapshot::new("my-app", "https://a.com/api/inngest")
    }

    #[test]
    fn test_idle_view() {
        let input = OverrideInput::new("https://a.com/api/inngest");
        let view = ResyncView::build(&app(), &input, false, true, None);
        assert_eq!(view.title, "Resync app");
        assert!(!view.confirm_disabled);
        assert!(!view.cancel_disabled);
        assert!(view.url_read_only);
        assert_eq!(view.url_value, "https://a.com/api/inngest");
        assert!(!view.show_platform_banner);
        assert!(view.failure.is_none());
    }

    #[test]
    fn test_failure_hidden_while_syncing() {
        let input = OverrideInput::new("https://a.com/api/inngest");
        let failure = CodedError::new("unreachable");

        let view = ResyncView::build(&app(), &input, true, false, Some(&failure));
        assert!(view.is_loading);
        assert!(view.cancel_disabled);
        assert!(view.failure.is_none());

        let view = ResyncView::build(&app(), &input, false, true, Some(&failure));
        assert_eq!(view.failure, Some(failure));
    }

    #[test]
    fn test_migration_labels_and_banner() {
        let app = app().with_method(AppMethod::Connect).with_platform("vercel");
        let input = OverrideInput::new(&app.url);
        let view = ResyncView::build(&app, &input, false, false, None);
        assert_eq!(view.confirm_label, "Migrate to serve");
        assert!(view.confirm_disabled);
        assert!(view.show_platform_banner);
    }

    #[test]
    fn test_editable_when_overriding() {
        let mut input = OverrideInput::new("https://a.com/api/inngest");
        input.set_value("https://b.com/x");
        let view = ResyncView::build(&app(), &input, false, true, None);
        assert_eq!(view.url_value, "https://a.com/api/inngest");

        input.set_enabled(true);
        let view = ResyncView::build(&app(), &input, false, true, None);
        assert!(!view.url_read_only);
        assert!(view.override_checked);
        assert_eq!(view.url_value, "https://b.com/x");
    }
}
