//! The page's single state value: media session plus feedback, with the
//! routing of outcomes between them.

use crate::components::audio_manager::{
    BannerUpdate, MediaError, MediaEvent, MediaSession, PlayAttempt, PlayOutcome,
    ResourceProbe, Toggle,
};
use crate::components::clipboard::{CopyError, CopyMethod};
use crate::components::feedback::{CopyTicket, FeedbackState};
use crate::config::{ErrorVerbosity, SiteConfig};
use dioxus::logger::tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub media: MediaSession,
    pub feedback: FeedbackState,
    verbosity: ErrorVerbosity,
}

impl Default for PageState {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl PageState {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            media: MediaSession::new(),
            feedback: FeedbackState::new(config.copy_feedback_ms),
            verbosity: config.error_verbosity,
        }
    }

    fn apply_banner(&mut self, update: BannerUpdate) {
        match update {
            BannerUpdate::Keep => {}
            BannerUpdate::Clear => {
                self.feedback.clear_media_error();
            }
            BannerUpdate::Show(reason) => {
                if self.feedback.on_media_error(reason.user_message(self.verbosity)) {
                    warn!("music: {reason}");
                }
            }
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        let update = self.media.apply(event);
        self.apply_banner(update);
    }

    pub fn toggle_music(&mut self, probe: ResourceProbe) -> Toggle {
        let toggle = self.media.toggle(probe);
        match &toggle {
            Toggle::Failed(reason) | Toggle::Resurfaced(reason) => {
                self.apply_banner(BannerUpdate::Show(reason.clone()));
            }
            Toggle::Pause | Toggle::Play(_) | Toggle::StillLoading => {}
        }
        toggle
    }

    pub fn finish_play(&mut self, attempt: PlayAttempt, outcome: PlayOutcome) {
        let update = self.media.finish_play(attempt, outcome);
        self.apply_banner(update);
    }

    /// The reachability probe failed. Only a warning: it never overrides a
    /// classified error, and a resource that already loaded proves it wrong.
    pub fn report_probe_failure(&mut self) {
        if self.feedback.media_error().is_some() || self.media.readiness_is_loaded() {
            return;
        }
        self.apply_banner(BannerUpdate::Show(MediaError::Unreachable));
    }

    pub fn copy_succeeded(&mut self, method: CopyMethod, now_ms: f64) -> CopyTicket {
        info!("server address copied via {method:?}");
        self.feedback.on_copy_succeeded(now_ms)
    }

    pub fn copy_failed(&mut self, err: &CopyError, value: &str) {
        warn!("copy failed: {err}");
        self.feedback
            .on_copy_failed(err.manual_copy_prompt(value, self.verbosity));
    }

    pub fn expire_copy(&mut self, ticket: CopyTicket) -> bool {
        self.feedback.expire_copy(ticket)
    }

    /// Tooltip for the music button.
    pub fn music_tooltip(&self) -> String {
        if let Some(message) = self.feedback.media_error() {
            return message.to_string();
        }
        if self.media.readiness_is_loaded() {
            return "Toggle music".to_string();
        }
        match self.media.buffered_percent() {
            Some(percent) => format!("Loading music... {percent}%"),
            None => "Loading music...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::audio_manager::{HAVE_ENOUGH_DATA, MEDIA_ERR_NETWORK};

    const READY: ResourceProbe = ResourceProbe {
        ready_state: HAVE_ENOUGH_DATA,
        network_state: 1,
    };

    fn loaded_page(verbosity: ErrorVerbosity) -> PageState {
        let config = SiteConfig {
            error_verbosity: verbosity,
            ..SiteConfig::default()
        };
        let mut page = PageState::from_config(&config);
        page.handle_media_event(MediaEvent::DataLoaded);
        page
    }

    #[test]
    fn timeout_produces_exactly_one_banner() {
        let mut page = loaded_page(ErrorVerbosity::Detailed);
        let Toggle::Play(attempt) = page.toggle_music(READY) else {
            panic!("expected a play request");
        };
        page.finish_play(attempt, PlayOutcome::TimedOut);
        let banner = page.feedback.media_error().map(str::to_string);
        assert_eq!(
            banner.as_deref(),
            Some("Audio loading timed out - file may be unavailable")
        );
        page.finish_play(attempt, PlayOutcome::TimedOut);
        assert_eq!(page.feedback.media_error().map(str::to_string), banner);
        assert!(!page.media.is_playing());
    }

    #[test]
    fn load_failure_uses_the_configured_verbosity() {
        let mut detailed = loaded_page(ErrorVerbosity::Detailed);
        detailed.handle_media_event(MediaEvent::Failed {
            code: Some(MEDIA_ERR_NETWORK),
        });
        assert_eq!(
            detailed.feedback.media_error(),
            Some("Network error - external audio file blocked")
        );

        let mut brief = loaded_page(ErrorVerbosity::Brief);
        brief.handle_media_event(MediaEvent::Failed {
            code: Some(MEDIA_ERR_NETWORK),
        });
        assert_eq!(
            brief.feedback.media_error(),
            Some("Failed to load background music")
        );
    }

    #[test]
    fn errored_toggle_resurfaces_the_reason() {
        let mut page = loaded_page(ErrorVerbosity::Detailed);
        page.handle_media_event(MediaEvent::Failed { code: Some(3) });
        page.feedback.clear_media_error();
        let media_before = page.media.clone();
        assert_eq!(
            page.toggle_music(READY),
            Toggle::Resurfaced(MediaError::DecodeFailure)
        );
        assert_eq!(page.media, media_before);
        assert_eq!(
            page.feedback.media_error(),
            Some("Audio file is corrupted or unsupported")
        );
    }

    #[test]
    fn still_loading_is_not_an_error() {
        let mut page = PageState::default();
        let toggle = page.toggle_music(ResourceProbe {
            ready_state: 0,
            network_state: 2,
        });
        assert_eq!(toggle, Toggle::StillLoading);
        assert_eq!(page.feedback.media_error(), None);
        assert_eq!(page.music_tooltip(), "Loading music...");
    }

    #[test]
    fn successful_load_clears_the_probe_warning() {
        let mut page = PageState::default();
        page.report_probe_failure();
        assert_eq!(
            page.feedback.media_error(),
            Some("Audio file may not be accessible due to network restrictions")
        );
        page.handle_media_event(MediaEvent::DataLoaded);
        assert_eq!(page.feedback.media_error(), None);
        assert_eq!(page.music_tooltip(), "Toggle music");
    }

    #[test]
    fn probe_failure_does_not_override_a_classified_error_or_a_load() {
        let mut errored = PageState::default();
        errored.handle_media_event(MediaEvent::Failed { code: Some(4) });
        errored.report_probe_failure();
        assert_eq!(
            errored.feedback.media_error(),
            Some("Audio source blocked by browser security")
        );

        let mut loaded = loaded_page(ErrorVerbosity::Detailed);
        loaded.report_probe_failure();
        assert_eq!(loaded.feedback.media_error(), None);
    }

    #[test]
    fn successful_copy_confirms_for_the_window_then_resets() {
        let mut page = PageState::default();
        let ticket = page.copy_succeeded(CopyMethod::Clipboard, 1_000.0);
        assert!(page.feedback.copy().active);
        assert_eq!(ticket.due_at, 3_000.0);
        assert!(page.expire_copy(ticket));
        assert!(!page.feedback.copy().active);
    }

    #[test]
    fn failed_copy_shows_the_literal_address() {
        let mut page = PageState::default();
        page.copy_failed(
            &CopyError::Denied("Document is not focused.".to_string()),
            "play.corpssmp.lol",
        );
        assert_eq!(
            page.feedback.copy_error(),
            Some(
                "Please copy manually: play.corpssmp.lol (Clipboard access was denied: Document is not focused.)"
            )
        );
        assert!(!page.feedback.copy().active);
        assert_eq!(page.feedback.media_error(), None);
    }

    #[test]
    fn failure_right_after_a_success_hides_the_copied_state() {
        let mut page = PageState::default();
        let ticket = page.copy_succeeded(CopyMethod::Clipboard, 0.0);
        page.copy_failed(
            &CopyError::Unavailable("no document body".to_string()),
            "play.corpssmp.lol",
        );
        assert!(!page.feedback.copy().active);
        assert!(page.feedback.copy_error().is_some());
        assert!(!page.expire_copy(ticket));
    }

    #[test]
    fn tooltip_reports_buffering_progress() {
        let mut page = PageState::default();
        page.handle_media_event(MediaEvent::Progress {
            buffered_end: Some(60.0),
            duration: 240.0,
        });
        assert_eq!(page.music_tooltip(), "Loading music... 25%");
    }
}
