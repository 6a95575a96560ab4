// Media session state machine: one audio resource, driven by element events
// and the user-facing toggle.
use super::error::MediaError;
use crate::utils::percent_of;

/// `HTMLMediaElement.readyState` at which playback will not stall.
pub const HAVE_ENOUGH_DATA: u16 = 4;
/// `HTMLMediaElement.networkState` when no usable `<source>` was found.
pub const NETWORK_NO_SOURCE: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    Unloaded,
    Loaded,
    Errored(MediaError),
}

/// Single lifecycle value; playing and errored are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Unloaded,
    Loaded,
    Playing,
    Paused,
    Errored(MediaError),
}

/// Lifecycle notifications from the audio element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStarted,
    DataLoaded,
    CanPlay,
    Failed { code: Option<u16> },
    Played,
    Paused,
    Ended,
    Progress { buffered_end: Option<f64>, duration: f64 },
}

/// Element fields read synchronously before a toggle acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceProbe {
    pub ready_state: u16,
    pub network_state: u16,
}

/// Identifies one `play()` request so a stale settlement can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayAttempt(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// Pause the element; the session already reads `Paused`.
    Pause,
    /// Set the volume and call `play()`, then report back via `finish_play`.
    Play(PlayAttempt),
    /// Not enough data buffered yet. Not an error.
    StillLoading,
    /// The element has no playable source; the session is now `Errored`.
    Failed(MediaError),
    /// Already errored; nothing changed.
    Resurfaced(MediaError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    TimedOut,
    Rejected(MediaError),
}

/// What a transition means for the media banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerUpdate {
    Keep,
    Show(MediaError),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSession {
    phase: SessionPhase,
    next_attempt: u64,
    pending: Option<PlayAttempt>,
    buffered_percent: Option<u8>,
}

impl MediaSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn playback(&self) -> PlaybackState {
        match self.phase {
            SessionPhase::Playing => PlaybackState::Playing,
            _ => PlaybackState::Stopped,
        }
    }

    pub fn readiness(&self) -> ReadinessState {
        match &self.phase {
            SessionPhase::Unloaded => ReadinessState::Unloaded,
            SessionPhase::Loaded | SessionPhase::Playing | SessionPhase::Paused => {
                ReadinessState::Loaded
            }
            SessionPhase::Errored(reason) => ReadinessState::Errored(reason.clone()),
        }
    }

    pub fn readiness_is_loaded(&self) -> bool {
        self.readiness() == ReadinessState::Loaded
    }

    pub fn is_playing(&self) -> bool {
        self.playback() == PlaybackState::Playing
    }

    pub fn error(&self) -> Option<&MediaError> {
        match &self.phase {
            SessionPhase::Errored(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn buffered_percent(&self) -> Option<u8> {
        self.buffered_percent
    }

    pub fn play_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resynchronize with the element. Events are authoritative: they apply
    /// whether or not the toggle caused them.
    pub fn apply(&mut self, event: MediaEvent) -> BannerUpdate {
        match event {
            MediaEvent::LoadStarted => {
                self.phase = SessionPhase::Unloaded;
                self.buffered_percent = None;
                BannerUpdate::Keep
            }
            MediaEvent::DataLoaded | MediaEvent::CanPlay => self.mark_loaded(),
            MediaEvent::Failed { code } => {
                let reason = MediaError::from_code(code);
                self.phase = SessionPhase::Errored(reason.clone());
                self.pending = None;
                BannerUpdate::Show(reason)
            }
            MediaEvent::Played => {
                self.phase = SessionPhase::Playing;
                self.pending = None;
                BannerUpdate::Clear
            }
            MediaEvent::Paused => {
                if self.phase == SessionPhase::Playing {
                    self.phase = SessionPhase::Paused;
                }
                BannerUpdate::Keep
            }
            MediaEvent::Ended => {
                if self.phase == SessionPhase::Playing {
                    self.phase = SessionPhase::Loaded;
                }
                BannerUpdate::Keep
            }
            MediaEvent::Progress {
                buffered_end,
                duration,
            } => {
                let Some(percent) = buffered_end.and_then(|end| percent_of(end, duration)) else {
                    return BannerUpdate::Keep;
                };
                self.buffered_percent = Some(percent);
                if percent >= 100 && self.phase == SessionPhase::Unloaded {
                    self.phase = SessionPhase::Loaded;
                    return BannerUpdate::Clear;
                }
                BannerUpdate::Keep
            }
        }
    }

    fn mark_loaded(&mut self) -> BannerUpdate {
        match self.phase {
            SessionPhase::Unloaded | SessionPhase::Errored(_) => {
                self.phase = SessionPhase::Loaded;
                BannerUpdate::Clear
            }
            _ => BannerUpdate::Keep,
        }
    }

    /// Decide what a click on the music button does, given the element's
    /// current readiness.
    pub fn toggle(&mut self, probe: ResourceProbe) -> Toggle {
        match &self.phase {
            SessionPhase::Playing => {
                self.phase = SessionPhase::Paused;
                Toggle::Pause
            }
            SessionPhase::Errored(reason) => Toggle::Resurfaced(reason.clone()),
            SessionPhase::Unloaded | SessionPhase::Loaded | SessionPhase::Paused => {
                if probe.network_state == NETWORK_NO_SOURCE {
                    self.phase = SessionPhase::Errored(MediaError::NoSource);
                    self.pending = None;
                    return Toggle::Failed(MediaError::NoSource);
                }
                if probe.ready_state < HAVE_ENOUGH_DATA {
                    return Toggle::StillLoading;
                }
                self.next_attempt += 1;
                let attempt = PlayAttempt(self.next_attempt);
                self.pending = Some(attempt);
                Toggle::Play(attempt)
            }
        }
    }

    /// Settle a `play()` request. Only the most recent outstanding attempt is
    /// honoured; anything else (superseded, or already settled by a `play`
    /// event) is dropped.
    pub fn finish_play(&mut self, attempt: PlayAttempt, outcome: PlayOutcome) -> BannerUpdate {
        if self.pending != Some(attempt) {
            return BannerUpdate::Keep;
        }
        self.pending = None;
        match outcome {
            PlayOutcome::Started => {
                if self.error().is_some() {
                    return BannerUpdate::Keep;
                }
                self.phase = SessionPhase::Playing;
                BannerUpdate::Clear
            }
            PlayOutcome::TimedOut => BannerUpdate::Show(MediaError::Timeout),
            PlayOutcome::Rejected(reason) => BannerUpdate::Show(reason),
        }
    }
}
