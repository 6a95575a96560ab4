// Failure taxonomy for the background music element.
use thiserror::Error;

use crate::config::ErrorVerbosity;

/// `MediaError.code` values reported by the browser.
pub const MEDIA_ERR_ABORTED: u16 = 1;
pub const MEDIA_ERR_NETWORK: u16 = 2;
pub const MEDIA_ERR_DECODE: u16 = 3;
pub const MEDIA_ERR_SRC_NOT_SUPPORTED: u16 = 4;

/// Shown instead of an error while the element is still buffering.
pub const STILL_LOADING_NOTICE: &str = "Audio is still loading, please wait...";

const BRIEF_LOAD_FAILURE: &str = "Failed to load background music";
const BRIEF_PLAYBACK_FAILURE: &str = "Audio playback failed - external file may be blocked";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Audio loading was cancelled")]
    Aborted,
    #[error("Network error - external audio file blocked")]
    NetworkFailure,
    #[error("Audio file is corrupted or unsupported")]
    DecodeFailure,
    #[error("Audio source blocked by browser security")]
    SourceUnsupported,
    /// The element failed with a code outside the standard four, or with no
    /// error object at all.
    #[error("{}", unknown_message(.0))]
    Unknown(Option<u16>),
    #[error("Audio file could not be loaded - external source may be blocked")]
    NoSource,
    #[error("Audio loading timed out - file may be unavailable")]
    Timeout,
    #[error("Audio playback interrupted - please try again")]
    PlaybackInterrupted,
    #[error("Audio playback blocked by the browser - click again to allow it")]
    PlaybackBlocked,
    #[error("{}", playback_failed_message(.0))]
    PlaybackFailed(String),
    /// The best-effort reachability probe could not reach the music host.
    #[error("Audio file may not be accessible due to network restrictions")]
    Unreachable,
}

fn unknown_message(code: &Option<u16>) -> String {
    match code {
        Some(code) => format!("Audio error (Code: {code})"),
        None => "External audio file is blocked or unavailable".to_string(),
    }
}

fn playback_failed_message(message: &str) -> String {
    if message.trim().is_empty() {
        BRIEF_PLAYBACK_FAILURE.to_string()
    } else {
        format!("Playback failed: {message}")
    }
}

impl MediaError {
    /// Classify the element's own `error.code`. `None` means the element fired
    /// `error` without exposing an error object.
    pub fn from_code(code: Option<u16>) -> Self {
        match code {
            Some(MEDIA_ERR_ABORTED) => Self::Aborted,
            Some(MEDIA_ERR_NETWORK) => Self::NetworkFailure,
            Some(MEDIA_ERR_DECODE) => Self::DecodeFailure,
            Some(MEDIA_ERR_SRC_NOT_SUPPORTED) => Self::SourceUnsupported,
            other => Self::Unknown(other),
        }
    }

    /// Classify a rejected `play()` promise from its `DOMException` name and message.
    pub fn from_rejection(name: &str, message: &str) -> Self {
        let lowered = message.to_ascii_lowercase();
        if lowered.contains("timeout") {
            Self::Timeout
        } else if name == "AbortError" || lowered.contains("interrupted") {
            Self::PlaybackInterrupted
        } else if name == "NotAllowedError"
            || lowered.contains("not allowed")
            || lowered.contains("user didn't interact")
        {
            Self::PlaybackBlocked
        } else if message.trim().is_empty() {
            Self::PlaybackFailed(name.to_string())
        } else {
            Self::PlaybackFailed(message.to_string())
        }
    }

    /// Failures that leave the resource unusable until it is loaded again.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Aborted
                | Self::NetworkFailure
                | Self::DecodeFailure
                | Self::SourceUnsupported
                | Self::Unknown(_)
                | Self::NoSource
        )
    }

    pub fn user_message(&self, verbosity: ErrorVerbosity) -> String {
        match verbosity {
            ErrorVerbosity::Detailed => self.to_string(),
            ErrorVerbosity::Brief => {
                if self.is_load_failure() || *self == Self::Unreachable {
                    BRIEF_LOAD_FAILURE.to_string()
                } else {
                    BRIEF_PLAYBACK_FAILURE.to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_the_documented_messages() {
        assert_eq!(
            MediaError::from_code(Some(MEDIA_ERR_ABORTED)).to_string(),
            "Audio loading was cancelled"
        );
        assert_eq!(
            MediaError::from_code(Some(MEDIA_ERR_NETWORK)).to_string(),
            "Network error - external audio file blocked"
        );
        assert_eq!(
            MediaError::from_code(Some(MEDIA_ERR_DECODE)).to_string(),
            "Audio file is corrupted or unsupported"
        );
        assert_eq!(
            MediaError::from_code(Some(MEDIA_ERR_SRC_NOT_SUPPORTED)).to_string(),
            "Audio source blocked by browser security"
        );
        assert_eq!(
            MediaError::from_code(Some(9)).to_string(),
            "Audio error (Code: 9)"
        );
        assert_eq!(
            MediaError::from_code(None).to_string(),
            "External audio file is blocked or unavailable"
        );
    }

    #[test]
    fn rejections_are_classified_by_name_then_message() {
        assert_eq!(
            MediaError::from_rejection(
                "AbortError",
                "The play() request was interrupted by a call to pause()"
            ),
            MediaError::PlaybackInterrupted
        );
        assert_eq!(
            MediaError::from_rejection("NotAllowedError", "play() failed"),
            MediaError::PlaybackBlocked
        );
        assert_eq!(
            MediaError::from_rejection("Error", "Play timeout"),
            MediaError::Timeout
        );
        assert_eq!(
            MediaError::from_rejection("NotSupportedError", "Failed to load because no supported source was found."),
            MediaError::PlaybackFailed(
                "Failed to load because no supported source was found.".to_string()
            )
        );
        assert_eq!(
            MediaError::from_rejection("", "").to_string(),
            "Audio playback failed - external file may be blocked"
        );
    }

    #[test]
    fn brief_verbosity_hides_the_classification() {
        assert_eq!(
            MediaError::DecodeFailure.user_message(ErrorVerbosity::Brief),
            "Failed to load background music"
        );
        assert_eq!(
            MediaError::PlaybackInterrupted.user_message(ErrorVerbosity::Brief),
            "Audio playback failed - external file may be blocked"
        );
        assert_eq!(
            MediaError::Timeout.user_message(ErrorVerbosity::Detailed),
            "Audio loading timed out - file may be unavailable"
        );
    }

    #[test]
    fn only_resource_failures_require_a_reload() {
        assert!(MediaError::NoSource.is_load_failure());
        assert!(MediaError::Unknown(None).is_load_failure());
        assert!(!MediaError::Timeout.is_load_failure());
        assert!(!MediaError::PlaybackBlocked.is_load_failure());
        assert!(!MediaError::Unreachable.is_load_failure());
    }
}
