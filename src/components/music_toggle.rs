use crate::components::audio_manager::{
    reload_music, toggle_music, Toggle, STILL_LOADING_NOTICE,
};
use crate::components::{Icon, PageState};
use crate::config::SiteConfig;
use crate::utils::sleep_ms;
use dioxus::core::Task;
use dioxus::prelude::*;

const LOADING_HINT_MS: u32 = 2_500;

/// Fixed top-right music button with its tooltip and failure banner.
#[component]
pub fn MusicToggle() -> Element {
    let page = use_context::<Signal<PageState>>();
    let config = use_context::<SiteConfig>();
    let mut loading_hint = use_signal(|| false);
    let mut hint_task = use_signal(|| None::<Task>);

    let state = page();
    let playing = state.media.is_playing();
    let errored = state.media.error().is_some();
    let pending = state.media.play_pending();
    let tooltip = state.music_tooltip();
    let banner = state.feedback.media_error().map(str::to_string);
    let show_hint = banner.is_none() && loading_hint();

    let volume = config.music_volume;
    let timeout_ms = config.playback_timeout_ms;
    let on_toggle = move |_| {
        if toggle_music(page, volume, timeout_ms) != Toggle::StillLoading {
            loading_hint.set(false);
            return;
        }
        loading_hint.set(true);
        if let Some(previous) = hint_task.write().take() {
            previous.cancel();
        }
        let task = spawn(async move {
            sleep_ms(LOADING_HINT_MS).await;
            loading_hint.set(false);
        });
        hint_task.set(Some(task));
    };

    rsx! {
        div { class: "music-toggle",
            button {
                id: "music-toggle-btn",
                r#type: "button",
                class: if errored { "music-toggle__button music-toggle__button--muted" } else { "music-toggle__button" },
                title: "{tooltip}",
                aria_label: if playing { "Pause background music" } else { "Play background music" },
                aria_pressed: "{playing}",
                aria_busy: "{pending}",
                onclick: on_toggle,
                if playing {
                    Icon {
                        name: "volume-on".to_string(),
                        class: "icon-sm".to_string(),
                    }
                } else {
                    Icon {
                        name: "volume-off".to_string(),
                        class: "icon-sm".to_string(),
                    }
                }
            }
            if let Some(message) = banner {
                div { class: "music-toggle__banner", role: "status",
                    span { "{message}" }
                    if errored {
                        button {
                            r#type: "button",
                            class: "music-toggle__retry",
                            onclick: move |_| reload_music(),
                            Icon {
                                name: "refresh".to_string(),
                                class: "icon-xs".to_string(),
                            }
                            "Retry"
                        }
                    }
                }
            }
            if show_hint {
                div { class: "music-toggle__hint", role: "status", "{STILL_LOADING_NOTICE}" }
            }
        }
    }
}
