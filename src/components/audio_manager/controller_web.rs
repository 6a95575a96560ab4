// Web (wasm) music controller: owns the <audio> element, wires its events into
// the session, and runs the bounded play request.
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlAudioElement, RequestMode};

use super::{race_playback, MediaError, MediaEvent, ResourceProbe, Toggle};
use crate::components::{js_error_message, js_error_name, PageState};
use crate::config::SiteConfig;
use crate::utils::{percent_of, sleep_ms};

const MUSIC_ELEMENT_ID: &str = "corpssmp-music";

const MEDIA_EVENTS: [&str; 11] = [
    "loadstart",
    "loadeddata",
    "canplay",
    "error",
    "play",
    "pause",
    "ended",
    "progress",
    "stalled",
    "suspend",
    "waiting",
];

fn music_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;
    document
        .get_element_by_id(MUSIC_ELEMENT_ID)?
        .dyn_into::<HtmlAudioElement>()
        .ok()
}

/// Hidden looping element. `src` is assigned by the caller once listeners
/// are attached so `loadstart` is never missed.
fn create_music_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;
    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(MUSIC_ELEMENT_ID);
    audio.set_loop(true);
    // The toggle waits for HAVE_ENOUGH_DATA, which metadata-only preloading may never reach.
    audio.set_preload("auto");
    audio.set_cross_origin(Some("anonymous"));
    document.body()?.append_child(&audio).ok()?;
    Some(audio)
}

fn element_error(audio: &HtmlAudioElement) -> Option<(u16, String)> {
    let audio_js = JsValue::from(audio.clone());
    let error_js = js_sys::Reflect::get(&audio_js, &"error".into()).ok()?;
    if error_js.is_null() || error_js.is_undefined() {
        return None;
    }
    let code = js_sys::Reflect::get(&error_js, &"code".into())
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0) as u16;
    let message = js_sys::Reflect::get(&error_js, &"message".into())
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
    Some((code, message))
}

fn buffered_end(audio: &HtmlAudioElement) -> Option<f64> {
    let ranges = audio.buffered();
    if ranges.length() == 0 {
        return None;
    }
    ranges.end(0).ok()
}

fn media_event(name: &str, audio: &HtmlAudioElement) -> Option<MediaEvent> {
    match name {
        "loadstart" => {
            debug!("music: loading started");
            Some(MediaEvent::LoadStarted)
        }
        "loadeddata" => {
            info!("music: loaded");
            Some(MediaEvent::DataLoaded)
        }
        "canplay" => {
            debug!("music: can start playing");
            Some(MediaEvent::CanPlay)
        }
        "error" => {
            let details = element_error(audio);
            match &details {
                Some((code, message)) => {
                    warn!("music: element error code={code} message={message}")
                }
                None => warn!("music: element error without an error object"),
            }
            Some(MediaEvent::Failed {
                code: details.map(|(code, _)| code),
            })
        }
        "play" => Some(MediaEvent::Played),
        "pause" => Some(MediaEvent::Paused),
        "ended" => Some(MediaEvent::Ended),
        "progress" => {
            let end = buffered_end(audio);
            let duration = audio.duration();
            if let Some(percent) = end.and_then(|end| percent_of(end, duration)) {
                debug!("music: buffered {percent}%");
            }
            Some(MediaEvent::Progress {
                buffered_end: end,
                duration,
            })
        }
        "stalled" | "suspend" | "waiting" => {
            debug!("music: {name}");
            None
        }
        _ => None,
    }
}

async fn probe_music_url(url: String, mut page: Signal<PageState>) {
    let response = RequestBuilder::new(&url)
        .method(Method::HEAD)
        .mode(RequestMode::NoCors)
        .send()
        .await;
    match response {
        Ok(_) => debug!("music: reachability probe completed"),
        Err(err) => {
            warn!("music: reachability probe failed: {err}");
            page.write().report_probe_failure();
        }
    }
}

fn rejection(err: &JsValue) -> MediaError {
    MediaError::from_rejection(&js_error_name(err), &js_error_message(err))
}

/// Mounts the music element once and keeps the page state in sync with it.
#[component]
pub fn MusicController() -> Element {
    let page = use_context::<Signal<PageState>>();
    let config = use_context::<SiteConfig>();

    use_effect(move || {
        if music_element().is_some() {
            return;
        }
        let Some(audio) = create_music_element() else {
            warn!("music: could not create the audio element");
            return;
        };

        let runtime = Runtime::current();
        for name in MEDIA_EVENTS {
            let runtime = runtime.clone();
            let element = audio.clone();
            let mut page = page;
            let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let _guard = RuntimeGuard::new(runtime.clone());
                if let Some(event) = media_event(name, &element) {
                    page.write().handle_media_event(event);
                }
            }) as Box<dyn FnMut(_)>);
            let _ =
                audio.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
            callback.forget();
        }

        audio.set_src(&config.music_url);
        spawn(probe_music_url(config.music_url.clone(), page));
    });

    rsx! {}
}

/// Music button handler. Reads the element synchronously, lets the session
/// decide, then performs the side effect.
pub fn toggle_music(mut page: Signal<PageState>, volume: f64, timeout_ms: u32) -> Toggle {
    let Some(audio) = music_element() else {
        debug!("music: element not mounted yet");
        return Toggle::StillLoading;
    };
    let probe = ResourceProbe {
        ready_state: audio.ready_state(),
        network_state: audio.network_state(),
    };
    let toggle = page.write().toggle_music(probe);

    match &toggle {
        Toggle::Pause => {
            if let Err(err) = audio.pause() {
                warn!("music: pause failed: {}", js_error_message(&err));
            }
        }
        Toggle::Play(attempt) => {
            let attempt = *attempt;
            audio.set_volume(volume);
            // play() is called inside the click handler so it carries the user activation.
            let request = audio.play();
            spawn(async move {
                let play = async move {
                    let promise = request.map_err(|err| rejection(&err))?;
                    wasm_bindgen_futures::JsFuture::from(promise)
                        .await
                        .map(|_| ())
                        .map_err(|err| rejection(&err))
                };
                let outcome = race_playback(play, sleep_ms(timeout_ms)).await;
                page.write().finish_play(attempt, outcome);
            });
        }
        Toggle::StillLoading => debug!("music: not enough data buffered yet"),
        Toggle::Failed(_) | Toggle::Resurfaced(_) => {}
    }

    toggle
}

/// Start a fresh load of the music source (the banner's retry action).
pub fn reload_music() {
    if let Some(audio) = music_element() {
        info!("music: retrying load");
        audio.load();
    }
}
