// Desktop music controller. The page runs in a webview, so a small JS bridge
// owns the <audio> element there; element events are queued by the bridge and
// polled into the session.
use std::cell::Cell;
use std::future::Future;

use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use serde::Deserialize;

use super::{race_playback, MediaError, MediaEvent, ResourceProbe, Toggle};
use crate::components::{js_string_literal, PageState, ScriptOutcome};
use crate::config::SiteConfig;
use crate::utils::{percent_of, sleep_ms};

const POLL_INTERVAL_MS: u32 = 250;

const MUSIC_BRIDGE_JS: &str = r#"
(() => {
  if (window.__corpssmpMusicBridge) {
    return true;
  }

  const audio = document.createElement("audio");
  audio.id = "corpssmp-music";
  audio.loop = true;
  audio.preload = "auto";
  audio.crossOrigin = "anonymous";
  audio.style.display = "none";
  document.body.appendChild(audio);

  const queued = [];
  const names = [
    "loadstart", "loadeddata", "canplay", "error", "play", "pause",
    "ended", "progress", "stalled", "suspend", "waiting",
  ];
  for (const name of names) {
    audio.addEventListener(name, () => {
      const ranges = audio.buffered;
      queued.push({
        name,
        code: audio.error ? audio.error.code : null,
        message: audio.error ? (audio.error.message || "") : null,
        buffered_end: ranges && ranges.length > 0 ? ranges.end(0) : null,
        duration: Number.isFinite(audio.duration) ? audio.duration : null,
      });
    });
  }

  window.__corpssmpMusicBridge = {
    audio,
    snapshot() {
      return {
        ready_state: audio.readyState,
        network_state: audio.networkState,
        events: queued.splice(0),
      };
    },
  };
  return true;
})();
"#;

thread_local! {
    // Latest element fields seen by the poller; the toggle reads them synchronously.
    static LAST_PROBE: Cell<ResourceProbe> = const {
        Cell::new(ResourceProbe {
            ready_state: 0,
            network_state: 0,
        })
    };
}

#[derive(Debug, Clone, Deserialize)]
struct BridgeSnapshot {
    ready_state: u16,
    network_state: u16,
    #[serde(default)]
    events: Vec<BridgeEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BridgeEvent {
    name: String,
    code: Option<u16>,
    message: Option<String>,
    buffered_end: Option<f64>,
    duration: Option<f64>,
}

fn ensure_music_bridge() {
    let _ = document::eval(MUSIC_BRIDGE_JS);
}

fn music_command(body: &str) {
    ensure_music_bridge();
    let script = format!(
        r#"(function () {{
            const bridge = window.__corpssmpMusicBridge;
            if (!bridge) return false;
            {body}
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

async fn music_snapshot() -> Option<BridgeSnapshot> {
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__corpssmpMusicBridge;
            return bridge ? bridge.snapshot() : null;
        })();"#,
    );
    eval.join::<Option<BridgeSnapshot>>().await.ok().flatten()
}

fn bridge_event(raw: &BridgeEvent) -> Option<MediaEvent> {
    match raw.name.as_str() {
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
            warn!(
                "music: element error code={:?} message={}",
                raw.code,
                raw.message.as_deref().unwrap_or_default()
            );
            Some(MediaEvent::Failed { code: raw.code })
        }
        "play" => Some(MediaEvent::Played),
        "pause" => Some(MediaEvent::Paused),
        "ended" => Some(MediaEvent::Ended),
        "progress" => {
            let duration = raw.duration.unwrap_or(f64::NAN);
            if let Some(percent) = raw.buffered_end.and_then(|end| percent_of(end, duration)) {
                debug!("music: buffered {percent}%");
            }
            Some(MediaEvent::Progress {
                buffered_end: raw.buffered_end,
                duration,
            })
        }
        "stalled" | "suspend" | "waiting" => {
            debug!("music: {}", raw.name);
            None
        }
        _ => None,
    }
}

async fn probe_music_url(url: String, mut page: Signal<PageState>) {
    let eval = document::eval(&format!(
        r#"return (async function () {{
            try {{
                await fetch({url}, {{ method: "HEAD", mode: "no-cors" }});
                return {{ ok: true }};
            }} catch (err) {{
                return {{ ok: false, name: (err && err.name) || "", message: (err && err.message) || String(err) }};
            }}
        }})();"#,
        url = js_string_literal(&url),
    ));
    match eval.join::<ScriptOutcome>().await {
        Ok(outcome) if outcome.ok => debug!("music: reachability probe completed"),
        Ok(outcome) => {
            warn!("music: reachability probe failed: {}", outcome.message);
            page.write().report_probe_failure();
        }
        Err(err) => debug!("music: reachability probe did not run: {err:?}"),
    }
}

/// Sets the volume and calls `play()` in the webview now; the future settles
/// with the promise.
fn start_play(volume: f64) -> impl Future<Output = Result<(), MediaError>> {
    ensure_music_bridge();
    let eval = document::eval(&format!(
        r#"return (async function () {{
            const bridge = window.__corpssmpMusicBridge;
            if (!bridge) return {{ ok: false, name: "", message: "music bridge is not mounted" }};
            bridge.audio.volume = Math.max(0, Math.min(1, {volume}));
            try {{
                await bridge.audio.play();
                return {{ ok: true }};
            }} catch (err) {{
                return {{ ok: false, name: (err && err.name) || "", message: (err && err.message) || String(err) }};
            }}
        }})();"#
    ));
    async move {
        match eval.join::<ScriptOutcome>().await {
            Ok(outcome) if outcome.ok => Ok(()),
            Ok(outcome) => Err(MediaError::from_rejection(&outcome.name, &outcome.message)),
            Err(err) => Err(MediaError::PlaybackFailed(format!("{err:?}"))),
        }
    }
}

/// Mounts the webview bridge once and keeps the page state in sync with it.
#[component]
pub fn MusicController() -> Element {
    let mut page = use_context::<Signal<PageState>>();
    let config = use_context::<SiteConfig>();

    use_effect(move || {
        music_command(&format!(
            "bridge.audio.src = {};",
            js_string_literal(&config.music_url)
        ));
        spawn(probe_music_url(config.music_url.clone(), page));
        spawn(async move {
            loop {
                sleep_ms(POLL_INTERVAL_MS).await;
                let Some(snapshot) = music_snapshot().await else {
                    continue;
                };
                LAST_PROBE.with(|probe| {
                    probe.set(ResourceProbe {
                        ready_state: snapshot.ready_state,
                        network_state: snapshot.network_state,
                    })
                });
                for raw in &snapshot.events {
                    if let Some(event) = bridge_event(raw) {
                        page.write().handle_media_event(event);
                    }
                }
            }
        });
    });

    rsx! {}
}

/// Music button handler. Uses the element fields from the last poll.
pub fn toggle_music(mut page: Signal<PageState>, volume: f64, timeout_ms: u32) -> Toggle {
    let probe = LAST_PROBE.with(Cell::get);
    let toggle = page.write().toggle_music(probe);

    match &toggle {
        Toggle::Pause => music_command("bridge.audio.pause();"),
        Toggle::Play(attempt) => {
            let attempt = *attempt;
            let play = start_play(volume);
            spawn(async move {
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
    info!("music: retrying load");
    music_command("bridge.audio.load();");
}
