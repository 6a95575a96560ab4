use crate::components::clipboard::{copy_text, PlatformClipboard};
use crate::components::feedback::CopyResetTimer;
use crate::components::{Icon, PageState};
use crate::config::SiteConfig;
use crate::utils::now_ms;
use dioxus::prelude::*;

/// Hero button that copies the server address, with the "Copied!" window and
/// the manual-copy fallback.
#[component]
pub fn ServerAddressButton() -> Element {
    let mut page = use_context::<Signal<PageState>>();
    let config = use_context::<SiteConfig>();
    let mut copy_reset = use_signal(CopyResetTimer::default);

    let address = config.server_address.clone();
    let state = page();
    let copied = state.feedback.copy().active;
    let remaining_ms = state.feedback.copy().remaining_ms(now_ms());
    let copy_error = state.feedback.copy_error().map(str::to_string);

    let on_copy = {
        let address = address.clone();
        move |_| {
            // Issued before the handler returns so the write keeps the click's activation.
            let pending = copy_text(&PlatformClipboard, &address);
            let address = address.clone();
            spawn(async move {
                match pending.await {
                    Ok(method) => {
                        let ticket = page.write().copy_succeeded(method, now_ms());
                        let reset = copy_reset.write().schedule(ticket, move |ticket| {
                            page.write().expire_copy(ticket);
                        });
                        spawn(reset);
                    }
                    Err(err) => {
                        copy_reset.write().cancel();
                        page.write().copy_failed(&err, &address);
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "copy-address",
            button {
                id: "copy-address-btn",
                r#type: "button",
                class: if copied { "copy-address__button copy-address__button--copied animate-bounce" } else { "copy-address__button" },
                onclick: on_copy,
                if copied {
                    Icon {
                        name: "check".to_string(),
                        class: "icon-md animate-pulse".to_string(),
                    }
                    "Copied!"
                } else {
                    Icon {
                        name: "copy".to_string(),
                        class: "icon-md".to_string(),
                    }
                    "Copy Server IP: {address}"
                }
            }
            if copied {
                div { class: "copy-address__overlay",
                    div { class: "copy-address__toast animate-bounce",
                        Icon {
                            name: "check".to_string(),
                            class: "icon-md".to_string(),
                        }
                        "Copied!"
                        span {
                            class: "copy-address__countdown",
                            style: "animation-duration: {remaining_ms}ms",
                        }
                    }
                }
            }
            if let Some(message) = copy_error {
                p { class: "copy-address__manual", role: "alert", "{message}" }
            }
        }
    }
}
