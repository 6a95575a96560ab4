use crate::components::{MusicController, MusicToggle, PageState, Route};
use crate::config::SiteConfig;
use dioxus::prelude::*;

/// Root layout: provides the site config and page state to every route.
#[component]
pub fn AppShell() -> Element {
    let config = use_hook(SiteConfig::load);
    let page = use_signal(|| PageState::from_config(&config));

    use_context_provider(|| config.clone());
    use_context_provider(|| page);

    rsx! {
        div { class: "page gradient-bg",
            MusicToggle {}

            main { Outlet::<Route> {} }
        }

        // Music controller - owns the audio element separately from the UI
        MusicController {}
    }
}
