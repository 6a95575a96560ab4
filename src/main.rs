use dioxus::prelude::*;

mod components;
mod config;
mod utils;

use components::Route;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const LANDING_CSS: Asset = asset!("/assets/styling/landing.css");
const FONTS_CSS: &str = "https://fonts.googleapis.com/css2?family=Orbitron:wght@400;700;900&family=Poppins:wght@300;400;500;600;700&display=swap";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "CorpsSmp - Minecraft Server" }
        document::Meta {
            name: "description",
            content: "Join CorpsSmp - A peaceful Minecraft server where creativity thrives and friendships are built.",
        }
        document::Meta { name: "theme-color", content: "#1c1917" }
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }

        document::Link { rel: "preconnect", href: "https://fonts.googleapis.com" }
        document::Stylesheet { href: FONTS_CSS }
        document::Stylesheet { href: LANDING_CSS }

        Router::<Route> {}
    }
}
