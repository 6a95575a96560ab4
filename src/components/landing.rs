//! Static marketing sections. Everything here only renders config and the
//! page state; the copy and music behaviour live in their own components.

use crate::components::{Icon, Route, ServerAddressButton};
use crate::config::SiteConfig;
use crate::utils::fill_address;
use dioxus::prelude::*;

fn stagger_style(index: usize) -> String {
    format!("animation-delay: {:.1}s", index as f64 * 0.2)
}

#[component]
pub fn Landing() -> Element {
    let config = use_context::<SiteConfig>();
    let mut visible = use_signal(|| false);

    use_effect(move || visible.set(true));

    rsx! {
        // Hero
        section { class: "hero",
            div { class: if visible() { "hero__content animate-fade-in-up" } else { "hero__content is-hidden" },
                h1 { class: "hero__title ash-gradient-text animate-ash-glow", "{config.server_name}" }
                div { class: "hero__taglines animate-fade-in-up animate-delay-200",
                    for (index, tagline) in config.taglines.iter().enumerate() {
                        p {
                            key: "{index}",
                            class: if index == 0 { "hero__tagline hero__tagline--lead" } else { "hero__tagline" },
                            "{tagline}"
                        }
                    }
                }
                div { class: "hero__actions animate-fade-in-up animate-delay-400",
                    ServerAddressButton {}
                }
            }
        }

        JoinSteps {}
        Rules {}

        // Stay connected
        section { class: "section",
            div { class: "section__inner section__inner--narrow",
                h2 { class: "section__title animate-fade-in-up animate-glow", "Stay Connected" }
                div { class: "links",
                    for (index, link) in config.links.iter().enumerate() {
                        a {
                            key: "{index}",
                            class: "link-button link-button--{link.tone}",
                            href: "{link.href}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            Icon {
                                name: "external-link".to_string(),
                                class: "icon-md".to_string(),
                            }
                            "{link.label}"
                        }
                    }
                }
            }
        }

        footer { class: "footer",
            p { class: "footer__credit animate-glow",
                "This Server Is Made By "
                Icon {
                    name: "heart".to_string(),
                    class: "icon-inline tone-accent".to_string(),
                }
                " {config.footer_credit}"
            }
        }
    }
}

#[component]
fn JoinSteps() -> Element {
    let config = use_context::<SiteConfig>();

    rsx! {
        section { class: "section",
            div { class: "section__inner",
                h2 { class: "section__title animate-fade-in-up animate-glow", "How to Join" }
                div { class: "card-grid",
                    for (index, step) in config.join_steps.iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "card animate-fade-in-up",
                            style: stagger_style(index),
                            div { class: "card__icon tone-secondary animate-glow",
                                Icon { name: step.icon.clone(), class: "icon-lg".to_string() }
                            }
                            div { class: "card__step", {(index + 1).to_string()} }
                            h3 { class: "card__title", "{step.title}" }
                            p { class: "card__text",
                                {fill_address(&step.description, &config.server_address)}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Rules() -> Element {
    let config = use_context::<SiteConfig>();

    rsx! {
        section { class: "section",
            div { class: "section__inner",
                h2 { class: "section__title animate-fade-in-up animate-glow", "Server Rules" }
                div { class: "card-grid",
                    for (index, rule) in config.rules.iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "card animate-fade-in-up",
                            style: stagger_style(index),
                            div { class: "card__icon tone-{rule.tone} animate-glow",
                                Icon { name: rule.icon.clone(), class: "icon-lg".to_string() }
                            }
                            h3 { class: "card__title", "{rule.title}" }
                            p { class: "card__text", "{rule.description}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        section { class: "hero",
            div { class: "hero__content",
                h1 { class: "section__title", "Nothing here" }
                p { class: "hero__tagline", "/{path} is not part of this site." }
                Link { class: "link-button link-button--secondary", to: Route::Landing {}, "Back to the server page" }
            }
        }
    }
}
