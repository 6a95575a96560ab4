//! Defines the application routes.

use crate::components::{AppShell, Landing, NotFound};
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Landing {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}
