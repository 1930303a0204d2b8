mod components;
mod coords;
mod dataset;
mod pages;
mod window_events;

use dioxus::prelude::*;
use tracing::Level;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    /// 1-based position in the date-ordered journey.
    #[route("/waypoint/:number")]
    WaypointView { number: usize },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::journey::Journey { initial_index: None::<usize> }
    }
}

#[component]
fn WaypointView(number: usize) -> Element {
    rsx! {
        pages::journey::Journey { initial_index: number.checked_sub(1) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    // Fails only if a subscriber is already installed.
    if dioxus::logger::init(Level::INFO).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    launch(App);
}
