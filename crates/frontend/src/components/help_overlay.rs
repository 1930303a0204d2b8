use dioxus::prelude::*;

#[component]
pub fn HelpOverlay(show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "help-overlay-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "help-overlay",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Help" }

                div { class: "shortcut-section",
                    h3 { "Journey" }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "\u{2192}" } }
                        span { "Next waypoint" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "\u{2190}" } }
                        span { "Previous waypoint" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Swipe left / right" }
                        span { "Next / previous waypoint" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Click a pin" }
                        span { "Jump to that waypoint" }
                    }
                }

                div { class: "shortcut-section",
                    h3 { "Map" }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Drag" }
                        span { "Pan" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Scroll / pinch" }
                        span { "Zoom" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", "Double-click" }
                        span { "Re-centre on the current waypoint" }
                    }
                }

                p { class: "help-note",
                    "Waypoints are shown in date order, earliest first. Each one is dated and, where known, named."
                }

                button {
                    class: "close-help",
                    onclick: move |_| show.set(false),
                    "Close"
                }
            }
        }
    }
}
