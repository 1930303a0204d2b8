use dioxus::prelude::*;
use waypoint_shared::models::Waypoint;

/// Class list for the overlay panel: a fixed base plus the place slug.
fn overlay_class(slug: Option<&str>, has_banner: bool) -> String {
    let mut class = String::from("overlay");
    if has_banner {
        class.push_str(" with-banner");
    }
    if let Some(slug) = slug {
        class.push(' ');
        class.push_str(slug);
    }
    class
}

/// Inline background style for a banner image URL.
fn banner_style(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('"', "\\\"");
    format!("background-image: url(\"{escaped}\");")
}

#[component]
pub fn InfoOverlay(
    waypoint: Option<Waypoint>,
    date_format: String,
) -> Element {
    let Some(waypoint) = waypoint else {
        return rsx! {
            div { class: "overlay empty",
                p { class: "overlay-date", "No waypoints to show" }
            }
        };
    };

    let slug = waypoint.slug();
    let class = overlay_class(slug.as_deref(), waypoint.banner_image.is_some());
    let style = waypoint
        .banner_image
        .as_deref()
        .map(banner_style)
        .unwrap_or_default();
    let date = waypoint.formatted_date(&date_format);

    rsx! {
        div { class: "{class}", style: "{style}",
            div { class: "overlay-text",
                p { class: "overlay-date", "{date}" }
                if let Some(name) = waypoint.place_name.as_ref() {
                    h1 { class: "overlay-place", "{name}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_class_with_slug() {
        assert_eq!(
            overlay_class(Some("edinburgh-old-town"), false),
            "overlay edinburgh-old-town"
        );
        assert_eq!(
            overlay_class(Some("york"), true),
            "overlay with-banner york"
        );
    }

    #[test]
    fn test_overlay_class_without_place() {
        assert_eq!(overlay_class(None, false), "overlay");
    }

    #[test]
    fn test_banner_style_quotes_url() {
        assert_eq!(
            banner_style("https://example.com/a b.jpg"),
            "background-image: url(\"https://example.com/a b.jpg\");"
        );
        assert_eq!(
            banner_style(r#"x".jpg"#),
            "background-image: url(\"x\\\".jpg\");"
        );
    }
}
