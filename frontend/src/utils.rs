use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

use crate::i18n::{current::article as t, fill_one};

/// Strip scripts, event handlers and unknown tags from stored article HTML.
///
/// Layout classes and the image attributes the post-pass relies on survive.
pub fn sanitize_article_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    ammonia::Builder::default()
        .add_generic_attributes(&["class"])
        .add_tag_attributes("img", &["loading", "width", "height"])
        .clean(content)
        .to_string()
}

/// Lazy-load content images, fill missing alt text and label empty links.
pub fn enhance_article_content(host: &Element, title: &str) {
    if let Ok(images) = host.query_selector_all("img") {
        for index in 0..images.length() {
            let Some(image) = images
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
            else {
                continue;
            };
            let _ = image.set_attribute("loading", "lazy");
            if image.alt().trim().is_empty() {
                image.set_alt(&fill_one(t::IMAGE_ALT_TEMPLATE, title));
            }
        }
    }

    if let Ok(links) = host.query_selector_all("a") {
        for index in 0..links.length() {
            let Some(link) = links
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let empty = link
                .text_content()
                .map(|text| text.trim().is_empty())
                .unwrap_or(true);
            if empty {
                let _ = link.set_attribute("aria-label", t::EMPTY_LINK_ARIA);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_article_html;

    #[test]
    fn scripts_and_handlers_are_removed() {
        let html = sanitize_article_html(
            r#"<p onclick="steal()">Hello</p><script>alert(1)</script><img src="a.jpg" onerror="x()">"#,
        );
        assert!(html.contains("<p>Hello</p>"));
        assert!(!html.contains("script"));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("onerror"));
        assert!(html.contains(r#"src="a.jpg""#));
    }

    #[test]
    fn blank_content_renders_nothing() {
        assert_eq!(sanitize_article_html("   \n"), "");
    }

    #[test]
    fn layout_classes_survive() {
        let html = sanitize_article_html(r#"<p class="lead">Opening</p>"#);
        assert!(html.contains(r#"class="lead""#));
    }
}
