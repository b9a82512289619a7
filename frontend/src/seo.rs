use times_roman_shared::meta::{
    PageMeta, OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH, SITE_NAME, TWITTER_HANDLE,
};
use web_sys::{window, Document, Element};
use yew::prelude::*;

fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

fn head() -> Option<Element> {
    let doc = document()?;
    doc.query_selector("head").ok().flatten()
}

fn upsert_head_element(selector: &str, tag_name: &str) -> Option<Element> {
    let doc = document()?;
    if let Some(found) = doc.query_selector(selector).ok().flatten() {
        return Some(found);
    }
    let head = head()?;
    let created = doc.create_element(tag_name).ok()?;
    let _ = head.append_child(&created);
    Some(created)
}

fn remove_nodes(selector: &str) {
    let Some(doc) = document() else {
        return;
    };
    let Ok(nodes) = doc.query_selector_all(selector) else {
        return;
    };

    let mut index = 0;
    while index < nodes.length() {
        if let Some(node) = nodes.item(index) {
            if let Some(parent) = node.parent_node() {
                let _ = parent.remove_child(&node);
            }
        }
        index += 1;
    }
}

fn set_meta_name(name: &str, content: &str) {
    let selector = format!("meta[name=\"{}\"]", name);
    let Some(element) = upsert_head_element(&selector, "meta") else {
        return;
    };
    let _ = element.set_attribute("name", name);
    let _ = element.set_attribute("content", content);
}

fn set_meta_property(property: &str, content: &str) {
    let selector = format!("meta[property=\"{}\"]", property);
    let Some(element) = upsert_head_element(&selector, "meta") else {
        return;
    };
    let _ = element.set_attribute("property", property);
    let _ = element.set_attribute("content", content);
}

fn set_link_canonical(url: &str) {
    let Some(element) = upsert_head_element("link[rel=\"canonical\"]", "link") else {
        return;
    };
    let _ = element.set_attribute("rel", "canonical");
    let _ = element.set_attribute("href", url);
}

pub fn set_document_title(title: &str) {
    let Some(doc) = document() else {
        return;
    };
    doc.set_title(title);
}

fn current_url() -> String {
    window()
        .and_then(|win| win.location().href().ok())
        .unwrap_or_default()
}

/// Write every head tag for `meta`. Article-only tags are removed on other
/// pages.
pub fn apply_page_meta(meta: &PageMeta) {
    let description = meta.padded_description();
    let canonical = meta.canonical.clone().unwrap_or_else(current_url);

    set_document_title(&meta.title);
    set_link_canonical(&canonical);
    set_meta_name("description", &description);

    set_meta_property("og:type", meta.og_type.as_str());
    set_meta_property("og:site_name", SITE_NAME);
    set_meta_property("og:title", &meta.title);
    set_meta_property("og:description", &description);
    set_meta_property("og:url", &canonical);
    set_meta_property("og:image", &meta.image);
    set_meta_property("og:image:width", &OG_IMAGE_WIDTH.to_string());
    set_meta_property("og:image:height", &OG_IMAGE_HEIGHT.to_string());

    set_meta_name("twitter:card", "summary_large_image");
    set_meta_name("twitter:site", TWITTER_HANDLE);
    set_meta_name("twitter:title", &meta.title);
    set_meta_name("twitter:description", &description);
    set_meta_name("twitter:image", &meta.image);

    match &meta.article {
        Some(article) => {
            set_meta_property("article:published_time", &article.published_time);
            set_meta_property("article:author", &article.author);
            set_meta_property("article:section", &article.section);
        },
        None => remove_nodes("meta[property^=\"article:\"]"),
    }
}

/// Apply `meta` whenever it changes.
#[hook]
pub fn use_page_meta(meta: PageMeta) {
    use_effect_with(meta, |meta| {
        apply_page_meta(meta);
        || ()
    });
}
