use web_sys::Element;
use yew::prelude::*;

use crate::utils::{enhance_article_content, sanitize_article_html};

#[derive(Properties, Clone, PartialEq)]
pub struct ArticleBodyProps {
    /// Stored article HTML; sanitized before it reaches the DOM.
    pub html: AttrValue,
    /// Used for generated image alt text.
    pub title: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Render article HTML into a host element without letting Yew diff its
/// children, then run the accessibility post-pass over it.
#[function_component(ArticleBody)]
pub fn article_body(props: &ArticleBodyProps) -> Html {
    let host_ref = use_node_ref();
    let clean = use_memo(props.html.clone(), |html| sanitize_article_html(html));

    {
        let host_ref = host_ref.clone();
        let title = props.title.clone();
        use_effect_with((clean, title), move |(next_html, title)| {
            if let Some(host) = host_ref.cast::<Element>() {
                host.set_inner_html(next_html.as_str());
                enhance_article_content(&host, title);
            }
            || ()
        });
    }

    html! {
        <div ref={host_ref} class={props.class.clone()} />
    }
}
