use times_roman_shared::{
    articles::{fetch_article, fetch_related, record_view, ArticleLookup},
    latch::OnceLatch,
    meta::PageMeta,
    Article,
};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::ClientHandle,
    components::{
        article_card::ArticleCard,
        article_view::ArticleView,
        loading_spinner::{LoadingSpinner, SpinnerSize},
        reading_progress_bar::ReadingProgressBar,
    },
    config,
    hooks::{use_scroll_to_top, MountGuard},
    i18n::current::article_page as t,
    router::Route,
    seo::use_page_meta,
    storage,
};

/// `https:` variant of `href` when the page was served over plain HTTP from
/// anything but localhost.
pub fn https_upgrade(protocol: &str, hostname: &str, href: &str) -> Option<String> {
    if protocol != "http:" || hostname == "localhost" || hostname == "127.0.0.1" {
        return None;
    }
    href.strip_prefix("http:").map(|rest| format!("https:{rest}"))
}

fn redirect_to_https() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let (Ok(protocol), Ok(hostname), Ok(href)) =
        (location.protocol(), location.hostname(), location.href())
    else {
        return;
    };
    if let Some(secure) = https_upgrade(&protocol, &hostname, &href) {
        let _ = location.set_href(&secure);
    }
}

fn page_meta(id: &str, lookup: Option<&ArticleLookup>) -> PageMeta {
    match lookup {
        None => PageMeta::simple(t::LOADING_TITLE),
        Some(ArticleLookup::NotFound) => PageMeta {
            description: t::NOT_FOUND_DESCRIPTION.to_string(),
            ..PageMeta::simple(t::NOT_FOUND_TITLE)
        },
        Some(ArticleLookup::Found(article)) => PageMeta::article(
            article,
            Some(config::site_url(&format!("/article/{id}"))),
            chrono::Utc::now(),
        ),
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct ArticlePageProps {
    pub id: String,
}

#[function_component(ArticlePage)]
pub fn article_page(props: &ArticlePageProps) -> Html {
    let client = use_context::<ClientHandle>();
    // `None` while the lookup is in flight.
    let lookup = use_state(|| None::<ArticleLookup>);
    let related = use_state(Vec::<Article>::new);
    let view_latch = use_mut_ref(OnceLatch::new);

    use_effect_with((), |_| {
        redirect_to_https();
        || ()
    });
    use_scroll_to_top(props.id.clone());
    use_page_meta(page_meta(&props.id, (*lookup).as_ref()));

    {
        let lookup = lookup.clone();
        let related = related.clone();
        let view_latch = view_latch.clone();
        use_effect_with((props.id.clone(), client), move |(id, client)| {
            let guard = MountGuard::new();
            view_latch.borrow().reset();
            lookup.set(None);
            related.set(Vec::new());

            if let Some(client) = client.clone() {
                let id = id.clone();
                let task_guard = guard.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let resolved = fetch_article(&*client, &id).await;
                    if !task_guard.is_live() {
                        return;
                    }
                    let ArticleLookup::Found(mut article) = resolved else {
                        lookup.set(Some(ArticleLookup::NotFound));
                        return;
                    };
                    lookup.set(Some(ArticleLookup::Found(article.clone())));

                    let nearby = fetch_related(&*client, &article).await;
                    if !task_guard.is_live() {
                        return;
                    }
                    related.set(nearby);

                    let first_view = view_latch.borrow().fire();
                    if first_view {
                        let counted = record_view(&*client, &storage::preferences(), &article).await;
                        if let (Some(views), true) = (counted, task_guard.is_live()) {
                            article.views = views;
                            lookup.set(Some(ArticleLookup::Found(article)));
                        }
                    }
                });
            } else {
                lookup.set(Some(ArticleLookup::NotFound));
            }

            move || guard.cancel()
        });
    }

    match &*lookup {
        None => html! {
            <div class={classes!("container", "mx-auto", "px-4", "py-12")}>
                <LoadingSpinner size={SpinnerSize::Large} label={Some(AttrValue::from(t::LOADING))} />
            </div>
        },
        Some(ArticleLookup::NotFound) => html! {
            <div class={classes!("container", "mx-auto", "flex", "flex-col", "items-center", "px-4", "py-12")}>
                <h1 class={classes!("text-2xl", "font-bold")}>{ t::NOT_FOUND_HEADING }</h1>
                <p class={classes!("mt-2", "text-gray-600")}>{ t::NOT_FOUND_DESCRIPTION }</p>
                <Link<Route>
                    to={Route::Home}
                    classes={classes!("mt-4", "rounded-md", "bg-blue-600", "px-4", "py-2", "text-white", "hover:bg-blue-700")}
                >
                    { t::BACK_HOME }
                </Link<Route>>
            </div>
        },
        Some(ArticleLookup::Found(article)) => html! {
            <>
                <ReadingProgressBar />
                <ArticleView article={article.clone()} />
                <section class={classes!("bg-gray-50", "py-12")}>
                    <div class={classes!("container", "mx-auto", "px-4")}>
                        <h2 class={classes!("mb-6", "font-serif", "text-2xl", "font-bold")}>{ t::RELATED_HEADING }</h2>
                        if related.is_empty() {
                            <p class="text-gray-500">{ t::NO_RELATED }</p>
                        } else {
                            <div class={classes!("grid", "grid-cols-1", "gap-6", "md:grid-cols-3")}>
                                { for related.iter().map(|item| html! {
                                    <ArticleCard
                                        key={item.id.clone()}
                                        article={item.clone()}
                                        class={classes!("hover:-translate-y-2")}
                                    />
                                }) }
                            </div>
                        }
                    </div>
                </section>
            </>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::https_upgrade;

    #[test]
    fn plain_http_is_upgraded_off_localhost() {
        assert_eq!(
            https_upgrade("http:", "timesroman.app", "http://timesroman.app/article/a1"),
            Some("https://timesroman.app/article/a1".to_string())
        );
    }

    #[test]
    fn localhost_and_https_stay_put() {
        assert_eq!(https_upgrade("http:", "localhost", "http://localhost:8080/article/a1"), None);
        assert_eq!(https_upgrade("https:", "timesroman.app", "https://timesroman.app/"), None);
    }
}
