use times_roman_shared::{
    articles::{search_articles, SearchOutcome},
    meta::PageMeta,
};
use yew::prelude::*;
use yew_router::prelude::use_location;

use crate::{
    api::ClientHandle,
    components::{
        article_card::ArticleCard,
        loading_spinner::{LoadingSpinner, SpinnerSize},
    },
    hooks::MountGuard,
    i18n::{current::search_page as t, fill_one},
    router::SearchQuery,
    seo::use_page_meta,
};

#[function_component(SearchPage)]
pub fn search_page() -> Html {
    let client = use_context::<ClientHandle>();
    let location = use_location();
    let query = location
        .and_then(|loc| loc.query::<SearchQuery>().ok())
        .and_then(|query| query.q)
        .unwrap_or_default();
    let term = query.trim().to_string();
    // `None` while a search is running.
    let outcome = use_state(|| Some(SearchOutcome::Idle));

    use_page_meta(PageMeta::search(&term));

    {
        let outcome = outcome.clone();
        use_effect_with((term.clone(), client), move |(term, client)| {
            let guard = MountGuard::new();
            match client.clone() {
                Some(client) if !term.is_empty() => {
                    outcome.set(None);
                    let term = term.clone();
                    let task_guard = guard.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let found = search_articles(&*client, &term).await;
                        if task_guard.is_live() {
                            outcome.set(Some(found));
                        }
                    });
                },
                _ => outcome.set(Some(SearchOutcome::Idle)),
            }
            move || guard.cancel()
        });
    }

    let heading = if term.is_empty() {
        t::TITLE.to_string()
    } else {
        fill_one(t::RESULTS_TEMPLATE, &term)
    };

    let body = match &*outcome {
        None => html! { <LoadingSpinner size={SpinnerSize::Medium} /> },
        Some(SearchOutcome::Idle) => html! {
            <p class="text-gray-600">{ t::PROMPT }</p>
        },
        Some(SearchOutcome::NoResults) => html! {
            <div class={classes!("rounded-lg", "bg-gray-50", "p-6", "text-center")}>
                <p class="text-gray-600">{ fill_one(t::NO_RESULTS_TEMPLATE, &term) }</p>
                <p class={classes!("mt-2", "text-sm", "text-gray-500")}>{ t::NO_RESULTS_HINT }</p>
            </div>
        },
        Some(results) => html! {
            <div class={classes!("grid", "grid-cols-1", "gap-6", "md:grid-cols-2", "lg:grid-cols-3")}>
                { for results.articles().iter().map(|article| html! {
                    <ArticleCard key={article.id.clone()} article={article.clone()} />
                }) }
            </div>
        },
    };

    html! {
        <div class={classes!("container", "mx-auto", "px-4", "py-8")}>
            <h1 class={classes!("mb-6", "text-2xl", "font-bold")}>{ heading }</h1>
            { body }
        </div>
    }
}
