use std::rc::Rc;

use times_roman_shared::{
    articles::{arrange_articles, category_from_slug, fetch_category_articles, CategorySort, Disclosure},
    meta::PageMeta,
    Article,
};
use yew::prelude::*;

use crate::{
    api::ClientHandle,
    components::{article_card::ArticleCard, category_section::ArticleCardSkeleton},
    hooks::{use_disclosure, use_scroll_to_top, MountGuard},
    i18n::{current::category_page as t, fill_two},
    seo::use_page_meta,
};

const SORT_OPTIONS: [CategorySort; 2] = [CategorySort::Latest, CategorySort::Popular];

#[derive(Properties, Clone, PartialEq)]
pub struct CategoryPageProps {
    pub category_id: String,
}

#[function_component(CategoryPage)]
pub fn category_page(props: &CategoryPageProps) -> Html {
    let client = use_context::<ClientHandle>();
    let category = category_from_slug(&props.category_id);
    // `None` while loading.
    let articles = use_state(|| None::<Rc<Vec<Article>>>);
    // `None` keeps the backend order.
    let sort = use_state(|| None::<CategorySort>);
    let filter_open = use_state(|| false);
    let (disclosure, reveal_more) = use_disclosure(props.category_id.clone());

    use_scroll_to_top(props.category_id.clone());
    use_page_meta(PageMeta::category(&category));

    {
        let articles = articles.clone();
        let category = category.clone();
        use_effect_with((props.category_id.clone(), client), move |(_, client)| {
            let guard = MountGuard::new();
            articles.set(None);
            if let Some(client) = client.clone() {
                let task_guard = guard.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let loaded = fetch_category_articles(&*client, &category).await;
                    if task_guard.is_live() {
                        articles.set(Some(Rc::new(loaded)));
                    }
                });
            } else {
                articles.set(Some(Rc::default()));
            }
            move || guard.cancel()
        });
    }

    let sorted = use_memo(((*articles).clone(), *sort), |(loaded, sort)| {
        loaded.as_ref().map(|loaded| arrange_articles(loaded, *sort))
    });

    let toggle_filter = {
        let filter_open = filter_open.clone();
        Callback::from(move |_: MouseEvent| filter_open.set(!*filter_open))
    };

    let sort_button = |option: CategorySort| {
        let sort_handle = sort.clone();
        let active = (*sort).unwrap_or_default() == option;
        html! {
            <button
                type="button"
                onclick={Callback::from(move |_: MouseEvent| sort_handle.set(Some(option)))}
                aria-pressed={active.to_string()}
                class={classes!(
                    "rounded-md", "border", "px-3", "py-1", "text-sm",
                    if active { "border-blue-600 bg-blue-600 text-white" } else { "border-gray-300 bg-white text-gray-700 hover:bg-gray-100" }
                )}
            >
                { option.label() }
            </button>
        }
    };

    let body = match sorted.as_ref() {
        None => html! {
            <div class={classes!("grid", "grid-cols-1", "gap-6", "md:grid-cols-2", "lg:grid-cols-3")}>
                { for (0..Disclosure::INITIAL).map(|index| html! { <ArticleCardSkeleton key={index} /> }) }
            </div>
        },
        Some(list) if list.is_empty() => html! {
            <div class={classes!("flex", "flex-col", "items-center", "justify-center", "py-12")}>
                <h2 class={classes!("text-2xl", "font-bold")}>{ t::EMPTY_HEADING }</h2>
                <p class={classes!("mt-2", "text-gray-600")}>{ t::EMPTY_DESCRIPTION }</p>
            </div>
        },
        Some(list) => html! {
            <>
                <div class={classes!("grid", "grid-cols-1", "gap-6", "sm:grid-cols-2", "lg:grid-cols-3")}>
                    { for disclosure.slice(list).iter().map(|article| html! {
                        <ArticleCard key={article.id.clone()} article={article.clone()} />
                    }) }
                </div>
                if disclosure.has_more(list.len()) {
                    <div class={classes!("mt-8", "flex", "justify-center")}>
                        <button
                            type="button"
                            onclick={reveal_more.reform(|_: MouseEvent| ())}
                            class={classes!("rounded-md", "bg-blue-600", "px-8", "py-2", "text-white", "transition-all", "hover:scale-105", "hover:bg-blue-700")}
                        >
                            { t::LOAD_MORE }
                        </button>
                    </div>
                }
            </>
        },
    };

    let total = sorted.as_ref().as_ref().map(Vec::len).unwrap_or(0);

    html! {
        <>
            <section class={classes!("bg-gradient-to-r", "py-12", "text-white", category.header_gradient())}>
                <div class={classes!("container", "mx-auto", "px-4")}>
                    <h1 class={classes!("font-serif", "text-3xl", "font-bold", "md:text-4xl")}>{ category.title() }</h1>
                    if !category.description().is_empty() {
                        <p class={classes!("mt-4", "max-w-3xl", "text-lg", "opacity-90")}>{ category.description() }</p>
                    }
                </div>
            </section>

            <div class={classes!("border-b", "bg-gray-50", "py-4")}>
                <div class={classes!("container", "mx-auto", "flex", "flex-wrap", "items-center", "justify-between", "gap-4", "px-4")}>
                    <div class={classes!("flex", "items-center")}>
                        <button
                            type="button"
                            onclick={toggle_filter}
                            aria-expanded={(*filter_open).to_string()}
                            class={classes!("flex", "items-center", "gap-2", "rounded-md", "border", "border-gray-300", "bg-white", "px-3", "py-1", "text-sm", "hover:bg-gray-100")}
                        >
                            <i class="fas fa-filter" aria-hidden="true"></i>
                            { t::FILTER }
                        </button>
                        if *filter_open {
                            <div class={classes!("ml-4", "flex", "flex-wrap", "items-center", "gap-2")}>
                                <span class={classes!("text-sm", "text-gray-500")}>{ t::SORT_BY }</span>
                                { for SORT_OPTIONS.into_iter().map(sort_button) }
                            </div>
                        }
                    </div>
                    if sorted.is_some() {
                        <div class={classes!("text-sm", "text-gray-500")}>
                            { fill_two(t::SHOWING_TEMPLATE, disclosure.visible().min(total), total) }
                        </div>
                    }
                </div>
            </div>

            <section class="py-8">
                <div class={classes!("container", "mx-auto", "px-4")}>
                    { body }
                </div>
            </section>
        </>
    }
}
