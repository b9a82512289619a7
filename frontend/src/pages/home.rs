use times_roman_shared::{
    articles::{fetch_home_feed, HomeFeed, HOME_LATEST_COUNT},
    meta::PageMeta,
};
use yew::prelude::*;

use crate::{
    api::ClientHandle,
    components::{
        article_card::ArticleCard,
        category_section::{ArticleCardSkeleton, CategorySection},
        featured_article::FeaturedArticle,
    },
    hooks::MountGuard,
    i18n::current::home as t,
    seo::use_page_meta,
};

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let client = use_context::<ClientHandle>();
    let feed = use_state(|| None::<HomeFeed>);

    use_page_meta(PageMeta::home());

    {
        let feed = feed.clone();
        use_effect_with(client, move |client| {
            let guard = MountGuard::new();
            if let Some(client) = client.clone() {
                let task_guard = guard.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let loaded = fetch_home_feed(&*client).await;
                    if task_guard.is_live() {
                        feed.set(Some(loaded));
                    }
                });
            }
            move || guard.cancel()
        });
    }

    let Some(feed) = (*feed).clone() else {
        return html! {
            <>
                <section class={classes!("container", "mx-auto", "px-4", "py-6", "md:py-8")}>
                    <div class={classes!("aspect-[16/9]", "w-full", "animate-pulse", "rounded-lg", "bg-gray-200")}></div>
                </section>
                <section class={classes!("bg-gray-50", "py-8")}>
                    <div class={classes!("container", "mx-auto", "px-4")}>
                        <h2 class={classes!("mb-6", "font-serif", "text-2xl", "font-bold")}>{ t::LATEST_HEADING }</h2>
                        <div class={classes!("grid", "grid-cols-1", "gap-6", "sm:grid-cols-2", "lg:grid-cols-4")}>
                            { for (0..HOME_LATEST_COUNT).map(|index| html! { <ArticleCardSkeleton key={index} /> }) }
                        </div>
                    </div>
                </section>
            </>
        };
    };

    html! {
        <>
            <section class={classes!("container", "mx-auto", "px-4", "py-6", "md:py-8")}>
                <FeaturedArticle article={feed.featured.clone()} />
            </section>

            if !feed.latest.is_empty() {
                <section class={classes!("bg-gray-50", "py-8")}>
                    <div class={classes!("container", "mx-auto", "px-4")}>
                        <h2 class={classes!("mb-6", "font-serif", "text-2xl", "font-bold")}>{ t::LATEST_HEADING }</h2>
                        <div class={classes!("grid", "grid-cols-1", "gap-6", "sm:grid-cols-2", "lg:grid-cols-4")}>
                            { for feed.latest.iter().map(|article| html! {
                                <ArticleCard key={article.id.clone()} article={article.clone()} />
                            }) }
                        </div>
                    </div>
                </section>
            }

            { for feed.sections.iter().enumerate().map(|(index, section)| html! {
                <div key={section.category.slug()} class={classes!((index % 2 == 1).then_some("bg-gray-50"))}>
                    <CategorySection category={section.category.clone()} section={Some(section.clone())} />
                </div>
            }) }
        </>
    }
}
