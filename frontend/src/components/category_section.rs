use times_roman_shared::{articles::CategorySection as Section, Category};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{components::article_card::ArticleCard, i18n::current::category_section as t, router::Route};

/// Grey placeholder shaped like an [`ArticleCard`].
#[function_component(ArticleCardSkeleton)]
pub fn article_card_skeleton() -> Html {
    html! {
        <div class={classes!("animate-pulse", "overflow-hidden", "rounded-lg", "shadow-sm")}>
            <div class={classes!("aspect-[16/10]", "bg-gray-200")}></div>
            <div class="p-4">
                <div class={classes!("mb-2", "h-4", "w-1/4", "rounded", "bg-gray-200")}></div>
                <div class={classes!("mb-2", "h-6", "rounded", "bg-gray-200")}></div>
                <div class={classes!("mb-4", "h-4", "w-3/4", "rounded", "bg-gray-200")}></div>
                <div class={classes!("flex", "justify-between")}>
                    <div class={classes!("h-3", "w-1/4", "rounded", "bg-gray-200")}></div>
                    <div class={classes!("h-3", "w-1/4", "rounded", "bg-gray-200")}></div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CategorySectionProps {
    pub category: Category,
    #[prop_or_default]
    pub section: Option<Section>,
    #[prop_or(false)]
    pub loading: bool,
}

/// One home-page block: heading, "View All" link and up to three cards.
#[function_component(CategorySection)]
pub fn category_section(props: &CategorySectionProps) -> Html {
    let articles = props
        .section
        .as_ref()
        .map(|section| section.articles.as_slice())
        .unwrap_or_default();

    let body = if props.loading {
        html! { for (0..3).map(|index| html! { <ArticleCardSkeleton key={index} /> }) }
    } else if articles.is_empty() {
        html! {
            <div class={classes!("col-span-full", "py-8", "text-center")}>
                <p class="text-gray-500">{ t::EMPTY }</p>
            </div>
        }
    } else {
        html! {
            { for articles.iter().map(|article| html! {
                <ArticleCard key={article.id.clone()} article={article.clone()} />
            }) }
        }
    };

    html! {
        <section class={classes!("py-8", "md:py-12", props.category.section_gradient())}>
            <div class={classes!("container", "mx-auto", "px-4")}>
                <div class={classes!("mb-6", "md:mb-8", "flex", "flex-wrap", "items-center", "justify-between")}>
                    <h2 class={classes!("font-serif", "text-2xl", "md:text-3xl", "font-bold")}>
                        { props.category.title() }
                    </h2>
                    <Link<Route>
                        to={Route::Category { category_id: props.category.slug() }}
                        classes={classes!("mt-2", "md:mt-0", "rounded-md", "bg-blue-600", "px-3", "py-1.5", "text-sm", "text-white", "hover:bg-blue-700")}
                    >
                        { t::VIEW_ALL }
                        <i class="fas fa-chevron-right ml-1" aria-hidden="true"></i>
                    </Link<Route>>
                </div>
                <div class={classes!("grid", "grid-cols-1", "gap-4", "sm:gap-5", "md:grid-cols-2", "lg:grid-cols-3")}>
                    { body }
                </div>
            </div>
        </section>
    }
}
