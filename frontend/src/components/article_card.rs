use times_roman_shared::{article::FALLBACK_IMAGE_URL, Article};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    components::image_with_loading::ImageWithLoading,
    i18n::{current::article_card as t, fill_one},
    router::Route,
};

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleCardProps {
    pub article: Article,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let article = &props.article;
    let detail_route = Route::Article {
        id: article.id.clone(),
    };
    let category = article.category();

    html! {
        <article class={classes!(
            "group", "overflow-hidden", "rounded-lg", "shadow-sm", "hover:shadow-xl",
            "transition-all", "duration-500", "h-full", "flex", "flex-col",
            props.class.clone()
        )}>
            <Link<Route> to={detail_route} classes={classes!("flex", "h-full", "flex-col")}>
                <ImageWithLoading
                    src={article.image_url.clone()}
                    alt={article.title.clone()}
                    fallback_src={Some(FALLBACK_IMAGE_URL.to_string())}
                    container_class={classes!("aspect-[16/10]")}
                    class={classes!("h-full", "w-full", "object-cover", "transition-transform", "duration-700", "group-hover:scale-110")}
                />
                <div class={classes!("flex", "flex-grow", "flex-col", "p-4")}>
                    <div class={classes!("mb-2", "flex", "flex-wrap", "items-center", "justify-between", "gap-2")}>
                        <span class={classes!(
                            "inline-block", "rounded-full", "px-2", "py-1", "text-xs", "font-medium",
                            "uppercase", "tracking-wider", "text-white", category.badge_class()
                        )}>
                            { &article.category }
                        </span>
                        <span class={classes!("flex", "items-center", "text-xs", "text-gray-500")}>
                            <i class="far fa-clock mr-1" aria-hidden="true"></i>
                            { &article.date }
                        </span>
                    </div>
                    <h3 class={classes!(
                        "mb-2", "font-serif", "text-lg", "font-semibold", "leading-snug",
                        "text-gray-900", "group-hover:text-blue-600"
                    )}>
                        { &article.title }
                    </h3>
                    <p class={classes!("line-clamp-2", "flex-grow", "text-sm", "text-gray-600")}>
                        { &article.excerpt }
                    </p>
                    <div class={classes!("mt-3", "flex", "items-center", "justify-between", "text-xs", "text-gray-500")}>
                        <span class={classes!("flex", "items-center")}>
                            <i class="fas fa-book-open mr-1" aria-hidden="true"></i>
                            { fill_one(t::READ_TIME_TEMPLATE, &article.read_time) }
                        </span>
                        <span class={classes!("flex", "items-center")}>
                            <i class="far fa-eye mr-1" aria-hidden="true"></i>
                            { fill_one(t::VIEWS_TEMPLATE, article.views) }
                        </span>
                    </div>
                </div>
            </Link<Route>>
        </article>
    }
}
