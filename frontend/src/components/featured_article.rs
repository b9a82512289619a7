use times_roman_shared::Article;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    i18n::{current::article_card as t, fill_one},
    router::Route,
};

/// Full-width hero card with the title over the image.
#[derive(Properties, PartialEq, Clone)]
pub struct FeaturedArticleProps {
    pub article: Article,
}

#[function_component(FeaturedArticle)]
pub fn featured_article(props: &FeaturedArticleProps) -> Html {
    let article = &props.article;
    let category = article.category();

    html! {
        <div class={classes!("group", "relative", "overflow-hidden", "rounded-lg")}>
            <Link<Route> to={Route::Article { id: article.id.clone() }} classes="block">
                <div class={classes!("relative", "aspect-[16/9]", "w-full", "overflow-hidden")}>
                    <img
                        src={article.image_url.clone()}
                        alt={article.title.clone()}
                        class={classes!("h-full", "w-full", "object-cover", "transition-transform", "duration-700", "group-hover:scale-110")}
                    />
                    <div class={classes!("absolute", "inset-0", "bg-gradient-to-t", "from-black/90", "via-black/50", "to-transparent")}></div>
                </div>
                <div class={classes!("absolute", "bottom-0", "left-0", "right-0", "p-4", "sm:p-6")}>
                    <span class={classes!(
                        "inline-block", "rounded-sm", "px-3", "py-1", "text-xs", "font-semibold",
                        "uppercase", "tracking-wider", "text-white", category.badge_class()
                    )}>
                        { &article.category }
                    </span>
                    <h2 class={classes!(
                        "mt-2", "font-serif", "text-xl", "sm:text-2xl", "md:text-3xl", "font-bold",
                        "leading-tight", "text-white", "group-hover:text-blue-200"
                    )}>
                        { &article.title }
                    </h2>
                    <p class={classes!("mt-2", "hidden", "md:block", "text-sm", "text-gray-200")}>
                        { &article.excerpt }
                    </p>
                    <div class={classes!("mt-3", "flex", "items-center", "gap-4", "text-xs", "text-gray-300")}>
                        <span class={classes!("flex", "items-center")}>
                            <i class="far fa-clock mr-1" aria-hidden="true"></i>
                            { &article.date }
                        </span>
                        <span class={classes!("flex", "items-center")}>
                            <i class="fas fa-book-open mr-1" aria-hidden="true"></i>
                            { fill_one(t::READ_TIME_TEMPLATE, &article.read_time) }
                        </span>
                    </div>
                </div>
            </Link<Route>>
        </div>
    }
}
