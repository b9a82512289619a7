use times_roman_shared::{
    engagement::{begin_like, bookmark_message, commit_like, toggle_bookmark, LikeState},
    preferences::PreferenceKind,
    Article,
};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::ClientHandle,
    auth_context::use_auth,
    components::{
        author_avatar::{AuthorAvatar, AvatarSize},
        raw_html::ArticleBody,
    },
    hooks::use_preference_revision,
    i18n::{current::article as t, fill_one},
    router::{Route, SearchQuery},
    share::{share_current_page, ShareOutcome},
    storage,
    toast_context::{use_toaster, ToastKind},
};

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleViewProps {
    pub article: Article,
}

const ACTION_BUTTON: &str = "flex items-center rounded-full px-4 py-2 text-sm transition-all \
                             duration-200 hover:scale-105 hover:bg-gray-200";
const TAG_LINK: &str = "rounded-full bg-gray-100 px-3 py-1 text-sm text-gray-800 \
                        transition-all duration-200 hover:scale-105 hover:bg-gray-200";

/// Header, actions, body, author card and tags of one article.
///
/// Like and bookmark flags live in local storage and are re-read when
/// another tab rewrites them.
#[function_component(ArticleView)]
pub fn article_view(props: &ArticleViewProps) -> Html {
    let article = &props.article;
    let auth = use_auth();
    let client = use_context::<ClientHandle>();
    let toaster = use_toaster();
    let revision = use_preference_revision();

    let like_state = use_state(|| LikeState::load(&storage::preferences(), &article.id, article.likes));
    let bookmarked = use_state(|| {
        storage::preferences().is_set(PreferenceKind::Bookmarked, &article.id)
    });

    {
        let like_state = like_state.clone();
        let bookmarked = bookmarked.clone();
        use_effect_with((article.id.clone(), article.likes), move |(id, likes)| {
            let preferences = storage::preferences();
            like_state.set(LikeState::load(&preferences, id, *likes));
            bookmarked.set(preferences.is_set(PreferenceKind::Bookmarked, id));
            || ()
        });
    }

    // Another tab rewrote the flags; the count shown here stays.
    {
        let like_state = like_state.clone();
        let bookmarked = bookmarked.clone();
        let article_id = article.id.clone();
        use_effect_with(revision, move |_| {
            let preferences = storage::preferences();
            like_state.set((*like_state).with_stored_flag(&preferences, &article_id));
            bookmarked.set(preferences.is_set(PreferenceKind::Bookmarked, &article_id));
            || ()
        });
    }

    let on_like = {
        let like_state = like_state.clone();
        let auth = auth.clone();
        let toaster = toaster.clone();
        let article_id = article.id.clone();
        Callback::from(move |_: MouseEvent| {
            let preferences = storage::preferences();
            let toggle = match begin_like(&auth.status(), &preferences, &article_id, *like_state) {
                Ok(toggle) => toggle,
                Err(err) => {
                    toaster.push(ToastKind::Error, err.to_string(), None);
                    return;
                },
            };
            like_state.set(toggle.next);

            let Some(client) = client.clone() else {
                return;
            };
            let like_state = like_state.clone();
            let toaster = toaster.clone();
            let article_id = article_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match commit_like(&*client, &preferences, &article_id, toggle).await {
                    Ok(state) => {
                        like_state.set(state);
                        toaster.success(toggle.success_message());
                    },
                    Err(err) => {
                        like_state.set(toggle.previous);
                        toaster.push(ToastKind::Error, err.to_string(), None);
                    },
                }
            });
        })
    };

    let on_bookmark = {
        let bookmarked = bookmarked.clone();
        let auth = auth.clone();
        let toaster = toaster.clone();
        let article_id = article.id.clone();
        Callback::from(move |_: MouseEvent| {
            match toggle_bookmark(&auth.status(), &storage::preferences(), &article_id) {
                Ok(now_bookmarked) => {
                    bookmarked.set(now_bookmarked);
                    toaster.success(bookmark_message(now_bookmarked));
                },
                Err(err) => toaster.push(ToastKind::Error, err.to_string(), None),
            }
        })
    };

    let on_share = {
        let toaster = toaster.clone();
        let title = article.title.clone();
        Callback::from(move |_: MouseEvent| {
            let toaster = toaster.clone();
            let title = title.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match share_current_page(&title).await {
                    ShareOutcome::Shared => {},
                    ShareOutcome::Copied => toaster.success(t::LINK_COPIED),
                    ShareOutcome::Failed => toaster.push(ToastKind::Error, t::SHARE_FAILED, None),
                }
            });
        })
    };

    let category = article.category();
    let category_route = Route::Category {
        category_id: category.slug(),
    };
    let liked = like_state.liked;

    html! {
        <article class={classes!("container", "mx-auto", "px-4", "py-8")}>
            <header class={classes!("mx-auto", "max-w-3xl")}>
                <Link<Route>
                    to={category_route.clone()}
                    classes={classes!(
                        "mb-2", "inline-block", "rounded-full", "px-3", "py-1", "text-sm", "font-medium",
                        "uppercase", "tracking-wider", "text-white", category.badge_class()
                    )}
                >
                    { &article.category }
                </Link<Route>>

                <h1 class={classes!(
                    "font-serif", "text-3xl", "font-bold", "leading-tight", "tracking-tight",
                    "text-gray-900", "md:text-4xl", "lg:text-5xl"
                )}>
                    { &article.title }
                </h1>

                <div class={classes!("mb-8", "mt-6", "flex", "flex-wrap", "items-center", "justify-between")}>
                    <AuthorAvatar
                        author={article.author.clone()}
                        image={article.author_image.clone().map(AttrValue::from)}
                        date={Some(AttrValue::from(article.date.clone()))}
                        size={AvatarSize::Medium}
                    />
                    <div class={classes!("mt-2", "flex", "flex-wrap", "gap-4", "text-sm", "text-gray-600", "md:mt-0")}>
                        <span class={classes!("flex", "items-center")}>
                            <i class="far fa-calendar mr-1" aria-hidden="true"></i>
                            { &article.date }
                        </span>
                        <span class={classes!("flex", "items-center")}>
                            <i class="fas fa-book-open mr-1" aria-hidden="true"></i>
                            { fill_one(t::READ_TIME_RANGE_TEMPLATE, article.read_time_range()) }
                        </span>
                        <span class={classes!("flex", "items-center")}>
                            <i class="far fa-eye mr-1" aria-hidden="true"></i>
                            { fill_one(t::VIEWS_TEMPLATE, article.views) }
                        </span>
                    </div>
                </div>

                <div class={classes!("mb-8", "flex", "flex-wrap", "gap-2")}>
                    <button
                        type="button"
                        onclick={on_share}
                        class={classes!(ACTION_BUTTON, "bg-gray-100", "text-gray-700")}
                        aria-label={t::SHARE_ARIA}
                    >
                        <i class="fas fa-share-alt mr-2" aria-hidden="true"></i>
                        { t::SHARE }
                    </button>
                    <button
                        type="button"
                        onclick={on_bookmark}
                        class={classes!(
                            ACTION_BUTTON,
                            if *bookmarked { "bg-blue-100 text-blue-700" } else { "bg-gray-100 text-gray-700" }
                        )}
                        aria-label={if *bookmarked { t::REMOVE_BOOKMARK_ARIA } else { t::SAVE_ARIA }}
                        aria-pressed={(*bookmarked).to_string()}
                    >
                        <i class={classes!(if *bookmarked { "fas" } else { "far" }, "fa-bookmark", "mr-2")} aria-hidden="true"></i>
                        { if *bookmarked { t::SAVED } else { t::SAVE } }
                    </button>
                    <button
                        type="button"
                        onclick={on_like}
                        class={classes!(
                            ACTION_BUTTON,
                            if liked { "bg-red-100 text-red-700" } else { "bg-gray-100 text-gray-700" }
                        )}
                        aria-label={if liked { t::REMOVE_LIKE_ARIA } else { t::LIKE_ARIA }}
                        aria-pressed={liked.to_string()}
                    >
                        <i class={classes!(if liked { "fas" } else { "far" }, "fa-thumbs-up", "mr-2")} aria-hidden="true"></i>
                        <span class="mr-1">{ if liked { t::LIKED } else { t::LIKE } }</span>
                        <span class={classes!("rounded-full", "bg-gray-200", "px-2", "text-xs")}>
                            { like_state.likes }
                        </span>
                    </button>
                </div>
            </header>

            <div class="my-8">
                <div class={classes!("mx-auto", "max-w-4xl", "overflow-hidden", "rounded-lg", "shadow-lg")}>
                    <img
                        src={article.image_url.clone()}
                        alt={fill_one(t::FEATURED_IMAGE_ALT_TEMPLATE, &article.title)}
                        class="w-full"
                        width="1200"
                        height="630"
                        loading="eager"
                    />
                </div>
            </div>

            <div class={classes!("mx-auto", "max-w-3xl")}>
                <ArticleBody
                    html={article.content.clone()}
                    title={article.title.clone()}
                    class={classes!("article-content", "prose", "prose-lg", "max-w-none")}
                />

                <section class={classes!("mt-12", "rounded-lg", "border", "border-gray-200", "p-6", "shadow-sm")}>
                    <h3 class={classes!("mb-4", "text-lg", "font-bold")}>{ t::ABOUT_AUTHOR }</h3>
                    <div class={classes!("flex", "items-start", "space-x-4")}>
                        <img
                            src={article.author_image_or_default()}
                            alt={fill_one(t::AUTHOR_PHOTO_ALT_TEMPLATE, &article.author)}
                            class={classes!("h-12", "w-12", "rounded-full", "object-cover")}
                            loading="lazy"
                        />
                        <div>
                            <h4 class={classes!("text-base", "font-semibold")}>{ &article.author }</h4>
                            <p class={classes!("text-sm", "text-gray-600")}>{ article.author_bio_or_default() }</p>
                        </div>
                    </div>
                </section>

                <div class={classes!("mt-8", "flex", "flex-wrap", "gap-2")}>
                    <Link<Route, SearchQuery>
                        to={Route::Search}
                        query={Some(SearchQuery { q: Some(t::NEWS_TAG_QUERY.to_string()) })}
                        classes={TAG_LINK}
                    >
                        { t::NEWS_TAG }
                    </Link<Route, SearchQuery>>
                    <Link<Route> to={category_route} classes={TAG_LINK}>
                        { format!("#{}", article.category) }
                    </Link<Route>>
                    <Link<Route> to={Route::Home} classes={TAG_LINK}>
                        { t::SITE_TAG }
                    </Link<Route>>
                </div>
            </div>
        </article>
    }
}
