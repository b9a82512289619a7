use times_roman_shared::meta::PageMeta;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{i18n::current::not_found as t, router::Route, seo::use_page_meta};

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    use_page_meta(PageMeta::simple(t::TITLE));

    html! {
        <div class={classes!("container", "mx-auto", "flex", "flex-col", "items-center", "px-4", "py-16", "text-center")}>
            <h1 class={classes!("font-serif", "text-4xl", "font-bold")}>{ t::HEADING }</h1>
            <p class={classes!("mt-4", "text-gray-600")}>{ t::MESSAGE }</p>
            <Link<Route>
                to={Route::Home}
                classes={classes!("mt-6", "rounded-md", "bg-blue-600", "px-4", "py-2", "text-white", "hover:bg-blue-700")}
            >
                { t::BACK_HOME }
            </Link<Route>>
        </div>
    }
}
