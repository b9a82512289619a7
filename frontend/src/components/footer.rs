use times_roman_shared::category::NAV_CATEGORIES;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    i18n::{current::footer as t, fill_one},
    router::Route,
};

#[function_component(Footer)]
pub fn footer() -> Html {
    let current_year = js_sys::Date::new_0().get_full_year();

    html! {
        <footer class={classes!("bg-gray-900", "text-white")}>
            <div class={classes!("container", "mx-auto", "px-4", "py-12")}>
                <div class={classes!("grid", "grid-cols-1", "gap-8", "md:grid-cols-3")}>
                    <div>
                        <Link<Route> to={Route::Home} classes="inline-block">
                            <span class={classes!("font-serif", "text-2xl", "font-bold", "text-white")}>
                                { t::BRAND_NAME }
                            </span>
                        </Link<Route>>
                        <p class={classes!("mt-3", "text-sm", "text-gray-400")}>{ t::TAGLINE }</p>
                    </div>

                    <div>
                        <h3 class={classes!("mb-4", "font-semibold", "text-white")}>{ t::CATEGORIES }</h3>
                        <ul class={classes!("space-y-2", "text-sm")}>
                            { for NAV_CATEGORIES.iter().map(|category| html! {
                                <li>
                                    <Link<Route>
                                        to={Route::Category { category_id: category.slug() }}
                                        classes={classes!("text-gray-400", "hover:text-white")}
                                    >
                                        { category.title() }
                                    </Link<Route>>
                                </li>
                            }) }
                        </ul>
                    </div>

                    <div>
                        <h3 class={classes!("mb-4", "font-semibold", "text-white")}>{ t::READERS }</h3>
                        <ul class={classes!("space-y-2", "text-sm")}>
                            <li>
                                <Link<Route> to={Route::Search} classes={classes!("text-gray-400", "hover:text-white")}>
                                    { t::SEARCH }
                                </Link<Route>>
                            </li>
                            <li>
                                <Link<Route> to={Route::Profile} classes={classes!("text-gray-400", "hover:text-white")}>
                                    { t::PROFILE }
                                </Link<Route>>
                            </li>
                        </ul>
                    </div>
                </div>

                <div class={classes!("mt-12", "border-t", "border-gray-800", "pt-6", "text-center")}>
                    <p class={classes!("text-sm", "text-gray-400")}>
                        { fill_one(t::COPYRIGHT_TEMPLATE, current_year) }
                    </p>
                </div>
            </div>
        </footer>
    }
}
