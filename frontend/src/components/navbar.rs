use times_roman_shared::category::NAV_CATEGORIES;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{search_bar::SearchBar, user_menu::UserMenu},
    i18n::current::navbar as t,
    router::Route,
};

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let mobile_menu_open = use_state(|| false);
    let location = use_location();

    // Close the mobile menu after any navigation.
    {
        let mobile_menu_open = mobile_menu_open.clone();
        let path = location.as_ref().map(|loc| loc.path().to_string()).unwrap_or_default();
        use_effect_with(path, move |_| {
            mobile_menu_open.set(false);
            || ()
        });
    }

    let toggle_mobile_menu = {
        let mobile_menu_open = mobile_menu_open.clone();
        Callback::from(move |_: MouseEvent| mobile_menu_open.set(!*mobile_menu_open))
    };

    let close_mobile_menu = {
        let mobile_menu_open = mobile_menu_open.clone();
        Callback::from(move |_: MouseEvent| mobile_menu_open.set(false))
    };

    html! {
        <nav class={classes!("border-b", "border-gray-200", "bg-white")} aria-label={t::NAV_MAIN_ARIA}>
            <div class={classes!("container", "mx-auto", "px-4")}>
                <div class={classes!("flex", "h-16", "items-center", "justify-between")}>
                    // Brand
                    <div class="flex-shrink-0">
                        <Link<Route> to={Route::Home} classes={classes!("flex", "items-center")}>
                            <span class={classes!("font-serif", "text-2xl", "font-bold", "tracking-tight")}>
                                { t::BRAND_NAME }
                            </span>
                        </Link<Route>>
                    </div>

                    // Desktop category links
                    <div class={classes!("hidden", "md:block")}>
                        <div class={classes!("ml-10", "flex", "items-center", "space-x-8")}>
                            { for NAV_CATEGORIES.iter().map(|category| html! {
                                <Link<Route>
                                    to={Route::Category { category_id: category.slug() }}
                                    classes={classes!("text-sm", "font-medium", "text-gray-700", "hover:text-black")}
                                >
                                    { category.title() }
                                </Link<Route>>
                            }) }
                        </div>
                    </div>

                    <div class={classes!("flex", "items-center", "space-x-2")}>
                        <SearchBar />
                        <UserMenu />
                        <button
                            type="button"
                            class={classes!(
                                "ml-2",
                                "inline-flex",
                                "items-center",
                                "justify-center",
                                "p-2",
                                "rounded-md",
                                "text-gray-500",
                                "hover:bg-gray-100",
                                "hover:text-gray-700",
                                "md:hidden"
                            )}
                            aria-label={if *mobile_menu_open { t::CLOSE_MENU_ARIA } else { t::OPEN_MENU_ARIA }}
                            aria-expanded={(*mobile_menu_open).to_string()}
                            onclick={toggle_mobile_menu}
                        >
                            <i class={classes!("fas", if *mobile_menu_open { "fa-xmark" } else { "fa-bars" }, "text-xl")} aria-hidden="true"></i>
                        </button>
                    </div>
                </div>
            </div>

            {
                if *mobile_menu_open {
                    html! {
                        <div class="md:hidden">
                            <div class={classes!("px-2", "pt-2", "pb-3", "space-y-1", "sm:px-3")}>
                                { for NAV_CATEGORIES.iter().map(|category| html! {
                                    <div onclick={close_mobile_menu.clone()}>
                                        <Link<Route>
                                            to={Route::Category { category_id: category.slug() }}
                                            classes={classes!(
                                                "block", "px-3", "py-2", "text-base", "font-medium",
                                                "text-gray-700", "hover:bg-gray-100", "hover:text-black"
                                            )}
                                        >
                                            { category.title() }
                                        </Link<Route>>
                                    </div>
                                }) }
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </nav>
    }
}
