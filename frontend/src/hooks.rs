use std::{cell::Cell, rc::Rc};

use times_roman_shared::{articles::Disclosure, preferences::PreferenceKind};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{ScrollBehavior, ScrollToOptions, StorageEvent};
use yew::prelude::*;

/// Cancellation flag for one run of an effect. Async work spawned by the
/// effect checks [`MountGuard::is_live`] before touching component state;
/// the effect's destructor calls [`MountGuard::cancel`].
///
/// ```rust
/// use_effect_with(id, move |id| {
///     let guard = MountGuard::new();
///     let task_guard = guard.clone();
///     wasm_bindgen_futures::spawn_local(async move {
///         let article = fetch(id).await;
///         if task_guard.is_live() {
///             state.set(article);
///         }
///     });
///     move || guard.cancel()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MountGuard(Rc<Cell<bool>>);

impl MountGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        !self.0.get()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }
}

/// Progressive "load more" state that starts over whenever `reset_key`
/// changes.
#[hook]
pub fn use_disclosure<K>(reset_key: K) -> (Disclosure, Callback<()>)
where
    K: PartialEq + 'static,
{
    let disclosure = use_state(Disclosure::new);

    {
        let disclosure = disclosure.clone();
        use_effect_with(reset_key, move |_| {
            disclosure.set(Disclosure::new());
            || ()
        });
    }

    let reveal_more = {
        let disclosure = disclosure.clone();
        Callback::from(move |_| disclosure.set((*disclosure).reveal_more()))
    };

    (*disclosure, reveal_more)
}

/// Scroll the viewport to the top whenever `key` changes.
///
/// ```rust
/// #[function_component(ArticlePage)]
/// fn article_page(props: &ArticlePageProps) -> Html {
///     use_scroll_to_top(props.id.clone());
///     html! {}
/// }
/// ```
#[hook]
pub fn use_scroll_to_top<K>(key: K)
where
    K: PartialEq + 'static,
{
    use_effect_with(key, move |_| {
        scroll_window_to_top();
        || ()
    });
}

pub fn scroll_window_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_left(0.0);
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Counter bumped whenever another tab rewrites one of the preference maps.
/// Components holding flags read from storage re-read them when it changes.
#[hook]
pub fn use_preference_revision() -> u32 {
    let revision = use_mut_ref(|| 0u32);
    let force_update = use_force_update();

    {
        let revision = revision.clone();
        use_effect_with((), move |_| {
            let listener = Closure::wrap(Box::new(move |event: StorageEvent| {
                let touches_preferences = event
                    .key()
                    .is_some_and(|key| PreferenceKind::from_storage_key(&key).is_some());
                if touches_preferences {
                    let next = revision.borrow().wrapping_add(1);
                    *revision.borrow_mut() = next;
                    force_update.force_update();
                }
            }) as Box<dyn FnMut(_)>);

            if let Some(win) = web_sys::window() {
                let _ = win
                    .add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref());
            }

            move || {
                if let Some(win) = web_sys::window() {
                    let _ = win.remove_event_listener_with_callback(
                        "storage",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let current = *revision.borrow();
    current
}
