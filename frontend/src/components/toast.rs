use yew::{prelude::*, use_effect_with};
use yew_hooks::prelude::use_timeout;

use crate::{
    i18n::current::toast as t,
    toast_context::{Toast, ToastAction, ToastContext, ToastKind},
};

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
    pub on_close: Callback<u64>,
}

#[function_component(ToastItem)]
pub fn toast_item(props: &ToastItemProps) -> Html {
    let is_open = use_state(|| true);

    let dismiss = {
        let is_open = is_open.clone();
        let on_close = props.on_close.clone();
        let id = props.toast.id;
        Callback::from(move |_| {
            if !*is_open {
                return;
            }
            is_open.set(false);
            on_close.emit(id);
        })
    };

    let auto_timeout = {
        let dismiss = dismiss.clone();
        use_timeout(move || dismiss.emit(()), AUTO_DISMISS_MS)
    };

    {
        let auto_timeout = auto_timeout.clone();
        use_effect_with(props.toast.id, move |_| {
            auto_timeout.reset();
        });
    }

    let mut wrapper_classes = classes!(
        "toast",
        "flex",
        "items-start",
        "gap-3",
        "rounded-md",
        "border",
        "px-4",
        "py-3",
        "text-sm",
        "shadow-lg",
        "bg-white",
        "transition-all",
        "duration-300",
        "ease-out",
        "w-full",
        "max-w-sm"
    );
    wrapper_classes.push(match props.toast.kind {
        ToastKind::Success => "border-green-200",
        ToastKind::Error => "border-red-300",
        ToastKind::Info => "border-gray-200",
    });
    if *is_open {
        wrapper_classes.push("opacity-100 translate-y-0");
    } else {
        wrapper_classes.push("opacity-0 -translate-y-2 pointer-events-none");
    }

    let role = if props.toast.kind == ToastKind::Error { "alert" } else { "status" };
    let close_button = {
        let dismiss = dismiss.clone();
        Callback::from(move |_| dismiss.emit(()))
    };

    html! {
        <div class={wrapper_classes} {role} aria-live="polite">
            <div class="flex-1 space-y-1">
                <p class="font-semibold text-gray-900">{ props.toast.title.clone() }</p>
                {
                    if let Some(description) = props.toast.description.as_ref() {
                        html! { <p class="text-gray-600">{ description.clone() }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <button
                type="button"
                class={classes!(
                    "inline-flex",
                    "h-6",
                    "w-6",
                    "items-center",
                    "justify-center",
                    "rounded-full",
                    "text-gray-500",
                    "hover:bg-black/10"
                )}
                aria-label={t::CLOSE_ARIA}
                onclick={close_button}
            >
                {"×"}
            </button>
        </div>
    }
}

/// Fixed stack of the toasts currently in the [`ToastContext`].
#[function_component(ToastViewport)]
pub fn toast_viewport() -> Html {
    let Some(context) = use_context::<ToastContext>() else {
        return Html::default();
    };
    let on_close = {
        let context = context.clone();
        Callback::from(move |id: u64| context.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class={classes!("fixed", "top-4", "right-4", "z-[100]", "flex", "flex-col", "gap-2")}>
            { for context.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_close={on_close.clone()} />
            }) }
        </div>
    }
}
