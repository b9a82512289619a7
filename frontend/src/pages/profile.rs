use times_roman_shared::{
    forms::{check, FieldErrors, ProfileForm},
    meta::PageMeta,
    profile::{fetch_profile, save_profile},
};
use yew::prelude::*;

use crate::{
    api::ClientHandle,
    auth_context::use_auth,
    components::{
        form_field::FormField,
        loading_spinner::{LoadingSpinner, SpinnerSize},
    },
    hooks::MountGuard,
    i18n::{current::profile_page as t, fill_one},
    seo::use_page_meta,
    toast_context::use_toaster,
};

/// Profile editor for the signed-in user. Mounted behind `ProtectedRoute`.
#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let auth = use_auth();
    let client = use_context::<ClientHandle>();
    let toaster = use_toaster();
    let user_id = auth.status().user().map(|user| user.id.clone());

    let form = use_state(ProfileForm::default);
    let errors = use_state(FieldErrors::default);
    let loading = use_state(|| true);
    let saving = use_state(|| false);

    use_page_meta(PageMeta::simple(t::TITLE));

    {
        let form = form.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();
        use_effect_with((user_id.clone(), client.clone()), move |(user_id, client)| {
            let guard = MountGuard::new();
            match (user_id.clone(), client.clone()) {
                (Some(user_id), Some(client)) => {
                    loading.set(true);
                    let task_guard = guard.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = fetch_profile(&*client, &user_id).await;
                        if !task_guard.is_live() {
                            return;
                        }
                        match result {
                            Ok(Some(profile)) => form.set(ProfileForm {
                                username: profile.username.unwrap_or_default(),
                                avatar_url: profile.avatar_url.unwrap_or_default(),
                            }),
                            Ok(None) => form.set(ProfileForm::default()),
                            Err(err) => {
                                tracing::warn!(error = %err, "profile lookup failed");
                                toaster.error(t::LOAD_FAILED, err.user_message());
                            },
                        }
                        loading.set(false);
                    });
                },
                _ => loading.set(false),
            }
            move || guard.cancel()
        });
    }

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let toaster = toaster.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let values = (*form).clone();
            if let Err(failures) = check(&values) {
                errors.set(failures);
                return;
            }
            errors.set(FieldErrors::default());
            let (Some(user_id), Some(client)) = (user_id.clone(), client.clone()) else {
                return;
            };
            saving.set(true);
            let saving = saving.clone();
            let toaster = toaster.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = save_profile(
                    &*client,
                    &user_id,
                    values.username.trim(),
                    &values.avatar_url,
                    chrono::Utc::now(),
                )
                .await;
                saving.set(false);
                match result {
                    Ok(profile) => {
                        tracing::info!(user = %profile.id, "profile saved");
                        toaster.success(t::SAVED);
                    },
                    Err(err) => {
                        tracing::error!(error = %err, "profile update failed");
                        toaster.error(t::SAVE_FAILED, fill_one(t::SAVE_FAILED_DETAIL, err.user_message()));
                    },
                }
            });
        })
    };

    let set_username = {
        let form = form.clone();
        Callback::from(move |value: String| form.set(ProfileForm { username: value, ..(*form).clone() }))
    };
    let set_avatar = {
        let form = form.clone();
        Callback::from(move |value: String| form.set(ProfileForm { avatar_url: value, ..(*form).clone() }))
    };

    html! {
        <section class={classes!("container", "mx-auto", "max-w-2xl", "px-4", "py-8")}>
            <h1 class={classes!("mb-6", "font-serif", "text-3xl", "font-bold")}>{ t::HEADING }</h1>
            if *loading {
                <LoadingSpinner size={SpinnerSize::Medium} />
            } else {
                <form onsubmit={on_submit} class="space-y-6" novalidate={true}>
                    <FormField
                        name="username"
                        label={t::USERNAME}
                        value={form.username.clone()}
                        oninput={set_username}
                        placeholder={Some(AttrValue::from(t::USERNAME_PLACEHOLDER))}
                        autocomplete={Some(AttrValue::from("nickname"))}
                        error={errors.get("username").cloned()}
                        disabled={*saving}
                    />
                    <FormField
                        name="avatar_url"
                        label={t::AVATAR_URL}
                        value={form.avatar_url.clone()}
                        oninput={set_avatar}
                        input_type="url"
                        placeholder={Some(AttrValue::from(t::AVATAR_PLACEHOLDER))}
                        error={errors.get("avatar_url").cloned()}
                        disabled={*saving}
                    />
                    <button
                        type="submit"
                        disabled={*saving}
                        class={classes!(
                            "rounded-md", "bg-blue-600", "px-4", "py-2", "text-sm", "font-medium",
                            "text-white", "hover:bg-blue-700", "disabled:opacity-50"
                        )}
                    >
                        { if *saving { t::UPDATING } else { t::UPDATE } }
                    </button>
                </form>
            }
        </section>
    }
}
