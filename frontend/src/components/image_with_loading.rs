use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ImageWithLoadingProps {
    pub src: String,
    pub alt: String,
    /// Swapped in once if `src` fails to load.
    #[prop_or_default]
    pub fallback_src: Option<String>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub container_class: Classes,
    #[prop_or_default]
    pub loading: Option<AttrValue>,
}

#[function_component(ImageWithLoading)]
pub fn image_with_loading(props: &ImageWithLoadingProps) -> Html {
    let image_loaded = use_state(|| false);
    let failed = use_state(|| false);

    {
        let image_loaded = image_loaded.clone();
        let failed = failed.clone();
        use_effect_with(props.src.clone(), move |_| {
            image_loaded.set(false);
            failed.set(false);
            || ()
        });
    }

    let on_image_load = {
        let image_loaded = image_loaded.clone();
        Callback::from(move |_: Event| image_loaded.set(true))
    };
    let on_image_error = {
        let image_loaded = image_loaded.clone();
        let failed = failed.clone();
        let has_fallback = props.fallback_src.is_some();
        Callback::from(move |_: Event| {
            if has_fallback && !*failed {
                failed.set(true);
            } else {
                image_loaded.set(true);
            }
        })
    };

    let src = match (&props.fallback_src, *failed) {
        (Some(fallback), true) => fallback.clone(),
        _ => props.src.clone(),
    };

    let container_classes = classes!(
        props.container_class.clone(),
        "relative",
        "overflow-hidden",
        if !*image_loaded { "bg-gray-100" } else { "" }
    );

    let image_classes = classes!(
        props.class.clone(),
        "transition-opacity",
        "duration-500",
        if *image_loaded { "opacity-100" } else { "opacity-0" }
    );

    html! {
        <div class={container_classes}>
            {
                if !*image_loaded {
                    html! {
                        <div class={classes!(
                            "absolute",
                            "inset-0",
                            "bg-gradient-to-br",
                            "from-gray-100",
                            "to-gray-200",
                            "animate-pulse",
                            "pointer-events-none"
                        )} />
                    }
                } else {
                    html! {}
                }
            }
            <img
                src={src}
                alt={props.alt.clone()}
                class={image_classes}
                loading={props.loading.clone().unwrap_or(AttrValue::from("lazy"))}
                onload={on_image_load}
                onerror={on_image_error}
            />
        </div>
    }
}
