use times_roman_shared::article::author_initials;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Default)]
pub enum AvatarSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl AvatarSize {
    fn classes(self) -> &'static str {
        match self {
            AvatarSize::Small => "h-8 w-8 text-xs",
            AvatarSize::Medium => "h-10 w-10 text-sm",
            AvatarSize::Large => "h-12 w-12 text-base",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AuthorAvatarProps {
    pub author: AttrValue,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    #[prop_or_default]
    pub date: Option<AttrValue>,
    #[prop_or_default]
    pub size: AvatarSize,
}

/// Round portrait with the author's initials behind it, name and optional date.
#[function_component(AuthorAvatar)]
pub fn author_avatar(props: &AuthorAvatarProps) -> Html {
    let image_failed = use_state(|| false);

    {
        let image_failed = image_failed.clone();
        use_effect_with(props.image.clone(), move |_| {
            image_failed.set(false);
            || ()
        });
    }

    let onerror = {
        let image_failed = image_failed.clone();
        Callback::from(move |_: Event| image_failed.set(true))
    };

    let portrait = match &props.image {
        Some(src) if !*image_failed => html! {
            <img
                src={src.clone()}
                alt={props.author.clone()}
                class={classes!("h-full", "w-full", "object-cover")}
                {onerror}
            />
        },
        _ => html! {
            <span class={classes!("font-medium", "text-gray-600")}>
                { author_initials(&props.author) }
            </span>
        },
    };

    html! {
        <div class={classes!("flex", "items-center")}>
            <span class={classes!(
                "flex", "shrink-0", "items-center", "justify-center", "overflow-hidden",
                "rounded-full", "bg-gray-200", props.size.classes()
            )}>
                { portrait }
            </span>
            <div class="ml-2">
                <p class={classes!("text-sm", "font-medium")}>{ props.author.clone() }</p>
                if let Some(date) = &props.date {
                    <p class={classes!("text-xs", "text-gray-500")}>{ date.clone() }</p>
                }
            </div>
        </div>
    }
}
