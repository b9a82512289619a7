use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormFieldProps {
    /// Also used as the input's `name` and the key into field errors.
    pub name: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or(false)]
    pub disabled: bool,
    #[prop_or_default]
    pub autocomplete: Option<AttrValue>,
}

/// Labelled input with its validation message underneath.
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let id = format!("field-{}", props.name);
    let error_id = format!("{id}-error");

    let oninput = {
        let on_change = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class={classes!("space-y-1")}>
            <label for={id.clone()} class={classes!("block", "text-sm", "font-medium", "text-gray-700")}>
                { props.label.clone() }
            </label>
            <input
                id={id}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                autocomplete={props.autocomplete.clone()}
                disabled={props.disabled}
                aria-invalid={props.error.is_some().to_string()}
                aria-describedby={props.error.as_ref().map(|_| error_id.clone())}
                {oninput}
                class={classes!(
                    "w-full", "rounded-md", "border", "px-3", "py-2", "text-sm",
                    "focus:outline-none", "focus:ring-2", "focus:ring-blue-500",
                    if props.error.is_some() { "border-red-500" } else { "border-gray-300" }
                )}
            />
            if let Some(message) = &props.error {
                <p id={error_id} class={classes!("text-sm", "text-red-600")}>{ message }</p>
            }
        </div>
    }
}
