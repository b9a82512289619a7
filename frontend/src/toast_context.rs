use std::rc::Rc;

use yew::prelude::*;

/// At most this many toasts are on screen; older ones are dropped.
const TOAST_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastState {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push {
        kind: ToastKind,
        title: String,
        description: Option<String>,
    },
    Dismiss(u64),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push {
                kind,
                title,
                description,
            } => {
                next.next_id += 1;
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    title,
                    description,
                });
                let overflow = next.toasts.len().saturating_sub(TOAST_LIMIT);
                next.toasts.drain(..overflow);
            },
            ToastAction::Dismiss(id) => {
                next.toasts.retain(|toast| toast.id != id);
            },
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);
    html! {
        <ContextProvider<ToastContext> context={state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Fire-and-forget toast channel. Outside a [`ToastProvider`] every call is
/// a no-op.
#[derive(Clone, PartialEq)]
pub struct Toaster(Option<ToastContext>);

impl Toaster {
    pub fn push(&self, kind: ToastKind, title: impl Into<String>, description: Option<String>) {
        if let Some(context) = &self.0 {
            context.dispatch(ToastAction::Push {
                kind,
                title: title.into(),
                description,
            });
        }
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastKind::Success, title, None);
    }

    pub fn info(&self, title: impl Into<String>) {
        self.push(ToastKind::Info, title, None);
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Error, title, Some(description.into()));
    }
}

#[hook]
pub fn use_toaster() -> Toaster {
    Toaster(use_context::<ToastContext>())
}
