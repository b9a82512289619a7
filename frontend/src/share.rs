//! Sharing the current page through the Web Share API, falling back to the
//! clipboard. Both APIs are looked up reflectively so missing support reads
//! as `None` instead of a thrown exception.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::i18n::current::article as t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet completed.
    Shared,
    /// The URL was written to the clipboard.
    Copied,
    Failed,
}

fn navigator_member(name: &str) -> Option<(JsValue, JsValue)> {
    let nav = Reflect::get(&js_sys::global(), &"navigator".into()).ok()?;
    if nav.is_undefined() || nav.is_null() {
        return None;
    }
    let member = Reflect::get(&nav, &name.into()).ok()?;
    if member.is_undefined() || member.is_null() {
        return None;
    }
    Some((nav, member))
}

async fn await_promise(value: Result<JsValue, JsValue>) -> Result<(), JsValue> {
    let promise = value?.dyn_into::<Promise>()?;
    JsFuture::from(promise).await.map(|_| ())
}

fn current_url() -> Option<String> {
    web_sys::window().and_then(|win| win.location().href().ok())
}

async fn native_share(title: &str, url: &str) -> Option<Result<(), JsValue>> {
    let (nav, share) = navigator_member("share")?;
    let share = share.dyn_into::<Function>().ok()?;

    let data = Object::new();
    let _ = Reflect::set(&data, &"title".into(), &title.into());
    let _ = Reflect::set(&data, &"text".into(), &t::SHARE_TEXT.into());
    let _ = Reflect::set(&data, &"url".into(), &url.into());

    Some(await_promise(share.call1(&nav, &data)).await)
}

async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let (_, clipboard) =
        navigator_member("clipboard").ok_or_else(|| JsValue::from_str("clipboard unavailable"))?;
    let write_text = Reflect::get(&clipboard, &"writeText".into())?.dyn_into::<Function>()?;
    await_promise(write_text.call1(&clipboard, &text.into())).await
}

/// Share the page the user is on under `title`.
pub async fn share_current_page(title: &str) -> ShareOutcome {
    let Some(url) = current_url() else {
        return ShareOutcome::Failed;
    };

    if let Some(result) = native_share(title, &url).await {
        return match result {
            Ok(()) => ShareOutcome::Shared,
            Err(err) => {
                tracing::warn!(error = ?err, "native share rejected");
                ShareOutcome::Failed
            },
        };
    }

    match copy_to_clipboard(&url).await {
        Ok(()) => ShareOutcome::Copied,
        Err(err) => {
            tracing::warn!(error = ?err, "clipboard write failed");
            ShareOutcome::Failed
        },
    }
}
