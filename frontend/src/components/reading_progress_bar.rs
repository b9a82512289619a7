use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;
use yew::prelude::*;

/// Percentage of the page scrolled past, clamped to `0.0..=100.0`.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

fn current_progress() -> f64 {
    let Some(window) = window() else {
        return 0.0;
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    scroll_progress(scroll_y, height, viewport)
}

/// Thin bar pinned to the top of the viewport that fills while reading.
#[function_component(ReadingProgressBar)]
pub fn reading_progress_bar() -> Html {
    let progress = use_state(|| 0.0_f64);

    {
        let progress = progress.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                let closure = {
                    let progress = progress.clone();
                    Closure::wrap(Box::new(move || {
                        progress.set(current_progress());
                    }) as Box<dyn Fn()>)
                };
                let _ = window
                    .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
                progress.set(current_progress());
                (window, closure)
            });

            move || {
                if let Some((window, closure)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        closure.as_ref().unchecked_ref(),
                    );
                    drop(closure);
                }
            }
        });
    }

    html! {
        <div class={classes!("fixed", "left-0", "top-0", "z-50", "h-1", "w-full", "bg-transparent")}>
            <div
                class={classes!("h-full", "bg-blue-600", "transition-[width]", "duration-150")}
                style={format!("width: {:.2}%;", *progress)}
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={format!("{:.0}", *progress)}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::scroll_progress;

    #[test]
    fn progress_is_zero_when_page_fits_viewport() {
        assert_eq!(scroll_progress(0.0, 800.0, 900.0), 0.0);
        assert_eq!(scroll_progress(0.0, 900.0, 900.0), 0.0);
    }

    #[test]
    fn progress_tracks_scroll_and_clamps() {
        assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(1000.0, 2000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress(1200.0, 2000.0, 1000.0), 100.0);
    }
}
