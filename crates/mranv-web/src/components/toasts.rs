//! Toast tray

use leptos::prelude::*;
use mranv_core::{APP_BASE_PATH, ToastNotice};

/// Toast tray, oldest first
#[component]
pub fn ToastTray(
    /// Toasts to show
    toasts: Vec<ToastNotice>,
) -> impl IntoView {
    view! {
        <aside class="toast-tray">
            {toasts
                .into_iter()
                .map(|toast| view! { <Toast toast/> })
                .collect::<Vec<_>>()}
        </aside>
    }
}

#[component]
fn Toast(toast: ToastNotice) -> impl IntoView {
    let class = format!("toast toast-{}", toast.color.as_str());
    let dismiss = format!("{APP_BASE_PATH}/toasts/{}/dismiss", toast.id);

    view! {
        <div class=class>
            <strong>{toast.title}</strong>
            {toast.text.map(|text| view! { <p>{text}</p> })}
            <form method="post" action=dismiss>
                <button type="submit" class="toast-close" title="Dismiss">"x"</button>
            </form>
        </div>
    }
}
