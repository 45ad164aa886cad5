//! Loading indicator shown during the grace period after mount

use leptos::prelude::*;

/// Loading spinner component
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            <p>"Loading security dashboard..."</p>
        </div>
    }
}
