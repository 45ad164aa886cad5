//! Action panel: showcase GIF with refresh, and the "Get data" timestamp button

use leptos::prelude::*;
use mranv_core::{APP_BASE_PATH, Showcase};

/// Showcase GIF and the two user actions
#[component]
pub fn ActionPanel(
    /// Current showcase item
    showcase: Showcase,
    /// Whether a refresh is in flight
    refreshing: bool,
    /// Last fetched server time
    last_timestamp: Option<String>,
) -> impl IntoView {
    let refresh_action = format!("{APP_BASE_PATH}/refresh");
    let get_data_action = format!("{APP_BASE_PATH}/get-data");
    let refresh_label = if refreshing { "Loading..." } else { "Get new dog" };
    let timestamp = format!(
        "Last timestamp: {}",
        last_timestamp.as_deref().unwrap_or("Unknown")
    );
    let page_url = showcase.page_url();

    view! {
        <section class="actions">
            <div class="showcase">
                <iframe src=showcase.embed_url width="480" height="270" title="Random dog GIF"></iframe>
                <p class="attribution">
                    <a href=page_url>"via GIPHY"</a>
                </p>
                <form method="post" action=refresh_action>
                    <button type="submit" class="btn" disabled=refreshing>{refresh_label}</button>
                </form>
            </div>
            <div class="timestamp">
                <p>{timestamp}</p>
                <form method="post" action=get_data_action>
                    <button type="submit" class="btn btn-primary">"Get data"</button>
                </form>
            </div>
        </section>
    }
}
