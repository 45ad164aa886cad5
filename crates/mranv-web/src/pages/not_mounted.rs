//! Page shown when no dashboard is mounted

use super::{STYLES, render_document};
use leptos::prelude::*;
use mranv_core::PLUGIN_NAME;

#[component]
fn NotMountedPage() -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <title>{PLUGIN_NAME}</title>
                <style>{STYLES}</style>
            </head>
            <body>
                <div class="loading">
                    <h2>"Dashboard unavailable"</h2>
                    <p>"The application is not mounted."</p>
                </div>
            </body>
        </html>
    }
}

/// Render the page served while the application is unmounted
pub fn render_not_mounted() -> String {
    render_document(|| view! { <NotMountedPage/> })
}
