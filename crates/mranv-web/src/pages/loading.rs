//! Page shown during the loading grace period

use super::{STYLES, reload_script, render_document};
use crate::components::loading::Loading;
use leptos::prelude::*;
use mranv_core::PLUGIN_NAME;

#[component]
fn LoadingPage(reload: String) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <title>{PLUGIN_NAME}</title>
                <style>{STYLES}</style>
            </head>
            <body>
                <Loading/>
                <script>{reload}</script>
            </body>
        </html>
    }
}

/// Render the loading page, reloading itself after `reload_ms`
pub fn render_loading(reload_ms: u64) -> String {
    let reload = reload_script(reload_ms);
    render_document(move || view! { <LoadingPage reload/> })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_loading() {
        let html = render_loading(1000);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Loading security dashboard..."));
        assert!(html.contains("window.location.reload();},1000);"));
    }
}
