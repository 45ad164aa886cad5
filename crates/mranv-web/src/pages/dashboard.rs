//! Dashboard page: header, side navigation, active view, actions and toasts

use super::{STYLES, reload_script, render_document};
use crate::components::analytics::Analytics;
use crate::components::detail::ComponentDetails;
use crate::components::navigation::SideNav;
use crate::components::overview::Overview;
use crate::components::showcase::ActionPanel;
use crate::components::toasts::ToastTray;
use leptos::prelude::*;
use mranv_core::PLUGIN_NAME;
use mranv_core::shell::ReadyView;
use mranv_core::views::Projection;

#[component]
fn ActiveView(projection: Projection) -> impl IntoView {
    match projection {
        Projection::Overview(projection) => view! { <Overview projection/> }.into_any(),
        Projection::Components(projection) => {
            view! { <ComponentDetails projection/> }.into_any()
        }
        Projection::Analytics(projection) => view! { <Analytics projection/> }.into_any(),
    }
}

#[component]
fn DashboardPage(view: ReadyView, reload: String) -> impl IntoView {
    let ReadyView {
        navigation,
        projection,
        toasts,
        refreshing,
        showcase,
        last_timestamp,
        ..
    } = view;

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
                <title>{PLUGIN_NAME}</title>
                <style>{STYLES}</style>
            </head>
            <body>
                <header class="header">
                    <h1>{PLUGIN_NAME}</h1>
                </header>
                <div class="layout">
                    <SideNav items=navigation/>
                    <main class="content">
                        <ActiveView projection/>
                        <ActionPanel showcase refreshing last_timestamp/>
                    </main>
                </div>
                <ToastTray toasts/>
                <script>{reload}</script>
            </body>
        </html>
    }
}

/// Render the dashboard, reloading itself after `reload_ms` to pick up new ticks
pub fn render_dashboard(view: ReadyView, reload_ms: u64) -> String {
    let reload = reload_script(reload_ms);
    render_document(move || view! { <DashboardPage view reload/> })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mranv_core::telemetry::TelemetryState;
    use mranv_core::views::{self, ViewKey};
    use mranv_core::{Showcase, ToastColor, ToastNotice};

    fn ready(selected: ViewKey) -> ReadyView {
        let telemetry = TelemetryState::seeded(Utc::now());
        ReadyView {
            navigation: views::navigation(selected),
            selected,
            projection: views::project(selected, &telemetry),
            toasts: vec![
                ToastNotice::new(4, "Data updated", ToastColor::Success),
                ToastNotice::new(5, "Error", ToastColor::Danger).with_text("Failed to fetch dog GIF"),
            ],
            refreshing: false,
            showcase: Showcase::default(),
            last_timestamp: None,
        }
    }

    #[test]
    fn test_overview_page() {
        let html = render_dashboard(ready(ViewKey::Overview), 3000);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("All security components operational"));
        assert!(html.contains("File Integrity Monitoring"));
        assert!(html.contains("Scan progress"));
        assert!(html.contains("Last timestamp: Unknown"));
        assert!(html.contains("https://giphy.com/embed/13ByqbM0hgfN7y"));
        assert!(html.contains("https://giphy.com/gifs/13ByqbM0hgfN7y"));
        assert!(html.contains("Get data"));
    }

    #[test]
    fn test_navigation_marks_selected_view() {
        let html = render_dashboard(ready(ViewKey::Analytics), 3000);

        assert!(html.contains("nav-link active"));
        assert!(html.contains("/app/mranv?view=components"));
        assert!(html.contains("Detections this week"));
        assert!(html.contains("Recent events"));
        assert!(!html.contains("All security components operational"));
    }

    #[test]
    fn test_components_page() {
        let html = render_dashboard(ready(ViewKey::Components), 3000);

        assert!(html.contains("Security Configuration Assessment"));
        assert!(html.contains("Events today"));
        assert!(html.contains("critical"));
    }

    #[test]
    fn test_toasts_rendered_with_dismiss_forms() {
        let html = render_dashboard(ready(ViewKey::Overview), 3000);

        assert!(html.contains("toast toast-success"));
        assert!(html.contains("toast toast-danger"));
        assert!(html.contains("Failed to fetch dog GIF"));
        assert!(html.contains("/app/mranv/toasts/5/dismiss"));
    }

    #[test]
    fn test_last_timestamp_and_refreshing() {
        let mut view = ready(ViewKey::Overview);
        view.last_timestamp = Some("2024-03-15T14:25:30.000Z".to_string());
        view.refreshing = true;

        let html = render_dashboard(view, 3000);
        assert!(html.contains("Last timestamp: 2024-03-15T14:25:30.000Z"));
        assert!(html.contains("Loading..."));
    }
}
