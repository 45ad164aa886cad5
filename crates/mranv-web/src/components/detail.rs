//! Components view: one detail panel per record

use super::overview::ProgressBar;
use leptos::prelude::*;
use mranv_core::ComponentStatus;
use mranv_core::views::ComponentsProjection;

/// Components view
#[component]
pub fn ComponentDetails(
    /// Projection to render
    projection: ComponentsProjection,
) -> impl IntoView {
    let updated = projection.last_update.map_or_else(
        || "never".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );

    view! {
        <section class="view components">
            <p class="updated">{format!("Last update: {updated}")}</p>
            {projection
                .panels
                .into_iter()
                .map(|component| view! { <ComponentPanel component/> })
                .collect::<Vec<_>>()}
        </section>
    }
}

#[component]
fn ComponentPanel(component: ComponentStatus) -> impl IntoView {
    let badge = format!("badge badge-{}", component.threat_level.color().as_str());
    let scanning = if component.scanning { "yes" } else { "no" };

    view! {
        <article class="panel">
            <header>
                <h3>{component.name}</h3>
                <span class=badge>{component.threat_level.to_string()}</span>
            </header>
            <table class="fields">
                <tbody>
                    <tr><th>"Status"</th><td>{component.status.to_string()}</td></tr>
                    <tr><th>"Scanning"</th><td>{scanning}</td></tr>
                    <tr><th>"Detections"</th><td>{component.detections.to_string()}</td></tr>
                    <tr><th>"Events today"</th><td>{component.events_today.to_string()}</td></tr>
                    <tr>
                        <th>"Last update"</th>
                        <td>{component.last_update.format("%H:%M:%S").to_string()}</td>
                    </tr>
                </tbody>
            </table>
            <ProgressBar label="CPU".to_string() percent=component.cpu/>
            <ProgressBar label="Memory".to_string() percent=component.memory/>
        </article>
    }
}
