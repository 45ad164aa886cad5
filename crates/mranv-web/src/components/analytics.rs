//! Analytics view: weekly detections chart and recent events

use leptos::prelude::*;
use mranv_core::views::{AnalyticsProjection, DailyDetections, RecentEvent};

/// Analytics view
#[component]
pub fn Analytics(
    /// Projection to render
    projection: AnalyticsProjection,
) -> impl IntoView {
    let peak = projection.peak().max(1);

    view! {
        <section class="view analytics">
            <h2>"Detections this week"</h2>
            <div class="chart">
                {projection
                    .daily_detections
                    .into_iter()
                    .map(|day| view! { <ChartBar day peak/> })
                    .collect::<Vec<_>>()}
            </div>
            <h2>"Recent events"</h2>
            <table class="events">
                <thead>
                    <tr>
                        <th>"Time"</th>
                        <th>"Component"</th>
                        <th>"Description"</th>
                        <th>"Severity"</th>
                    </tr>
                </thead>
                <tbody>
                    {projection
                        .recent_events
                        .into_iter()
                        .map(|event| view! { <EventRow event/> })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn ChartBar(day: DailyDetections, peak: u64) -> impl IntoView {
    #[allow(clippy::cast_precision_loss)]
    let height = format!("height: {:.0}%", day.detections as f64 / peak as f64 * 100.0);

    view! {
        <div class="chart-column">
            <div class="chart-bar" style=height title=day.detections.to_string()></div>
            <span class="chart-label">{day.day}</span>
        </div>
    }
}

#[component]
fn EventRow(event: RecentEvent) -> impl IntoView {
    let badge = format!("badge badge-{}", event.severity.color().as_str());

    view! {
        <tr>
            <td>{event.time}</td>
            <td>{event.component}</td>
            <td>{event.description}</td>
            <td><span class=badge>{event.severity.to_string()}</span></td>
        </tr>
    }
}
