//! Overview view: status banner, summary cards and scan progress

use leptos::prelude::*;
use mranv_core::views::{ComponentSummary, OverviewProjection, StatusBanner};

/// Overview view
#[component]
pub fn Overview(
    /// Projection to render
    projection: OverviewProjection,
) -> impl IntoView {
    view! {
        <section class="view overview">
            <Banner banner=projection.banner/>
            <ScanProgress progress=projection.scan_progress/>
            <div class="card-grid">
                {projection
                    .cards
                    .into_iter()
                    .map(|card| view! { <SummaryCard card/> })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}

#[component]
fn Banner(banner: StatusBanner) -> impl IntoView {
    let highest = banner
        .highest_threat
        .map_or_else(|| "none".to_string(), |level| level.to_string());

    view! {
        <div class="banner">
            <h2>{banner.headline}</h2>
            <dl class="stats">
                <div><dt>"Components"</dt><dd>{banner.total.to_string()}</dd></div>
                <div><dt>"Active"</dt><dd>{banner.active.to_string()}</dd></div>
                <div><dt>"Scanning"</dt><dd>{banner.scanning.to_string()}</dd></div>
                <div><dt>"Detections"</dt><dd>{banner.total_detections.to_string()}</dd></div>
                <div><dt>"Events today"</dt><dd>{banner.events_today.to_string()}</dd></div>
                <div><dt>"Highest threat"</dt><dd>{highest}</dd></div>
            </dl>
        </div>
    }
}

/// Horizontal progress bar with a caption
#[component]
pub fn ProgressBar(
    /// Caption
    label: String,
    /// Fill in percent
    percent: f64,
) -> impl IntoView {
    let width = format!("width: {:.1}%", percent.clamp(0.0, 100.0));
    let caption = format!("{label}: {percent:.1}%");

    view! {
        <div class="progress">
            <span class="progress-label">{caption}</span>
            <div class="progress-track">
                <div class="progress-fill" style=width></div>
            </div>
        </div>
    }
}

#[component]
fn ScanProgress(progress: u8) -> impl IntoView {
    view! {
        <div class="scan-progress">
            <ProgressBar label="Scan progress".to_string() percent=f64::from(progress)/>
        </div>
    }
}

#[component]
fn SummaryCard(card: ComponentSummary) -> impl IntoView {
    let badge = format!("badge badge-{}", card.threat_level.color().as_str());
    let state = if card.scanning { "Scanning" } else { "Idle" };

    view! {
        <article class="card">
            <header>
                <h3>{card.name}</h3>
                <span class=badge>{card.threat_level.to_string()}</span>
            </header>
            <p class="detections">{format!("{} detections", card.detections)}</p>
            <p class="state">{state}</p>
            <ProgressBar label="CPU".to_string() percent=card.cpu/>
            <ProgressBar label="Memory".to_string() percent=card.memory/>
        </article>
    }
}
