//! Full HTML pages rendered on the server

pub mod dashboard;
pub mod loading;
pub mod not_mounted;

use leptos::prelude::*;
use reactive_graph::owner::Owner;

/// Stylesheet shared by every page
pub const STYLES: &str = include_str!("styles.css");

/// Render a view to a complete HTML document
fn render_document<F, V>(page: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new_root(None);
    let html = owner.with(|| page().into_view().to_html());
    format!("<!DOCTYPE html>{html}")
}

/// Script that reloads the page after `millis`
fn reload_script(millis: u64) -> String {
    format!("setTimeout(function(){{window.location.reload();}},{millis});")
}
