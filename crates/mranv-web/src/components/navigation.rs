//! Side navigation

use leptos::prelude::*;
use mranv_core::APP_BASE_PATH;
use mranv_core::views::NavItem;

/// Side navigation listing the three views
#[component]
pub fn SideNav(
    /// Navigation entries in display order
    items: Vec<NavItem>,
) -> impl IntoView {
    view! {
        <nav class="side-nav">
            <ul>
                {items
                    .into_iter()
                    .map(|item| {
                        let class = if item.selected { "nav-link active" } else { "nav-link" };
                        let href = format!("{APP_BASE_PATH}?view={}", item.key.as_str());
                        view! {
                            <li>
                                <a class=class href=href>{item.label}</a>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </nav>
    }
}
