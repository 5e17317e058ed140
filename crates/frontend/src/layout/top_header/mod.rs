//! TopHeader component - application top navigation bar.

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
fn NavLink(href: &'static str, icon_name: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="top-header__link">
            {icon(icon_name)}
            <span>{label}</span>
        </A>
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    view! {
        <div
            class="top-header"
            style="display: flex; align-items: center; justify-content: space-between; padding: 8px 20px; border-bottom: 1px solid var(--colorNeutralStroke2);"
        >
            <div class="top-header__brand">
                <span class="top-header__title" style="font-weight: bold;">"ParseChat"</span>
            </div>
            <nav class="top-header__actions" style="display: flex; gap: 16px;">
                <NavLink href="/" icon_name="chat" label="Chat" />
                <NavLink href="/parse" icon_name="link" label="Parse" />
                <NavLink href="/upload" icon_name="upload" label="Upload" />
            </nav>
        </div>
    }
}
