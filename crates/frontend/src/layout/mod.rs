pub mod top_header;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |           routed page (Outlet)            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout" style="height: 100vh; display: flex; flex-direction: column;">
            <TopHeader />
            <main class="app-main" style="flex: 1; min-height: 0; overflow: auto;">
                <Outlet />
            </main>
        </div>
    }
}
