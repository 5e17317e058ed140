use crate::routes::routes::AppRoutes;
use crate::shared::storage::provide_storage;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Storage is provided exactly once, here at the root.
    if let Err(e) = provide_storage() {
        log::error!("Storage setup failed: {}", e);
    }

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
