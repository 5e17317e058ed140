use crate::layout::Shell;
use crate::pages::chat::ChatPage;
use crate::pages::parse::ParsePage;
use crate::pages::upload::UploadPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! { <div style="padding: 20px;">"Page not found"</div> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <ParentRoute path=path!("") view=Shell>
                    <Route path=path!("") view=ChatPage />
                    <Route path=path!("parse") view=ParsePage />
                    <Route path=path!("upload") view=UploadPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
