//! Parse Page - View Component

use super::view_model::ParsePageVm;
use crate::shared::components::parse_form::ParseForm;
use crate::shared::date_utils::format_datetime;
use crate::shared::storage::use_storage;
use contracts::parse::ParseResult;
use leptos::prelude::*;

fn result_card(result: ParseResult) -> impl IntoView {
    let fetched_at = format_datetime(&result.fetched_at);
    view! {
        <div style="margin-top: 20px; padding: 16px; background: var(--colorNeutralBackground2); border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;">
            <h3 style="font-size: 16px; font-weight: bold; margin-bottom: 8px;">
                {result.title.unwrap_or_else(|| "(no title)".to_string())}
            </h3>
            <a href=result.url.clone() target="_blank" rel="noopener noreferrer">{result.url.clone()}</a>
            {result.description.map(|d| view! { <p style="margin-top: 8px;">{d}</p> })}
            {(!result.headings.is_empty()).then(|| {
                view! {
                    <ul style="margin-top: 8px; padding-left: 20px;">
                        {result.headings.into_iter().map(|h| view! { <li>{h}</li> }).collect_view()}
                    </ul>
                }
            })}
            <div style="margin-top: 8px; font-size: 12px; color: var(--colorNeutralForeground3);">
                {format!("Links: {} • Fetched: {} UTC", result.links_count, fetched_at)}
            </div>
        </div>
    }
}

#[component]
pub fn ParsePage() -> impl IntoView {
    let vm = ParsePageVm::new(use_storage());
    let on_send = Callback::new(move |data| vm.send(data));

    view! {
        <div style="padding: 20px; max-width: 800px;">
            <h2 style="font-size: 18px; font-weight: bold; margin-bottom: 16px;">"Parse a page"</h2>
            <ParseForm
                loading=vm.loading
                error=vm.error
                initial_url=vm.last_url().unwrap_or_default()
                on_send=on_send
            />
            {move || vm.result.get().map(result_card)}
        </div>
    }
}
