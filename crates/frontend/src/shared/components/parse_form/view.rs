//! Parse Form - View Component

use super::model::ParseFormModel;
use crate::shared::api_utils::RequestError;
use crate::shared::components::field_error::FieldError;
use crate::shared::icons::icon;
use contracts::parse::ParseFormData;
use leptos::prelude::*;
use thaw::*;

/// URL input with submit button.
///
/// A new `error` from the parent is shown as a server error on the field
/// until the user edits it.
#[component]
pub fn ParseForm(
    #[prop(optional, into)] loading: Signal<bool>,
    #[prop(optional, into)] error: Signal<Option<RequestError>>,
    #[prop(optional, into)] initial_url: Option<String>,
    on_send: Callback<ParseFormData>,
) -> impl IntoView {
    let form = RwSignal::new(ParseFormModel::new(initial_url.unwrap_or_default()));

    Effect::new(move |_| {
        if let Some(error) = error.get() {
            form.update(|f| f.apply_server_error(&error));
        }
    });

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        if let Some(value) = form.try_update(|f| f.submit()).flatten() {
            on_send.run(value);
        }
    };

    let field_error = Signal::derive(move || form.with(|f| f.error_message()));

    view! {
        <form class="parse-form" on:submit=handle_submit novalidate=true>
            <div class="form__group">
                <label class="form__label">"Page URL"</label>
                <Flex style="gap: 8px; align-items: center;">
                    <input
                        type="url"
                        class="parse-form__url"
                        style="flex: 1;"
                        placeholder="https://example.com/article"
                        prop:value=move || form.with(|f| f.url.value().to_string())
                        on:input=move |ev| form.update(|f| f.url.input(event_target_value(&ev)))
                        on:blur=move |_| form.update(|f| f.url.mark_as_touched())
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=loading
                    >
                        {move || {
                            if loading.get() {
                                view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                            } else {
                                icon("link")
                            }
                        }}
                        " Parse"
                    </Button>
                </Flex>
                <FieldError error=field_error />
            </div>
        </form>
    }
}
