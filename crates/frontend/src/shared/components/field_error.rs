use leptos::prelude::*;

/// Error line shown under an invalid field
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <div class="form__error" style="color: var(--colorPaletteRedForeground1); font-size: 12px; margin-top: 4px;">
                    {message}
                </div>
            }
        })
    }
}
