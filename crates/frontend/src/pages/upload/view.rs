//! Upload Page - View Component

use super::view_model::UploadPageVm;
use crate::shared::components::file_input::FileInput;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

const ACCEPTED_TYPES: &str = ".png,.jpeg,.gif,.webp";
const MAX_FILE_SIZE_MB: f64 = 5.0;

#[component]
pub fn UploadPage() -> impl IntoView {
    let vm = UploadPageVm::new();

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.upload();
    };

    view! {
        <div style="padding: 20px; max-width: 600px;">
            <h2 style="font-size: 18px; font-weight: bold; margin-bottom: 16px;">"Upload an image"</h2>
            <form on:submit=handle_submit novalidate=true>
                <FileInput
                    label="Image"
                    accepted_types=ACCEPTED_TYPES.to_string()
                    max_file_size=MAX_FILE_SIZE_MB
                    value=vm.stored_url
                    touched=vm.touched
                    on_change=Callback::new(move |value| vm.select(value))
                    on_touched=Callback::new(move |_| vm.touched.set(true))
                    on_validation=Callback::new(move |errors| vm.validation.set(errors))
                />
                <div style="margin-top: 8px; font-size: 12px; color: var(--colorNeutralForeground3);">
                    {format!("Accepted: {} • up to {} MB", ACCEPTED_TYPES, MAX_FILE_SIZE_MB)}
                </div>

                {move || {
                    vm.error
                        .get()
                        .map(|e| view! { <div class="form__error" style="margin-top: 8px;">{e.message}</div> })
                }}

                <div style="margin-top: 12px;">
                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || !vm.can_upload())
                >
                    {move || if vm.uploading.get() {
                        view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                    } else {
                        icon("upload")
                    }}
                    " Upload"
                </Button>
                </div>
            </form>

            {move || vm.preview_url().map(|src| view! {
                <img
                    src=src
                    alt="Preview"
                    style="display: block; margin-top: 20px; max-width: 100%; max-height: 320px; border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;"
                />
            })}
        </div>
    }
}
