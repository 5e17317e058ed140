//! Chat Page - View Component

use super::view_model::ChatPageVm;
use crate::shared::components::chat_form::ChatForm;
use crate::shared::icons::icon;
use crate::shared::storage::use_storage;
use contracts::chat::ChatRole;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ChatPage() -> impl IntoView {
    let vm = ChatPageVm::new(use_storage());
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    // Restore after the first render so the page is briefly Idle
    Effect::new(move |_| vm.restore());

    // Leaving the page cancels the running stream
    on_cleanup(move || vm.abort_in_flight());

    // Keep the newest content in view
    Effect::new(move |_| {
        vm.session.track();
        if let Some(container) = messages_container_ref.get_untracked() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let connection = Signal::derive(move || Some(vm.session.with(|s| s.state())));
    let on_send = Callback::new(move |value| vm.send(value));
    let on_stop_generation = Callback::new(move |_| vm.stop());

    view! {
        <div style="height: 100%; display: flex; flex-direction: column; padding: 20px;">
            <Flex
                justify=FlexJustify::SpaceBetween
                align=FlexAlign::Center
                style="margin-bottom: 16px; padding-bottom: 12px; border-bottom: 1px solid var(--colorNeutralStroke2);"
            >
                <Flex align=FlexAlign::Center style="gap: 16px;">
                    <h2 style="font-size: 18px; font-weight: bold;">"Chat"</h2>
                    <span style="color: var(--colorNeutralForeground3); font-size: 14px;">
                        {move || format!("Messages: {}", vm.session.with(|s| s.entries().len()))}
                    </span>
                    <span style="color: var(--colorNeutralForeground3); font-size: 14px;">
                        {move || format!("Status: {}", vm.session.with(|s| s.state().as_str()))}
                    </span>
                </Flex>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.session.with(|s| s.state().is_generating()))
                    on_click=move |_| vm.clear()
                >
                    {icon("trash")}
                    " Clear"
                </Button>
            </Flex>

            {move || {
                vm.session
                    .with(|s| s.error().map(str::to_string))
                    .map(|e| {
                        view! {
                            <Flex
                                justify=FlexJustify::SpaceBetween
                                align=FlexAlign::Center
                                style="padding: 12px; margin-bottom: 16px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px;"
                            >
                                <span style="color: var(--color-error);">{e}</span>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| vm.dismiss_error()
                                >
                                    {icon("close")}
                                    " Dismiss"
                                </Button>
                            </Flex>
                        }
                    })
            }}

            <div
                node_ref=messages_container_ref
                style="flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; margin-bottom: 16px; padding: 12px; background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;"
            >
                <For
                    each=move || vm.session.with(|s| s.entries().iter().map(|e| e.id).collect::<Vec<_>>())
                    key=|id| *id
                    let:id
                >
                    {{
                        let is_user = vm
                            .session
                            .with_untracked(|s| s.entry(id).map(|e| e.message.role == ChatRole::User))
                            .unwrap_or(false);
                        let content = move || {
                            vm.session
                                .with(|s| s.entry(id).map(|e| e.message.content.clone()))
                                .unwrap_or_default()
                        };
                        view! {
                            <div
                                style=if is_user {
                                    "align-self: flex-end; max-width: 70%;"
                                } else {
                                    "align-self: flex-start; max-width: 70%;"
                                }
                            >
                                <div
                                    style=if is_user {
                                        "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px;"
                                    } else {
                                        "background: var(--colorNeutralBackground2); padding: 10px 14px; border-radius: 12px;"
                                    }
                                >
                                    <div style="white-space: pre-wrap;">
                                        {move || {
                                            let text = content();
                                            if text.is_empty() && !is_user {
                                                view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                                            } else {
                                                text.into_any()
                                            }
                                        }}
                                    </div>
                                </div>
                            </div>
                        }
                    }}
                </For>
            </div>

            <ChatForm
                connection=connection
                on_send=on_send
                on_stop_generation=on_stop_generation
            />
        </div>
    }
}
