//! Toast list

use leptos::prelude::*;

use crate::state::Toasts;

#[component]
pub fn Notifications(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toasts">
            {move || {
                toasts
                    .queue
                    .with(|queue| queue.iter().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|notification| {
                        let id = notification.id;
                        view! {
                            <div class=format!("toast {}", notification.kind.css_class())>
                                <div class="toast-body">
                                    <strong class="toast-title">{notification.title}</strong>
                                    <p class="toast-message">{notification.message}</p>
                                </div>
                                <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
