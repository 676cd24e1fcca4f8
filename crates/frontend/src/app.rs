use crate::domain::a002_recipient::ui::details::RegistrationDetails;
use crate::shared::config::{load_config, AppConfig};
use crate::shared::notifications::{MessageSchema, MessageService, ToastHost};
use leptos::prelude::*;
use std::rc::Rc;

/// Recipient id from the location hash (`#<id>`); none starts a new registration
fn recipient_id() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let id = hash.trim_start_matches('#').trim();
    (!id.is_empty()).then(|| id.to_string())
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Invalid embedded configuration: {}", e);
        AppConfig::default()
    });
    let schema = MessageSchema::embedded().unwrap_or_else(|e| {
        log::error!("Invalid embedded message schema: {}", e);
        MessageSchema::default()
    });

    // Toasts for every form outcome
    provide_context(MessageService::new(schema, config.toast.duration_ms));
    provide_context(config);

    let closed = RwSignal::new(false);
    let id = recipient_id();

    view! {
        <main class="app">
            {move || {
                if closed.get() {
                    view! { <p class="app__closed">"Registration closed."</p> }.into_any()
                } else {
                    let on_close: Rc<dyn Fn(())> = Rc::new(move |_| closed.set(true));
                    view! {
                        <RegistrationDetails
                            id=id.clone()
                            on_removed=on_close.clone()
                            on_cancel=on_close
                        />
                    }
                    .into_any()
                }
            }}
            <ToastHost />
        </main>
    }
}
