use super::bus::Notifier;
use super::message::{Message, StatusMessage};
use super::schema::MessageSchema;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: Message,
}

/// Toast notifications shown at the page corner, one at a time
#[derive(Clone, Copy)]
pub struct MessageService {
    current: RwSignal<Option<Toast>>,
    schema: StoredValue<MessageSchema>,
    next_id: StoredValue<u64>,
    duration_ms: u32,
}

impl MessageService {
    pub fn new(schema: MessageSchema, duration_ms: u32) -> Self {
        Self {
            current: RwSignal::new(None),
            schema: StoredValue::new(schema),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    /// Replace the current toast; it hides itself after the configured duration
    pub fn show(&self, message: Message) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Toast { id, message }));

        let current = self.current;
        let duration_ms = self.duration_ms;
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            // a newer toast keeps its own timer
            current.update(|toast| {
                if toast.as_ref().is_some_and(|t| t.id == id) {
                    *toast = None;
                }
            });
        });
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    pub fn current(&self) -> Option<Toast> {
        self.current.get()
    }
}

impl Notifier for MessageService {
    fn publish(&self, message: StatusMessage) {
        let resolved = self.schema.with_value(|schema| schema.resolve(&message));
        self.show(resolved);
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_context::<MessageService>().expect("MessageService not provided in context");

    view! {
        {move || service.current().map(|toast| {
            let class = format!("toast {}", toast.message.kind.css_class());
            view! {
                <div class=class role="status" on:click=move |_| service.dismiss()>
                    <strong class="toast__summary">{toast.message.summary}</strong>
                    <p class="toast__detail">{toast.message.detail}</p>
                </div>
            }
        })}
    }
}
