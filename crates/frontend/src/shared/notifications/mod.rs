//! Status notifications
//!
//! The form orchestrator publishes [`StatusMessage`]s through a [`Notifier`].
//! In the browser the notifier is the [`MessageService`], which resolves
//! each message through the [`MessageSchema`] and shows it as a toast.

pub mod bus;
pub mod message;
pub mod schema;
pub mod service;

pub use bus::{MessageBus, Notifier};
pub use message::{Message, MessageKind, StatusMessage};
pub use schema::MessageSchema;
pub use service::{MessageService, Toast, ToastHost};
