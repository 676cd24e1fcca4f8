use super::message::StatusMessage;
use std::cell::RefCell;
use std::rc::Rc;

/// Channel the form orchestrator reports outcomes through
pub trait Notifier {
    fn publish(&self, message: StatusMessage);
}

type Subscriber = Rc<dyn Fn(&StatusMessage)>;

#[derive(Default)]
struct BusState {
    published: Vec<StatusMessage>,
    subscribers: Vec<Subscriber>,
}

/// In-memory notifier: keeps every published message and forwards it to
/// its subscribers in subscription order.
#[derive(Clone, Default)]
pub struct MessageBus {
    state: Rc<RefCell<BusState>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&StatusMessage) + 'static) {
        self.state.borrow_mut().subscribers.push(Rc::new(subscriber));
    }

    pub fn published(&self) -> Vec<StatusMessage> {
        self.state.borrow().published.clone()
    }

    pub fn count(&self, message: &StatusMessage) -> usize {
        self.state
            .borrow()
            .published
            .iter()
            .filter(|m| *m == message)
            .count()
    }
}

impl Notifier for MessageBus {
    fn publish(&self, message: StatusMessage) {
        log::debug!("notification: {}", message.key());
        let subscribers = {
            let mut state = self.state.borrow_mut();
            state.published.push(message.clone());
            state.subscribers.clone()
        };
        for subscriber in subscribers {
            subscriber(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api_error::ErrorKind;
    use std::cell::Cell;

    #[test]
    fn test_bus_records_and_forwards() {
        let bus = MessageBus::new();
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.publish(StatusMessage::SaveSuccess);
        bus.publish(StatusMessage::SaveError(ErrorKind::ServerError));

        assert_eq!(seen.get(), 2);
        assert_eq!(bus.count(&StatusMessage::SaveSuccess), 1);
        assert_eq!(
            bus.published(),
            vec![
                StatusMessage::SaveSuccess,
                StatusMessage::SaveError(ErrorKind::ServerError)
            ]
        );
    }

    #[test]
    fn test_subscriber_may_publish() {
        let bus = MessageBus::new();
        let inner = bus.clone();
        bus.subscribe(move |message| {
            if *message == StatusMessage::DeleteSuccess {
                inner.publish(StatusMessage::LoadError);
            }
        });
        bus.publish(StatusMessage::DeleteSuccess);
        assert_eq!(bus.published().len(), 2);
    }
}
