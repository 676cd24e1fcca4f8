//! Lifecycle of one form screen
//!
//! The orchestrator owns the editable record, runs the section validators
//! after every accepted change, and wraps the load/save/delete round trips:
//! the form is blocked while one is in flight, and every outcome is
//! published through the injected [`Notifier`].
//!
//! Each round trip captures the session generation when it starts. Closing
//! the form or starting a newer load bumps the generation, so a result that
//! arrives late is dropped without touching state.

use super::record::FormRecord;
use crate::shared::notifications::{Notifier, StatusMessage};
use contracts::shared::api_error::ApiError;
use contracts::shared::field_path::{FieldPath, FieldPathError};
use contracts::shared::validation::{SectionSet, SectionStatus};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form is busy")]
    Blocked,

    #[error("Form is closed")]
    Closed,

    #[error(transparent)]
    Path(#[from] FieldPathError),
}

/// State handed to observers after every change
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub phase: FormPhase,
    pub blocked: bool,
    pub ready: bool,
    pub sections: Vec<(String, SectionStatus)>,
    pub record: FormRecord,
}

impl FormSnapshot {
    pub fn section_status(&self, name: &str) -> Option<SectionStatus> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, status)| *status)
    }
}

type Observer = Rc<dyn Fn(&FormSnapshot)>;
type Callback = Rc<dyn Fn()>;

struct FormState {
    phase: FormPhase,
    defaults: FormRecord,
    record: FormRecord,
    sections: SectionSet,
    read_only: bool,
    /// Section name -> (fingerprint, status) of the last evaluation
    statuses: HashMap<String, (u64, SectionStatus)>,
    ready: bool,
    evaluations: u64,
    generation: u64,
    observers: Vec<Observer>,
    on_cancel: Option<Callback>,
    on_removed: Option<Callback>,
}

impl FormState {
    fn blocked(&self) -> bool {
        matches!(self.phase, FormPhase::Loading | FormPhase::Submitting) || self.read_only
    }

    /// Re-evaluates sections whose fingerprint changed
    fn revalidate(&mut self) {
        let record = self.record.as_value();
        let mut ready = true;
        for section in self.sections.sections() {
            let fingerprint = section.fingerprint(record);
            let cached = self
                .statuses
                .get(&section.name)
                .filter(|(previous, _)| *previous == fingerprint)
                .map(|(_, status)| *status);
            let status = match cached {
                Some(status) => status,
                None => {
                    let status = section.status(record);
                    self.evaluations += 1;
                    self.statuses
                        .insert(section.name.clone(), (fingerprint, status));
                    status
                }
            };
            if !self.sections.is_confirmation(&section.name) {
                ready &= status != SectionStatus::Required;
            }
        }
        self.ready = ready;
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            phase: self.phase,
            blocked: self.blocked(),
            ready: self.ready,
            sections: self
                .sections
                .sections()
                .iter()
                .map(|s| {
                    let status = self
                        .statuses
                        .get(&s.name)
                        .map(|(_, status)| *status)
                        .unwrap_or(SectionStatus::Required);
                    (s.name.clone(), status)
                })
                .collect(),
            record: self.record.clone(),
        }
    }

    /// Leaves `Submitting` if the action still belongs to the current session
    fn finish(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.phase == FormPhase::Closed {
            return false;
        }
        self.phase = FormPhase::Ready;
        true
    }
}

/// Cloneable handle; clones share one form.
#[derive(Clone)]
pub struct FormOrchestrator {
    state: Rc<RefCell<FormState>>,
    notifier: Rc<dyn Notifier>,
}

impl FormOrchestrator {
    pub fn new(notifier: Rc<dyn Notifier>, defaults: FormRecord, sections: SectionSet) -> Self {
        let mut state = FormState {
            phase: FormPhase::Idle,
            record: defaults.clone(),
            defaults,
            sections,
            read_only: false,
            statuses: HashMap::new(),
            ready: false,
            evaluations: 0,
            generation: 0,
            observers: Vec::new(),
            on_cancel: None,
            on_removed: None,
        };
        state.revalidate();
        Self {
            state: Rc::new(RefCell::new(state)),
            notifier,
        }
    }

    pub fn on_cancel(self, callback: impl Fn() + 'static) -> Self {
        self.state.borrow_mut().on_cancel = Some(Rc::new(callback));
        self
    }

    /// Runs after a successful delete, typically to reload a list
    pub fn on_removed(self, callback: impl Fn() + 'static) -> Self {
        self.state.borrow_mut().on_removed = Some(Rc::new(callback));
        self
    }

    pub fn subscribe(&self, observer: impl Fn(&FormSnapshot) + 'static) {
        self.state.borrow_mut().observers.push(Rc::new(observer));
    }

    fn notify_observers(&self) {
        let (observers, snapshot) = {
            let state = self.state.borrow();
            (state.observers.clone(), state.snapshot())
        };
        for observer in observers {
            observer(&snapshot);
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.state.borrow().phase
    }

    pub fn blocked(&self) -> bool {
        self.state.borrow().blocked()
    }

    /// Every section except the confirmation section is complete
    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// `None` for an unknown section
    pub fn section_complete(&self, name: &str) -> Option<bool> {
        let state = self.state.borrow();
        state.sections.get(name)?;
        Some(
            state
                .statuses
                .get(name)
                .is_some_and(|(_, status)| *status != SectionStatus::Required),
        )
    }

    /// Labels of the rules a section fails on the current record; empty for
    /// an unknown section or one its condition skips
    pub fn failing_fields(&self, name: &str) -> Vec<String> {
        let state = self.state.borrow();
        state
            .sections
            .get(name)
            .map(|section| {
                section
                    .failed_rules(state.record.as_value())
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn record(&self) -> FormRecord {
        self.state.borrow().record.clone()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().snapshot()
    }

    /// Number of section evaluations run so far
    pub fn evaluations(&self) -> u64 {
        self.state.borrow().evaluations
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.state.borrow_mut().read_only = read_only;
        self.notify_observers();
    }

    /// Swaps the section validators, e.g. when the rules depend on a
    /// selection made in the form.
    pub fn set_sections(&self, sections: SectionSet) {
        {
            let mut state = self.state.borrow_mut();
            state.sections = sections;
            state.statuses.clear();
            state.revalidate();
        }
        self.notify_observers();
    }

    pub fn set_field(&self, path: &FieldPath, value: Value) -> Result<(), FormError> {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == FormPhase::Closed {
                return Err(FormError::Closed);
            }
            if state.blocked() {
                return Err(FormError::Blocked);
            }
            state.record.set(path, value)?;
            state.revalidate();
        }
        self.notify_observers();
        Ok(())
    }

    pub fn set_field_str(&self, path: &str, value: Value) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        self.set_field(&path, value)
    }

    /// Fills the form from `loader`. `Ok(None)` starts a new record from the
    /// defaults; each top-level key of a loaded object replaces the default
    /// under that key. A failure keeps the defaults, publishes `LoadError` and
    /// still leaves the form ready.
    pub async fn load<F, Fut>(&self, loader: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<Value>, ApiError>>,
    {
        let generation = {
            let mut state = self.state.borrow_mut();
            if state.phase == FormPhase::Closed {
                log::debug!("load ignored: form is closed");
                return;
            }
            state.generation += 1;
            state.phase = FormPhase::Loading;
            state.generation
        };
        self.notify_observers();

        let result = loader().await;

        let failed = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation || state.phase == FormPhase::Closed {
                log::debug!("discarding stale load result (generation {})", generation);
                return;
            }
            let (record, failed) = match result {
                Ok(None) => (state.defaults.clone(), false),
                Ok(Some(loaded)) if loaded.is_object() => {
                    (FormRecord::merged(&state.defaults, loaded), false)
                }
                Ok(Some(other)) => {
                    log::warn!("load returned a non-object record: {}", other);
                    (state.defaults.clone(), true)
                }
                Err(e) => {
                    log::warn!("load failed: {}", e);
                    (state.defaults.clone(), true)
                }
            };
            state.record = record;
            state.phase = FormPhase::Ready;
            state.revalidate();
            failed
        };

        if failed {
            self.notifier.publish(StatusMessage::LoadError);
        }
        self.notify_observers();
    }

    /// Saves the record through `save`. Refused while blocked or not ready
    /// (`save` is not called); returns the saved value on success.
    pub async fn submit<T, F, Fut>(&self, save: F) -> Option<T>
    where
        F: FnOnce(FormRecord) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let (generation, record) = self.begin_action("submit")?;
        let result = save(record).await;
        if !self.state.borrow_mut().finish(generation) {
            log::debug!("discarding stale save result (generation {})", generation);
            return None;
        }

        let outcome = match result {
            Ok(saved) => {
                self.notifier.publish(StatusMessage::SaveSuccess);
                Some(saved)
            }
            Err(e) => {
                log::warn!("save failed: {}", e);
                self.notifier.publish(StatusMessage::SaveError(e.kind));
                None
            }
        };
        self.notify_observers();
        outcome
    }

    /// Deletes through `destroy(id)`; on success the `on_removed` callback
    /// runs once.
    pub async fn remove<Id, T, F, Fut>(&self, destroy: F, id: Id) -> Option<T>
    where
        F: FnOnce(Id) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let (generation, _) = self.begin_action("remove")?;
        let result = destroy(id).await;
        if !self.state.borrow_mut().finish(generation) {
            log::debug!("discarding stale delete result (generation {})", generation);
            return None;
        }

        let outcome = match result {
            Ok(removed) => {
                self.notifier.publish(StatusMessage::DeleteSuccess);
                let on_removed = self.state.borrow().on_removed.clone();
                if let Some(callback) = on_removed {
                    callback();
                }
                Some(removed)
            }
            Err(e) => {
                log::warn!("delete failed: {}", e);
                self.notifier.publish(StatusMessage::DeleteError(e.kind));
                None
            }
        };
        self.notify_observers();
        outcome
    }

    fn begin_action(&self, action: &str) -> Option<(u64, FormRecord)> {
        let started = {
            let mut state = self.state.borrow_mut();
            if state.phase != FormPhase::Ready || state.blocked() {
                log::debug!("{} refused in phase {:?}", action, state.phase);
                None
            } else {
                state.phase = FormPhase::Submitting;
                Some((state.generation, state.record.clone()))
            }
        };
        if started.is_some() {
            self.notify_observers();
        }
        started
    }

    pub fn cancel(&self) {
        let on_cancel = self.state.borrow().on_cancel.clone();
        if let Some(callback) = on_cancel {
            callback();
        }
        self.close();
    }

    pub fn close(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == FormPhase::Closed {
                return;
            }
            state.phase = FormPhase::Closed;
            state.generation += 1;
        }
        log::debug!("form closed");
        self.notify_observers();
    }
}
