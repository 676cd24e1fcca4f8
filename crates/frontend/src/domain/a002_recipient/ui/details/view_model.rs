use super::model;
use crate::shared::form::{FormError, FormOrchestrator, FormRecord, FormSnapshot};
use crate::shared::notifications::Notifier;
use contracts::domain::a001_award::{Award, AwardId};
use contracts::domain::a002_recipient::{fields, registration_sections, RecipientDto, RecipientId};
use contracts::domain::a003_service::{OptionSelection, ServiceId};
use contracts::domain::a004_pecsf_charity::PecsfCharity;
use contracts::shared::api_error::ApiError;
use contracts::shared::field_path::FieldPath;
use contracts::usecases::u001_reconcile_award_options::{
    initial_input, item_size, reconcile, AwardOptionInput,
};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

/// Typed value of the field at `path`, if present and well-formed
fn read<T: DeserializeOwned>(record: &FormRecord, path: &str) -> Option<T> {
    let path = FieldPath::parse(path).ok()?;
    serde_json::from_value(record.get(&path)?.clone()).ok()
}

/// Option input of the record; empty when absent or malformed
fn award_input(record: &FormRecord) -> AwardOptionInput {
    read(record, fields::AWARD_INPUT).unwrap_or_default()
}

/// Item size the engraving of `award` is for; `None` until one is chosen
pub fn chosen_item_size(record: &FormRecord, award: &Award) -> Option<String> {
    item_size(award, &award_input(record)).map(str::to_string)
}

/// The record's award, if `awards` offers it
fn selected_award<'a>(record: &FormRecord, awards: &'a [Award]) -> Option<&'a Award> {
    let id = read::<AwardId>(record, fields::AWARD)?;
    awards.iter().find(|a| a.id == id)
}

/// Path of the choice that picks `award`'s item size
fn item_size_path(award: &Award) -> Option<FieldPath> {
    let group = award.item_size_group()?;
    let values = FieldPath::literal(fields::AWARD_VALUES);
    let segments = values
        .segments()
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(group.option_type));
    FieldPath::from_segments(segments).ok()
}

/// Whether a change at `path` alters the section rules. Free-text option
/// values and the engraving message only feed the existing rules.
fn changes_rules(path: &FieldPath, record: &FormRecord, awards: &[Award]) -> bool {
    let text = path.to_string();
    text == fields::AWARD
        || text == fields::ENGRAVING_SIZE
        || selected_award(record, awards)
            .and_then(item_size_path)
            .is_some_and(|size_path| &size_path == path)
}

/// Engraving size implied by the item-size choice; `None` when the award
/// has no such choice and the size is entered with the engraving.
fn synced_engraving_size(record: &FormRecord, awards: &[Award]) -> Option<Value> {
    let award = selected_award(record, awards)?;
    award.item_size_group()?;
    Some(chosen_item_size(record, award).map_or(Value::Null, Value::String))
}

/// Fix-up of the award fields once the award list is known
#[derive(Debug, Clone, PartialEq)]
enum AwardUpdate {
    /// The chosen award is not offered; drop it and its input
    Clear,
    /// Option input rebuilt from the stored selections
    Restore(AwardOptionInput),
}

fn award_update(record: &FormRecord, awards: &[Award], charities: &[PecsfCharity]) -> Option<AwardUpdate> {
    read::<AwardId>(record, fields::AWARD)?;
    let Some(award) = selected_award(record, awards) else {
        return Some(AwardUpdate::Clear);
    };
    if award_input(record) != AwardOptionInput::default() {
        return None;
    }
    let selections: Vec<OptionSelection> = read(record, fields::SELECTIONS).unwrap_or_default();
    if selections.is_empty() {
        return None;
    }
    Some(AwardUpdate::Restore(initial_input(award, &selections, charities)))
}

/// Turns the edited record into the payload saved to the server: the
/// selected award's option input is reconciled into option selections.
pub fn prepare_submission(record: &FormRecord, awards: &[Award]) -> Result<RecipientDto, ApiError> {
    let mut dto: RecipientDto = record.typed()?;
    match dto.service.award {
        Some(award_id) => {
            let award = awards.iter().find(|a| a.id == award_id).ok_or_else(|| {
                ApiError::invalid_data(format!("Award {} is not offered for this milestone", award_id))
            })?;
            let service = *dto.service.id.get_or_insert_with(ServiceId::new_v4);
            dto.service.selections = reconcile(
                award,
                service,
                &dto.service.selections,
                &dto.service.award_input,
            )
            .map_err(|e| ApiError::invalid_data(e.to_string()))?;
        }
        None => dto.service.selections.clear(),
    }
    Ok(dto)
}

/// ViewModel of the recipient registration form
#[derive(Clone)]
pub struct RegistrationViewModel {
    pub form: FormOrchestrator,
    pub snapshot: RwSignal<FormSnapshot>,
    pub awards: RwSignal<Vec<Award>>,
    pub charities: RwSignal<Vec<PecsfCharity>>,
    api_base: String,
}

impl RegistrationViewModel {
    pub fn new(
        notifier: Rc<dyn Notifier>,
        api_base: String,
        on_cancel: Rc<dyn Fn(())>,
        on_removed: Rc<dyn Fn(())>,
    ) -> Self {
        let defaults = FormRecord::from_value(RecipientDto::default_record()).unwrap_or_default();
        let form = FormOrchestrator::new(
            notifier,
            defaults,
            registration_sections(&[], None, &AwardOptionInput::default()),
        )
        .on_cancel(move || on_cancel(()))
        .on_removed(move || on_removed(()));

        let snapshot = RwSignal::new(form.snapshot());
        form.subscribe(move |s| snapshot.set(s.clone()));

        Self {
            form,
            snapshot,
            awards: RwSignal::new(Vec::new()),
            charities: RwSignal::new(Vec::new()),
            api_base,
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + Copy + Send + Sync + 'static {
        let snapshot = self.snapshot;
        move || snapshot.with(|s| read::<RecipientId>(&s.record, "id").is_some())
    }

    pub fn is_ready(&self) -> impl Fn() -> bool + Copy + Send + Sync + 'static {
        let snapshot = self.snapshot;
        move || snapshot.with(|s| s.ready)
    }

    pub fn is_blocked(&self) -> impl Fn() -> bool + Copy + Send + Sync + 'static {
        let snapshot = self.snapshot;
        move || snapshot.with(|s| s.blocked)
    }

    /// Save is offered once every section is complete and confirmed
    pub fn can_submit(&self) -> impl Fn() -> bool + Copy + Send + Sync + 'static {
        let snapshot = self.snapshot;
        move || {
            snapshot.with(|s| {
                s.ready && !s.blocked && read::<bool>(&s.record, fields::CONFIRMED).unwrap_or(false)
            })
        }
    }

    /// Load the recipient (or start a new registration) and its lookups
    pub fn load(&self, id: Option<String>) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let base = vm.api_base.clone();
            vm.form
                .load(|| async move {
                    match id {
                        Some(id) => model::fetch_recipient(&base, &id).await,
                        None => Ok(None),
                    }
                })
                .await;
            vm.load_charities().await;
            vm.load_awards().await;
        });
    }

    async fn load_charities(&self) {
        match model::fetch_pecsf_charities(&self.api_base).await {
            Ok(charities) => self.charities.set(charities),
            Err(e) => log::warn!("PECSF charities not loaded: {}", e),
        }
    }

    async fn load_awards(&self) {
        let milestone = read::<u32>(&self.form.record(), fields::MILESTONE);
        let awards = match milestone {
            Some(milestone) => match model::fetch_awards(&self.api_base, milestone).await {
                Ok(awards) => Some(awards),
                Err(e) => {
                    log::warn!("awards for milestone {} not loaded: {}", milestone, e);
                    None
                }
            },
            None => Some(Vec::new()),
        };
        match awards {
            Some(awards) => {
                self.awards.set(awards);
                self.update_award();
            }
            // an unknown list says nothing about the chosen award
            None => self.awards.set(Vec::new()),
        }
        self.refresh_sections();
    }

    fn update_award(&self) {
        let update = self.awards.with_untracked(|awards| {
            self.charities
                .with_untracked(|charities| award_update(&self.form.record(), awards, charities))
        });
        let result = match update {
            Some(AwardUpdate::Clear) => {
                log::debug!("award not offered for this milestone; clearing it");
                self.form
                    .set_field_str(fields::AWARD, Value::Null)
                    .and_then(|_| self.reset_award_input())
            }
            Some(AwardUpdate::Restore(input)) => match serde_json::to_value(input) {
                Ok(input) => self.form.set_field_str(fields::AWARD_INPUT, input),
                Err(e) => {
                    log::warn!("award input not restored: {}", e);
                    Ok(())
                }
            },
            None => Ok(()),
        };
        if let Err(e) = result {
            log::debug!("award fields not updated: {}", e);
        }
    }

    fn reset_award_input(&self) -> Result<(), FormError> {
        let cleared = serde_json::to_value(AwardOptionInput::default()).unwrap_or_default();
        self.form.set_field_str(fields::AWARD_INPUT, cleared)
    }

    /// Rebuild the section rules for the selected award and option input
    fn refresh_sections(&self) {
        let record = self.form.record();
        let award_id = read::<AwardId>(&record, fields::AWARD);
        let input = award_input(&record);
        let sections = self
            .awards
            .with_untracked(|awards| registration_sections(awards, award_id, &input));
        self.form.set_sections(sections);
    }

    fn sync_engraving_size(&self) {
        let record = self.form.record();
        let size = self
            .awards
            .with_untracked(|awards| synced_engraving_size(&record, awards));
        if let Some(size) = size {
            if let Err(e) = self.form.set_field_str(fields::ENGRAVING_SIZE, size) {
                log::debug!("engraving size not updated: {}", e);
            }
        }
    }

    pub fn set_field(&self, path: &str, value: Value) {
        match FieldPath::parse(path) {
            Ok(path) => self.set_path(&path, value),
            Err(e) => log::warn!("invalid field path `{}`: {}", path, e),
        }
    }

    pub fn set_path(&self, path: &FieldPath, value: Value) {
        if let Err(e) = self.form.set_field(path, value) {
            log::debug!("{} not updated: {}", path, e);
            return;
        }
        let text = path.to_string();
        if text == fields::MILESTONE {
            let vm = self.clone();
            wasm_bindgen_futures::spawn_local(async move { vm.load_awards().await });
            return;
        }
        if text == fields::AWARD {
            // input of the previous award no longer applies
            if let Err(e) = self.reset_award_input() {
                log::debug!("award input not reset: {}", e);
            }
        }
        let record = self.form.record();
        let rebuild = self.awards.with_untracked(|awards| changes_rules(path, &record, awards));
        if rebuild {
            if text != fields::ENGRAVING_SIZE {
                self.sync_engraving_size();
            }
            self.refresh_sections();
        }
    }

    pub fn submit_command(&self) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let awards = vm.awards.get_untracked();
            let base = vm.api_base.clone();
            let saved = vm
                .form
                .submit(|record| async move {
                    let dto = prepare_submission(&record, &awards)?;
                    model::save_recipient(&base, &dto).await
                })
                .await;
            // show server-assigned ids
            if let Some(saved) = saved {
                match serde_json::to_value(&saved) {
                    Ok(value) => vm.form.load(|| async move { Ok(Some(value)) }).await,
                    Err(e) => log::warn!("saved record not shown: {}", e),
                }
            }
        });
    }

    pub fn delete_command(&self) {
        let Some(id) = read::<RecipientId>(&self.form.record(), "id") else {
            log::debug!("delete ignored: record is not saved yet");
            return;
        };
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let base = vm.api_base.clone();
            vm.form
                .remove(|id| async move { model::delete_recipient(&base, id).await }, id)
                .await;
        });
    }

    pub fn cancel(&self) {
        self.form.cancel();
    }
}
