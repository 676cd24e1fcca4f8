use super::view_model::{chosen_item_size, RegistrationViewModel};
use crate::shared::api_utils::api_base;
use crate::shared::components::ui::{Badge, Button, Checkbox, Input, SectionBadge, Select};
use crate::shared::config::AppConfig;
use crate::shared::form::FormPhase;
use crate::shared::notifications::MessageService;
use contracts::domain::a001_award::{Award, AwardOption, OptionField, OptionKind};
use contracts::domain::a002_recipient::{fields, SectionName};
use contracts::domain::a003_service::Milestone;
use contracts::domain::a004_pecsf_charity::PecsfCharity;
use contracts::shared::field_path::FieldPath;
use contracts::shared::validation::SectionStatus;
use contracts::usecases::u001_reconcile_award_options::engraving_limit;
use leptos::prelude::*;
use serde_json::Value;
use std::rc::Rc;

type Vm = StoredValue<RegistrationViewModel, LocalStorage>;

fn string_or_null(value: &str) -> Value {
    if value.trim().is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

fn number_or_null(value: &str) -> Value {
    value
        .trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Path of a field inside the award option input; `None` for a blank key
fn input_path(tail: &[&str]) -> Option<FieldPath> {
    let base = FieldPath::literal(fields::AWARD_INPUT);
    let segments = base
        .segments()
        .iter()
        .map(String::as_str)
        .chain(tail.iter().copied());
    FieldPath::from_segments(segments).ok()
}

fn label_of(option: &AwardOption) -> String {
    if option.label.is_empty() {
        option.name.clone()
    } else {
        option.label.clone()
    }
}

fn with_placeholder(placeholder: &str, options: impl IntoIterator<Item = (String, String)>) -> Vec<(String, String)> {
    std::iter::once((String::new(), placeholder.to_string()))
        .chain(options)
        .collect()
}

fn charity_options(charities: &[&PecsfCharity]) -> Vec<(String, String)> {
    with_placeholder(
        "Select a charity",
        charities.iter().map(|c| (c.id.to_string(), c.label.clone())),
    )
}

#[component]
fn TextField(
    vm: Vm,
    path: FieldPath,
    #[prop(into)] label: String,
    #[prop(optional, into)] input_type: MaybeProp<String>,
    /// Converts the entered text into the stored value
    #[prop(optional)]
    parse: Option<fn(&str) -> Value>,
    #[prop(optional, into)] maxlength: MaybeProp<usize>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let snapshot = vm.with_value(|vm| vm.snapshot);
    let id = path.to_string().replace('.', "-");
    let value = {
        let path = path.clone();
        Signal::derive(move || snapshot.with(|s| s.record.text(&path)))
    };
    let on_input = Callback::new(move |text: String| {
        let value = parse.map_or_else(|| Value::String(text.clone()), |parse| parse(&text));
        vm.with_value(|vm| vm.set_path(&path, value));
    });
    let is_disabled = Signal::derive(move || snapshot.with(|s| s.blocked) || disabled.get());

    view! {
        <Input
            id=id
            label=label
            value=value
            on_input=on_input
            input_type=input_type
            maxlength=maxlength
            disabled=is_disabled
        />
    }
}

#[component]
fn ChoiceField(
    vm: Vm,
    path: FieldPath,
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    /// Converts the chosen option value into the stored value
    #[prop(optional)]
    parse: Option<fn(&str) -> Value>,
) -> impl IntoView {
    let snapshot = vm.with_value(|vm| vm.snapshot);
    let id = path.to_string().replace('.', "-");
    let value = {
        let path = path.clone();
        Signal::derive(move || snapshot.with(|s| s.record.text(&path)))
    };
    let on_change = Callback::new(move |chosen: String| {
        let value = parse.map_or_else(|| string_or_null(&chosen), |parse| parse(&chosen));
        vm.with_value(|vm| vm.set_path(&path, value));
    });

    view! {
        <Select
            id=id
            label=label
            value=value
            options=options
            on_change=on_change
            disabled=Signal::derive(move || snapshot.with(|s| s.blocked))
        />
    }
}

#[component]
fn FlagField(
    vm: Vm,
    path: FieldPath,
    #[prop(into)] label: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let snapshot = vm.with_value(|vm| vm.snapshot);
    let id = path.to_string().replace('.', "-");
    let checked = {
        let path = path.clone();
        Signal::derive(move || snapshot.with(|s| s.record.flag(&path)))
    };
    let on_change = Callback::new(move |checked: bool| {
        vm.with_value(|vm| vm.set_path(&path, Value::Bool(checked)));
    });
    let is_disabled =
        Signal::derive(move || snapshot.with(|s| s.blocked) || disabled.get());

    view! {
        <Checkbox id=id label=label checked=checked on_change=on_change disabled=is_disabled />
    }
}

#[component]
fn AddressFields(vm: Vm, prefix: &'static str) -> impl IntoView {
    let prefix = FieldPath::literal(prefix);
    let at = move |name: &'static str| prefix.join(&FieldPath::literal(name));

    view! {
        <div class="form__address">
            <TextField vm=vm path=at("pobox") label="PO Box" />
            <TextField vm=vm path=at("street1") label="Street Address" />
            <TextField vm=vm path=at("street2") label="Street Address (line 2)" />
            <TextField vm=vm path=at("community") label="City" />
            <TextField vm=vm path=at("province") label="Province" />
            <TextField vm=vm path=at("postal_code") label="Postal Code" />
        </div>
    }
}

/// One fieldset with its completion badge and the fields still missing;
/// hidden while not applicable
#[component]
fn SectionFieldset(vm: Vm, name: SectionName, children: Children) -> impl IntoView {
    let snapshot = vm.with_value(|vm| vm.snapshot);
    let key = name.as_str();
    let status = Signal::derive(move || {
        snapshot.with(|s| s.section_status(key).unwrap_or(SectionStatus::Required))
    });
    let missing = move || {
        if status.get() != SectionStatus::Required {
            return None;
        }
        let labels = vm.with_value(|vm| vm.form.failing_fields(key));
        (!labels.is_empty()).then(|| view! {
            <p class="form__hint form__hint--missing">"Missing: "{labels.join(", ")}</p>
        })
    };
    let class = move || {
        if status.get() == SectionStatus::NotApplicable {
            "form__section form__section--hidden"
        } else {
            "form__section"
        }
    };

    view! {
        <fieldset class=class>
            <legend class="form__section-title">
                {name.title()}
                " "
                <SectionBadge status=status />
            </legend>
            {children()}
            {missing}
        </fieldset>
    }
}

#[component]
fn PecsfFields(vm: Vm, slots: usize) -> impl IntoView {
    let (snapshot, charities) = vm.with_value(|vm| (vm.snapshot, vm.charities));
    let mode_path = FieldPath::literal(fields::PECSF).join(&FieldPath::literal("mode"));
    let mode = {
        let path = mode_path.clone();
        Memo::new(move |_| snapshot.with(|s| s.record.text(&path)))
    };
    let pooled = Signal::derive(move || {
        charities.with(|c| charity_options(&PecsfCharity::pooled_funds(c, None)))
    });
    let individual =
        Signal::derive(move || charities.with(|c| charity_options(&PecsfCharity::individual(c))));
    let modes = with_placeholder(
        "Select a donation type",
        [
            ("pool".to_string(), "Regional pooled fund".to_string()),
            ("individual".to_string(), "Individual charities".to_string()),
        ],
    );

    view! {
        <ChoiceField vm=vm path=mode_path label="PECSF Donation" options=modes />
        {move || match mode.get().as_str() {
            "pool" => input_path(&["pecsf", "charity_1"])
                .map(|path| view! {
                    <ChoiceField vm=vm path=path label="Pooled Fund" options=pooled />
                })
                .into_any(),
            "individual" => (1..=slots.min(2))
                .map(|slot| {
                    let charity = format!("charity_{}", slot);
                    let program = format!("local_program_{}", slot);
                    let charity = input_path(&["pecsf", &charity]);
                    let program = input_path(&["pecsf", &program]);
                    view! {
                        {charity.map(|path| view! {
                            <ChoiceField vm=vm path=path label=format!("Charity {}", slot) options=individual />
                        })}
                        {program.map(|path| view! {
                            <TextField vm=vm path=path label="Local program (optional)" parse=string_or_null />
                        })}
                    }
                })
                .collect_view()
                .into_any(),
            _ => ().into_any(),
        }}
    }
}

/// Engraving size and message. Awards with an item-size choice take the
/// size from that choice; the message waits for a size.
#[component]
fn EngravingFields(vm: Vm, award: Award) -> impl IntoView {
    let snapshot = vm.with_value(|vm| vm.snapshot);
    let sizes: Vec<(String, String, Option<usize>)> = award
        .options
        .iter()
        .filter(|o| o.kind() == OptionKind::Engraving)
        .map(|o| (o.name.clone(), label_of(o), engraving_limit(o).ok()))
        .collect();
    let options = with_placeholder(
        "Select an item size",
        sizes.iter().map(|(name, label, limit)| {
            let text = match limit {
                Some(limit) => format!("{} (up to {} characters)", label, limit),
                None => label.clone(),
            };
            (name.clone(), text)
        }),
    );
    let (Some(size_path), Some(message_path)) = (
        input_path(&["engraving", "size"]),
        input_path(&["engraving", "message"]),
    ) else {
        return ().into_any();
    };
    let chosen_elsewhere = award.item_size_group().is_some();
    let size = Memo::new(move |_| {
        snapshot.with(|s| chosen_item_size(&s.record, &award).unwrap_or_default())
    });
    let limit = Signal::derive(move || {
        let size = size.get();
        sizes
            .iter()
            .find(|(name, _, _)| *name == size)
            .and_then(|(_, _, limit)| *limit)
    });

    view! {
        {(!chosen_elsewhere).then(|| view! {
            <ChoiceField vm=vm path=size_path label="Item Size" options=options />
        })}
        <TextField
            vm=vm
            path=message_path
            label="Engraving Message"
            maxlength=limit
            disabled=Signal::derive(move || size.get().is_empty())
        />
    }
    .into_any()
}

/// Input fields of the selected award's option groups
#[component]
fn AwardOptionFields(vm: Vm, award: Award) -> impl IntoView {
    let groups: Vec<AnyView> = award
        .option_groups()
        .into_iter()
        .map(|group| match group.field() {
            OptionField::Fixed(option) => view! {
                <p class="form__static">{label_of(option)}": "{option.value.clone()}</p>
            }
            .into_any(),
            OptionField::Text(option) => input_path(&["values", &option.name])
                .map(|path| view! { <TextField vm=vm path=path label=label_of(option) /> })
                .into_any(),
            OptionField::Choice(options) => {
                let choices = with_placeholder(
                    "Select an option",
                    options.iter().map(|o| (o.value.clone(), label_of(o))),
                );
                input_path(&["values", group.option_type])
                    .map(|path| view! {
                        <ChoiceField vm=vm path=path label=group.option_type.to_string() options=choices />
                    })
                    .into_any()
            }
            OptionField::Pecsf(slots) => view! { <PecsfFields vm=vm slots=slots.len() /> }.into_any(),
            OptionField::Engraving(_) => {
                view! { <EngravingFields vm=vm award=award.clone() /> }.into_any()
            }
        })
        .collect();

    view! { <div class="award-options">{groups}</div> }
}

#[component]
fn AwardFields(vm: Vm) -> impl IntoView {
    let (snapshot, awards) = vm.with_value(|vm| (vm.snapshot, vm.awards));
    let award_path = FieldPath::literal(fields::AWARD);
    let choices = Signal::derive(move || {
        awards.with(|a| {
            with_placeholder(
                "Select an award",
                a.iter().map(|a| (a.id.to_string(), a.label.clone())),
            )
        })
    });
    let selected = {
        let path = award_path.clone();
        Memo::new(move |_| {
            let id = snapshot.with(|s| s.record.text(&path));
            awards.with(|a| a.iter().find(|a| a.id.to_string() == id).cloned())
        })
    };

    view! {
        <ChoiceField vm=vm path=award_path label="Award" options=choices />
        {move || selected.get().map(|award| {
            let description = award.description.clone();
            view! {
                <p class="form__hint">{description}</p>
                <AwardOptionFields vm=vm award=award />
            }
        })}
    }
}

#[component]
pub fn RegistrationDetails(
    id: Option<String>,
    on_removed: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let messages = use_context::<MessageService>().expect("MessageService not provided in context");
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");

    let vm = RegistrationViewModel::new(Rc::new(messages), api_base(&config.api), on_cancel, on_removed);
    vm.load(id);

    let is_edit_mode = vm.is_edit_mode();
    let is_ready = vm.is_ready();
    let is_blocked = vm.is_blocked();
    let can_submit = vm.can_submit();
    let snapshot = vm.snapshot;
    let vm: Vm = StoredValue::new_local(vm);

    let milestones = with_placeholder(
        "Select a milestone",
        Milestone::all()
            .into_iter()
            .map(|m| (m.years().to_string(), format!("{} years", m.years()))),
    );
    let field = FieldPath::literal;

    view! {
        <div class="details-container registration-details">
            <div class="details-header">
                <h3>{move || if is_edit_mode() { "Edit Registration" } else { "New Registration" }}</h3>
                {move || {
                    let progress = match snapshot.with(|s| s.phase) {
                        FormPhase::Loading => Some("Loading..."),
                        FormPhase::Submitting => Some("Saving..."),
                        _ => None,
                    };
                    progress.map(|text| view! { <Badge variant="primary">{text}</Badge> })
                }}
            </div>

            <div class="details-form">
                <SectionFieldset vm=vm name=SectionName::Profile>
                    <TextField vm=vm path=field(fields::EMPLOYEE_NUMBER) label="Employee Number" />
                    <TextField vm=vm path=field(fields::FIRST_NAME) label="First Name" />
                    <TextField vm=vm path=field(fields::LAST_NAME) label="Last Name" />
                    <TextField vm=vm path=field(fields::OFFICE_EMAIL) label="Government Email" input_type="email" />
                    <TextField vm=vm path=field(fields::ORGANIZATION) label="Ministry / Organization" parse=string_or_null />
                    <TextField vm=vm path=field(fields::BRANCH) label="Branch" />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::Milestone>
                    <ChoiceField
                        vm=vm
                        path=field(fields::MILESTONE)
                        label="Current Milestone"
                        options=milestones
                        parse=number_or_null
                    />
                    <TextField vm=vm path=field(fields::QUALIFYING_YEAR) label="Qualifying Year" input_type="number" parse=number_or_null />
                    <FlagField vm=vm path=field(fields::CEREMONY_OPT_OUT) label="Opt out of ceremony" />
                    <FlagField vm=vm path=field(fields::RETIREMENT) label="Retiring this year" />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::Retirement>
                    <TextField vm=vm path=field(fields::RETIREMENT_DATE) label="Retirement Date" input_type="date" parse=string_or_null />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::OfficeContact>
                    <TextField vm=vm path=field(fields::OFFICE_PHONE) label="Office Phone" input_type="tel" />
                    <AddressFields vm=vm prefix=fields::OFFICE_ADDRESS />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::PersonalContact>
                    <TextField vm=vm path=field(fields::PERSONAL_EMAIL) label="Personal Email" input_type="email" />
                    <TextField vm=vm path=field(fields::PERSONAL_PHONE) label="Personal Phone" input_type="tel" />
                    <AddressFields vm=vm prefix=fields::PERSONAL_ADDRESS />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::Supervisor>
                    <TextField vm=vm path=field(fields::SUPERVISOR_FIRST_NAME) label="Supervisor First Name" />
                    <TextField vm=vm path=field(fields::SUPERVISOR_LAST_NAME) label="Supervisor Last Name" />
                    <TextField vm=vm path=field(fields::SUPERVISOR_EMAIL) label="Supervisor Email" input_type="email" />
                    <AddressFields vm=vm prefix=fields::SUPERVISOR_ADDRESS />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::Award>
                    <AwardFields vm=vm />
                </SectionFieldset>

                <SectionFieldset vm=vm name=SectionName::Confirmation>
                    <FlagField
                        vm=vm
                        path=field(fields::CONFIRMED)
                        label="Confirm Registration"
                        disabled=Signal::derive(move || !is_ready())
                    />
                </SectionFieldset>
            </div>

            <div class="details-actions">
                <Button
                    disabled=Signal::derive(move || !can_submit())
                    on_click=Callback::new(move |_| vm.with_value(|vm| vm.submit_command()))
                >
                    {move || if is_edit_mode() { "Save" } else { "Register" }}
                </Button>
                {move || is_edit_mode().then(|| view! {
                    <Button
                        variant="danger"
                        disabled=Signal::derive(is_blocked)
                        on_click=Callback::new(move |_| vm.with_value(|vm| vm.delete_command()))
                    >
                        "Delete"
                    </Button>
                })}
                <Button
                    variant="secondary"
                    on_click=Callback::new(move |_| vm.with_value(|vm| vm.cancel()))
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
