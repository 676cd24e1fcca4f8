use super::*;
use crate::domain::a001_award::aggregate::fixtures::{award, option};
use crate::domain::a001_award::{Award, AwardOption, ENGRAVING_TYPE, PECSF_CHARITY_TYPE};
use crate::domain::a003_service::{OptionSelection, ServiceId};
use crate::domain::a004_pecsf_charity::{PecsfCharity, PecsfCharityId};
use crate::shared::field_path::FieldPath;
use crate::shared::validation::validate;
use serde_json::json;

fn customizable(mut option: AwardOption) -> AwardOption {
    option.customizable = true;
    option
}

fn watch() -> Award {
    award(|id| {
        vec![
            option(id, "strap", "strap", "leather"),
            option(id, "size", "small", "S"),
            option(id, "size", "large", "L"),
            customizable(option(id, "certificate", "certificate_name", "")),
        ]
    })
}

fn pecsf_award() -> Award {
    award(|id| {
        vec![
            option(id, PECSF_CHARITY_TYPE, "pecsf-charity-1", ""),
            option(id, PECSF_CHARITY_TYPE, "pecsf-charity-2", ""),
        ]
    })
}

fn engraved_award() -> Award {
    award(|id| {
        vec![
            customizable(option(id, ENGRAVING_TYPE, "small", "20")),
            customizable(option(id, ENGRAVING_TYPE, "large", "50")),
        ]
    })
}

fn selection(service: ServiceId, option: &AwardOption, custom_value: Option<&str>) -> OptionSelection {
    OptionSelection {
        service,
        award_option: option.clone(),
        custom_value: custom_value.map(str::to_string),
        pecsf_charity: None,
    }
}

fn input(values: &[(&str, &str)]) -> AwardOptionInput {
    AwardOptionInput {
        values: values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_general_groups_resolve() {
    let award = watch();
    let service = ServiceId::new_v4();
    let result = reconcile(
        &award,
        service,
        &[],
        &input(&[("size", "L"), ("certificate_name", "Jane Doe")]),
    )
    .unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|s| s.service == service));
    assert_eq!(result[0].award_option.name, "strap");
    assert_eq!(result[0].custom_value.as_deref(), Some("leather"));
    assert_eq!(result[1].award_option.name, "large");
    assert_eq!(result[1].custom_value.as_deref(), Some("L"));
    assert_eq!(result[2].award_option.name, "certificate_name");
    assert_eq!(result[2].custom_value.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_missing_and_unknown_values_are_errors() {
    let award = watch();
    let service = ServiceId::new_v4();
    assert_eq!(
        reconcile(&award, service, &[], &input(&[("size", "L")])),
        Err(ReconcileError::MissingValue("certificate_name".to_string()))
    );
    assert!(matches!(
        reconcile(&award, service, &[], &input(&[("size", "XL"), ("certificate_name", "x")])),
        Err(ReconcileError::UnknownChoice { .. })
    ));
}

#[test]
fn test_prior_selections_fill_missing_input() {
    let award = watch();
    let service = ServiceId::new_v4();
    let prior = vec![
        selection(service, &award.options[1], Some("S")),
        selection(service, &award.options[3], Some("Old Name")),
    ];
    let result = reconcile(&award, service, &prior, &input(&[("certificate_name", "New Name")])).unwrap();
    assert_eq!(result[1].award_option.name, "small");
    assert_eq!(result[2].custom_value.as_deref(), Some("New Name"));
}

#[test]
fn test_stale_selections_of_other_award_are_dropped() {
    let award = watch();
    let previous = engraved_award();
    let service = ServiceId::new_v4();
    let prior = vec![selection(service, &previous.options[1], Some("Congratulations"))];

    let restored = initial_input(&award, &prior, &[]);
    assert_eq!(restored, AwardOptionInput::default());

    let result = reconcile(
        &award,
        service,
        &prior,
        &input(&[("size", "S"), ("certificate_name", "Jane")]),
    )
    .unwrap();
    assert!(result.iter().all(|s| award.has_option(&s.award_option)));
    assert!(result.iter().all(|s| s.award_option.option_type != ENGRAVING_TYPE));
}

#[test]
fn test_pecsf_pool_mirrors_first_slot() {
    let award = pecsf_award();
    let service = ServiceId::new_v4();
    let pool_fund = PecsfCharityId::new_v4();
    let other = PecsfCharityId::new_v4();
    let input = AwardOptionInput {
        pecsf: Some(PecsfInput {
            mode: PecsfMode::Pool,
            charity_1: Some(pool_fund),
            charity_2: Some(other),
            local_program_1: Some("Local food bank".to_string()),
            local_program_2: None,
        }),
        ..Default::default()
    };

    let result = reconcile(&award, service, &[], &input).unwrap();
    assert_eq!(result.len(), 2);
    for selection in &result {
        assert_eq!(selection.pecsf_charity, Some(pool_fund));
        assert_eq!(selection.custom_value, None);
    }
}

#[test]
fn test_pecsf_individual_slots() {
    let award = pecsf_award();
    let service = ServiceId::new_v4();
    let first = PecsfCharityId::new_v4();
    let second = PecsfCharityId::new_v4();

    let both = AwardOptionInput {
        pecsf: Some(PecsfInput {
            mode: PecsfMode::Individual,
            charity_1: Some(first),
            charity_2: Some(second),
            local_program_1: Some("  Youth soccer  ".to_string()),
            local_program_2: Some("   ".to_string()),
        }),
        ..Default::default()
    };
    let result = reconcile(&award, service, &[], &both).unwrap();
    assert_eq!(result[0].pecsf_charity, Some(first));
    assert_eq!(result[0].custom_value.as_deref(), Some("Youth soccer"));
    assert_eq!(result[1].pecsf_charity, Some(second));
    assert_eq!(result[1].custom_value, None);

    let one = AwardOptionInput {
        pecsf: Some(PecsfInput {
            mode: PecsfMode::Individual,
            charity_1: Some(first),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(reconcile(&award, service, &[], &one).unwrap().len(), 1);

    let none = AwardOptionInput {
        pecsf: Some(PecsfInput {
            mode: PecsfMode::Individual,
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(
        reconcile(&award, service, &[], &none),
        Err(ReconcileError::MissingCharity)
    );
}

fn charity(pooled: bool) -> PecsfCharity {
    PecsfCharity {
        id: PecsfCharityId::new_v4(),
        label: if pooled { "Capital Region Pooled Fund" } else { "Food Bank" }.to_string(),
        region: "CRD".to_string(),
        vendor: String::new(),
        pooled,
        active: true,
    }
}

#[test]
fn test_pecsf_mode_restored_from_selections() {
    let award = pecsf_award();
    let service = ServiceId::new_v4();
    let charities = vec![charity(true)];
    let fund = charities[0].id;
    let pooled: Vec<OptionSelection> = award
        .options
        .iter()
        .map(|o| OptionSelection {
            pecsf_charity: Some(fund),
            ..selection(service, o, None)
        })
        .collect();
    let restored = initial_input(&award, &pooled, &charities).pecsf.unwrap();
    assert_eq!(restored.mode, PecsfMode::Pool);
    assert_eq!(restored.charity_1, Some(fund));

    let individual = vec![OptionSelection {
        pecsf_charity: Some(fund),
        ..selection(service, &award.options[0], Some("Program"))
    }];
    let restored = initial_input(&award, &individual, &charities).pecsf.unwrap();
    assert_eq!(restored.mode, PecsfMode::Individual);
    assert_eq!(restored.local_program_1.as_deref(), Some("Program"));
}

#[test]
fn test_single_slot_individual_charity_is_not_pool() {
    let award = award(|id| vec![option(id, PECSF_CHARITY_TYPE, "pecsf-charity-1", "")]);
    let service = ServiceId::new_v4();
    let charities = vec![charity(true), charity(false)];
    let food_bank = charities[1].id;
    let prior = vec![OptionSelection {
        pecsf_charity: Some(food_bank),
        ..selection(service, &award.options[0], None)
    }];

    let restored = initial_input(&award, &prior, &charities).pecsf.unwrap();
    assert_eq!(restored.mode, PecsfMode::Individual);
    assert_eq!(restored.charity_1, Some(food_bank));

    let fund = OptionSelection {
        pecsf_charity: Some(charities[0].id),
        ..selection(service, &award.options[0], None)
    };
    let restored = initial_input(&award, &[fund], &charities).pecsf.unwrap();
    assert_eq!(restored.mode, PecsfMode::Pool);
}

fn engraving(size: Option<&str>, message: &str) -> AwardOptionInput {
    AwardOptionInput {
        engraving: Some(EngravingInput {
            size: size.map(str::to_string),
            message: message.to_string(),
        }),
        ..Default::default()
    }
}

#[test]
fn test_engraving_uses_option_of_chosen_size() {
    let award = engraved_award();
    let service = ServiceId::new_v4();
    let message = "x".repeat(45);
    let result = reconcile(&award, service, &[], &engraving(Some("large"), &message)).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].award_option.name, "large");
    assert_eq!(result[0].custom_value.as_deref(), Some(message.as_str()));
    assert!(result[0].is_valid_for(&award, Some("large")));
}

#[test]
fn test_engraving_limits() {
    let award = engraved_award();
    let service = ServiceId::new_v4();
    assert_eq!(
        reconcile(&award, service, &[], &engraving(Some("large"), &"x".repeat(60))),
        Err(ReconcileError::EngravingTooLong {
            size: "large".to_string(),
            limit: 50,
            length: 60,
        })
    );
    assert!(matches!(
        reconcile(&award, service, &[], &engraving(Some("small"), &"x".repeat(45))),
        Err(ReconcileError::EngravingTooLong { limit: 20, .. })
    ));
    assert_eq!(
        reconcile(&award, service, &[], &engraving(None, "hello")),
        Err(ReconcileError::MissingValue("engraving.size".to_string()))
    );
    assert_eq!(
        reconcile(&award, service, &[], &engraving(Some("medium"), "hello")),
        Err(ReconcileError::UnknownItemSize("medium".to_string()))
    );
}

#[test]
fn test_engraving_rules_reject_long_message_before_reconcile() {
    let award = engraved_award();
    let prefix = FieldPath::parse("award_input").unwrap();
    let long = engraving(Some("large"), &"x".repeat(60));
    let fits = engraving(Some("large"), &"x".repeat(45));

    let rules = award_input_rules(&award, &long, &prefix);
    let data = json!({ "award_input": serde_json::to_value(&long).unwrap() });
    assert!(!validate(&rules, Some(&data)));

    let rules = award_input_rules(&award, &fits, &prefix);
    let data = json!({ "award_input": serde_json::to_value(&fits).unwrap() });
    assert!(validate(&rules, Some(&data)));
}

#[test]
fn test_engraving_rules_without_size() {
    let award = engraved_award();
    let prefix = FieldPath::parse("award_input").unwrap();
    let rules = engraving_rules(&award, None, &prefix);
    assert_eq!(rules.len(), 1);
    assert!(!validate(&rules, Some(&json!({"award_input": {}}))));

    let unknown = engraving(Some("medium"), "hi");
    let rules = engraving_rules(&award, unknown.engraving_size(), &prefix);
    let data = json!({ "award_input": serde_json::to_value(&unknown).unwrap() });
    assert!(!validate(&rules, Some(&data)));
}

#[test]
fn test_award_input_rules_cover_every_group() {
    let award = watch();
    let prefix = FieldPath::parse("award_input").unwrap();
    let rules = award_input_rules(&award, &AwardOptionInput::default(), &prefix);
    let keys: Vec<String> = rules.iter().map(|r| r.key.to_string()).collect();
    assert_eq!(keys, vec!["award_input.values.size", "award_input.values.certificate_name"]);

    let complete = input(&[("size", "S"), ("certificate_name", "Jane")]);
    let data = json!({ "award_input": serde_json::to_value(&complete).unwrap() });
    assert!(validate(&rules, Some(&data)));
}

#[test]
fn test_pecsf_rule() {
    let award = pecsf_award();
    let prefix = FieldPath::parse("award_input").unwrap();
    let rules = award_input_rules(&award, &AwardOptionInput::default(), &prefix);

    let individual_without_charity = json!({"award_input": {"pecsf": {"mode": "individual"}}});
    assert!(!validate(&rules, Some(&individual_without_charity)));

    let pool = json!({"award_input": {"pecsf": {"mode": "pool", "charity_1": null}}});
    assert!(validate(&rules, Some(&pool)));
}

fn sized_engraved_award() -> Award {
    award(|id| {
        vec![
            option(id, "size", "small", "small"),
            option(id, "size", "large", "large"),
            customizable(option(id, ENGRAVING_TYPE, "small", "20")),
            customizable(option(id, ENGRAVING_TYPE, "large", "50")),
        ]
    })
}

fn sized(item_size: &str, engraving_size: Option<&str>, message: &str) -> AwardOptionInput {
    AwardOptionInput {
        values: [("size".to_string(), item_size.to_string())].into(),
        ..engraving(engraving_size, message)
    }
}

#[test]
fn test_engraving_follows_item_size_option() {
    let award = sized_engraved_award();
    let service = ServiceId::new_v4();

    let result = reconcile(&award, service, &[], &sized("large", None, &"x".repeat(45))).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[1].award_option.name, "large");
    assert!(result.iter().all(|s| s.is_valid_for(&award, Some("large"))));

    // the small item allows 20 characters whatever the engraving input says
    assert!(matches!(
        reconcile(&award, service, &[], &sized("small", None, &"x".repeat(45))),
        Err(ReconcileError::EngravingTooLong { limit: 20, .. })
    ));
    assert_eq!(
        reconcile(&award, service, &[], &sized("small", Some("large"), &"x".repeat(45))),
        Err(ReconcileError::ItemSizeMismatch {
            item_size: "small".to_string(),
            engraving: "large".to_string(),
        })
    );
}

#[test]
fn test_engraving_rules_follow_item_size_option() {
    let award = sized_engraved_award();
    let prefix = FieldPath::parse("award_input").unwrap();
    let check = |input: &AwardOptionInput| {
        let rules = award_input_rules(&award, input, &prefix);
        let data = json!({ "award_input": serde_json::to_value(input).unwrap() });
        validate(&rules, Some(&data))
    };

    assert!(check(&sized("large", None, &"x".repeat(45))));
    assert!(check(&sized("large", Some("large"), "Thank you")));
    assert!(!check(&sized("small", None, &"x".repeat(45))));
    assert!(!check(&sized("small", Some("large"), "Thank you")));
    assert_eq!(item_size(&award, &sized("small", Some("large"), "")), Some("small"));
}
