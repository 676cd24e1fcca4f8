//! Fieldsets of the registration screen

use super::fields;
use crate::domain::a001_award::{Award, AwardId};
use crate::shared::field_path::FieldPath;
use crate::shared::validation::{Condition, Section, SectionSet, ValidationRule, Validator};
use crate::usecases::u001_reconcile_award_options::{award_input_rules, AwardOptionInput};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Profile,
    Milestone,
    Retirement,
    OfficeContact,
    PersonalContact,
    Supervisor,
    Award,
    Confirmation,
}

impl SectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Profile => "profile",
            SectionName::Milestone => "milestone",
            SectionName::Retirement => "retirement",
            SectionName::OfficeContact => "office_contact",
            SectionName::PersonalContact => "personal_contact",
            SectionName::Supervisor => "supervisor",
            SectionName::Award => "award",
            SectionName::Confirmation => "confirmation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionName::Profile => "Profile",
            SectionName::Milestone => "Milestone",
            SectionName::Retirement => "Retirement",
            SectionName::OfficeContact => "Office Contact",
            SectionName::PersonalContact => "Personal Contact",
            SectionName::Supervisor => "Supervisor",
            SectionName::Award => "Award",
            SectionName::Confirmation => "Confirmation",
        }
    }

    pub fn all() -> [SectionName; 8] {
        [
            SectionName::Profile,
            SectionName::Milestone,
            SectionName::Retirement,
            SectionName::OfficeContact,
            SectionName::PersonalContact,
            SectionName::Supervisor,
            SectionName::Award,
            SectionName::Confirmation,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.as_str() == name)
    }
}

fn path(p: &'static str) -> FieldPath {
    FieldPath::literal(p)
}

fn address_rules(prefix: &str) -> Vec<ValidationRule> {
    vec![
        ValidationRule::field(&format!("{prefix}.pobox"), "PO Box", vec![]),
        ValidationRule::field(&format!("{prefix}.street1"), "Street Address", vec![Validator::Required]),
        ValidationRule::field(&format!("{prefix}.street2"), "Street Address (line 2)", vec![]),
        ValidationRule::field(&format!("{prefix}.community"), "City", vec![Validator::Required]),
        ValidationRule::field(&format!("{prefix}.province"), "Province", vec![Validator::Required]),
        ValidationRule::field(
            &format!("{prefix}.postal_code"),
            "Postal Code",
            vec![Validator::Required, Validator::PostalCode],
        ),
    ]
}

fn retiring() -> (FieldPath, serde_json::Value) {
    (path(fields::RETIREMENT), json!(true))
}

/// Sections of the registration screen. The award section carries the option
/// rules of the `selected` award, which depend on the current option `input`;
/// a selected award missing from `offered` keeps the section incomplete.
pub fn registration_sections(
    offered: &[Award],
    selected: Option<AwardId>,
    input: &AwardOptionInput,
) -> SectionSet {
    let profile = Section::new(
        SectionName::Profile.as_str(),
        vec![
            ValidationRule::field(
                fields::EMPLOYEE_NUMBER,
                "Employee Number",
                vec![Validator::Required, Validator::EmployeeNumber],
            ),
            ValidationRule::field(fields::FIRST_NAME, "First Name", vec![Validator::Required]),
            ValidationRule::field(fields::LAST_NAME, "Last Name", vec![Validator::Required]),
            ValidationRule::field(
                fields::OFFICE_EMAIL,
                "Government Email",
                vec![Validator::Required, Validator::GovEmail],
            ),
            ValidationRule::field(fields::ORGANIZATION, "Ministry / Organization", vec![Validator::Required]),
            ValidationRule::field(fields::BRANCH, "Branch", vec![]),
        ],
    );

    let milestone = Section::scoped(
        SectionName::Milestone.as_str(),
        path(fields::SERVICE),
        vec![
            ValidationRule::field("milestone", "Current Milestone", vec![Validator::Required, Validator::Milestone]),
            ValidationRule::field("qualifying_year", "Qualifying Year", vec![Validator::Required]),
            ValidationRule::field("ceremony_opt_out", "Opt out of ceremony", vec![]),
        ],
    );

    let (retirement_path, retiring_value) = retiring();
    let retirement = Section::new(
        SectionName::Retirement.as_str(),
        vec![ValidationRule::field(
            fields::RETIREMENT_DATE,
            "Retirement Date",
            vec![Validator::Required],
        )],
    )
    .with_condition(Condition::When {
        path: retirement_path.clone(),
        equals: retiring_value.clone(),
    });

    let office_contact = Section::scoped(
        SectionName::OfficeContact.as_str(),
        path(fields::CONTACT),
        vec![ValidationRule::field(
            "office_phone",
            "Office Phone",
            vec![Validator::Required, Validator::Phone],
        )],
    )
    .with_rules(address_rules("office_address"));

    let personal_contact = Section::scoped(
        SectionName::PersonalContact.as_str(),
        path(fields::CONTACT),
        vec![
            ValidationRule::field(
                "personal_email",
                "Personal Email",
                vec![Validator::Required, Validator::Email],
            ),
            ValidationRule::field(
                "personal_phone",
                "Personal Phone",
                vec![Validator::Required, Validator::Phone],
            ),
        ],
    )
    .with_rules(address_rules("personal_address"));

    let supervisor = Section::scoped(
        SectionName::Supervisor.as_str(),
        path(fields::SUPERVISOR),
        vec![
            ValidationRule::field("first_name", "Supervisor First Name", vec![Validator::Required]),
            ValidationRule::field("last_name", "Supervisor Last Name", vec![Validator::Required]),
            ValidationRule::field(
                "office_email",
                "Supervisor Email",
                vec![Validator::Required, Validator::Email],
            ),
        ],
    )
    .with_rules(address_rules("office_address"))
    .with_condition(Condition::Unless {
        path: retirement_path,
        equals: retiring_value,
    });

    let mut award_rules = vec![ValidationRule::field("award", "Award", vec![Validator::Required])];
    match selected.map(|id| offered.iter().find(|a| a.id == id)) {
        Some(Some(award)) => award_rules.extend(award_input_rules(award, input, &path("award_input"))),
        Some(None) => award_rules.push(ValidationRule::field(
            "award",
            "Award not offered for this milestone",
            vec![Validator::Custom(|_| false)],
        )),
        None => {}
    }
    let award = Section::scoped(SectionName::Award.as_str(), path(fields::SERVICE), award_rules);

    let confirmation = Section::scoped(
        SectionName::Confirmation.as_str(),
        path(fields::SERVICE),
        vec![ValidationRule::field(
            "confirmed",
            "Confirm Registration",
            vec![Validator::Accepted],
        )],
    );

    SectionSet::new(vec![
        profile,
        milestone,
        retirement,
        office_contact,
        personal_contact,
        supervisor,
        award,
        confirmation,
    ])
    .with_confirmation(SectionName::Confirmation.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_award::aggregate::fixtures::{award as award_fixture, option};
    use crate::domain::a001_award::ENGRAVING_TYPE;
    use crate::domain::common::AggregateId;
    use crate::shared::validation::SectionStatus;
    use serde_json::Value;

    fn address() -> Value {
        json!({
            "street1": "617 Government St",
            "community": "Victoria",
            "province": "BC",
            "postal_code": "V8V 0C5"
        })
    }

    const OFFERED_AWARD: &str = "0d9c8b7a-6f5e-4d3c-2b1a-0f9e8d7c6b5a";

    fn plain_award() -> Award {
        Award {
            id: AwardId::from_string(OFFERED_AWARD).unwrap(),
            ..award_fixture(|_| vec![])
        }
    }

    fn sections() -> SectionSet {
        let offered = vec![plain_award()];
        registration_sections(&offered, Some(offered[0].id), &AwardOptionInput::default())
    }

    fn complete_record() -> Value {
        json!({
            "employee_number": "123456",
            "organization": "citz",
            "contact": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "office_email": "ada.lovelace@gov.bc.ca",
                "office_phone": "(250) 555-1234",
                "personal_email": "ada@example.com",
                "personal_phone": "250-555-9876",
                "office_address": address(),
                "personal_address": address()
            },
            "supervisor": {
                "first_name": "Charles",
                "last_name": "Babbage",
                "office_email": "charles.babbage@gov.bc.ca",
                "office_address": address()
            },
            "service": {
                "milestone": 25,
                "qualifying_year": 2026,
                "award": OFFERED_AWARD,
                "confirmed": false
            },
            "retirement": false
        })
    }

    #[test]
    fn test_section_names_are_unique() {
        let sections = sections();
        for name in SectionName::all() {
            assert!(sections.get(name.as_str()).is_some(), "{}", name.as_str());
            assert_eq!(SectionName::from_name(name.as_str()), Some(name));
        }
        assert_eq!(sections.sections().len(), SectionName::all().len());
    }

    #[test]
    fn test_complete_record_is_ready_but_unconfirmed() {
        let sections = sections();
        let record = complete_record();
        assert!(sections.is_ready(&record));
        assert_eq!(sections.validate_section("confirmation", &record), Some(false));
    }

    #[test]
    fn test_missing_office_email_blocks_profile() {
        let sections = sections();
        let mut record = complete_record();
        record["contact"]["office_email"] = json!("");
        assert_eq!(sections.validate_section("profile", &record), Some(false));
        assert!(!sections.is_ready(&record));

        record["contact"]["office_email"] = json!("ada@gmail.com");
        assert_eq!(sections.validate_section("profile", &record), Some(false));
    }

    #[test]
    fn test_retirement_swaps_supervisor_for_retirement_date() {
        let sections = sections();
        let mut record = complete_record();
        record["supervisor"] = json!({});
        assert!(!sections.is_ready(&record));

        record["retirement"] = json!(true);
        assert_eq!(sections.validate_section("retirement", &record), Some(false));
        record["retirement_date"] = json!("2026-06-30");
        assert!(sections.is_ready(&record));

        let status = sections.status(&record);
        let supervisor = status.iter().find(|(n, _)| n == "supervisor").unwrap();
        assert_eq!(supervisor.1, SectionStatus::NotApplicable);
    }

    #[test]
    fn test_award_not_offered_keeps_section_required() {
        let record = complete_record();
        let offered = vec![award_fixture(|_| vec![])];
        let selected = Some(plain_award().id);

        let sections = registration_sections(&offered, selected, &AwardOptionInput::default());
        assert_eq!(sections.validate_section("award", &record), Some(false));
        assert!(!sections.is_ready(&record));

        let sections = registration_sections(&[], selected, &AwardOptionInput::default());
        assert_eq!(sections.validate_section("award", &record), Some(false));
    }

    #[test]
    fn test_award_section_includes_option_rules() {
        let award = award_fixture(|id| vec![option(id, ENGRAVING_TYPE, "large", "50")]);
        let offered = vec![award.clone()];
        let mut record = complete_record();
        record["service"]["award"] = json!(award.id);
        let sections = registration_sections(&offered, Some(award.id), &AwardOptionInput::default());
        assert_eq!(sections.validate_section("award", &record), Some(false));

        record["service"]["award_input"] = json!({
            "engraving": {"size": "large", "message": "Thank you for 25 years"}
        });
        let input: AwardOptionInput =
            serde_json::from_value(record["service"]["award_input"].clone()).unwrap();
        let sections = registration_sections(&offered, Some(award.id), &input);
        assert_eq!(sections.validate_section("award", &record), Some(true));
    }
}
