use crate::domain::a001_award::AwardId;
use crate::domain::a003_service::{OptionSelection, ServiceId};
use crate::usecases::u001_reconcile_award_options::AwardOptionInput;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_id!(
    /// Unique recipient identifier
    RecipientId
);

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Registration record edited on the recipient screen.
///
/// Every field defaults so a partially filled record still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientDto {
    pub id: Option<RecipientId>,
    pub employee_number: String,
    pub organization: Option<String>,
    pub branch: String,
    pub contact: ContactDto,
    pub supervisor: SupervisorDto,
    pub service: ServiceDto,
    pub retirement: bool,
    pub retirement_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDto {
    pub first_name: String,
    pub last_name: String,
    pub office_email: String,
    pub office_phone: String,
    pub personal_email: String,
    pub personal_phone: String,
    pub office_address: AddressDto,
    pub personal_address: AddressDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressDto {
    pub pobox: String,
    pub street1: String,
    pub street2: String,
    pub community: String,
    pub province: String,
    pub postal_code: String,
}

impl Default for AddressDto {
    fn default() -> Self {
        Self {
            pobox: String::new(),
            street1: String::new(),
            street2: String::new(),
            community: String::new(),
            province: "BC".to_string(),
            postal_code: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorDto {
    pub first_name: String,
    pub last_name: String,
    pub office_email: String,
    pub office_address: AddressDto,
}

/// Service-cycle part of the registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDto {
    pub id: Option<ServiceId>,
    /// Years of service; kept raw so an invalid entry still round-trips to the form
    pub milestone: Option<u32>,
    pub qualifying_year: Option<i32>,
    pub prior_milestones: Vec<u32>,
    pub ceremony_opt_out: bool,
    pub confirmed: bool,
    pub award: Option<AwardId>,
    pub award_input: AwardOptionInput,
    pub selections: Vec<OptionSelection>,
}

impl RecipientDto {
    /// Static defaults the loaded record is spread over
    pub fn default_record() -> serde_json::Value {
        serde_json::to_value(RecipientDto::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_shape() {
        let record = RecipientDto::default_record();
        assert_eq!(record["contact"]["office_address"]["province"], json!("BC"));
        assert_eq!(record["service"]["confirmed"], json!(false));
        assert_eq!(record["retirement"], json!(false));
        assert!(record["service"]["award_input"]["values"].is_object());
    }

    #[test]
    fn test_partial_record_deserializes() {
        let dto: RecipientDto = serde_json::from_value(json!({
            "employee_number": "123456",
            "contact": {"first_name": "Ada", "last_name": "Lovelace"},
            "service": {"milestone": 25}
        }))
        .unwrap();
        assert_eq!(dto.contact.last_name, "Lovelace");
        assert_eq!(dto.service.milestone, Some(25));
        assert_eq!(dto.contact.personal_address.province, "BC");
        assert!(dto.id.is_none());
    }
}
