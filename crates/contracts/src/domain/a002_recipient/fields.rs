//! Dotted paths of the registration record fields

pub const EMPLOYEE_NUMBER: &str = "employee_number";
pub const ORGANIZATION: &str = "organization";
pub const BRANCH: &str = "branch";
pub const RETIREMENT: &str = "retirement";
pub const RETIREMENT_DATE: &str = "retirement_date";

pub const FIRST_NAME: &str = "contact.first_name";
pub const LAST_NAME: &str = "contact.last_name";
pub const OFFICE_EMAIL: &str = "contact.office_email";
pub const OFFICE_PHONE: &str = "contact.office_phone";
pub const PERSONAL_EMAIL: &str = "contact.personal_email";
pub const PERSONAL_PHONE: &str = "contact.personal_phone";

pub const CONTACT: &str = "contact";
pub const SUPERVISOR: &str = "supervisor";
pub const SERVICE: &str = "service";

pub const MILESTONE: &str = "service.milestone";
pub const QUALIFYING_YEAR: &str = "service.qualifying_year";
pub const CEREMONY_OPT_OUT: &str = "service.ceremony_opt_out";
pub const CONFIRMED: &str = "service.confirmed";
pub const AWARD: &str = "service.award";
pub const AWARD_INPUT: &str = "service.award_input";
pub const SELECTIONS: &str = "service.selections";
pub const ENGRAVING_SIZE: &str = "service.award_input.engraving.size";

pub const OFFICE_ADDRESS: &str = "contact.office_address";
pub const PERSONAL_ADDRESS: &str = "contact.personal_address";

pub const SUPERVISOR_FIRST_NAME: &str = "supervisor.first_name";
pub const SUPERVISOR_LAST_NAME: &str = "supervisor.last_name";
pub const SUPERVISOR_EMAIL: &str = "supervisor.office_email";
pub const SUPERVISOR_ADDRESS: &str = "supervisor.office_address";

pub const AWARD_VALUES: &str = "service.award_input.values";
pub const PECSF: &str = "service.award_input.pecsf";
pub const ENGRAVING_MESSAGE: &str = "service.award_input.engraving.message";
