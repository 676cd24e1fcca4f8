pub mod api_error;
pub mod field_path;
pub mod validation;
