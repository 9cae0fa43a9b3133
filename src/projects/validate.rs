use crate::error::ValidationError;
use crate::projects::types::ProjectFields;

/// Only the title is required.
pub fn validate_fields(fields: &ProjectFields) -> Result<(), ValidationError> {
    if fields.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}
