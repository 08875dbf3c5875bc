use crate::error::InputError;

/// Parses one key typed by the user. Surrounding whitespace is ignored.
pub fn parse_key(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    trimmed.parse().map_err(|_| InputError::NotAnInteger {
        input: trimmed.to_string(),
    })
}
