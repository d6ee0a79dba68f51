pub mod engine;

use crate::errors::AppError;

// Shared parser for the 1-10 scales (usage ratings and importance).
// Rejection leaves the caller's session untouched so the user can simply
// try again.
pub fn parse_scale_value(text: &str) -> Result<i32, AppError> {
    let value: i32 = text
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Please send a number from 1 to 10.".into()))?;

    if !(1..=10).contains(&value) {
        return Err(AppError::Validation(
            "Please send a number from 1 to 10.".into(),
        ));
    }

    Ok(value)
}
