use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Fractional digits kept for `age`, matching `DECIMAL(5,2)`.
pub const AGE_SCALE: u32 = 2;

/// Exclusive bound on the magnitude of `age`, matching `DECIMAL(5,2)`.
pub const AGE_LIMIT: i64 = 1000;

/// Maximum characters in `name` and `email`, matching `VARCHAR(255)`.
pub const MAX_TEXT_CHARS: usize = 255;

/// One row of the `user_data` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Decimal,
}

impl UserRecord {
    /// Builds a record, normalising `age` to two decimal places.
    ///
    /// Fails when the rounded age does not fit `DECIMAL(5,2)` or when `name`
    /// or `email` is longer than `VARCHAR(255)` allows.
    pub fn new(id: Uuid, name: String, email: String, age: Decimal) -> Result<Self, AppError> {
        check_text_len("name", &name)?;
        check_text_len("email", &email)?;

        // MySQL rounds DECIMAL half away from zero on insert.
        let mut age = age.round_dp_with_strategy(AGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        age.rescale(AGE_SCALE);
        if age.is_zero() {
            age.set_sign_positive(true);
        }

        if age.abs() >= Decimal::from(AGE_LIMIT) {
            return Err(AppError::InvalidInput(format!(
                "age {age} does not fit DECIMAL(5,2)"
            )));
        }

        Ok(Self {
            id,
            name,
            email,
            age,
        })
    }

    /// The primary key as stored in the `CHAR(36)` column.
    pub fn id_string(&self) -> String {
        self.id.hyphenated().to_string()
    }
}

// VARCHAR lengths count characters, not bytes.
fn check_text_len(field: &str, value: &str) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(AppError::InvalidInput(format!(
            "{field} has {chars} characters, limit is {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Raw row as MySQL returns it; `id` comes back as text.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Decimal,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| AppError::InvalidInput(format!("stored id {:?}: {e}", row.id)))?;

        Ok(Self {
            id,
            name: row.name,
            email: row.email,
            age: row.age,
        })
    }
}
