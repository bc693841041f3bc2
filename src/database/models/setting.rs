use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::database::connection::DatabaseError;

/// Raw key/value row from the `settings` table
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Goal weight state
///
/// `pounds` is `None` when no goal is set; `updated_at` is `None` until the
/// goal has been written at least once, and stays set after a clear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalSetting {
    pub pounds: Option<f64>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Setting> for GoalSetting {
    type Error = DatabaseError;

    fn try_from(setting: Setting) -> Result<Self, Self::Error> {
        let pounds = setting
            .value
            .as_deref()
            .map(str::parse::<f64>)
            .transpose()
            .map_err(|e| DatabaseError::CorruptValue {
                key: setting.key.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pounds,
            updated_at: setting.updated_at,
        })
    }
}
