#![forbid(unsafe_code)]

use super::support::*;
use super::*;
use cp_core::UserNo;
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    pub fn create_user(&mut self, request: CreateUserRequest) -> Result<UserRow, StoreError> {
        let login_id = require_text(&request.login_id, "loginId must not be empty")?;
        let display_name = require_text(&request.display_name, "displayName must not be empty")?;
        let birth_date = optional_text(request.birth_date.as_deref());
        if let Some(value) = birth_date.as_deref()
            && parse_birth_date(value).is_none()
        {
            return Err(StoreError::InvalidInput("birthDate must be YYYY-MM-DD"));
        }

        let tx = self.conn.transaction()?;
        if let Some(agency_no) = request.agency_no {
            ensure_agency_exists(&tx, agency_no)?;
        }
        let inserted = tx.execute(
            r#"
            INSERT INTO users(login_id, display_name, role, agency_no, birth_date, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                login_id,
                display_name,
                request.role.as_str(),
                request.agency_no.map(|agency_no| agency_no.get()),
                birth_date,
                request.created_at_ms,
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => return Err(StoreError::LoginTaken),
            Err(err) => return Err(err.into()),
        }
        let user_no = user_no_from_row(tx.last_insert_rowid())?;
        tx.commit()?;

        tracing::debug!(user_no = user_no.get(), role = request.role.as_str(), "user created");
        Ok(UserRow {
            user_no,
            login_id,
            display_name,
            role: request.role,
            agency_no: request.agency_no,
            birth_date,
            created_at_ms: request.created_at_ms,
        })
    }

    pub fn get_user(&self, user_no: UserNo) -> Result<UserRow, StoreError> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT login_id, display_name, role, agency_no, birth_date, created_at_ms
                FROM users
                WHERE user_no = ?1
                "#,
                params![user_no.get()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<i64>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((login_id, display_name, role, agency_no, birth_date, created_at_ms)) = row else {
            return Err(StoreError::UnknownUser);
        };
        Ok(UserRow {
            user_no,
            login_id,
            display_name,
            role: role_from_row(&role)?,
            agency_no: agency_no.map(agency_no_from_row).transpose()?,
            birth_date,
            created_at_ms,
        })
    }
}
