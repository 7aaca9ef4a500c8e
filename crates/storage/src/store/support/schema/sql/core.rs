#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS agencies (
          agency_no INTEGER PRIMARY KEY AUTOINCREMENT,
          agency_type TEXT NOT NULL,
          agency_name TEXT NOT NULL,
          region_code TEXT,
          created_at_ms INTEGER NOT NULL
        );

        -- Role is a flat tag (USER | AGENCY); agency_no links agency staff to their agency.
        -- birth_date is `YYYY-MM-DD` and only feeds the age-group view.
        CREATE TABLE IF NOT EXISTS users (
          user_no INTEGER PRIMARY KEY AUTOINCREMENT,
          login_id TEXT NOT NULL UNIQUE,
          display_name TEXT NOT NULL,
          role TEXT NOT NULL,
          agency_no INTEGER REFERENCES agencies(agency_no),
          birth_date TEXT,
          created_at_ms INTEGER NOT NULL
        );
"#;
