#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- Sub-status per (complaint, agency). Independent of complaints.status.
        CREATE TABLE IF NOT EXISTS complaint_agencies (
          complaint_no INTEGER NOT NULL REFERENCES complaints(complaint_no),
          agency_no INTEGER NOT NULL REFERENCES agencies(agency_no),
          status TEXT NOT NULL DEFAULT 'RECEIVED',
          memo TEXT,
          assigned_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          PRIMARY KEY (complaint_no, agency_no)
        );
"#;
