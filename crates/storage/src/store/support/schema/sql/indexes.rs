#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_complaints_created ON complaints(created_at_ms, complaint_no);
        CREATE INDEX IF NOT EXISTS idx_complaints_public_created ON complaints(is_public, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_complaints_owner ON complaints(user_no, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_complaints_category ON complaints(category);
        CREATE INDEX IF NOT EXISTS idx_complaint_files_owner ON complaint_files(complaint_no, file_no);
        CREATE INDEX IF NOT EXISTS idx_complaint_replies_owner ON complaint_replies(complaint_no, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_complaint_history_owner ON complaint_history(complaint_no, history_no);
        CREATE INDEX IF NOT EXISTS idx_complaint_agencies_agency ON complaint_agencies(agency_no, status);
"#;
