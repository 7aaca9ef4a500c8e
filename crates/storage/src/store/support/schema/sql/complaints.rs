#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS complaints (
          complaint_no INTEGER PRIMARY KEY AUTOINCREMENT,
          user_no INTEGER NOT NULL REFERENCES users(user_no),
          category TEXT NOT NULL,
          title TEXT NOT NULL,
          content TEXT NOT NULL,
          status TEXT NOT NULL DEFAULT 'RECEIVED',
          is_public INTEGER NOT NULL DEFAULT 1,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER,
          completed_at_ms INTEGER
        );

        -- At most one feature per complaint. Geometry is a (lng, lat) point in WGS84.
        CREATE TABLE IF NOT EXISTS spatial_features (
          feature_no INTEGER PRIMARY KEY AUTOINCREMENT,
          complaint_no INTEGER NOT NULL UNIQUE REFERENCES complaints(complaint_no),
          feature_type TEXT NOT NULL,
          lng REAL NOT NULL,
          lat REAL NOT NULL,
          addr_text TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS complaint_files (
          file_no INTEGER PRIMARY KEY AUTOINCREMENT,
          complaint_no INTEGER NOT NULL REFERENCES complaints(complaint_no),
          file_url TEXT NOT NULL,
          file_type TEXT,
          uploaded_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS complaint_replies (
          reply_no INTEGER PRIMARY KEY AUTOINCREMENT,
          complaint_no INTEGER NOT NULL REFERENCES complaints(complaint_no),
          user_no INTEGER NOT NULL REFERENCES users(user_no),
          content TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS complaint_history (
          history_no INTEGER PRIMARY KEY AUTOINCREMENT,
          complaint_no INTEGER NOT NULL REFERENCES complaints(complaint_no),
          status TEXT NOT NULL,
          memo TEXT,
          user_no INTEGER NOT NULL REFERENCES users(user_no),
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS post_likes (
          like_no INTEGER PRIMARY KEY AUTOINCREMENT,
          complaint_no INTEGER NOT NULL REFERENCES complaints(complaint_no),
          user_no INTEGER NOT NULL REFERENCES users(user_no),
          created_at_ms INTEGER NOT NULL,
          UNIQUE (complaint_no, user_no)
        );
"#;
