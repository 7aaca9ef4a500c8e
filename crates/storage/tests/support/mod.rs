#![forbid(unsafe_code)]
#![allow(dead_code)]

use cp_core::{AgencyNo, AgencyType, ComplaintNo, Role, Subject};
use cp_storage::{
    CreateAgencyRequest, CreateComplaintRequest, CreateUserRequest, LocationInput, SqliteStore,
};
use std::path::PathBuf;

/// 2024-03-15T12:00:00Z
pub const NOW_MS: i64 = 1_710_504_000_000;
pub const DAY_MS: i64 = 86_400_000;

pub fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("cp_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn open_store(test_name: &str) -> SqliteStore {
    SqliteStore::open(temp_dir(test_name)).expect("open store")
}

pub fn user(store: &mut SqliteStore, login_id: &str, role: Role, birth_date: Option<&str>) -> Subject {
    let row = store
        .create_user(CreateUserRequest {
            login_id: login_id.to_string(),
            display_name: format!("{login_id} name"),
            role,
            agency_no: None,
            birth_date: birth_date.map(str::to_string),
            created_at_ms: NOW_MS,
        })
        .expect("create user");
    Subject::new(row.user_no, row.role)
}

pub fn citizen(store: &mut SqliteStore, login_id: &str) -> Subject {
    user(store, login_id, Role::User, None)
}

pub fn officer(store: &mut SqliteStore, login_id: &str) -> Subject {
    user(store, login_id, Role::Agency, None)
}

pub fn agency(store: &mut SqliteStore, name: &str, agency_type: AgencyType) -> AgencyNo {
    store
        .create_agency(CreateAgencyRequest {
            agency_type,
            agency_name: name.to_string(),
            region_code: None,
            created_at_ms: NOW_MS,
        })
        .expect("create agency")
        .agency_no
}

pub fn complaint_request(owner: Subject, category: &str, created_at_ms: i64) -> CreateComplaintRequest {
    CreateComplaintRequest {
        owner,
        category: category.to_string(),
        title: format!("{category} title"),
        content: format!("{category} content"),
        is_public: None,
        location: None,
        files: Vec::new(),
        created_at_ms,
    }
}

pub fn complaint(store: &mut SqliteStore, owner: Subject, category: &str, created_at_ms: i64) -> ComplaintNo {
    store
        .create_complaint(complaint_request(owner, category, created_at_ms))
        .expect("create complaint")
        .complaint_no
}

pub fn private_complaint(store: &mut SqliteStore, owner: Subject) -> ComplaintNo {
    let mut request = complaint_request(owner, "road", NOW_MS);
    request.is_public = Some(false);
    store
        .create_complaint(request)
        .expect("create private complaint")
        .complaint_no
}

pub fn located_complaint(
    store: &mut SqliteStore,
    owner: Subject,
    address: &str,
    created_at_ms: i64,
) -> ComplaintNo {
    let mut request = complaint_request(owner, "road", created_at_ms);
    request.location = Some(LocationInput {
        lat: 37.5,
        lng: 127.0,
        address: Some(address.to_string()),
    });
    store
        .create_complaint(request)
        .expect("create located complaint")
        .complaint_no
}
