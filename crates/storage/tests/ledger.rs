#![forbid(unsafe_code)]

mod support;

use cp_core::paging::PageRequest;
use cp_core::{AgencyNo, AgencyType, AssignmentStatus, ComplaintNo, ComplaintStatus, Role};
use cp_storage::{
    AssignAgencyRequest, ChangeStatusRequest, CreateUserRequest, ListAgencyComplaintsRequest,
    StoreError, UpdateAssignmentRequest,
};
use support::*;

fn assign(
    store: &mut cp_storage::SqliteStore,
    complaint_no: ComplaintNo,
    agency_no: AgencyNo,
    actor: cp_core::Subject,
    at_ms: i64,
) -> Result<cp_storage::AgencyAssignmentRow, StoreError> {
    store.assign_agency(AssignAgencyRequest {
        complaint_no,
        agency_no,
        actor,
        memo: Some("please check".to_string()),
        assigned_at_ms: at_ms,
    })
}

#[test]
fn assignment_starts_received_and_appears_in_detail() {
    let mut store = open_store("assignment_starts_received");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let agency_no = agency(&mut store, "Ministry", AgencyType::Central);
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    let row = assign(&mut store, complaint_no, agency_no, staff, NOW_MS).expect("assign");
    assert_eq!(row.status, AssignmentStatus::Received);
    assert_eq!(row.agency_name, "Ministry");
    assert_eq!(row.memo.as_deref(), Some("please check"));

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.agencies, vec![row]);
    assert_eq!(detail.status, ComplaintStatus::Received);
}

#[test]
fn assignment_requires_agency_role_and_existing_rows() {
    let mut store = open_store("assignment_preconditions");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let agency_no = agency(&mut store, "Ministry", AgencyType::Central);
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    let err = assign(&mut store, complaint_no, agency_no, owner, NOW_MS).expect_err("citizen");
    assert!(matches!(err, StoreError::Forbidden(_)));

    let missing_complaint = ComplaintNo::try_new(404).expect("id");
    let err = assign(&mut store, missing_complaint, agency_no, staff, NOW_MS).expect_err("404");
    assert!(matches!(err, StoreError::UnknownId));

    let missing_agency = AgencyNo::try_new(404).expect("id");
    let err = assign(&mut store, complaint_no, missing_agency, staff, NOW_MS).expect_err("404");
    assert!(matches!(err, StoreError::UnknownAgency));

    assign(&mut store, complaint_no, agency_no, staff, NOW_MS).expect("first");
    let err = assign(&mut store, complaint_no, agency_no, staff, NOW_MS).expect_err("duplicate");
    assert!(matches!(err, StoreError::AlreadyAssigned));
}

#[test]
fn assignment_and_complaint_status_move_independently() {
    let mut store = open_store("independent_state_machines");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let agency_no = agency(&mut store, "Ministry", AgencyType::Central);
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
    assign(&mut store, complaint_no, agency_no, staff, NOW_MS).expect("assign");

    store
        .change_status(ChangeStatusRequest {
            complaint_no,
            actor: staff,
            status: ComplaintStatus::Completed,
            memo: None,
            at_ms: NOW_MS,
        })
        .expect("complete complaint");
    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.agencies[0].status, AssignmentStatus::Received);

    let updated = store
        .update_assignment(UpdateAssignmentRequest {
            complaint_no,
            agency_no,
            actor: staff,
            status: Some(AssignmentStatus::InProgress),
            memo: None,
            updated_at_ms: NOW_MS + 1_000,
        })
        .expect("update assignment");
    assert_eq!(updated.status, AssignmentStatus::InProgress);
    assert_eq!(updated.memo.as_deref(), Some("please check"));
    assert_eq!(updated.updated_at_ms, NOW_MS + 1_000);

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.status, ComplaintStatus::Completed);
}

#[test]
fn update_of_missing_assignment_is_reported() {
    let mut store = open_store("missing_assignment");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let agency_no = agency(&mut store, "Ministry", AgencyType::Central);
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    let err = store
        .update_assignment(UpdateAssignmentRequest {
            complaint_no,
            agency_no,
            actor: staff,
            status: Some(AssignmentStatus::Completed),
            memo: None,
            updated_at_ms: NOW_MS,
        })
        .expect_err("not assigned");
    assert!(matches!(err, StoreError::UnknownAssignment));
}

#[test]
fn agency_directory_lists_by_type_and_counts_sub_statuses() {
    let mut store = open_store("agency_directory");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let ministry = agency(&mut store, "Ministry", AgencyType::Central);
    agency(&mut store, "City", AgencyType::Local);
    agency(&mut store, "Agency of Roads", AgencyType::Central);

    let central: Vec<_> = store
        .list_agencies(Some(AgencyType::Central))
        .expect("list")
        .into_iter()
        .map(|row| row.agency_name)
        .collect();
    assert_eq!(central, vec!["Agency of Roads", "Ministry"]);
    assert_eq!(store.list_agencies(None).expect("list").len(), 3);

    for index in 0..3 {
        let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
        assign(&mut store, complaint_no, ministry, staff, NOW_MS + index).expect("assign");
        if index == 0 {
            store
                .update_assignment(UpdateAssignmentRequest {
                    complaint_no,
                    agency_no: ministry,
                    actor: staff,
                    status: Some(AssignmentStatus::Rejected),
                    memo: Some("out of scope".to_string()),
                    updated_at_ms: NOW_MS,
                })
                .expect("reject");
        }
    }

    let detail = store.agency_detail(ministry).expect("detail");
    assert_eq!(detail.agency.agency_name, "Ministry");
    assert_eq!(
        detail.status_counts,
        vec![
            (AssignmentStatus::Received, 2),
            (AssignmentStatus::Rejected, 1)
        ]
    );

    let err = store
        .agency_detail(AgencyNo::try_new(99).expect("id"))
        .expect_err("missing");
    assert!(matches!(err, StoreError::UnknownAgency));
}

#[test]
fn agency_complaints_page_newest_assignment_first() {
    let mut store = open_store("agency_complaints_page");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let ministry = agency(&mut store, "Ministry", AgencyType::Central);

    let mut assigned = Vec::new();
    for index in 0..3 {
        let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
        assign(&mut store, complaint_no, ministry, staff, NOW_MS + index * 1_000).expect("assign");
        assigned.push(complaint_no);
    }

    let page = store
        .agency_complaints(ListAgencyComplaintsRequest {
            agency_no: ministry,
            actor: staff,
            status: None,
            page: PageRequest::normalize(Some(1), Some(2)),
        })
        .expect("page");
    let ids: Vec<_> = page.items.iter().map(|row| row.complaint_no).collect();
    assert_eq!(ids, vec![assigned[2], assigned[1]]);
    assert_eq!(page.page.total_count, 3);
    assert_eq!(page.page.total_pages, 2);
    assert_eq!(page.items[0].author_name, "owner name");

    let err = store
        .agency_complaints(ListAgencyComplaintsRequest {
            agency_no: ministry,
            actor: owner,
            status: None,
            page: PageRequest::default(),
        })
        .expect_err("citizen");
    assert!(matches!(err, StoreError::Forbidden(_)));

    let rejected = store
        .agency_complaints(ListAgencyComplaintsRequest {
            agency_no: ministry,
            actor: staff,
            status: Some(AssignmentStatus::Rejected),
            page: PageRequest::default(),
        })
        .expect("filtered");
    assert!(rejected.items.is_empty());
}

#[test]
fn users_reject_duplicate_logins_and_bad_birth_dates() {
    let mut store = open_store("user_validation");
    citizen(&mut store, "taken");

    let request = |login: &str, birth: Option<&str>| CreateUserRequest {
        login_id: login.to_string(),
        display_name: "Someone".to_string(),
        role: Role::User,
        agency_no: None,
        birth_date: birth.map(str::to_string),
        created_at_ms: NOW_MS,
    };

    let err = store.create_user(request("taken", None)).expect_err("dup");
    assert!(matches!(err, StoreError::LoginTaken));

    let err = store
        .create_user(request("fresh", Some("15/03/2000")))
        .expect_err("format");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let row = store
        .create_user(request("fresh", Some("2000-03-15")))
        .expect("create");
    let loaded = store.get_user(row.user_no).expect("load");
    assert_eq!(loaded, row);
}

#[test]
fn agency_staff_must_reference_an_existing_agency() {
    let mut store = open_store("staff_agency_link");
    let err = store
        .create_user(CreateUserRequest {
            login_id: "staff".to_string(),
            display_name: "Staff".to_string(),
            role: Role::Agency,
            agency_no: Some(AgencyNo::try_new(7).expect("id")),
            birth_date: None,
            created_at_ms: NOW_MS,
        })
        .expect_err("unknown agency");
    assert!(matches!(err, StoreError::UnknownAgency));
}
