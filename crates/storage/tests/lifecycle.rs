#![forbid(unsafe_code)]

mod support;

use cp_core::paging::PageRequest;
use cp_core::{ComplaintNo, ComplaintStatus, FeatureType, Role};
use cp_storage::{
    AddReplyRequest, AttachFileRequest, ChangeStatusRequest, DeleteComplaintRequest,
    ListComplaintsRequest, LocationInput, MAP_LOCATION_LIMIT, MyComplaintsRequest, NewFile,
    SqliteStore, StoreError, TOP_LIKED_LIMIT, ToggleLikeRequest, UpdateComplaintRequest,
};
use rusqlite::{Connection, params};
use support::*;

fn change_status(
    store: &mut SqliteStore,
    complaint_no: ComplaintNo,
    actor: cp_core::Subject,
    status: ComplaintStatus,
) -> Result<Vec<cp_storage::StatusHistoryRow>, StoreError> {
    store.change_status(ChangeStatusRequest {
        complaint_no,
        actor,
        status,
        memo: None,
        at_ms: NOW_MS + 1_000,
    })
}

fn update_title(
    store: &mut SqliteStore,
    complaint_no: ComplaintNo,
    actor: cp_core::Subject,
    title: &str,
) -> Result<(), StoreError> {
    store.update_complaint(UpdateComplaintRequest {
        complaint_no,
        actor,
        category: None,
        title: Some(title.to_string()),
        content: None,
        is_public: None,
        updated_at_ms: NOW_MS + 5_000,
    })
}

#[test]
fn private_detail_is_forbidden_to_other_citizens_and_hidden_from_anonymous() {
    let mut store = open_store("private_detail_visibility");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let staff = officer(&mut store, "staff");
    let complaint_no = private_complaint(&mut store, owner);

    let err = store
        .get_complaint(complaint_no, Some(&stranger))
        .expect_err("stranger must not read");
    assert!(matches!(err, StoreError::Forbidden(_)), "got {err:?}");

    let err = store
        .get_complaint(complaint_no, None)
        .expect_err("anonymous must not read");
    assert!(matches!(err, StoreError::UnknownId), "got {err:?}");

    let detail = store
        .get_complaint(complaint_no, Some(&owner))
        .expect("owner reads");
    assert!(!detail.is_public);
    store
        .get_complaint(complaint_no, Some(&staff))
        .expect("agency reads");
}

#[test]
fn missing_complaint_is_not_found() {
    let mut store = open_store("missing_complaint_is_not_found");
    let owner = citizen(&mut store, "owner");
    let missing = ComplaintNo::try_new(999).expect("id");

    let err = store
        .get_complaint(missing, Some(&owner))
        .expect_err("missing");
    assert!(matches!(err, StoreError::UnknownId));

    let err = update_title(&mut store, missing, owner, "x").expect_err("missing");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn create_with_location_round_trips_point_and_address() {
    let mut store = open_store("create_with_location");
    let owner = citizen(&mut store, "owner");
    let complaint_no = located_complaint(&mut store, owner, "Seoul Jongno-gu", NOW_MS);

    let detail = store
        .get_complaint(complaint_no, None)
        .expect("public detail");
    let location = detail.location.expect("location present");
    assert_eq!(location.feature_type, FeatureType::Point);
    assert_eq!(location.point.lat(), 37.5);
    assert_eq!(location.point.lng(), 127.0);
    assert_eq!(location.point.coordinates(), [127.0, 37.5]);
    assert_eq!(location.address, "Seoul Jongno-gu");
    assert_eq!(detail.status, ComplaintStatus::Received);
    assert_eq!(detail.author_name, "owner name");
}

#[test]
fn create_without_location_has_no_spatial_feature() {
    let mut store = open_store("create_without_location");
    let owner = citizen(&mut store, "owner");
    let complaint_no = complaint(&mut store, owner, "noise", NOW_MS);

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert!(detail.location.is_none());
    assert!(detail.is_public, "isPublic defaults to true");
}

#[test]
fn create_rejects_blank_fields_and_bad_coordinates_without_writing() {
    let mut store = open_store("create_rejects_invalid_input");
    let owner = citizen(&mut store, "owner");

    let mut request = complaint_request(owner, "road", NOW_MS);
    request.title = "   ".to_string();
    let err = store.create_complaint(request).expect_err("blank title");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let mut request = complaint_request(owner, "road", NOW_MS);
    request.location = Some(LocationInput {
        lat: 91.0,
        lng: 127.0,
        address: None,
    });
    let err = store.create_complaint(request).expect_err("bad latitude");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let page = store
        .list_complaints(ListComplaintsRequest {
            viewer: Some(owner),
            status: None,
            category: None,
            page: PageRequest::default(),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(page.page.total_count, 0);
}

#[test]
fn create_for_unknown_owner_leaves_nothing_behind() {
    let storage_dir = temp_dir("create_for_unknown_owner");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let ghost = cp_core::Subject::new(cp_core::UserNo::try_new(42).expect("id"), Role::User);

    let mut request = complaint_request(ghost, "road", NOW_MS);
    request.location = Some(LocationInput {
        lat: 37.5,
        lng: 127.0,
        address: None,
    });
    let err = store.create_complaint(request).expect_err("unknown owner");
    assert!(matches!(err, StoreError::UnknownUser));

    let conn = Connection::open(storage_dir.join("civic_petitions.db")).expect("open db");
    for table in ["complaints", "spatial_features"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count");
        assert_eq!(count, 0, "{table} must stay empty");
    }
}

#[test]
fn update_is_owner_only_and_coalesces_missing_fields() {
    let mut store = open_store("update_owner_only");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    for actor in [stranger, staff] {
        let err = update_title(&mut store, complaint_no, actor, "hijack").expect_err("not owner");
        assert!(matches!(err, StoreError::Forbidden(_)), "got {err:?}");
    }

    update_title(&mut store, complaint_no, owner, "new title").expect("owner update");
    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.title, "new title");
    assert_eq!(detail.category, "road");
    assert_eq!(detail.content, "road content");
    assert_eq!(detail.updated_at_ms, Some(NOW_MS + 5_000));

    let err = update_title(&mut store, complaint_no, owner, "  ").expect_err("blank patch");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[test]
fn update_and_delete_conflict_once_status_left_received() {
    let mut store = open_store("mutation_conflicts_after_transition");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");

    for target in [
        ComplaintStatus::InProgress,
        ComplaintStatus::Completed,
        ComplaintStatus::Rejected,
        ComplaintStatus::Cancelled,
    ] {
        let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
        change_status(&mut store, complaint_no, staff, target).expect("transition");

        let err = update_title(&mut store, complaint_no, owner, "late edit").expect_err("conflict");
        assert!(
            matches!(err, StoreError::NotReceived { status } if status == target),
            "got {err:?}"
        );
        let err = store
            .delete_complaint(DeleteComplaintRequest {
                complaint_no,
                actor: owner,
            })
            .expect_err("conflict");
        assert!(matches!(err, StoreError::NotReceived { .. }), "got {err:?}");

        let detail = store.get_complaint(complaint_no, Some(&owner)).expect("detail");
        assert_eq!(detail.status, target, "rejected mutation must not move status");
        assert_eq!(detail.title, "road title");
    }
}

#[test]
fn delete_cascades_every_dependent_row() {
    let storage_dir = temp_dir("delete_cascades");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let agency_no = agency(&mut store, "Ministry", cp_core::AgencyType::Central);

    let mut request = complaint_request(owner, "road", NOW_MS);
    request.location = Some(LocationInput {
        lat: 37.5,
        lng: 127.0,
        address: Some("Seoul".to_string()),
    });
    request.files = vec![NewFile {
        file_url: "/uploads/a.png".to_string(),
        file_type: Some("image/png".to_string()),
    }];
    let complaint_no = store.create_complaint(request).expect("create").complaint_no;

    store
        .toggle_like(ToggleLikeRequest {
            complaint_no,
            actor: staff,
            at_ms: NOW_MS,
        })
        .expect("like");
    store
        .add_reply(AddReplyRequest {
            complaint_no,
            actor: staff,
            content: "looking into it".to_string(),
            created_at_ms: NOW_MS,
        })
        .expect("reply");
    store
        .assign_agency(cp_storage::AssignAgencyRequest {
            complaint_no,
            agency_no,
            actor: staff,
            memo: None,
            assigned_at_ms: NOW_MS,
        })
        .expect("assign");

    store
        .delete_complaint(DeleteComplaintRequest {
            complaint_no,
            actor: owner,
        })
        .expect("delete");

    let err = store
        .get_complaint(complaint_no, Some(&owner))
        .expect_err("gone");
    assert!(matches!(err, StoreError::UnknownId));

    let conn = Connection::open(storage_dir.join("civic_petitions.db")).expect("open db");
    for table in [
        "spatial_features",
        "complaint_files",
        "complaint_replies",
        "post_likes",
        "complaint_agencies",
    ] {
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE complaint_no = ?1"),
                params![complaint_no.get()],
                |row| row.get(0),
            )
            .expect("count");
        assert_eq!(count, 0, "{table} rows must be removed");
    }
}

#[test]
fn elevated_role_may_delete_someone_elses_received_complaint() {
    let mut store = open_store("elevated_delete_bypass");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    let err = store
        .delete_complaint(DeleteComplaintRequest {
            complaint_no,
            actor: stranger,
        })
        .expect_err("stranger");
    assert!(matches!(err, StoreError::Forbidden(_)));

    store
        .delete_complaint(DeleteComplaintRequest {
            complaint_no,
            actor: staff,
        })
        .expect("agency delete");
}

#[test]
fn toggle_like_is_an_involution() {
    let storage_dir = temp_dir("toggle_like_involution");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let owner = citizen(&mut store, "owner");
    let fan = citizen(&mut store, "fan");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
    let request = ToggleLikeRequest {
        complaint_no,
        actor: fan,
        at_ms: NOW_MS,
    };

    let first = store.toggle_like(request.clone()).expect("like");
    assert!(first.liked);
    assert_eq!(first.like_count, 1);

    let second = store.toggle_like(request.clone()).expect("unlike");
    assert!(!second.liked);
    assert_eq!(second.like_count, 0);

    let conn = Connection::open(storage_dir.join("civic_petitions.db")).expect("open db");
    for _ in 0..3 {
        store.toggle_like(request.clone()).expect("toggle");
        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM post_likes WHERE complaint_no = ?1 AND user_no = ?2",
                params![complaint_no.get(), fan.user_no.get()],
                |row| row.get(0),
            )
            .expect("count");
        assert!(rows == 0 || rows == 1, "like rows per pair: {rows}");
    }
}

#[test]
fn toggle_like_respects_private_visibility() {
    let mut store = open_store("toggle_like_private");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let complaint_no = private_complaint(&mut store, owner);

    let err = store
        .toggle_like(ToggleLikeRequest {
            complaint_no,
            actor: stranger,
            at_ms: NOW_MS,
        })
        .expect_err("private");
    assert!(matches!(err, StoreError::Forbidden(_)));
}

#[test]
fn list_shows_public_plus_own_private_newest_first() {
    let mut store = open_store("list_visibility");
    let alice = citizen(&mut store, "alice");
    let bob = citizen(&mut store, "bob");
    let public_old = complaint(&mut store, alice, "road", NOW_MS - 2 * DAY_MS);
    let public_new = complaint(&mut store, alice, "noise", NOW_MS - DAY_MS);
    let alice_private = private_complaint(&mut store, alice);
    let bob_private = private_complaint(&mut store, bob);

    let list = |store: &mut SqliteStore, viewer| {
        store
            .list_complaints(ListComplaintsRequest {
                viewer,
                status: None,
                category: None,
                page: PageRequest::default(),
                ..Default::default()
            })
            .expect("list")
    };

    let anonymous = list(&mut store, None);
    let ids: Vec<_> = anonymous.items.iter().map(|item| item.complaint_no).collect();
    assert_eq!(ids, vec![public_new, public_old]);
    assert_eq!(anonymous.page.total_count, 2);

    let as_alice = list(&mut store, Some(alice));
    let ids: Vec<_> = as_alice.items.iter().map(|item| item.complaint_no).collect();
    assert_eq!(ids, vec![alice_private, public_new, public_old]);
    assert!(!ids.contains(&bob_private));
    assert_eq!(as_alice.items[0].author_name, "alice name");
}

#[test]
fn list_filters_and_pages() {
    let mut store = open_store("list_filters_and_pages");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    for offset in 0..5 {
        complaint(&mut store, owner, "road", NOW_MS - offset * DAY_MS);
    }
    let noise = complaint(&mut store, owner, "noise", NOW_MS - 10 * DAY_MS);
    change_status(&mut store, noise, staff, ComplaintStatus::InProgress).expect("transition");

    let page = store
        .list_complaints(ListComplaintsRequest {
            viewer: None,
            status: None,
            category: Some("road".to_string()),
            page: PageRequest::normalize(Some(2), Some(2)),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page.total_count, 5);
    assert_eq!(page.page.total_pages, 3);
    assert_eq!(page.items[0].created_at_ms, NOW_MS - 2 * DAY_MS);

    let in_progress = store
        .list_complaints(ListComplaintsRequest {
            viewer: None,
            status: Some(ComplaintStatus::InProgress),
            category: None,
            page: PageRequest::normalize(Some(0), Some(-3)),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(in_progress.items.len(), 1);
    assert_eq!(in_progress.items[0].complaint_no, noise);
    assert_eq!(in_progress.page.page, 1);
    assert_eq!(in_progress.page.limit, 10);
}

#[test]
fn list_summaries_count_likes_and_replies() {
    let mut store = open_store("list_summary_counts");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
    store
        .toggle_like(ToggleLikeRequest {
            complaint_no,
            actor: owner,
            at_ms: NOW_MS,
        })
        .expect("like");
    for content in ["first", "second"] {
        store
            .add_reply(AddReplyRequest {
                complaint_no,
                actor: staff,
                content: content.to_string(),
                created_at_ms: NOW_MS,
            })
            .expect("reply");
    }

    let page = store
        .list_complaints(ListComplaintsRequest {
            viewer: None,
            status: None,
            category: None,
            page: PageRequest::default(),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(page.items[0].like_count, 1);
    assert_eq!(page.items[0].reply_count, 2);
}

#[test]
fn map_locations_excludes_private_and_unlocated() {
    let mut store = open_store("map_locations_privacy");
    let owner = citizen(&mut store, "owner");
    let visible = located_complaint(&mut store, owner, "Busan", NOW_MS);
    complaint(&mut store, owner, "road", NOW_MS);

    let mut request = complaint_request(owner, "road", NOW_MS);
    request.is_public = Some(false);
    request.location = Some(LocationInput {
        lat: 35.1,
        lng: 129.0,
        address: None,
    });
    store.create_complaint(request).expect("private located");

    let locations = store.map_locations().expect("map");
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].complaint_no, visible);
    assert_eq!(locations[0].address, "Busan");
    assert_eq!((locations[0].lat, locations[0].lng), (37.5, 127.0));
}

#[test]
fn map_locations_caps_at_limit_most_recent_first() {
    let mut store = open_store("map_locations_cap");
    let owner = citizen(&mut store, "owner");
    let total = i64::from(MAP_LOCATION_LIMIT) + 5;
    for offset in 0..total {
        located_complaint(&mut store, owner, "Seoul", NOW_MS - offset * 1_000);
    }

    let locations = store.map_locations().expect("map");
    assert_eq!(locations.len(), MAP_LOCATION_LIMIT as usize);
    // ids ascend as created_at descends, so the newest are the lowest ids
    assert_eq!(locations.first().map(|l| l.complaint_no.get()), Some(1));
    assert_eq!(
        locations.last().map(|l| l.complaint_no.get()),
        Some(i64::from(MAP_LOCATION_LIMIT))
    );
}

#[test]
fn change_status_is_agency_only_and_follows_state_machine() {
    let mut store = open_store("change_status_state_machine");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    let err = change_status(&mut store, complaint_no, owner, ComplaintStatus::Cancelled)
        .expect_err("owner cannot move status");
    assert!(matches!(err, StoreError::Forbidden(_)));

    change_status(&mut store, complaint_no, staff, ComplaintStatus::InProgress).expect("start");
    let err = change_status(&mut store, complaint_no, staff, ComplaintStatus::Received)
        .expect_err("no way back");
    assert!(matches!(
        err,
        StoreError::IllegalTransition {
            from: ComplaintStatus::InProgress,
            to: ComplaintStatus::Received
        }
    ));

    let history = store
        .change_status(ChangeStatusRequest {
            complaint_no,
            actor: staff,
            status: ComplaintStatus::Completed,
            memo: Some("fixed".to_string()),
            at_ms: NOW_MS + 9_000,
        })
        .expect("complete");
    let statuses: Vec<_> = history.iter().map(|row| row.status).collect();
    assert_eq!(
        statuses,
        vec![ComplaintStatus::InProgress, ComplaintStatus::Completed]
    );
    assert_eq!(history[1].memo.as_deref(), Some("fixed"));
    assert_eq!(history[1].actor_user_no, staff.user_no);

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.completed_at_ms, Some(NOW_MS + 9_000));
    assert_eq!(detail.history.len(), 2);

    let err = change_status(&mut store, complaint_no, staff, ComplaintStatus::Rejected)
        .expect_err("terminal");
    assert!(matches!(err, StoreError::IllegalTransition { .. }));
}

#[test]
fn history_follows_detail_visibility() {
    let mut store = open_store("history_visibility");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let complaint_no = private_complaint(&mut store, owner);

    assert!(
        store
            .complaint_history(complaint_no, Some(&owner))
            .expect("owner history")
            .is_empty()
    );
    let err = store
        .complaint_history(complaint_no, Some(&stranger))
        .expect_err("stranger");
    assert!(matches!(err, StoreError::Forbidden(_)));
}

#[test]
fn replies_are_ordered_oldest_first_and_restricted() {
    let mut store = open_store("replies_order");
    let owner = citizen(&mut store, "owner");
    let stranger = citizen(&mut store, "stranger");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);

    for (actor, content, at) in [
        (staff, "second", NOW_MS + 2_000),
        (owner, "first", NOW_MS + 1_000),
    ] {
        store
            .add_reply(AddReplyRequest {
                complaint_no,
                actor,
                content: content.to_string(),
                created_at_ms: at,
            })
            .expect("reply");
    }
    let err = store
        .add_reply(AddReplyRequest {
            complaint_no,
            actor: stranger,
            content: "me too".to_string(),
            created_at_ms: NOW_MS,
        })
        .expect_err("stranger");
    assert!(matches!(err, StoreError::Forbidden(_)));

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    let contents: Vec<_> = detail.replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
    assert_eq!(detail.replies[1].author_role, Role::Agency);
}

#[test]
fn files_are_owner_only_while_received() {
    let mut store = open_store("files_owner_only");
    let owner = citizen(&mut store, "owner");
    let staff = officer(&mut store, "staff");
    let complaint_no = complaint(&mut store, owner, "road", NOW_MS);
    let attach = |store: &mut SqliteStore, actor| {
        store.attach_file(AttachFileRequest {
            complaint_no,
            actor,
            file: NewFile {
                file_url: "/uploads/b.jpg".to_string(),
                file_type: None,
            },
            uploaded_at_ms: NOW_MS,
        })
    };

    let err = attach(&mut store, staff).expect_err("not owner");
    assert!(matches!(err, StoreError::Forbidden(_)));
    let file = attach(&mut store, owner).expect("owner attaches");
    assert_eq!(file.file_url, "/uploads/b.jpg");

    change_status(&mut store, complaint_no, staff, ComplaintStatus::InProgress).expect("start");
    let err = attach(&mut store, owner).expect_err("closed");
    assert!(matches!(err, StoreError::NotReceived { .. }));

    let detail = store.get_complaint(complaint_no, None).expect("detail");
    assert_eq!(detail.files.len(), 1);
}

#[test]
fn list_search_matches_title_or_content() {
    let mut store = open_store("list_search");
    let owner = citizen(&mut store, "owner");
    let road = complaint(&mut store, owner, "road", NOW_MS);
    let noise = complaint(&mut store, owner, "noise", NOW_MS + 1);
    let mut request = complaint_request(owner, "parks", NOW_MS + 2);
    request.content = "broken bench near the road".to_string();
    let parks = store.create_complaint(request).expect("create").complaint_no;

    let found: Vec<ComplaintNo> = store
        .list_complaints(ListComplaintsRequest {
            search: Some(" road ".to_string()),
            ..Default::default()
        })
        .expect("list")
        .items
        .iter()
        .map(|item| item.complaint_no)
        .collect();
    assert_eq!(found, vec![parks, road]);

    let page = store
        .list_complaints(ListComplaintsRequest {
            search: Some("noise title".to_string()),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(page.page.total_count, 1);
    assert_eq!(page.items[0].complaint_no, noise);
}

#[test]
fn list_region_matches_address_prefix() {
    let mut store = open_store("list_region");
    let owner = citizen(&mut store, "owner");
    let seoul = located_complaint(&mut store, owner, "서울특별시 중구", NOW_MS);
    located_complaint(&mut store, owner, "부산광역시 서울로", NOW_MS + 1);
    complaint(&mut store, owner, "road", NOW_MS + 2);

    let page = store
        .list_complaints(ListComplaintsRequest {
            region: Some("서울".to_string()),
            ..Default::default()
        })
        .expect("list");
    assert_eq!(page.page.total_count, 1);
    assert_eq!(page.items[0].complaint_no, seoul);
}

#[test]
fn my_complaints_include_private_and_exclude_others() {
    let mut store = open_store("my_complaints");
    let owner = citizen(&mut store, "owner");
    let other = citizen(&mut store, "other");
    let public = complaint(&mut store, owner, "road", NOW_MS);
    let private = private_complaint(&mut store, owner);
    complaint(&mut store, other, "road", NOW_MS + 5);

    let mine = store
        .my_complaints(MyComplaintsRequest {
            owner,
            page: PageRequest::default(),
        })
        .expect("my complaints");
    let ids: Vec<ComplaintNo> = mine.items.iter().map(|item| item.complaint_no).collect();
    assert_eq!(ids, vec![private, public]);
    assert_eq!(mine.page.total_count, 2);
}

#[test]
fn top_liked_orders_public_complaints_by_likes() {
    let mut store = open_store("top_liked");
    let owner = citizen(&mut store, "owner");
    let fans: Vec<_> = (0..3)
        .map(|i| citizen(&mut store, &format!("fan{i}")))
        .collect();
    let mut ids = Vec::new();
    for i in 0..7 {
        ids.push(complaint(&mut store, owner, "road", NOW_MS + i));
    }
    let private = private_complaint(&mut store, owner);
    for (complaint_no, likes) in [(ids[0], 3), (ids[1], 1), (private, 3)] {
        for fan in &fans[..likes] {
            store
                .toggle_like(ToggleLikeRequest {
                    complaint_no,
                    actor: *fan,
                    at_ms: NOW_MS,
                })
                .expect("like");
        }
    }

    let top = store.top_liked(None).expect("top liked");
    assert_eq!(top.len(), TOP_LIKED_LIMIT as usize);
    assert_eq!(top[0].complaint_no, ids[0]);
    assert_eq!(top[0].like_count, 3);
    assert_eq!(top[1].complaint_no, ids[1]);
    assert_eq!(top[2].complaint_no, ids[6], "ties go to the newer complaint");
    assert!(top.iter().all(|item| item.complaint_no != private));

    let staff = officer(&mut store, "staff");
    change_status(&mut store, ids[1], staff, ComplaintStatus::InProgress).expect("transition");
    let in_progress = store
        .top_liked(Some(ComplaintStatus::InProgress))
        .expect("top liked");
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].complaint_no, ids[1]);
}
