#![forbid(unsafe_code)]

//! Capability checks, one per operation. Roles are a flat tag: nothing here
//! dispatches on a role hierarchy, every rule spells out which roles it admits.

use crate::ids::UserNo;
use crate::model::Role;

/// An authenticated caller as produced by the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subject {
    pub user_no: UserNo,
    pub role: Role,
}

impl Subject {
    pub fn new(user_no: UserNo, role: Role) -> Self {
        Self { user_no, role }
    }

    pub fn is_owner_of(&self, owner: UserNo) -> bool {
        self.user_no == owner
    }
}

/// Outcome of a read check on a single complaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadAccess {
    Granted,
    /// Authenticated but not entitled.
    Forbidden,
    /// Anonymous caller probing a private record; reported as not found so the
    /// record's existence does not leak.
    Hidden,
}

pub fn read_access(is_public: bool, owner: UserNo, viewer: Option<&Subject>) -> ReadAccess {
    if is_public {
        return ReadAccess::Granted;
    }
    match viewer {
        None => ReadAccess::Hidden,
        Some(subject) if subject.is_owner_of(owner) || subject.role.is_elevated() => {
            ReadAccess::Granted
        }
        Some(_) => ReadAccess::Forbidden,
    }
}

/// Private rows a listing may include besides public ones: the viewer's own.
pub fn listing_owner_scope(viewer: Option<&Subject>) -> Option<UserNo> {
    viewer.map(|subject| subject.user_no)
}

pub fn can_update(owner: UserNo, subject: &Subject) -> bool {
    subject.is_owner_of(owner)
}

/// Elevated roles bypass ownership here, without any jurisdiction scoping.
pub fn can_delete(owner: UserNo, subject: &Subject) -> bool {
    subject.is_owner_of(owner) || subject.role.is_elevated()
}

pub fn can_change_status(subject: &Subject) -> bool {
    subject.role == Role::Agency
}

pub fn can_manage_assignments(subject: &Subject) -> bool {
    subject.role == Role::Agency
}

pub fn can_reply(owner: UserNo, subject: &Subject) -> bool {
    subject.is_owner_of(owner) || subject.role == Role::Agency
}

pub fn can_attach_file(owner: UserNo, subject: &Subject) -> bool {
    subject.is_owner_of(owner)
}
