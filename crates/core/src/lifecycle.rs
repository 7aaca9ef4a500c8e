#![forbid(unsafe_code)]

use crate::model::ComplaintStatus;

impl ComplaintStatus {
    /// Owners may edit or delete only while the complaint is still RECEIVED.
    pub fn is_owner_mutable(self) -> bool {
        self == ComplaintStatus::Received
    }

    pub fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }

    /// Agency-side transitions. Nothing leads back to RECEIVED.
    pub fn next_states(self) -> &'static [ComplaintStatus] {
        match self {
            ComplaintStatus::Received => &[
                ComplaintStatus::InProgress,
                ComplaintStatus::Completed,
                ComplaintStatus::Rejected,
                ComplaintStatus::Cancelled,
            ],
            ComplaintStatus::InProgress => &[
                ComplaintStatus::Completed,
                ComplaintStatus::Rejected,
                ComplaintStatus::Cancelled,
            ],
            ComplaintStatus::Completed | ComplaintStatus::Rejected | ComplaintStatus::Cancelled => {
                &[]
            }
        }
    }

    pub fn can_transition_to(self, to: ComplaintStatus) -> bool {
        self.next_states().contains(&to)
    }
}
