#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComplaintStatus {
    Received,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 5] = [
        ComplaintStatus::Received,
        ComplaintStatus::InProgress,
        ComplaintStatus::Completed,
        ComplaintStatus::Rejected,
        ComplaintStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Received => "RECEIVED",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Completed => "COMPLETED",
            ComplaintStatus::Rejected => "REJECTED",
            ComplaintStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

/// Sub-status of a single agency assignment. Deliberately a separate type from
/// [`ComplaintStatus`]: the two lifecycles never drive each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssignmentStatus {
    Received,
    InProgress,
    Completed,
    Rejected,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 4] = [
        AssignmentStatus::Received,
        AssignmentStatus::InProgress,
        AssignmentStatus::Completed,
        AssignmentStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Received => "RECEIVED",
            AssignmentStatus::InProgress => "IN_PROGRESS",
            AssignmentStatus::Completed => "COMPLETED",
            AssignmentStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Still waiting on the agency (counted by the bottleneck view).
    pub fn is_open(self) -> bool {
        matches!(self, AssignmentStatus::Received | AssignmentStatus::InProgress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Agency,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Agency => "AGENCY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "AGENCY" => Some(Role::Agency),
            _ => None,
        }
    }

    pub fn is_elevated(self) -> bool {
        self != Role::User
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgencyType {
    Central,
    Local,
}

impl AgencyType {
    pub fn as_str(self) -> &'static str {
        match self {
            AgencyType::Central => "CENTRAL",
            AgencyType::Local => "LOCAL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CENTRAL" => Some(AgencyType::Central),
            "LOCAL" => Some(AgencyType::Local),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureType {
    Point,
}

impl FeatureType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureType::Point => "POINT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "POINT" => Some(FeatureType::Point),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeBasis {
    Day,
    Month,
    Year,
}

impl TimeBasis {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeBasis::Day => "DAY",
            TimeBasis::Month => "MONTH",
            TimeBasis::Year => "YEAR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DAY" => Some(TimeBasis::Day),
            "MONTH" => Some(TimeBasis::Month),
            "YEAR" => Some(TimeBasis::Year),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsDimension {
    Region,
    Institution,
}

impl StatsDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            StatsDimension::Region => "region",
            StatsDimension::Institution => "institution",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "region" => Some(StatsDimension::Region),
            "institution" => Some(StatsDimension::Institution),
            _ => None,
        }
    }
}
