#![forbid(unsafe_code)]

pub mod access;
pub mod geo;
pub mod ids;
pub mod lifecycle;
pub mod model;
pub mod paging;
pub mod stats;

pub use access::Subject;
pub use ids::{AgencyNo, ComplaintNo, UserNo};
pub use model::{
    AgencyType, AssignmentStatus, ComplaintStatus, FeatureType, Role, StatsDimension, TimeBasis,
};
