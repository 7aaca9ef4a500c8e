#![forbid(unsafe_code)]

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdError {
    NotPositive,
    Malformed,
}

impl IdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotPositive => "id must be a positive integer",
            Self::Malformed => "id must be numeric",
        }
    }
}

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            pub fn try_new(value: i64) -> Result<Self, IdError> {
                if value <= 0 {
                    return Err(IdError::NotPositive);
                }
                Ok(Self(value))
            }

            pub fn parse(value: &str) -> Result<Self, IdError> {
                let value = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdError::Malformed)?;
                Self::try_new(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(ComplaintNo);
numeric_id!(UserNo);
numeric_id!(AgencyNo);
