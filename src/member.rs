//! Member records as delivered by the data layer.

use crate::error::ZupuError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub type MemberId = i64;

/// Recorded gender. Anything other than 男/女 in the source data is kept
/// as [`Gender::Unknown`] rather than rejecting the record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn new_from_label(label: &str) -> Self {
        match label {
            "男" => Gender::Male,
            "女" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    #[inline(always)]
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
            Gender::Unknown => "未知",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Gender::new_from_label(&label))
    }
}

/// One family member row. Field names match the upstream storage schema;
/// `father_id` is filled in from `father_uid` during normalization and may
/// be absent in raw input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub father_uid: Option<String>,
    #[serde(default)]
    pub father_id: Option<MemberId>,
    #[serde(default)]
    pub generation: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub sibling_order: Option<i32>,
    #[serde(default)]
    pub official_position: Option<String>,
    pub is_alive: bool,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birth_date: Option<i32>,
    #[serde(default)]
    pub death_date: Option<i32>,
    #[serde(default)]
    pub residence_place: Option<String>,
}

impl FamilyMember {
    /// External string ref, with blank values treated as absent.
    #[inline(always)]
    pub fn uid_key(&self) -> Option<&str> {
        self.uid.as_deref().filter(|u| !u.is_empty())
    }

    /// Parent ref, with blank values treated as absent.
    #[inline(always)]
    pub fn father_uid_key(&self) -> Option<&str> {
        self.father_uid.as_deref().filter(|u| !u.is_empty())
    }

    /// Generation used for row bucketing; unrecorded generations group
    /// with generation 0.
    #[inline(always)]
    pub fn generation_key(&self) -> i32 {
        self.generation.unwrap_or(0)
    }

    /// Sort key among siblings; unrecorded order sorts as 0.
    #[inline(always)]
    pub fn sibling_order_key(&self) -> i32 {
        self.sibling_order.unwrap_or(0)
    }

    /// Age in years at the given reference year, if a birth year is recorded.
    /// Dates are stored as plain years, so no month correction applies.
    #[inline(always)]
    pub fn age_in(&self, reference_year: i32) -> Option<i32> {
        self.birth_date.map(|birth| reference_year - birth)
    }

    pub fn validate(&self) -> Result<(), ZupuError> {
        if self.name.trim().is_empty() {
            return Err(ZupuError::Validation(format!(
                "Member {} has no name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Parses a JSON array of member records. Anything that is not a list of
/// records is a hard error; unknown fields are ignored.
pub fn members_from_json(text: &str) -> Result<Vec<FamilyMember>, ZupuError> {
    let members: Vec<FamilyMember> = serde_json::from_str(text)?;
    for member in &members {
        member.validate()?;
    }
    Ok(members)
}
