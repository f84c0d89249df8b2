//! Status and kind enums stored as TEXT columns.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a stored enum value is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct StatusParseError {
    /// Which enum failed to parse.
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

/// Lifecycle status of a contact message.
///
/// Messages are created as `New` and only ever move forward through
/// administrative actions; they are never deleted by normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    /// The canonical stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            "archived" => Ok(Self::Archived),
            other => Err(StatusParseError {
                kind: "message status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Kind of skill: a technology or a soft skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Technical,
    Soft,
}

impl SkillType {
    /// The canonical stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Soft => "soft",
        }
    }
}

impl std::str::FromStr for SkillType {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(Self::Technical),
            "soft" => Ok(Self::Soft),
            other => Err(StatusParseError {
                kind: "skill type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Kind of experience entry: professional or academic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceType {
    #[default]
    Professional,
    Academic,
}

impl ExperienceType {
    /// The canonical stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Academic => "academic",
        }
    }
}

impl std::str::FromStr for ExperienceType {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Self::Professional),
            "academic" => Ok(Self::Academic),
            other => Err(StatusParseError {
                kind: "experience type",
                value: other.to_owned(),
            }),
        }
    }
}

macro_rules! impl_display_and_pg_text {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(s.parse::<Self>()?)
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

impl_display_and_pg_text!(MessageStatus);
impl_display_and_pg_text!(SkillType);
impl_display_and_pg_text!(ExperienceType);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_status_roundtrip() {
        for status in [
            MessageStatus::New,
            MessageStatus::Read,
            MessageStatus::Replied,
            MessageStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<MessageStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_message_status_unknown() {
        let err = "deleted".parse::<MessageStatus>().unwrap_err();
        assert_eq!(err.value, "deleted");
    }

    #[test]
    fn test_message_status_default_is_new() {
        assert_eq!(MessageStatus::default(), MessageStatus::New);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&MessageStatus::Replied).unwrap();
        assert_eq!(json, "\"replied\"");
        let json = serde_json::to_string(&SkillType::Soft).unwrap();
        assert_eq!(json, "\"soft\"");
        let json = serde_json::to_string(&ExperienceType::Academic).unwrap();
        assert_eq!(json, "\"academic\"");
    }

    #[test]
    fn test_skill_type_roundtrip() {
        for kind in [SkillType::Technical, SkillType::Soft] {
            assert_eq!(kind.as_str().parse::<SkillType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_experience_type_roundtrip() {
        for kind in [ExperienceType::Professional, ExperienceType::Academic] {
            assert_eq!(kind.as_str().parse::<ExperienceType>().unwrap(), kind);
        }
    }
}
