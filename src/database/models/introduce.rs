use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Publication status of an introduce entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Active
    }
}

#[derive(Debug, Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Status::Active),
            "INACTIVE" => Ok(Status::Inactive),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A content entry for the public site. `image_id` is a soft reference to an
/// [`ImageDocument`](super::ImageDocument); nothing enforces its existence and
/// deleting an entry never cascades to the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct IntroduceDocument {
    pub id: Uuid,
    /// Always stored uppercase.
    pub title: String,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub image_id: Uuid,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub status: Status,
}

// Manual FromRow so the TEXT status column decodes into the enum.
impl<'r> FromRow<'r, PgRow> for IntroduceDocument {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<Status>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            tag: row.try_get("tag")?,
            image_id: row.try_get("image_id")?,
            url: row.try_get("url")?,
            created_at: row.try_get("created_at")?,
            modified_at: row.try_get("modified_at")?,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        assert_eq!("ACTIVE".parse::<Status>().unwrap(), Status::Active);
        assert_eq!("INACTIVE".parse::<Status>().unwrap(), Status::Inactive);
        assert_eq!(Status::Active.as_str(), "ACTIVE");
        assert_eq!(Status::Inactive.as_str(), "INACTIVE");
        assert!("active".parse::<Status>().is_err());
    }

    #[test]
    fn status_defaults_to_active() {
        assert_eq!(Status::default(), Status::Active);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Status::Inactive).unwrap(),
            "\"INACTIVE\""
        );
    }
}
