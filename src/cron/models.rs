use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Recurrence
// ============================================================================

/// Coarse recurrence category, encoded as 1/2/3 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Periodicity {
    Daily,
    Weekly,
    Monthly,
}

impl Periodicity {
    /// Numeric wire code (1=daily, 2=weekly, 3=monthly).
    pub fn code(self) -> u8 {
        match self {
            Periodicity::Daily => 1,
            Periodicity::Weekly => 2,
            Periodicity::Monthly => 3,
        }
    }
}

impl TryFrom<u8> for Periodicity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Periodicity::Daily),
            2 => Ok(Periodicity::Weekly),
            3 => Ok(Periodicity::Monthly),
            other => Err(format!(
                "invalid periodicity {other}, expected 1 (daily), 2 (weekly) or 3 (monthly)"
            )),
        }
    }
}

impl From<Periodicity> for u8 {
    fn from(value: Periodicity) -> Self {
        value.code()
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Periodicity::Daily => write!(f, "daily"),
            Periodicity::Weekly => write!(f, "weekly"),
            Periodicity::Monthly => write!(f, "monthly"),
        }
    }
}

/// Human-facing recurrence description attached to every job.
///
/// `days` semantics depend on the periodicity: day-of-week (1-7) for
/// weekly jobs, day-of-month (1-28) for monthly jobs, ignored for daily
/// jobs. `start_time` is `HH:MM`; `interval` matches `<n>min` or `<n>h`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"periodicity": 1, "days": [1, 15], "startTime": "09:00", "interval": "1h"}))]
pub struct Recurrence {
    #[schema(value_type = u8, example = 1)]
    pub periodicity: Periodicity,

    #[serde(default)]
    #[schema(example = json!([1, 15]))]
    pub days: Vec<u32>,

    #[schema(example = "09:00")]
    pub start_time: String,

    #[schema(example = "1h")]
    pub interval: String,
}

// ============================================================================
// CronJob models
// ============================================================================

/// A persisted scheduled HTTP-callback job.
///
/// `schedule_expression`, `command` and `slug` are derived fields and are
/// regenerated whenever their inputs change; they are never persisted
/// stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    pub id: u64,
    pub name: String,
    pub target_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    pub recurrence: Recurrence,
    pub schedule_expression: String,
    pub command: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a job, before derivation and id assignment.
#[derive(Debug, Clone)]
pub struct NewCronJob {
    pub name: String,
    pub target_url: String,
    pub payload: Option<String>,
    pub recurrence: Recurrence,
}

/// Partial update; `None` fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCronJob {
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub payload: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl UpdateCronJob {
    /// True when any of the command/expression inputs is being changed.
    pub fn touches_derived(&self) -> bool {
        self.target_url.is_some() || self.payload.is_some() || self.recurrence.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodicity_codes() {
        assert_eq!(Periodicity::Daily.code(), 1);
        assert_eq!(Periodicity::Weekly.code(), 2);
        assert_eq!(Periodicity::Monthly.code(), 3);
    }

    #[test]
    fn test_periodicity_from_code() {
        assert_eq!(Periodicity::try_from(1).unwrap(), Periodicity::Daily);
        assert_eq!(Periodicity::try_from(2).unwrap(), Periodicity::Weekly);
        assert_eq!(Periodicity::try_from(3).unwrap(), Periodicity::Monthly);
        assert!(Periodicity::try_from(0).is_err());
        assert!(Periodicity::try_from(4).is_err());
    }

    #[test]
    fn test_recurrence_wire_format() {
        let rec: Recurrence = serde_json::from_str(
            r#"{"periodicity": 2, "days": [1, 3], "startTime": "08:30", "interval": "15min"}"#,
        )
        .unwrap();
        assert_eq!(rec.periodicity, Periodicity::Weekly);
        assert_eq!(rec.days, vec![1, 3]);
        assert_eq!(rec.start_time, "08:30");
        assert_eq!(rec.interval, "15min");
    }

    #[test]
    fn test_recurrence_days_default_empty() {
        let rec: Recurrence = serde_json::from_str(
            r#"{"periodicity": 1, "startTime": "09:00", "interval": "1h"}"#,
        )
        .unwrap();
        assert!(rec.days.is_empty());
    }

    #[test]
    fn test_recurrence_rejects_unknown_periodicity() {
        let result = serde_json::from_str::<Recurrence>(
            r#"{"periodicity": 9, "startTime": "09:00", "interval": "1h"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cron_job_serializes_camel_case() {
        let job = CronJob {
            id: 1,
            name: "backup".to_string(),
            target_url: "https://api.example.com/backup".to_string(),
            payload: None,
            recurrence: Recurrence {
                periodicity: Periodicity::Daily,
                days: vec![],
                start_time: "09:00".to_string(),
                interval: "1h".to_string(),
            },
            schedule_expression: "0 9-23 * * *".to_string(),
            command: "echo hi".to_string(),
            slug: "api-example-com-backup".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["targetUrl"], "https://api.example.com/backup");
        assert_eq!(json["scheduleExpression"], "0 9-23 * * *");
        assert_eq!(json["recurrence"]["startTime"], "09:00");
        // Absent payload is omitted, not serialized as null
        assert!(json.get("payload").is_none());
    }
}
