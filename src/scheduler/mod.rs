//! Scheduler gateway: the seam to the host's cron daemon.
//!
//! The crontab is a pure projection of the job list: every install
//! rewrites the whole table, so nothing edited behind the service's
//! back survives a sync.

mod system;

pub use system::SystemCrontab;

use async_trait::async_trait;

use crate::cron::CronJob;
use crate::error::AppResult;

/// Gateway to the periodic-task daemon.
///
/// The production implementation shells out to crond/crontab; tests use
/// an in-memory fake.
#[async_trait]
pub trait SchedulerGateway: Send + Sync {
    /// Starts the daemon if it is not already running. Idempotent and
    /// non-fatal; a failure is logged.
    async fn ensure_running(&self);

    /// Checks whether the daemon process is present.
    async fn is_running(&self) -> bool;

    /// Replaces the daemon's table with a projection of `jobs`.
    async fn install_table(&self, jobs: &[CronJob]) -> AppResult<()>;

    /// Asks the daemon to re-read its table. Non-fatal if absent.
    async fn reload(&self);
}

/// Renders the full crontab content for a job list: one comment line
/// with id and name, then the schedule and command, per job in list
/// order.
///
/// Percent signs in the command are escaped as `\%`: vixie-style crond
/// treats an unescaped `%` as a newline and feeds the rest of the line
/// to the command as stdin, which would truncate every entry at the
/// first `date` format specifier.
pub fn render_table(jobs: &[CronJob]) -> String {
    let mut table = String::new();
    for job in jobs {
        table.push_str(&format!("# ID: {} - {}\n", job.id, job.name));
        table.push_str(&format!(
            "{} {}\n",
            job.schedule_expression,
            job.command.replace('%', "\\%")
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cron::{Periodicity, Recurrence};
    use jiff::Timestamp;

    fn job(id: u64, name: &str) -> CronJob {
        CronJob {
            id,
            name: name.to_string(),
            target_url: "https://api.example.com/run".to_string(),
            payload: None,
            recurrence: Recurrence {
                periodicity: Periodicity::Daily,
                days: vec![],
                start_time: "09:00".to_string(),
                interval: "1h".to_string(),
            },
            schedule_expression: "0 9-23 * * *".to_string(),
            command: "curl -k -s https://api.example.com/run".to_string(),
            slug: "api-example-com-run".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_table(&[]), "");
    }

    #[test]
    fn test_render_table_entry_shape() {
        let table = render_table(&[job(3, "nightly backup")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "# ID: 3 - nightly backup");
        assert_eq!(
            lines[1],
            "0 9-23 * * * curl -k -s https://api.example.com/run"
        );
    }

    #[test]
    fn test_render_table_escapes_percent_signs() {
        let mut entry = job(1, "backup");
        entry.command =
            r#"echo "[$(date '+%Y-%m-%d %H:%M:%S')] starting" >> /tmp/x.log"#.to_string();
        let table = render_table(&[entry]);
        assert!(table.contains(r"$(date '+\%Y-\%m-\%d \%H:\%M:\%S')"));
        assert!(!table.contains("+%Y"));
    }

    #[test]
    fn test_render_table_preserves_list_order() {
        let table = render_table(&[job(2, "second"), job(1, "first")]);
        let ids: Vec<&str> = table
            .lines()
            .filter(|l| l.starts_with("# ID:"))
            .collect();
        assert_eq!(ids, vec!["# ID: 2 - second", "# ID: 1 - first"]);
    }
}
