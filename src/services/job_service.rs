//! Job service: orchestrates validation, derivation, persistence, and
//! crontab synchronization.

use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::cron::{
    CronJob, NewCronJob, UpdateCronJob, build_command, build_expression, is_valid_expression,
    slugify_url,
};
use crate::error::{AppError, AppResult};
use crate::scheduler::SchedulerGateway;
use crate::store::JobStore;

/// Business logic for scheduled callback jobs.
///
/// A single mutex guards the in-memory list and the persist+sync
/// sequence, so every mutation is a serialized read-modify-write cycle
/// and reads never observe a half-applied change. Validation happens
/// before the list is touched; a persistence or sync failure after the
/// in-memory mutation is surfaced to the caller as the accepted
/// inconsistency window.
#[derive(Clone)]
pub struct JobService {
    jobs: Arc<Mutex<Vec<CronJob>>>,
    store: Arc<dyn JobStore>,
    scheduler: Arc<dyn SchedulerGateway>,
    log_dir: String,
}

impl JobService {
    /// Loads persisted jobs, makes sure the daemon is up, and projects
    /// the loaded state onto the crontab.
    ///
    /// A failing initial sync is logged but does not abort startup; the
    /// next successful mutation repairs the table.
    pub async fn start(
        store: Arc<dyn JobStore>,
        scheduler: Arc<dyn SchedulerGateway>,
        log_dir: impl Into<String>,
    ) -> AppResult<Self> {
        let jobs = store.load().await?;
        tracing::info!(count = jobs.len(), "Loaded persisted jobs");

        scheduler.ensure_running().await;
        if let Err(e) = scheduler.install_table(&jobs).await {
            tracing::warn!(error = %e, "Initial crontab sync failed, continuing");
        } else {
            scheduler.reload().await;
        }

        Ok(Self {
            jobs: Arc::new(Mutex::new(jobs)),
            store,
            scheduler,
            log_dir: log_dir.into(),
        })
    }

    /// Returns all jobs in insertion order.
    pub async fn list(&self) -> Vec<CronJob> {
        self.jobs.lock().await.clone()
    }

    /// Returns the job with the given id.
    pub async fn get(&self, id: u64) -> AppResult<CronJob> {
        self.jobs
            .lock()
            .await
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("job", "id", id))
    }

    /// Creates a job: validates inputs, derives the slug, expression,
    /// and command, assigns the next id, and persists+syncs.
    pub async fn create(&self, new_job: NewCronJob) -> AppResult<CronJob> {
        let name = new_job.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "Name is required"));
        }
        let target_url = new_job.target_url.trim();
        if target_url.is_empty() {
            return Err(AppError::validation("targetUrl", "Target URL is required"));
        }

        let slug = slugify_url(target_url);
        let schedule_expression = build_expression(&new_job.recurrence);
        if !is_valid_expression(&schedule_expression) {
            return Err(AppError::validation(
                "recurrence",
                format!("derived cron expression '{schedule_expression}' is invalid"),
            ));
        }
        let command = build_command(
            target_url,
            new_job.payload.as_deref(),
            &slug,
            &self.log_dir,
        );

        let mut jobs = self.jobs.lock().await;
        // Ids grow monotonically from the current maximum; a deleted id
        // below the maximum is never handed out again.
        let id = jobs.iter().map(|job| job.id).max().unwrap_or(0) + 1;
        let now = Timestamp::now();
        let job = CronJob {
            id,
            name: name.to_string(),
            target_url: target_url.to_string(),
            payload: new_job.payload,
            recurrence: new_job.recurrence,
            schedule_expression,
            command,
            slug,
            created_at: now,
            updated_at: now,
        };

        jobs.push(job.clone());
        self.persist_and_sync(&jobs).await?;

        tracing::info!(id = job.id, name = %job.name, "Job created");
        Ok(job)
    }

    /// Applies a partial update. Derived fields are regenerated when any
    /// of their inputs change, and the regenerated expression is
    /// re-validated before anything mutates.
    pub async fn update(&self, id: u64, update: UpdateCronJob) -> AppResult<CronJob> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| AppError::not_found("job", "id", id))?;

        // Validate everything before the first assignment.
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("name", "Name cannot be blank"));
            }
        }
        if let Some(url) = &update.target_url {
            if url.trim().is_empty() {
                return Err(AppError::validation("targetUrl", "Target URL cannot be blank"));
            }
        }
        let update_touched_derived = update.touches_derived();
        let recurrence = update.recurrence.as_ref().unwrap_or(&job.recurrence);
        let schedule_expression = build_expression(recurrence);
        if update_touched_derived && !is_valid_expression(&schedule_expression) {
            return Err(AppError::validation(
                "recurrence",
                format!("derived cron expression '{schedule_expression}' is invalid"),
            ));
        }

        if let Some(name) = update.name {
            job.name = name.trim().to_string();
        }
        if let Some(url) = update.target_url {
            let url = url.trim().to_string();
            if url != job.target_url {
                job.slug = slugify_url(&url);
            }
            job.target_url = url;
        }
        if let Some(recurrence) = update.recurrence {
            job.recurrence = recurrence;
        }
        if let Some(payload) = update.payload {
            job.payload = Some(payload);
        }

        if update_touched_derived {
            job.schedule_expression = schedule_expression;
            job.command =
                build_command(&job.target_url, job.payload.as_deref(), &job.slug, &self.log_dir);
        }
        job.updated_at = Timestamp::now();

        let updated = job.clone();
        self.persist_and_sync(&jobs).await?;

        tracing::info!(id = updated.id, name = %updated.name, "Job updated");
        Ok(updated)
    }

    /// Removes a job. A miss leaves both the persisted state and the
    /// crontab untouched.
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        let mut jobs = self.jobs.lock().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        if jobs.len() == before {
            return Err(AppError::not_found("job", "id", id));
        }

        self.persist_and_sync(&jobs).await?;
        tracing::info!(id, "Job deleted");
        Ok(())
    }

    /// Saves the full list and rewrites the crontab as one failable
    /// unit. Called with the job mutex held.
    async fn persist_and_sync(&self, jobs: &[CronJob]) -> AppResult<()> {
        self.store.save(jobs).await?;
        self.scheduler.install_table(jobs).await?;
        self.scheduler.reload().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cron::{Periodicity, Recurrence};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory store fake counting saves.
    #[derive(Default)]
    struct FakeStore {
        saved: Mutex<Vec<CronJob>>,
        save_calls: AtomicUsize,
        fail_saves: AtomicBool,
    }

    #[async_trait]
    impl JobStore for FakeStore {
        async fn load(&self) -> AppResult<Vec<CronJob>> {
            Ok(self.saved.lock().await.clone())
        }

        async fn save(&self, jobs: &[CronJob]) -> AppResult<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(AppError::Storage {
                    operation: "write job file".to_string(),
                    source: anyhow::anyhow!("disk full"),
                });
            }
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            *self.saved.lock().await = jobs.to_vec();
            Ok(())
        }
    }

    /// Scheduler fake recording installed tables.
    #[derive(Default)]
    struct FakeScheduler {
        installs: AtomicUsize,
        reloads: AtomicUsize,
        fail_installs: AtomicBool,
    }

    #[async_trait]
    impl SchedulerGateway for FakeScheduler {
        async fn ensure_running(&self) {}

        async fn is_running(&self) -> bool {
            true
        }

        async fn install_table(&self, _jobs: &[CronJob]) -> AppResult<()> {
            if self.fail_installs.load(Ordering::SeqCst) {
                return Err(AppError::Scheduler {
                    operation: "install crontab".to_string(),
                    source: anyhow::anyhow!("crontab: command not found"),
                });
            }
            self.installs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn reload(&self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn service() -> (JobService, Arc<FakeStore>, Arc<FakeScheduler>) {
        let store = Arc::new(FakeStore::default());
        let scheduler = Arc::new(FakeScheduler::default());
        let service = JobService::start(store.clone(), scheduler.clone(), "/var/log/webcron")
            .await
            .unwrap();
        (service, store, scheduler)
    }

    fn daily(start: &str) -> Recurrence {
        Recurrence {
            periodicity: Periodicity::Daily,
            days: vec![],
            start_time: start.to_string(),
            interval: "1h".to_string(),
        }
    }

    fn new_job(name: &str) -> NewCronJob {
        NewCronJob {
            name: name.to_string(),
            target_url: "https://api.example.com/backup".to_string(),
            payload: None,
            recurrence: daily("09:00"),
        }
    }

    #[tokio::test]
    async fn test_create_derives_all_fields() {
        let (service, _, _) = service().await;
        let job = service.create(new_job("backup")).await.unwrap();

        assert_eq!(job.id, 1);
        assert_eq!(job.schedule_expression, "0 9-23 * * *");
        assert_eq!(job.slug, "api-example-com-backup");
        assert!(job.command.contains("curl -k -s 'https://api.example.com/backup'"));
        assert!(job.command.contains("/var/log/webcron/api-example-com-backup.log"));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_never_reused() {
        let (service, _, _) = service().await;
        let first = service.create(new_job("one")).await.unwrap();
        let second = service.create(new_job("two")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        service.delete(1).await.unwrap();
        let third = service.create(new_job("three")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_without_side_effects() {
        let (service, store, scheduler) = service().await;
        let saves_before = store.save_calls.load(Ordering::SeqCst);
        let installs_before = scheduler.installs.load(Ordering::SeqCst);

        let err = service
            .create(NewCronJob {
                name: "   ".to_string(),
                ..new_job("x")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(service.list().await.is_empty());
        assert_eq!(store.save_calls.load(Ordering::SeqCst), saves_before);
        assert_eq!(scheduler.installs.load(Ordering::SeqCst), installs_before);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_url() {
        let (service, _, _) = service().await;
        let err = service
            .create(NewCronJob {
                target_url: "".to_string(),
                ..new_job("x")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_derived_expression() {
        let (service, _, _) = service().await;
        // An out-of-range start hour with a multi-hour interval leaves
        // the hour field empty, which the validator rejects.
        let err = service
            .create(NewCronJob {
                recurrence: Recurrence {
                    interval: "2h".to_string(),
                    ..daily("99:00")
                },
                ..new_job("x")
            })
            .await
            .unwrap_err();
        match err {
            AppError::Validation { field, .. } => {
                assert_eq!(field, "recurrence");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let (service, _, _) = service().await;
        service.create(new_job("one")).await.unwrap();
        service.create(new_job("two")).await.unwrap();

        assert_eq!(service.list().await.len(), 2);
        assert_eq!(service.get(2).await.unwrap().name, "two");
        assert!(matches!(
            service.get(99).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_payload_only_regenerates_command_not_schedule() {
        let (service, _, _) = service().await;
        let created = service.create(new_job("backup")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateCronJob {
                    payload: Some(r#"{"mode": "full"}"#.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.schedule_expression, created.schedule_expression);
        assert_ne!(updated.command, created.command);
        assert!(updated.command.contains("-X POST"));
        assert_eq!(updated.slug, created.slug);
    }

    #[tokio::test]
    async fn test_update_url_recomputes_slug_and_command() {
        let (service, _, _) = service().await;
        let created = service.create(new_job("backup")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateCronJob {
                    target_url: Some("https://other.example.com/Sync".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "other-example-com-sync");
        assert!(updated.command.contains("https://other.example.com/Sync"));
        assert!(updated.command.contains("other-example-com-sync.log"));
    }

    #[tokio::test]
    async fn test_update_recurrence_regenerates_schedule() {
        let (service, _, _) = service().await;
        let created = service.create(new_job("backup")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateCronJob {
                    recurrence: Some(Recurrence {
                        periodicity: Periodicity::Monthly,
                        days: vec![1, 15],
                        start_time: "00:00".to_string(),
                        interval: "1h".to_string(),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.schedule_expression, "0 0-23 1,15 * *");
    }

    #[tokio::test]
    async fn test_update_blank_name_leaves_job_untouched() {
        let (service, _, _) = service().await;
        let created = service.create(new_job("backup")).await.unwrap();

        let err = service
            .update(
                created.id,
                UpdateCronJob {
                    name: Some("  ".to_string()),
                    payload: Some("{}".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let current = service.get(created.id).await.unwrap();
        assert_eq!(current, created);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let (service, _, _) = service().await;
        let err = service
            .update(7, UpdateCronJob::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_miss_does_not_persist_or_resync() {
        let (service, store, scheduler) = service().await;
        service.create(new_job("backup")).await.unwrap();
        let saves = store.save_calls.load(Ordering::SeqCst);
        let installs = scheduler.installs.load(Ordering::SeqCst);

        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(store.save_calls.load(Ordering::SeqCst), saves);
        assert_eq!(scheduler.installs.load(Ordering::SeqCst), installs);
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_every_mutation_persists_and_syncs() {
        let (service, store, scheduler) = service().await;
        let startup_installs = scheduler.installs.load(Ordering::SeqCst);

        let job = service.create(new_job("backup")).await.unwrap();
        service
            .update(
                job.id,
                UpdateCronJob {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        service.delete(job.id).await.unwrap();

        assert_eq!(store.save_calls.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.installs.load(Ordering::SeqCst) - startup_installs, 3);
        assert!(scheduler.reloads.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_sync_failure_surfaces_to_caller() {
        let (service, _, scheduler) = service().await;
        scheduler.fail_installs.store(true, Ordering::SeqCst);

        let err = service.create(new_job("backup")).await.unwrap_err();
        assert!(matches!(err, AppError::Scheduler { .. }));
        // In-memory state was already mutated; the caller may retry.
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_to_caller() {
        let (service, store, _) = service().await;
        store.fail_saves.store(true, Ordering::SeqCst);

        let err = service.create(new_job("backup")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_duplicate_ids() {
        let (service, _, _) = service().await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.create(new_job(&format!("job-{i}"))).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_start_loads_persisted_jobs_and_syncs() {
        let store = Arc::new(FakeStore::default());
        let scheduler = Arc::new(FakeScheduler::default());
        {
            let seed = JobService::start(store.clone(), scheduler.clone(), "/tmp/logs")
                .await
                .unwrap();
            seed.create(new_job("persisted")).await.unwrap();
        }

        let installs_before = scheduler.installs.load(Ordering::SeqCst);
        let service = JobService::start(store, scheduler.clone(), "/tmp/logs")
            .await
            .unwrap();
        assert_eq!(service.list().await.len(), 1);
        // Startup projects the loaded state onto the crontab.
        assert_eq!(scheduler.installs.load(Ordering::SeqCst), installs_before + 1);
    }
}
