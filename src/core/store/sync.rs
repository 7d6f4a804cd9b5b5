//! Background worker delivering plan snapshots to the plan store

use super::PlanStore;
use crate::core::identity::UserId;
use crate::core::models::Course;
use crate::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Result of one remote save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The store accepted the snapshot
    Saved,
    /// The store rejected the snapshot; the message is user-facing
    Failed(String),
}

/// Out-of-band report for one submitted snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncNotice {
    /// Plan revision the snapshot was taken at
    pub revision: u64,
    /// Number of courses in the snapshot
    pub course_count: usize,
    /// What happened
    pub outcome: SyncOutcome,
}

impl SyncNotice {
    /// Whether the save failed
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Failed(_))
    }
}

enum Job {
    Save {
        user: UserId,
        revision: u64,
        courses: Vec<Course>,
    },
    Flush(Sender<()>),
}

fn run_save(store: &dyn PlanStore, user: &UserId, revision: u64, courses: &[Course]) -> SyncNotice {
    let outcome = match store.save_plan(user, courses) {
        Ok(()) => {
            debug!("Saved plan revision {revision} for {user} ({} courses)", courses.len());
            SyncOutcome::Saved
        }
        Err(e) => {
            warn!("Could not save plan revision {revision} for {user}: {e}");
            SyncOutcome::Failed(e.to_string())
        }
    };
    SyncNotice {
        revision,
        course_count: courses.len(),
        outcome,
    }
}

/// Saves plan snapshots on a background thread, in submission order
///
/// Snapshots are not coalesced, so the last submitted snapshot is the last one
/// written. If the thread cannot be started, saves run inline on the caller's
/// thread instead.
pub struct SyncWorker {
    store: Arc<dyn PlanStore>,
    jobs: Option<Sender<Job>>,
    notice_tx: Sender<SyncNotice>,
    notices: Receiver<SyncNotice>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    /// Start a worker saving into `store`
    #[must_use]
    pub fn spawn(store: Arc<dyn PlanStore>) -> Self {
        let (notice_tx, notices) = mpsc::channel();
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();

        let worker_store = Arc::clone(&store);
        let worker_notices = notice_tx.clone();
        let spawned = thread::Builder::new()
            .name("plan-sync".to_string())
            .spawn(move || {
                for job in jobs_rx {
                    match job {
                        Job::Save {
                            user,
                            revision,
                            courses,
                        } => {
                            let notice = run_save(worker_store.as_ref(), &user, revision, &courses);
                            let _ = worker_notices.send(notice);
                        }
                        Job::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            });

        let (jobs, handle) = match spawned {
            Ok(handle) => (Some(jobs_tx), Some(handle)),
            Err(e) => {
                warn!("Could not start background sync ({e}); saving inline");
                (None, None)
            }
        };

        Self {
            store,
            jobs,
            notice_tx,
            notices,
            handle,
        }
    }

    /// Queue a snapshot for saving; returns immediately unless running inline
    pub fn submit(&self, user: &UserId, revision: u64, courses: Vec<Course>) {
        let job = Job::Save {
            user: user.clone(),
            revision,
            courses,
        };
        let job = match &self.jobs {
            Some(jobs) => match jobs.send(job) {
                Ok(()) => return,
                Err(mpsc::SendError(job)) => job,
            },
            None => job,
        };
        if let Job::Save {
            user,
            revision,
            courses,
        } = job
        {
            let notice = run_save(self.store.as_ref(), &user, revision, &courses);
            let _ = self.notice_tx.send(notice);
        }
    }

    /// Block until every snapshot submitted so far has been attempted
    pub fn flush(&self) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if jobs.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Notices produced since the last call, oldest first
    #[must_use]
    pub fn drain_notices(&self) -> Vec<SyncNotice> {
        self.notices.try_iter().collect()
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop after pending saves
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
