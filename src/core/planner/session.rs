//! The planner session: one signed-in user's plan and its derived views
//!
//! Every mutation follows the same pipeline: change the plan, recompute the
//! semester view and totals, write the local cache, then queue a remote save.
//! Views are always consistent with the plan when a mutation returns.

use super::aggregate::Totals;
use super::grouping::group_filtered;
use super::template::{expand_template, SkippedCode};
use crate::core::catalog::{normalize_code, CatalogLookup};
use crate::core::error::PlanError;
use crate::core::identity::{Identity, UserId};
use crate::core::models::grade::{parse_grade_points, points_for_selection};
use crate::core::models::term::parse_semester_token;
use crate::core::models::{Course, Plan, Semester, Term};
use crate::core::store::{cache_key, LocalCache, PlanStore, SyncNotice, SyncWorker};
use crate::{debug, info, warn};
use std::sync::Arc;

/// Explicit permission for an operation that discards the current plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user agreed to replace the plan
    Confirmed,
    /// The user has not agreed
    Unconfirmed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Unconfirmed
        }
    }
}

/// Where the session's initial plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// The remote plan store
    Store,
    /// The local fallback cache
    LocalCache,
    /// Nothing was saved; the plan starts empty
    Empty,
}

/// Derived view of the plan, rebuilt after every change
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanView {
    /// Semesters of the courses matching the active filter, chronological
    pub semesters: Vec<Semester>,
    /// Credits and weighted GPA over the whole plan
    pub totals: Totals,
    /// Active text filter (empty when none)
    pub filter: String,
}

impl PlanView {
    fn compute(plan: &Plan, filter: &str) -> Self {
        Self {
            semesters: group_filtered(plan.courses(), filter),
            totals: Totals::of(plan.courses()),
            filter: filter.trim().to_string(),
        }
    }
}

/// Collaborators a session is built from
pub struct Services {
    /// Read-only course catalog
    pub catalog: Arc<dyn CatalogLookup>,
    /// Remote plan store
    pub store: Arc<dyn PlanStore>,
    /// Local fallback cache
    pub cache: Arc<dyn LocalCache>,
    /// Identity provider
    pub identity: Box<dyn Identity>,
}

/// The plan aggregation engine for one signed-in user
pub struct PlannerSession {
    user: UserId,
    plan: Plan,
    view: PlanView,
    revision: u64,
    source: PlanSource,
    catalog: Arc<dyn CatalogLookup>,
    cache: Arc<dyn LocalCache>,
    identity: Box<dyn Identity>,
    sync: SyncWorker,
}

impl PlannerSession {
    /// Start a session for the signed-in user, hydrating the plan
    ///
    /// The plan is loaded from the store; if the store has nothing or cannot
    /// be read, the local cache is used; if that is empty too, the plan
    /// starts empty.
    ///
    /// # Errors
    /// Returns `PlanError::NotSignedIn` when the identity has no current user
    pub fn start(services: Services) -> Result<Self, PlanError> {
        let Services {
            catalog,
            store,
            cache,
            identity,
        } = services;
        let user = identity.current_user_id().ok_or(PlanError::NotSignedIn)?;

        let (courses, source) = hydrate(store.as_ref(), cache.as_ref(), &user);
        let (plan, dropped) = Plan::from_courses(courses);
        if dropped > 0 {
            warn!("Dropped {dropped} repeated course entries from the saved plan for {user}");
        }
        info!(
            "Plan for {user} loaded from {source:?} ({} courses)",
            plan.course_count()
        );

        let view = PlanView::compute(&plan, "");
        Ok(Self {
            user,
            plan,
            view,
            revision: 0,
            source,
            catalog,
            cache,
            identity,
            sync: SyncWorker::spawn(store),
        })
    }

    /// The signed-in user
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Where the initial plan came from
    #[must_use]
    pub const fn source(&self) -> PlanSource {
        self.source
    }

    /// The current plan
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// The current derived view
    #[must_use]
    pub const fn view(&self) -> &PlanView {
        &self.view
    }

    /// Number of mutations applied in this session
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The catalog this session adds courses from
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogLookup {
        self.catalog.as_ref()
    }

    /// Change the text filter and regroup
    pub fn set_filter(&mut self, filter: &str) -> &PlanView {
        self.view = PlanView::compute(&self.plan, filter);
        &self.view
    }

    /// Add a catalog course to the given semester
    ///
    /// # Errors
    /// - `PlanError::CourseNotFound` if the code is not in the catalog
    /// - `PlanError::DuplicateCourse` if the code is already planned
    pub fn add_course(&mut self, code: &str, term: Term, year: i32) -> Result<&PlanView, PlanError> {
        let normalized = normalize_code(code);
        let entry = self
            .catalog
            .course(&normalized)
            .ok_or_else(|| PlanError::CourseNotFound(code.trim().to_string()))?;
        let course = Course::from_catalog(&normalized, entry, term, year);

        self.plan.add_course(course)?;
        debug!("Added {normalized} to {term} {year}");
        self.commit();
        Ok(&self.view)
    }

    /// Add a catalog course to a semester given as a token such as `fall2024`
    ///
    /// # Errors
    /// `PlanError::InvalidSemester` for a malformed token, otherwise as
    /// [`add_course`](Self::add_course)
    pub fn add_course_to(&mut self, code: &str, semester: &str) -> Result<&PlanView, PlanError> {
        let (term, year) = parse_semester_token(semester).map_err(PlanError::InvalidSemester)?;
        self.add_course(code, term, year)
    }

    /// Remove a course by code; unknown codes are ignored
    ///
    /// # Returns
    /// The removed course, if it was planned
    pub fn remove_course(&mut self, code: &str) -> Option<Course> {
        let removed = self.plan.remove_course(&normalize_code(code))?;
        debug!("Removed {}", removed.code);
        self.commit();
        Some(removed)
    }

    /// Set a course's grade points from user-entered text
    ///
    /// Unparsable values and values outside [0.0, 4.0] are ignored without an
    /// error, as are unknown codes.
    ///
    /// # Returns
    /// `true` if the grade was applied
    pub fn set_grade(&mut self, code: &str, input: &str) -> bool {
        parse_grade_points(input).is_some_and(|gpa| self.apply_grade(code, gpa))
    }

    /// Set a course's grade from a letter selector value (`A`..`F`, empty for ungraded)
    ///
    /// # Returns
    /// `true` if the grade was applied
    pub fn set_letter_grade(&mut self, code: &str, selection: &str) -> bool {
        points_for_selection(selection).is_some_and(|gpa| self.apply_grade(code, gpa))
    }

    fn apply_grade(&mut self, code: &str, gpa: f64) -> bool {
        let code = normalize_code(code);
        if !self.plan.set_gpa(&code, gpa) {
            return false;
        }
        debug!("Set grade of {code} to {gpa}");
        self.commit();
        true
    }

    /// Replace the whole plan with a major template
    ///
    /// Template codes missing from the catalog are skipped and returned; the
    /// rest of the template is applied.
    ///
    /// # Errors
    /// - `PlanError::TemplateNotFound` if no template has that name
    /// - `PlanError::ConfirmationRequired` if the plan is non-empty and the
    ///   replacement was not confirmed
    pub fn apply_template(
        &mut self,
        name: &str,
        confirmation: Confirmation,
    ) -> Result<Vec<SkippedCode>, PlanError> {
        let entries = self
            .catalog
            .template(name)
            .ok_or_else(|| PlanError::TemplateNotFound(name.to_string()))?;
        if !self.plan.is_empty() && confirmation != Confirmation::Confirmed {
            return Err(PlanError::ConfirmationRequired("applying a template"));
        }

        let expansion = expand_template(self.catalog.as_ref(), entries);
        info!(
            "Applied template {name}: {} courses, {} skipped",
            expansion.courses.len(),
            expansion.skipped.len()
        );
        self.plan.replace(expansion.courses);
        self.commit();
        Ok(expansion.skipped)
    }

    /// Empty the plan and drop the local cache entry
    ///
    /// # Errors
    /// `PlanError::ConfirmationRequired` if the plan is non-empty and clearing
    /// was not confirmed
    pub fn clear(&mut self, confirmation: Confirmation) -> Result<(), PlanError> {
        if !self.plan.is_empty() && confirmation != Confirmation::Confirmed {
            return Err(PlanError::ConfirmationRequired("clearing the plan"));
        }
        self.plan.clear();
        self.revision += 1;
        self.view = PlanView::compute(&self.plan, &self.view.filter);
        if let Err(e) = self.cache.remove(&cache_key(&self.user)) {
            warn!("Could not clear local plan cache: {e}");
        }
        self.sync.submit(&self.user, self.revision, Vec::new());
        info!("Cleared plan for {}", self.user);
        Ok(())
    }

    /// Queue the current plan for another remote save (after a failure notice)
    pub fn retry_sync(&self) {
        self.sync
            .submit(&self.user, self.revision, self.plan.courses().to_vec());
    }

    /// Wait until every queued remote save has been attempted
    pub fn flush(&self) {
        self.sync.flush();
    }

    /// Sync reports produced since the last call
    #[must_use]
    pub fn notices(&self) -> Vec<SyncNotice> {
        self.sync.drain_notices()
    }

    /// Finish pending saves, drop the in-memory plan and sign out
    ///
    /// # Returns
    /// Sync reports that were still undelivered
    pub fn sign_out(mut self) -> Vec<SyncNotice> {
        self.sync.flush();
        let notices = self.sync.drain_notices();
        self.plan.clear();
        self.identity.sign_out();
        info!("Signed out {}", self.user);
        notices
    }

    /// Recompute views and persist after a mutation
    fn commit(&mut self) {
        self.revision += 1;
        self.view = PlanView::compute(&self.plan, &self.view.filter);

        let courses = self.plan.courses().to_vec();
        match serde_json::to_string(&courses) {
            Ok(json) => {
                if let Err(e) = self.cache.write(&cache_key(&self.user), &json) {
                    warn!("Could not write local plan cache: {e}");
                }
            }
            Err(e) => warn!("Could not encode plan for local cache: {e}"),
        }
        self.sync.submit(&self.user, self.revision, courses);
    }
}

/// Initial courses for `user`: store first, then local cache, then nothing
fn hydrate(
    store: &dyn PlanStore,
    cache: &dyn LocalCache,
    user: &UserId,
) -> (Vec<Course>, PlanSource) {
    match store.load_plan(user) {
        Ok(Some(courses)) if !courses.is_empty() => return (courses, PlanSource::Store),
        Ok(_) => {}
        Err(e) => warn!("Could not load plan from store, trying local cache: {e}"),
    }

    match cache.read(&cache_key(user)) {
        Ok(Some(json)) => match serde_json::from_str::<Vec<Course>>(&json) {
            Ok(courses) if !courses.is_empty() => (courses, PlanSource::LocalCache),
            Ok(_) => (Vec::new(), PlanSource::Empty),
            Err(e) => {
                warn!("Ignoring unreadable local plan cache: {e}");
                (Vec::new(), PlanSource::Empty)
            }
        },
        Ok(None) => (Vec::new(), PlanSource::Empty),
        Err(e) => {
            warn!("Could not read local plan cache: {e}");
            (Vec::new(), PlanSource::Empty)
        }
    }
}
