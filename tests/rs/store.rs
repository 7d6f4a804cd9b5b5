//! Integration tests for plan persistence and hydration

use course_planner::core::catalog::Catalog;
use course_planner::core::identity::{StaticIdentity, UserId};
use course_planner::core::models::{Course, Term};
use course_planner::core::planner::{Confirmation, PlanSource, PlannerSession, Services};
use course_planner::core::store::{
    cache_key, FileCache, JsonFileStore, LocalCache, MemoryCache, MemoryStore, PlanStore,
};
use std::sync::Arc;
use tempfile::TempDir;

const COURSES: &str = r#"{
    "CMSC 201": {"name": "Computer Science I", "credits": 4},
    "MATH 151": {"name": "Calculus I", "credits": 4}
}"#;

fn start(store: Arc<dyn PlanStore>, cache: Arc<dyn LocalCache>, user: &str) -> PlannerSession {
    PlannerSession::start(Services {
        catalog: Arc::new(Catalog::from_json(COURSES, "{}").expect("catalog")),
        store,
        cache,
        identity: Box::new(StaticIdentity::new(user)),
    })
    .expect("signed in")
}

fn alice() -> UserId {
    UserId::new("alice").expect("user id")
}

#[test]
fn saved_plan_is_hydrated_from_store() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    {
        let mut session = start(store.clone(), cache.clone(), "alice");
        session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
        session.flush();
    }

    let session = start(store, Arc::new(MemoryCache::new()), "alice");
    assert_eq!(session.source(), PlanSource::Store);
    assert_eq!(session.plan().course_count(), 1);
    assert_eq!(session.view().totals.credits, 4);
}

#[test]
fn unreachable_store_falls_back_to_cache() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    {
        let mut session = start(store.clone(), cache.clone(), "alice");
        session.add_course("MATH 151", Term::Spring, 2025).expect("add");
    }

    store.set_fail_reads(true);
    let session = start(store, cache, "alice");
    assert_eq!(session.source(), PlanSource::LocalCache);
    assert_eq!(session.plan().courses()[0].code, "MATH 151");
}

#[test]
fn empty_store_result_falls_back_to_cache() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    let json = r#"[{"code": "CMSC 201", "name": "Computer Science I", "credits": 4, "term": "Fall", "year": 2024}]"#;
    cache.write(&cache_key(&alice()), json).expect("seed cache");
    store.save_plan(&alice(), &[]).expect("seed store");

    let session = start(store, cache, "alice");
    assert_eq!(session.source(), PlanSource::LocalCache);
    assert_eq!(session.view().semesters.len(), 1);
}

#[test]
fn nothing_saved_starts_empty() {
    let session = start(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCache::new()),
        "alice",
    );
    assert_eq!(session.source(), PlanSource::Empty);
    assert!(session.plan().is_empty());
}

#[test]
fn unreadable_cache_starts_empty() {
    let cache = Arc::new(MemoryCache::new());
    cache
        .write(&cache_key(&alice()), "not json")
        .expect("seed cache");
    let session = start(Arc::new(MemoryStore::new()), cache, "alice");
    assert_eq!(session.source(), PlanSource::Empty);
}

#[test]
fn plans_are_per_user() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    {
        let mut session = start(store.clone(), cache.clone(), "alice");
        session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    }

    let bob = start(store, cache, "bob");
    assert!(bob.plan().is_empty());
}

#[test]
fn failed_save_keeps_plan_and_reports_notice() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_writes(true);
    let cache = Arc::new(MemoryCache::new());
    let mut session = start(store.clone(), cache.clone(), "alice");

    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    session.flush();

    let notices = session.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_failure());
    assert_eq!(notices[0].revision, 1);
    assert_eq!(session.plan().course_count(), 1);

    // The local cache still has the change
    let cached = cache.read(&cache_key(&alice())).expect("read").expect("cached");
    assert!(cached.contains("CMSC 201"));

    store.set_fail_writes(false);
    session.retry_sync();
    session.flush();
    let notices = session.notices();
    assert_eq!(notices.len(), 1);
    assert!(!notices[0].is_failure());
    assert_eq!(store.saved(&alice()).map(|c| c.len()), Some(1));
}

#[test]
fn saves_arrive_in_order_with_last_write_winning() {
    let store = Arc::new(MemoryStore::new());
    let mut session = start(store.clone(), Arc::new(MemoryCache::new()), "alice");

    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    session.add_course("MATH 151", Term::Fall, 2024).expect("add");
    session.remove_course("CMSC 201");
    session.flush();

    let revisions: Vec<u64> = session.notices().iter().map(|n| n.revision).collect();
    assert_eq!(revisions, vec![1, 2, 3]);
    let saved = store.saved(&alice()).expect("saved");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].code, "MATH 151");
}

#[test]
fn clear_removes_cache_and_saves_empty_plan() {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    let mut session = start(store.clone(), cache.clone(), "alice");
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");

    session.clear(Confirmation::Confirmed).expect("clear");
    session.flush();

    assert!(cache.read(&cache_key(&alice())).expect("read").is_none());
    assert_eq!(store.saved(&alice()), Some(Vec::new()));
}

#[test]
fn sign_out_flushes_pending_saves() {
    let store = Arc::new(MemoryStore::new());
    let mut session = start(store.clone(), Arc::new(MemoryCache::new()), "alice");
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");

    let notices = session.sign_out();
    assert_eq!(notices.len(), 1);
    assert_eq!(store.saved(&alice()).map(|c| c.len()), Some(1));
}

#[test]
fn file_store_round_trips_across_sessions() {
    let dir = TempDir::new().expect("temp dir");
    let store: Arc<dyn PlanStore> = Arc::new(JsonFileStore::new(dir.path().join("plans")));
    let cache: Arc<dyn LocalCache> = Arc::new(FileCache::new(dir.path().join("cache")));
    {
        let mut session = start(store.clone(), cache.clone(), "alice");
        session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
        session.set_grade("CMSC 201", "3.7");
        session.flush();
    }

    let session = start(store, cache, "alice");
    assert_eq!(session.source(), PlanSource::Store);
    let course = session.plan().get("CMSC 201").expect("hydrated");
    assert!((course.gpa - 3.7).abs() < 1e-9);
    assert_eq!(course.semester_id().as_deref(), Some("fall2024"));
}

#[test]
fn file_cache_is_used_when_plans_dir_is_unusable() {
    let dir = TempDir::new().expect("temp dir");
    // A plain file where the plans directory should be makes every store call fail
    let blocked = dir.path().join("plans");
    std::fs::write(&blocked, "not a directory").expect("write");
    let store: Arc<dyn PlanStore> = Arc::new(JsonFileStore::new(&blocked));
    let cache: Arc<dyn LocalCache> = Arc::new(FileCache::new(dir.path().join("cache")));
    {
        let mut session = start(store.clone(), cache.clone(), "alice");
        session.add_course("MATH 151", Term::Fall, 2024).expect("add");
        session.flush();
        assert!(session.notices().iter().all(|n| n.is_failure()));
    }

    let session = start(store, cache, "alice");
    assert_eq!(session.source(), PlanSource::LocalCache);
    assert_eq!(session.plan().course_count(), 1);
}

#[test]
fn look_alike_user_ids_get_separate_plan_files() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("plans"));
    let at = UserId::new("bob@x").expect("user id");
    let underscore = UserId::new("bob_x").expect("user id");
    assert_ne!(store.path_for(&at), store.path_for(&underscore));

    let course = Course {
        code: "CMSC 201".to_string(),
        credits: 4,
        term: Some(Term::Fall),
        year: Some(2024),
        ..Course::default()
    };
    store.save_plan(&at, &[course]).expect("save");

    assert!(store.load_plan(&underscore).expect("load").is_none());
    let loaded = store.load_plan(&at).expect("load").expect("saved plan");
    assert_eq!(loaded[0].code, "CMSC 201");

    // Same shape for every non-ASCII character
    let e_acute = UserId::new("jos\u{e9}").expect("user id");
    let e_grave = UserId::new("jos\u{e8}").expect("user id");
    assert_ne!(store.path_for(&e_acute), store.path_for(&e_grave));
}

#[test]
fn file_cache_slots_do_not_collide_for_look_alike_users() {
    let dir = TempDir::new().expect("temp dir");
    let cache: Arc<dyn LocalCache> = Arc::new(FileCache::new(dir.path().join("cache")));
    {
        let mut session = start(Arc::new(MemoryStore::new()), cache.clone(), "bob@x");
        session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    }

    let other = start(Arc::new(MemoryStore::new()), cache.clone(), "bob_x");
    assert_eq!(other.source(), PlanSource::Empty);
    assert!(other.plan().is_empty());

    let owner = start(Arc::new(MemoryStore::new()), cache, "bob@x");
    assert_eq!(owner.source(), PlanSource::LocalCache);
    assert_eq!(owner.plan().course_count(), 1);
}

#[test]
fn hydrated_codes_are_normalized() {
    let store = Arc::new(MemoryStore::new());
    let stored = |code: &str| Course {
        code: code.to_string(),
        credits: 4,
        term: Some(Term::Fall),
        year: Some(2024),
        ..Course::default()
    };
    store
        .save_plan(&alice(), &[stored("cmsc 201"), stored("Math  151")])
        .expect("seed store");

    let mut session = start(store, Arc::new(MemoryCache::new()), "alice");
    assert_eq!(session.source(), PlanSource::Store);
    assert!(session.set_grade("MATH 151", "3.0"));
    assert!(session.add_course("CMSC 201", Term::Spring, 2025).is_err());

    let removed = session.remove_course("cmsc 201").expect("was planned");
    assert_eq!(removed.code, "CMSC 201");
    session.add_course("CMSC 201", Term::Spring, 2025).expect("re-add");

    let codes: Vec<&str> = session.plan().courses().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["MATH 151", "CMSC 201"]);
}
