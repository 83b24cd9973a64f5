use recordbookd::dataset::{Dataset, RecordBody, StudentRecord};
use recordbookd::gate::{AuthOutcome, AuthState};
use recordbookd::session::{SessionError, SessionRegistry};
use std::collections::HashMap;

fn dataset() -> Dataset {
    let kim = StudentRecord {
        number: 1,
        name: "Kim".into(),
        student_id: "20601".into(),
        remark: String::new(),
        record: RecordBody {
            content: "abc".into(),
            length: 3,
        },
    };
    let rosters = HashMap::from([
        ("2-6".to_string(), vec![kim]),
        ("2-10".to_string(), vec![]),
        ("2-7".to_string(), vec![]),
    ]);
    let passwords = HashMap::from([
        ("2-6".to_string(), "pw1".to_string()),
        ("2-10".to_string(), "pw10".to_string()),
    ]);
    Dataset::from_parts(rosters, passwords).expect("dataset")
}

#[test]
fn open_prefers_known_class_else_first_sorted() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();

    let s = reg.open(&ds, Some("2-10"));
    assert_eq!(s.selected_class(), Some("2-10"));
    assert!(!s.is_authenticated());

    let s = reg.open(&ds, Some("9-9"));
    assert_eq!(s.selected_class(), Some("2-6"));

    let s = reg.open(&ds, None);
    assert_eq!(s.selected_class(), Some("2-6"));
    assert_eq!(reg.len(), 3);
}

#[test]
fn open_on_empty_dataset_has_no_selection() {
    let ds = Dataset::from_parts(HashMap::new(), HashMap::new()).expect("dataset");
    let mut reg = SessionRegistry::new();
    let id = reg.open(&ds, Some("2-6")).id().to_string();

    let s = reg.get_mut(&id).expect("session");
    assert_eq!(s.selected_class(), None);
    assert_eq!(s.status(&ds), AuthOutcome::NotAuthenticated);
    assert!(matches!(
        s.authenticate(&ds, "pw"),
        Err(SessionError::NoClassSelected)
    ));
}

#[test]
fn authenticate_then_switch_class_clears() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();
    let id = reg.open(&ds, Some("2-6")).id().to_string();
    let s = reg.get_mut(&id).expect("session");

    assert_eq!(s.authenticate(&ds, "wrong").expect("auth"), AuthOutcome::Failure);
    assert!(matches!(
        s.authorized_roster(&ds),
        Err(SessionError::NotAuthenticated)
    ));

    assert_eq!(s.authenticate(&ds, "pw1").expect("auth"), AuthOutcome::Success);
    assert_eq!(s.status(&ds), AuthOutcome::AlreadyAuthenticated);
    let (class_id, roster) = s.authorized_roster(&ds).expect("roster");
    assert_eq!(class_id, "2-6");
    assert_eq!(roster.len(), 1);

    s.select(&ds, "2-6").expect("reselect same class");
    assert!(s.is_authenticated());

    s.select(&ds, "2-10").expect("select");
    assert_eq!(s.auth(), &AuthState::Unauthenticated);
    s.select(&ds, "2-6").expect("select back");
    assert!(!s.is_authenticated());
}

#[test]
fn unknown_class_selection_keeps_state() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();
    let id = reg.open(&ds, Some("2-6")).id().to_string();
    let s = reg.get_mut(&id).expect("session");
    s.authenticate(&ds, "pw1").expect("auth");

    let e = s.select(&ds, "8-8").expect_err("unknown class");
    assert_eq!(e.code(), "not_found");
    assert!(s.is_authenticated());
}

#[test]
fn overlong_password_is_rejected_without_touching_state() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();
    let id = reg.open(&ds, Some("2-6")).id().to_string();
    let s = reg.get_mut(&id).expect("session");
    s.authenticate(&ds, "pw1").expect("auth");

    let e = s.authenticate(&ds, &"x".repeat(31)).expect_err("too long");
    assert_eq!(e.code(), "bad_params");
    assert!(s.is_authenticated());
}

#[test]
fn sessions_are_independent() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();
    let a = reg.open(&ds, Some("2-6")).id().to_string();
    let b = reg.open(&ds, Some("2-6")).id().to_string();

    reg.get_mut(&a).expect("a").authenticate(&ds, "pw1").expect("auth");
    assert!(reg.get(&a).expect("a").is_authenticated());
    assert!(!reg.get(&b).expect("b").is_authenticated());

    assert!(reg.close(&a));
    assert!(!reg.close(&a));
    assert!(matches!(reg.get(&a), Err(SessionError::UnknownSession(_))));
    assert!(matches!(reg.get("not-a-uuid"), Err(SessionError::UnknownSession(_))));
    assert_eq!(reg.len(), 1);
}

#[test]
fn locked_class_cannot_be_opened_even_with_empty_password() {
    let ds = dataset();
    let mut reg = SessionRegistry::new();
    let id = reg.open(&ds, Some("2-7")).id().to_string();
    let s = reg.get_mut(&id).expect("session");
    assert_eq!(s.authenticate(&ds, "").expect("auth"), AuthOutcome::Failure);
    assert!(!s.is_authenticated());
}
