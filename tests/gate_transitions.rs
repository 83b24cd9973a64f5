use proptest::prelude::*;
use recordbookd::dataset::PasswordTable;
use recordbookd::gate::{authenticate, select, AuthOutcome, AuthState};
use std::collections::HashMap;

fn table(entries: &[(&str, &str)]) -> PasswordTable {
    PasswordTable::new(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

fn authed(c: &str) -> AuthState {
    AuthState::AuthenticatedFor(c.to_string())
}

#[test]
fn correct_password_authenticates_selected_class() {
    let pw = table(&[("2-6", "pw1")]);
    let (state, outcome) = authenticate("2-6", Some("pw1"), &pw, AuthState::Unauthenticated);
    assert_eq!(outcome, AuthOutcome::Success);
    assert_eq!(state, authed("2-6"));
}

#[test]
fn wrong_password_fails_and_clears_state() {
    let pw = table(&[("2-6", "pw1")]);
    let (state, outcome) = authenticate("2-6", Some("wrong"), &pw, authed("2-6"));
    assert_eq!(outcome, AuthOutcome::Failure);
    assert_eq!(state, AuthState::Unauthenticated);
}

#[test]
fn no_check_reports_existing_authentication() {
    let pw = table(&[("2-6", "pw1")]);
    let (state, outcome) = authenticate("2-6", None, &pw, authed("2-6"));
    assert_eq!(outcome, AuthOutcome::AlreadyAuthenticated);
    assert_eq!(state, authed("2-6"));

    let (state, outcome) = authenticate("2-6", None, &pw, AuthState::Unauthenticated);
    assert_eq!(outcome, AuthOutcome::NotAuthenticated);
    assert_eq!(state, AuthState::Unauthenticated);
}

#[test]
fn switching_class_forfeits_authentication() {
    let pw = table(&[("2-6", "pw1"), ("2-7", "pw2")]);
    let (state, outcome) = authenticate("2-7", None, &pw, authed("2-6"));
    assert_eq!(outcome, AuthOutcome::NotAuthenticated);
    assert_eq!(state, AuthState::Unauthenticated);

    assert_eq!(select(authed("2-6"), "2-6"), authed("2-6"));
    assert_eq!(select(authed("2-6"), "2-7"), AuthState::Unauthenticated);
}

#[test]
fn empty_configured_password_never_authenticates() {
    let pw = table(&[("2-6", "")]);
    let (state, outcome) = authenticate("2-6", Some(""), &pw, AuthState::Unauthenticated);
    assert_eq!(outcome, AuthOutcome::Failure);
    assert_eq!(state, AuthState::Unauthenticated);

    // Absent from the table behaves the same.
    let (_, outcome) = authenticate("3-1", Some(""), &pw, AuthState::Unauthenticated);
    assert_eq!(outcome, AuthOutcome::Failure);
}

#[test]
fn outcome_messages() {
    assert!(AuthOutcome::Success.granted());
    assert!(AuthOutcome::AlreadyAuthenticated.granted());
    assert!(!AuthOutcome::Failure.granted());
    assert_eq!(
        AuthOutcome::NotAuthenticated.message("2-6"),
        "select a class and submit its password first"
    );
    assert!(AuthOutcome::Success.message("2-6").contains("2-6"));
}

proptest! {
    #[test]
    fn repeated_failures_stay_unauthenticated(attempts in prop::collection::vec("[a-z0-9]{0,8}", 1..20)) {
        let pw = table(&[("2-6", "Secret-Pass")]);
        let mut state = AuthState::Unauthenticated;
        for a in &attempts {
            let (next, outcome) = authenticate("2-6", Some(a.as_str()), &pw, state);
            prop_assert_eq!(outcome, AuthOutcome::Failure);
            state = next;
        }
        prop_assert_eq!(state, AuthState::Unauthenticated);
    }

    #[test]
    fn empty_password_class_is_locked_for_any_submission(submitted in ".{0,30}") {
        let pw = table(&[("2-6", "")]);
        let (state, outcome) = authenticate("2-6", Some(submitted.as_str()), &pw, AuthState::Unauthenticated);
        prop_assert_eq!(outcome, AuthOutcome::Failure);
        prop_assert_eq!(state, AuthState::Unauthenticated);
    }

    #[test]
    fn class_switch_always_clears(room_a in 1i64..20, room_b in 1i64..20, check in any::<bool>()) {
        prop_assume!(room_a != room_b);
        let a = format!("2-{room_a}");
        let b = format!("2-{room_b}");
        let pw = table(&[(a.as_str(), "pa"), (b.as_str(), "pb")]);
        let submitted = if check { Some("pa") } else { None };
        let (state, _) = authenticate(&b, submitted, &pw, authed(&a));
        prop_assert_eq!(state, AuthState::Unauthenticated);
    }
}
