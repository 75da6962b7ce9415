use notevault_core::{
    Argon2CredentialHasher, DbError, DeleteOutcome, Identity, NoteServiceError, NoteVault,
    RepoError, RequestContext, SessionStore, Store, ValidationError,
};
use rusqlite::params;
use std::time::{Duration, Instant};

fn vault() -> NoteVault {
    NoteVault::from_parts(
        Store::open_in_memory().unwrap(),
        SessionStore::new(Duration::from_secs(3600)),
        Argon2CredentialHasher::with_cost(64, 1, 1).unwrap(),
    )
}

fn sign_in(vault: &NoteVault, username: &str) -> Identity {
    let ctx = RequestContext::background();
    let auth = vault.auth();
    auth.register(&ctx, username, "pw").unwrap();
    let token = auth.login(&ctx, username, "pw").unwrap();
    auth.authenticate(Some(token.as_str())).unwrap()
}

fn note_count(vault: &NoteVault) -> i64 {
    vault
        .store()
        .with_conn(&RequestContext::background(), |conn| {
            conn.query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
                .map_err(DbError::from)
        })
        .unwrap()
}

#[test]
fn notes_of_one_owner_are_invisible_to_another() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let bob = sign_in(&vault, "bob");
    let notes = vault.notes();

    let alice_note = notes.create_note(&ctx, &alice, "alice only").unwrap();

    let bob_list = notes.list_notes(&ctx, &bob).unwrap();
    assert!(bob_list.is_empty());

    let alice_list = notes.list_notes(&ctx, &alice).unwrap();
    assert_eq!(alice_list.len(), 1);
    assert_eq!(alice_list[0].id, alice_note);
    assert_eq!(alice_list[0].owner_id, alice.user_id());
    assert_eq!(alice_list[0].content, "alice only");
}

#[test]
fn deleting_foreign_note_is_noop_and_leaves_it_intact() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let bob = sign_in(&vault, "bob");
    let notes = vault.notes();

    let alice_note = notes.create_note(&ctx, &alice, "keep me").unwrap();

    let outcome = notes.delete_note(&ctx, &bob, alice_note).unwrap();
    assert_eq!(outcome, DeleteOutcome::NoOp);
    assert_eq!(notes.list_notes(&ctx, &alice).unwrap().len(), 1);

    let outcome = notes.delete_note(&ctx, &alice, alice_note).unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(notes.list_notes(&ctx, &alice).unwrap().is_empty());
}

#[test]
fn deleting_missing_or_already_deleted_note_is_noop() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();

    assert_eq!(
        notes.delete_note(&ctx, &alice, 9_999).unwrap(),
        DeleteOutcome::NoOp
    );

    let id = notes.create_note(&ctx, &alice, "once").unwrap();
    assert_eq!(
        notes.delete_note(&ctx, &alice, id).unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        notes.delete_note(&ctx, &alice, id).unwrap(),
        DeleteOutcome::NoOp
    );
}

#[test]
fn list_is_newest_first_even_within_one_clock_tick() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();

    let n1 = notes.create_note(&ctx, &alice, "N1").unwrap();
    let n2 = notes.create_note(&ctx, &alice, "N2").unwrap();
    let n3 = notes.create_note(&ctx, &alice, "N3").unwrap();

    let ids: Vec<_> = notes
        .list_notes(&ctx, &alice)
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![n3, n2, n1]);
}

#[test]
fn list_orders_by_created_at_before_id() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();

    let older_id_newer_time = notes.create_note(&ctx, &alice, "first insert").unwrap();
    let newer_id_older_time = notes.create_note(&ctx, &alice, "second insert").unwrap();

    vault
        .store()
        .with_conn(&ctx, |conn| {
            conn.execute(
                "UPDATE notes SET created_at = ?2 WHERE id = ?1;",
                params![older_id_newer_time, 2_000_i64],
            )?;
            conn.execute(
                "UPDATE notes SET created_at = ?2 WHERE id = ?1;",
                params![newer_id_older_time, 1_000_i64],
            )
            .map_err(DbError::from)
        })
        .unwrap();

    let listed = notes.list_notes(&ctx, &alice).unwrap();
    assert_eq!(listed[0].id, older_id_newer_time);
    assert_eq!(listed[1].id, newer_id_older_time);
}

#[test]
fn empty_content_is_rejected_without_insert() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();

    for content in ["", "   ", "\n\t"] {
        let err = notes.create_note(&ctx, &alice, content).unwrap_err();
        assert!(matches!(
            err,
            NoteServiceError::Validation(ValidationError::EmptyNoteContent)
        ));
    }
    assert_eq!(note_count(&vault), 0);
}

#[test]
fn owner_with_no_notes_gets_empty_list() {
    let vault = vault();
    let alice = sign_in(&vault, "alice");
    let listed = vault
        .notes()
        .list_notes(&RequestContext::background(), &alice)
        .unwrap();
    assert!(listed.is_empty());
}

#[test]
fn removing_user_cascades_to_notes() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let bob = sign_in(&vault, "bob");
    let notes = vault.notes();
    notes.create_note(&ctx, &alice, "a1").unwrap();
    notes.create_note(&ctx, &alice, "a2").unwrap();
    notes.create_note(&ctx, &bob, "b1").unwrap();

    vault
        .store()
        .with_conn(&ctx, |conn| {
            conn.execute("DELETE FROM users WHERE id = ?1;", [alice.user_id()])
                .map_err(DbError::from)
        })
        .unwrap();

    assert_eq!(note_count(&vault), 1);
    assert!(notes.list_notes(&ctx, &alice).unwrap().is_empty());
    assert_eq!(notes.list_notes(&ctx, &bob).unwrap().len(), 1);
}

#[test]
fn expired_deadline_never_reaches_the_store() {
    let vault = vault();
    let alice = sign_in(&vault, "alice");
    let expired = RequestContext::with_deadline(Instant::now());

    let err = vault
        .notes()
        .create_note(&expired, &alice, "late")
        .unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Storage(RepoError::Db(DbError::DeadlineExceeded))
    ));
    assert_eq!(err.public_message(), "internal error, please retry later");
    assert_eq!(note_count(&vault), 0);
}

#[test]
fn content_with_sql_metacharacters_is_stored_verbatim() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();
    let payload = "'); DROP TABLE notes; --";

    notes.create_note(&ctx, &alice, payload).unwrap();

    let listed = notes.list_notes(&ctx, &alice).unwrap();
    assert_eq!(listed[0].content, payload);
}

#[test]
fn note_serializes_for_presentation_layer() {
    let vault = vault();
    let ctx = RequestContext::background();
    let alice = sign_in(&vault, "alice");
    let notes = vault.notes();
    notes.create_note(&ctx, &alice, "render me").unwrap();

    let listed = notes.list_notes(&ctx, &alice).unwrap();
    let json = serde_json::to_value(&listed[0]).unwrap();
    assert_eq!(json["content"], "render me");
    assert_eq!(json["owner_id"], alice.user_id());
}
