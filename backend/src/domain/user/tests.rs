//! Tests for the user entity and value types.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn new_user() -> NewUser {
    NewUser {
        name: FullName::from_validated("Ada Lovelace"),
        email: EmailAddress::from_validated("Ada@Example.com"),
        age: Age::from_validated(36),
    }
}

#[rstest]
fn user_id_parses_canonical_uuid() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("", UserIdError::Empty)]
#[case("not-a-uuid", UserIdError::Invalid)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", UserIdError::Invalid)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserIdError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn random_user_ids_differ() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
fn email_address_is_lower_cased() {
    let email = EmailAddress::from_validated("Ana.Rodriguez@Ejemplo.COM");
    assert_eq!(email.as_ref(), "ana.rodriguez@ejemplo.com");
}

#[rstest]
fn full_name_keeps_accented_letters() {
    let name = FullName::from_validated("Ana María Rodríguez López");
    assert_eq!(String::from(name), "Ana María Rodríguez López");
}

#[rstest]
fn user_record_keeps_constructor_values(new_user: NewUser) {
    let id = UserId::new(VALID_ID).expect("valid id");
    let registered_at = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    let record = UserRecord::new(id.clone(), new_user, registered_at);

    assert_eq!(record.id(), &id);
    assert_eq!(record.name().as_ref(), "Ada Lovelace");
    assert_eq!(record.email().as_ref(), "ada@example.com");
    assert_eq!(record.age().years(), 36);
    assert_eq!(record.registered_at(), registered_at);
}
