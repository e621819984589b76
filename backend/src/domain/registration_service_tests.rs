//! Tests for the registration service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::always;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRegistry;

fn make_service(registry: MockUserRegistry) -> RegistrationService<MockUserRegistry> {
    RegistrationService::new(Arc::new(registry), ValidationPolicy::default())
}

fn request(name: &str, email: &str, age: i64) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        age,
    }
}

fn stamp(user: crate::domain::NewUser) -> UserRecord {
    let registered_at = Utc
        .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    UserRecord::new(UserId::random(), user, registered_at)
}

#[tokio::test]
async fn register_stores_normalised_user() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_insert()
        .withf(|user| {
            user.name.as_ref() == "Ana María Rodríguez López"
                && user.email.as_ref() == "ana.rodriguez@ejemplo.com"
                && user.age.years() == 29
        })
        .times(1)
        .returning(|user| Ok(stamp(user)));

    let record = make_service(registry)
        .register(request(
            " Ana María Rodríguez López ",
            "Ana.Rodriguez@Ejemplo.com",
            29,
        ))
        .await
        .expect("registration succeeds");

    assert_eq!(record.email().as_ref(), "ana.rodriguez@ejemplo.com");
}

#[rstest]
#[case(request("Juan", "juan@ejemplo.com", 25), "INSUFFICIENT_NAME_PARTS", "name")]
#[case(request("Elena Torres", "elena@10minutemail.com", 32), "DISPOSABLE_EMAIL_DOMAIN", "email")]
#[case(request("Pedro Sánchez", "pedro@ejemplo.com", 12), "AGE_TOO_LOW", "age")]
#[case(request("Pedro Sánchez", "email_invalido", 30), "INVALID_EMAIL_FORMAT", "email")]
#[tokio::test]
async fn register_rejects_without_touching_registry(
    #[case] submission: RegistrationRequest,
    #[case] reason: &str,
    #[case] field: &str,
) {
    let mut registry = MockUserRegistry::new();
    registry.expect_insert().never();

    let error = make_service(registry)
        .register(submission)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.reason(), reason);
    assert_eq!(error.field(), Some(field));
}

#[tokio::test]
async fn register_attaches_rule_bounds_as_details() {
    let mut registry = MockUserRegistry::new();
    registry.expect_insert().never();

    let error = make_service(registry)
        .register(request("Pedro Sánchez", "pedro@ejemplo.com", 125))
        .await
        .expect_err("too old");

    assert_eq!(error.reason(), "AGE_TOO_HIGH");
    let details = error.details().expect("details present");
    assert_eq!(details["max"], 120);
    assert_eq!(details["age"], 125);
}

#[tokio::test]
async fn register_maps_duplicate_email_to_conflict() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_insert()
        .times(1)
        .returning(|user| Err(UserRegistryError::duplicate(&user.email)));

    let error = make_service(registry)
        .register(request("Luis Gómez", "luis@ejemplo.com", 40))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.reason(), "DUPLICATE_EMAIL");
    assert_eq!(error.field(), Some("email"));
}

#[tokio::test]
async fn register_maps_unavailable_registry_to_internal_error() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_insert()
        .times(1)
        .returning(|_| Err(UserRegistryError::unavailable("lock poisoned")));

    let error = make_service(registry)
        .register(request("Luis Gómez", "luis@ejemplo.com", 40))
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.reason(), "INTERNAL_ERROR");
}

#[tokio::test]
async fn find_user_maps_missing_record_to_not_found() {
    let id = UserId::random();
    let mut registry = MockUserRegistry::new();
    registry
        .expect_get()
        .with(always())
        .times(1)
        .returning(|id| Err(UserRegistryError::not_found(id.to_string())));

    let error = make_service(registry)
        .find_user(&id)
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.reason(), "USER_NOT_FOUND");
    let details = error.details().expect("details present");
    assert_eq!(details["id"], id.to_string());
}

#[tokio::test]
async fn list_users_returns_registry_order() {
    let first = stamp(
        validate_registration(
            &request("Ana López", "ana@ejemplo.com", 20),
            &ValidationPolicy::default(),
        )
        .expect("valid"),
    );
    let second = stamp(
        validate_registration(
            &request("Luis Gómez", "luis@ejemplo.com", 40),
            &ValidationPolicy::default(),
        )
        .expect("valid"),
    );
    let expected = vec![first.clone(), second.clone()];

    let mut registry = MockUserRegistry::new();
    registry
        .expect_list_all()
        .times(1)
        .return_once(move || Ok(vec![first, second]));

    let users = make_service(registry).list_users().await.expect("list");
    assert_eq!(users, expected);
}
