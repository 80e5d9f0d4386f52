// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for registration, login, and token resolution.

use crate::auth::{AuthenticationService, Role};
use crate::error::ApiError;
use crate::handlers::{login, logout, register_user, whoami};
use crate::request_response::{LoginRequest, RegisterUserRequest};
use crate::tests::helpers::{
    ADMIN_PASSWORD, USER_PASSWORD, register_admin, register_member, test_now,
};
use roombook_persistence::Persistence;
use time::Duration;

fn login_request(login_name: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login_name: login_name.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_first_registered_account_is_admin() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let admin = register_admin(&mut persistence);
    assert_eq!(admin.role, Role::Admin);

    let member = register_member(&mut persistence, "alice");
    assert_eq!(member.role, Role::User);
}

#[test]
fn test_register_rejects_weak_password() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let err = register_user(
        &mut persistence,
        RegisterUserRequest {
            login_name: String::from("alice"),
            display_name: String::from("Alice"),
            password: String::from("weak"),
            confirmation: String::from("weak"),
            company: None,
        },
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::PasswordPolicyViolation { .. }));
}

#[test]
fn test_register_rejects_duplicate_login() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);
    register_member(&mut persistence, "alice");

    let err = register_user(
        &mut persistence,
        RegisterUserRequest {
            login_name: String::from("alice"),
            display_name: String::from("Second Alice"),
            password: USER_PASSWORD.to_string(),
            confirmation: USER_PASSWORD.to_string(),
            company: None,
        },
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_login_and_token_resolution() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);
    let member = register_member(&mut persistence, "alice");

    let service = AuthenticationService::new(60);
    let response = login(
        &mut persistence,
        &service,
        login_request("alice", USER_PASSWORD),
        test_now(),
    )
    .unwrap();
    assert_eq!(response.user.login_name, "alice");

    let actor = service
        .authenticate(&mut persistence, &response.token, test_now())
        .unwrap();
    assert_eq!(actor.user_id, member.user_id);
    assert_eq!(actor.role, Role::User);
    assert_eq!(actor.company.as_deref(), Some("Acme"));

    let who = whoami(&mut persistence, &actor).unwrap();
    assert_eq!(who.user.login_name, "alice");
}

#[test]
fn test_login_with_wrong_password_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);

    let service = AuthenticationService::new(60);
    let err = login(
        &mut persistence,
        &service,
        login_request("admin", "not-the-password"),
        test_now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_expired_token_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);

    let service = AuthenticationService::new(60);
    let response = login(
        &mut persistence,
        &service,
        login_request("admin", ADMIN_PASSWORD),
        test_now(),
    )
    .unwrap();

    let later = test_now() + Duration::minutes(61);
    let err = service
        .authenticate(&mut persistence, &response.token, later)
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_logout_invalidates_token() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);

    let service = AuthenticationService::new(60);
    let response = login(
        &mut persistence,
        &service,
        login_request("admin", ADMIN_PASSWORD),
        test_now(),
    )
    .unwrap();

    logout(&mut persistence, &response.token).unwrap();
    let err = service
        .authenticate(&mut persistence, &response.token, test_now())
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_unknown_token_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    register_admin(&mut persistence);

    let service = AuthenticationService::default();
    let err = service
        .authenticate(&mut persistence, "no-such-token", test_now())
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
}
