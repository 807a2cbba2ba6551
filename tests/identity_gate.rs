// SPDX-License-Identifier: MPL-2.0
use eco_waste::application::port::IdentityVerifier;
use eco_waste::domain::identity::{
    sanitize_digits, CredentialError, Identifier, OneTimeCode, Role, CODE_LEN, IDENTIFIER_LEN,
};
use eco_waste::infrastructure::SimulatedIdentityService;
use std::time::Duration;

#[test]
fn formatted_identifier_is_accepted() {
    let id = Identifier::parse("1234 5678-9012").expect("twelve digits");
    assert_eq!(id.as_str(), "123456789012");
    assert_eq!(id.masked(), "XXXX XXXX 9012");
    assert!(!format!("{id:?}").contains("12345678"));
}

#[test]
fn short_identifier_reports_digit_count() {
    assert_eq!(
        Identifier::parse("12345"),
        Err(CredentialError::IdentifierLength { actual: 5 })
    );
}

#[test]
fn input_is_capped_at_field_length() {
    assert_eq!(sanitize_digits("1234567890123456", IDENTIFIER_LEN).len(), IDENTIFIER_LEN);
    assert_eq!(sanitize_digits("12a34b56c78", CODE_LEN), "123456");
}

#[test]
fn code_must_have_six_digits() {
    assert!(OneTimeCode::parse("123456").is_ok());
    assert_eq!(
        OneTimeCode::parse("12345"),
        Err(CredentialError::CodeLength { actual: 5 })
    );
}

#[test]
fn simulated_service_completes_login() {
    let service = SimulatedIdentityService::new(Duration::from_secs(300));
    let id = Identifier::parse("987654321098").expect("valid identifier");

    let dispatch = service.request_code(&id).expect("code sent");
    assert_eq!(dispatch.valid_minutes(), 5);

    let code = OneTimeCode::parse("424242").expect("valid code");
    assert!(service.verify_code(&id, &code).is_ok());
}

#[test]
fn roles_round_trip_through_session_value() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
    assert!("admin".parse::<Role>().is_err());
    assert!(Role::Employee.can_edit_site());
    assert!(!Role::Collector.can_edit_site());
}
