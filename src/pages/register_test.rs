use super::*;

#[test]
fn validate_register_input_accepts_valid_form() {
    let form = validate_register_input(" amy ", " amy@example.com ", "password1", "  ").expect("valid");
    assert_eq!(form.username, "amy");
    assert_eq!(form.email, "amy@example.com");
    assert_eq!(form.bio, None);
}

#[test]
fn validate_register_input_keeps_bio() {
    let form = validate_register_input("amy", "amy@example.com", "password1", " hi ").expect("valid");
    assert_eq!(form.bio.as_deref(), Some("hi"));
}

#[test]
fn validate_register_input_username_bounds() {
    assert_eq!(
        validate_register_input("ab", "amy@example.com", "password1", ""),
        Err("Username must be 3-50 characters.")
    );
    assert!(validate_register_input(&"a".repeat(51), "amy@example.com", "password1", "").is_err());
    assert!(validate_register_input(&"a".repeat(50), "amy@example.com", "password1", "").is_ok());
}

#[test]
fn validate_register_input_rejects_bad_email() {
    for email in ["", "amy", "@example.com", "amy@localhost", "amy@.com"] {
        assert_eq!(
            validate_register_input("amy", email, "password1", ""),
            Err("Enter a valid email address."),
            "{email}"
        );
    }
}

#[test]
fn validate_register_input_password_bounds() {
    assert_eq!(
        validate_register_input("amy", "amy@example.com", "1234567", ""),
        Err("Password must be 8-100 characters.")
    );
}
