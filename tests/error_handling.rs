use repo_badge_server::error::{BadgeServerError, Result};
use std::error::Error;

#[test]
fn test_error_display() {
    let error = BadgeServerError::MissingParam(vec!["username", "repo"]);
    assert_eq!(
        format!("{}", error),
        "Missing params \"username\", \"repo\" make sure you pass the parameters in URL"
    );

    let error = BadgeServerError::transport(Some(502), "bad gateway");
    assert_eq!(format!("{}", error), "GitHub API request failed (status 502): bad gateway");

    let error = BadgeServerError::transport(None, "connection refused");
    assert_eq!(format!("{}", error), "GitHub API request failed (no status): connection refused");

    let error = BadgeServerError::Timeout(8000);
    assert_eq!(format!("{}", error), "GitHub API timeout after 8000ms");

    let error = BadgeServerError::repository_fetch("User Repository Not found");
    assert_eq!(format!("{}", error), "User Repository Not found");
}

#[test]
fn test_error_source() {
    let error = BadgeServerError::Timeout(8000);
    assert!(error.source().is_none());

    let error = BadgeServerError::RetryExhausted {
        attempts: 3,
        source: Box::new(BadgeServerError::transport(Some(500), "boom")),
    };
    let source = error.source().expect("exhaustion keeps the last failure");
    assert_eq!(source.to_string(), "GitHub API request failed (status 500): boom");
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
    let error: BadgeServerError = io_error.into();
    assert!(matches!(error, BadgeServerError::IoError(_)));

    let error: BadgeServerError = url::Url::parse("not a url").unwrap_err().into();
    assert!(matches!(error, BadgeServerError::InvalidUrl(_)));
}

#[test]
fn test_transient_classification() {
    assert!(BadgeServerError::transport(None, "reset").is_transient());
    assert!(BadgeServerError::transport(Some(500), "").is_transient());
    assert!(BadgeServerError::transport(Some(503), "").is_transient());
    assert!(BadgeServerError::transport(Some(429), "").is_transient());
    assert!(BadgeServerError::transport(Some(408), "").is_transient());

    assert!(!BadgeServerError::transport(Some(401), "").is_transient());
    assert!(!BadgeServerError::transport(Some(404), "").is_transient());
    assert!(!BadgeServerError::GraphQl("bad query".to_string()).is_transient());
    assert!(!BadgeServerError::Timeout(8000).is_transient());
    assert!(!BadgeServerError::Credential.is_transient());
}

#[test]
fn test_public_messages_distinguish_timeout_from_api_failure() {
    let timeout = BadgeServerError::Timeout(8000).public_message();
    let exhausted = BadgeServerError::RetryExhausted {
        attempts: 3,
        source: Box::new(BadgeServerError::transport(Some(500), "stack trace here")),
    }
    .public_message();

    assert_eq!(timeout, "Failed to fetch repo (GitHub API timeout)");
    assert_eq!(exhausted, "Failed to fetch repo (GitHub API error)");
    assert!(!exhausted.contains("stack trace"));
    assert_eq!(
        BadgeServerError::transport(Some(401), "Bad credentials").public_message(),
        "Failed to fetch repo (GitHub API error)"
    );
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");

    fn returns_error() -> Result<String> {
        Err(BadgeServerError::Credential)
    }

    let result = returns_error();
    assert!(result.is_err());
}
