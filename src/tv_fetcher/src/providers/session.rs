//! Session acquisition: restore a cached session, or log in with credentials.

use log::{debug, info, warn};
use secrecy::SecretString;

use crate::providers::{
    DataProvider, NoCredentialsSnafu, ProviderInitError, SessionUnavailableSnafu,
};

/// Username/password pair for a TradingView account.
///
/// The password stays wrapped in a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Builds credentials only when both halves are present.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) => {
                Some(Self::new(username, SecretString::new(password.into())))
            }
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Produces an authenticated [`DataProvider`].
///
/// Implementations expose the two ways a client can be created; the ordering
/// and fallback between them lives in [`connect`].
pub trait SessionConnector {
    /// Creates a client from a previously cached session.
    fn restore_session(&self) -> Result<Box<dyn DataProvider>, ProviderInitError>;

    /// Creates a client by logging in, caching the session for later runs.
    fn login(&self, credentials: &Credentials) -> Result<Box<dyn DataProvider>, ProviderInitError>;
}

/// Opens a session: cached session first, credential login second.
///
/// There is exactly one fallback attempt. When both paths fail the returned
/// error carries both causes.
pub fn connect(
    connector: &dyn SessionConnector,
    credentials: Option<&Credentials>,
) -> Result<Box<dyn DataProvider>, ProviderInitError> {
    let restore_err = match connector.restore_session() {
        Ok(provider) => {
            debug!("Restored cached TradingView session");
            return Ok(provider);
        }
        Err(e) => e,
    };

    let Some(credentials) = credentials else {
        warn!("{restore_err}; no credentials configured");
        return NoCredentialsSnafu {
            restore: restore_err.to_string(),
        }
        .fail();
    };

    warn!("{restore_err}; logging in as {}", credentials.username());
    match connector.login(credentials) {
        Ok(provider) => {
            info!("Logged in to TradingView as {}", credentials.username());
            Ok(provider)
        }
        Err(login_err) => SessionUnavailableSnafu {
            restore: restore_err.to_string(),
            login: login_err.to_string(),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::providers::testing::ScriptedConnector;

    fn creds() -> Credentials {
        Credentials::new("alice", SecretString::new("hunter2".into()))
    }

    #[test]
    fn test_restored_session_skips_login() {
        let connector = ScriptedConnector::new(true, true, None);
        assert!(connect(&connector, Some(&creds())).is_ok());
        assert_eq!(connector.restore_calls.get(), 1);
        assert_eq!(connector.login_calls.get(), 0);
    }

    #[test]
    fn test_falls_back_to_login_once() {
        let connector = ScriptedConnector::new(false, true, None);
        assert!(connect(&connector, Some(&creds())).is_ok());
        assert_eq!(connector.restore_calls.get(), 1);
        assert_eq!(connector.login_calls.get(), 1);
    }

    #[test]
    fn test_both_paths_failing_reports_both_causes() {
        let connector = ScriptedConnector::new(false, false, None);
        let err = connect(&connector, Some(&creds())).err().unwrap();

        assert!(matches!(err, ProviderInitError::SessionUnavailable { .. }));
        let message = err.to_string();
        assert!(message.contains("no cached token"), "{message}");
        assert!(message.contains("invalid password"), "{message}");
        assert_eq!(connector.login_calls.get(), 1);
    }

    #[test]
    fn test_missing_credentials_after_failed_restore() {
        let connector = ScriptedConnector::new(false, true, None);
        let err = connect(&connector, None).err().unwrap();

        assert!(matches!(err, ProviderInitError::NoCredentials { .. }));
        assert!(err.to_string().contains("TV_USERNAME"));
        assert_eq!(connector.login_calls.get(), 0);
    }

    #[test]
    fn test_credentials_need_both_parts() {
        assert!(Credentials::from_parts(Some("alice".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("pw".into())).is_none());

        let creds = Credentials::from_parts(Some("alice".into()), Some("pw".into())).unwrap();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password().expose_secret(), "pw");
        assert!(!format!("{creds:?}").contains("\"pw\""));
    }
}
