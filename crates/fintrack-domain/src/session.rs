//! The authenticated session value threaded into every store call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            display_name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name used to greet the user: profile name, else the e-mail local part.
    pub fn greeting_name(&self) -> &str {
        let profile = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        if let Some(name) = profile {
            return name;
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("there")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_prefers_display_name() {
        let session = Session::new(Uuid::new_v4())
            .with_email("ana@example.com")
            .with_display_name("Ana Maria");
        assert_eq!(session.greeting_name(), "Ana Maria");
    }

    #[test]
    fn greeting_falls_back_to_email_local_part() {
        let session = Session::new(Uuid::new_v4()).with_email("ana@example.com");
        assert_eq!(session.greeting_name(), "ana");
        assert_eq!(Session::new(Uuid::new_v4()).greeting_name(), "there");
    }
}
