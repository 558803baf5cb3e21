use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// The address is kept exactly as given: surrounding whitespace makes it invalid.
    pub fn parse(email: String) -> Result<EmailAddress, String> {
        if !validate_email(&email) {
            return Err(String::from("Invalid email address"));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
