/// Free text that must contain at least one character.
///
/// Used for the contact name and the project description. The value is kept
/// exactly as submitted: whitespace counts as content.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn parse(text: String) -> Result<NonEmptyText, String> {
        if text.is_empty() {
            return Err(String::from("cannot be empty"));
        }

        Ok(Self(text))
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
