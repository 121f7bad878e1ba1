use crate::error::{Error, FieldError, Result};
use serde::{Deserialize, Serialize};

pub const MAX_WORD_LEN: usize = 200;

/// An English word and its Japanese translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WordEntry {
    pub id: i64,
    pub english: String,
    pub japanese: String,
}

/// Word fields as submitted by the admin create/update forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordForm {
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub japanese: String,
}

/// Word fields that passed validation: trimmed, non-blank, at most
/// [`MAX_WORD_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWord {
    english: String,
    japanese: String,
}

impl ValidatedWord {
    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn japanese(&self) -> &str {
        &self.japanese
    }

    pub fn english_folded(&self) -> String {
        fold_case(&self.english)
    }

    pub fn japanese_folded(&self) -> String {
        fold_case(&self.japanese)
    }
}

/// Case folding used for keyword search. Stored `*_folded` columns and
/// search keywords both go through this.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

impl WordForm {
    pub fn new(english: impl Into<String>, japanese: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            japanese: japanese.into(),
        }
    }

    pub fn validate(self) -> Result<ValidatedWord> {
        let mut errors = Vec::new();
        let english = check_field("english", "English word", &self.english, &mut errors);
        let japanese = check_field("japanese", "Japanese", &self.japanese, &mut errors);

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(ValidatedWord { english, japanese })
    }
}

fn check_field(
    field: &'static str,
    label: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    } else if trimmed.chars().count() > MAX_WORD_LEN {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at most {MAX_WORD_LEN} characters"),
        ));
    }
    trimmed.to_string()
}

/// Build the `LIKE` pattern for a keyword search, or `None` when the keyword
/// is blank and the listing should not be filtered.
pub(crate) fn keyword_pattern(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in fold_case(keyword).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}
