use serde::Deserialize;
use validator::Validate;

use crate::forms::FormError;

pub const MAX_SEARCH_LENGTH: u64 = 200;

/// Search box submission.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[validate(length(max = MAX_SEARCH_LENGTH))]
    #[serde(default)]
    pub q: String,
    /// Query string of the page the search was submitted from.
    #[serde(default)]
    pub current: String,
}

impl SearchForm {
    pub fn validated(self) -> Result<Self, FormError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_overlong_search() {
        let form = SearchForm {
            q: "x".repeat(MAX_SEARCH_LENGTH as usize + 1),
            current: String::new(),
        };
        assert!(matches!(form.validated(), Err(FormError::Validation(_))));
    }

    #[test]
    fn accepts_regular_search() {
        let form = SearchForm {
            q: "kim".to_string(),
            current: "page=2".to_string(),
        };
        assert!(form.validated().is_ok());
    }
}
