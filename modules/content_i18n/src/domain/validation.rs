//! Input validation for language codes, text keys and ordinal scopes

use crate::contract::{ContentError, EntityKind, OrdinalScope, TextKey, TextValue};

/// Validate a language code
///
/// Accepts short ASCII codes such as "ko", "en", "zh" or region forms like
/// "zh-TW": letters first, then letters, digits or '-'.
pub fn validate_language_code(code: &str) -> Result<(), ContentError> {
    if code.is_empty() {
        return Err(ContentError::validation("language code cannot be empty"));
    }

    if code.len() > 16 {
        return Err(ContentError::validation(format!(
            "language code '{}' is longer than 16 characters",
            code
        )));
    }

    if !code.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(ContentError::validation(format!(
            "language code '{}' must start with a letter",
            code
        )));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ContentError::validation(format!(
            "language code '{}' contains invalid characters. Only letters, digits and '-' are allowed",
            code
        )));
    }

    Ok(())
}

/// Validate every (kind, field) pair of a write before anything is stored
pub fn validate_text_values(
    kind: EntityKind,
    values: &[TextValue],
) -> Result<Vec<TextKey>, ContentError> {
    values
        .iter()
        .map(|value| TextKey::new(kind, value.field))
        .collect()
}

/// Validate that table and column names of a scope are plain SQL identifiers
pub fn validate_scope(scope: &OrdinalScope) -> Result<(), ContentError> {
    let mut names = vec![scope.table.as_str(), scope.sort_column.as_str()];
    if let Some(partition) = &scope.partition {
        names.push(partition.column.as_str());
    }

    for name in names {
        if !is_identifier(name) {
            return Err(ContentError::InvalidOrdinalScope {
                scope: scope.to_string(),
                details: format!("'{}' is not a valid identifier", name),
            });
        }
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::TextField;

    #[test]
    fn accepts_short_and_regional_codes() {
        for code in ["ko", "en", "zh", "zh-TW", "pt-BR"] {
            assert!(validate_language_code(code).is_ok(), "{code} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "1en", "-en", "en_US", "en us", "abcdefghijklmnopq"] {
            assert!(validate_language_code(code).is_err(), "{code:?} should be invalid");
        }
    }

    #[test]
    fn text_values_must_match_kind_fields() {
        let ok = [
            TextValue::new(TextField::Title, "ko", "제목"),
            TextValue::new(TextField::Content, "en", "Body"),
        ];
        let keys = validate_text_values(EntityKind::ArticleSection, &ok).unwrap();
        assert_eq!(keys.len(), 2);

        let bad = [TextValue::new(TextField::Origin, "ko", "국산")];
        let err = validate_text_values(EntityKind::Article, &bad).unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedField { .. }));
    }

    #[test]
    fn scope_identifiers_are_checked() {
        assert!(validate_scope(&OrdinalScope::children_of("article_sections", "article_id", 1)).is_ok());
        assert!(validate_scope(&OrdinalScope::table("banners; drop table x")).is_err());
        assert!(validate_scope(&OrdinalScope::table("banners").with_sort_column("1st")).is_err());
        assert!(validate_scope(&OrdinalScope::children_of("images", "section id", 3)).is_err());
    }
}
