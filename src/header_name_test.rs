use super::*;

mod format_canonical {
    use super::*;

    #[test]
    fn should_capitalize_each_token_when_name_is_lowercase() {
        // Arrange & Act
        let result = format_canonical("x-forwarded-for");

        // Assert
        assert_eq!(result, Ok("X-Forwarded-For".to_string()));
    }

    #[test]
    fn should_lowercase_tail_when_name_is_shouting() {
        // Arrange & Act
        let result = format_canonical("CONTENT-TYPE");

        // Assert
        assert_eq!(result, Ok("Content-Type".to_string()));
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        // Arrange & Act
        let result = format_canonical("  authorization ");

        // Assert
        assert_eq!(result, Ok("Authorization".to_string()));
    }

    #[test]
    fn should_keep_underscores_and_digits() {
        // Arrange & Act
        let result = format_canonical("x_custom-h2");

        // Assert
        assert_eq!(result, Ok("X_custom-H2".to_string()));
    }

    #[test]
    fn should_reject_empty_name() {
        // Arrange & Act
        let result = format_canonical("   ");

        // Assert
        assert_eq!(result, Err(HeaderNameError::Empty));
    }

    #[test]
    fn should_reject_name_starting_with_digit() {
        // Arrange & Act
        let result = format_canonical("1-header");

        // Assert
        assert!(matches!(result, Err(HeaderNameError::InvalidSyntax(_))));
    }

    #[test]
    fn should_reject_name_with_separator_characters() {
        // Arrange & Act
        let colon = format_canonical("X-Header:");
        let space = format_canonical("X Header");

        // Assert
        assert!(matches!(colon, Err(HeaderNameError::InvalidSyntax(_))));
        assert!(matches!(space, Err(HeaderNameError::InvalidSyntax(_))));
    }

    #[test]
    fn should_preserve_empty_tokens_when_dashes_repeat() {
        // Arrange & Act
        let result = format_canonical("x--trace");

        // Assert
        assert_eq!(result, Ok("X--Trace".to_string()));
    }
}
