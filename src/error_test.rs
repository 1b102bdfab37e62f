#[cfg(test)]
mod tests {
    use super::super::error::{truncate_body, GleifError, ERROR_BODY_LIMIT};

    #[test]
    fn test_invalid_argument_error() {
        let error = GleifError::InvalidArgument("Search query cannot be empty".to_string());

        let msg = error.to_string();
        assert!(msg.contains("Invalid argument"));
        assert!(msg.contains("Search query cannot be empty"));

        assert_eq!(error.exit_code(), 2);
        assert!(error.hint().unwrap().contains("--help"));
    }

    #[test]
    fn test_api_error_truncates_body() {
        let body = "x".repeat(1000);
        let error = GleifError::api("lei-records", 3, 500, &body);

        match &error {
            GleifError::Api { status, page, body, .. } => {
                assert_eq!(*status, 500);
                assert_eq!(*page, 3);
                assert_eq!(body.chars().count(), ERROR_BODY_LIMIT + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }

        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("lei-records"));
        assert!(msg.contains("page 3"));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_rate_limit_hint() {
        let error = GleifError::api("lei-records", 1, 429, "Too Many Requests");
        let hint = error.hint().unwrap();
        assert!(hint.contains("60 requests per minute"));
    }

    #[test]
    fn test_server_error_hint() {
        let error = GleifError::api("countries", 1, 503, "");
        assert!(error.hint().unwrap().contains("server error"));

        let error = GleifError::api("countries", 1, 404, "Not Found");
        assert!(error.hint().is_none());
    }

    #[test]
    fn test_malformed_error_message() {
        let error = GleifError::malformed("regions", 2, "expected value at line 1 column 1");
        let msg = error.to_string();
        assert!(msg.starts_with("Malformed response"));
        assert!(msg.contains("regions (page 2)"));
        assert!(error.hint().unwrap().contains("--base-url"));
    }

    #[test]
    fn test_partial_fetch_lists_completed_types() {
        let error = GleifError::PartialFetch {
            failed: "entity-legal-forms".to_string(),
            completed: vec![("countries".to_string(), 250), ("regions".to_string(), 5000)],
            source: Box::new(GleifError::api("entity-legal-forms", 1, 503, "")),
        };

        let msg = error.to_string();
        assert!(msg.contains("Failed to fetch entity-legal-forms"));
        assert!(msg.contains("countries (250 items), regions (5000 items)"));
        // Hint comes from the underlying failure
        assert!(error.hint().unwrap().contains("server error"));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_truncate_body_short_input() {
        assert_eq!(truncate_body("  short  ", 10), "short");
        assert_eq!(truncate_body("Zürich AG", 3), "Zür...");
    }

    #[test]
    fn test_api_error_message_is_single_line() {
        let error = GleifError::api(
            "lei-records",
            3,
            500,
            "<html>\n<body>Internal Server Error</body>\r\n</html>\n",
        );

        let msg = error.to_string();
        assert_eq!(msg.lines().count(), 1);
        assert!(msg.ends_with("<html> <body>Internal Server Error</body> </html>"));

        let json_body = "{\n  \"errors\": [\n    {\"title\": \"Bad Request\"}\n  ]\n}";
        assert_eq!(
            truncate_body(json_body, ERROR_BODY_LIMIT),
            "{ \"errors\": [ {\"title\": \"Bad Request\"} ] }"
        );
    }
}
