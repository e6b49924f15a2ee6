// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "brapi".into(),
            message: "HTTP 429 Too Many Requests".into(),
        };
        assert_eq!(err.to_string(), "API error (brapi): HTTP 429 Too Many Requests");
    }

    #[test]
    fn api_error_empty_provider() {
        let err = CoreError::Api {
            provider: String::new(),
            message: "unknown".into(),
        };
        assert_eq!(err.to_string(), "API error (): unknown");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("timeout_secs must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: timeout_secs must be positive"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("quantity must not be negative".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: quantity must not be negative"
        );
    }

    #[test]
    fn data_source() {
        let err = CoreError::DataSource {
            source_name: "postgres".into(),
            message: "relation \"goals\" does not exist".into(),
        };
        assert_eq!(
            err.to_string(),
            "Data source error (postgres): relation \"goals\" does not exist"
        );
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        let variants: Vec<CoreError> = vec![
            CoreError::Api {
                provider: "p".into(),
                message: "m".into(),
            },
            CoreError::Network("test".into()),
            CoreError::Deserialization("test".into()),
            CoreError::Config("test".into()),
            CoreError::ValidationError("test".into()),
            CoreError::DataSource {
                source_name: "s".into(),
                message: "m".into(),
            },
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let core_err: CoreError = json_err.into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn question_mark_propagates_json_error() {
        fn parse(body: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(body)?)
        }
        assert!(matches!(parse("]"), Err(CoreError::Deserialization(_))));
        assert!(parse("{}").is_ok());
    }

    #[tokio::test]
    async fn from_reqwest_error_redacts_query() {
        // Nothing listens on port 9; the request fails before any response.
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(1))
            .build()
            .unwrap();
        let req_err = client
            .get("http://127.0.0.1:9/api/quote/PETR4?token=secret")
            .send()
            .await
            .unwrap_err();

        let core_err: CoreError = req_err.into();
        match &core_err {
            CoreError::Network(msg) => assert!(!msg.contains("secret")),
            other => panic!("Expected Network, got {:?}", other),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────

mod error_trait {
    use super::*;

    #[test]
    fn boxes_as_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Network("down".into()));
        assert_eq!(err.to_string(), "Network error: down");
    }
}
