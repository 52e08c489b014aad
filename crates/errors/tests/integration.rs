//! Integration tests for error types

#[cfg(test)]
mod tests {
    use suitecheck_errors::*;

    #[test]
    fn test_error_conversion() {
        let archive_err = ArchiveError::OpenFailed {
            path: "/suite/tools/mts-tradefed.jar".into(),
            message: "No such file or directory".into(),
        };
        let err: Error = archive_err.into();
        assert!(matches!(err, Error::Archive(_)));
        assert_eq!(err.user_code(), Some("archive.open_failed"));
    }

    #[test]
    fn test_mismatch_lists_every_module() {
        let err = VerifyError::Mismatch {
            missing: vec!["gamma".into(), "delta".into(), "omega".into()],
        };
        assert_eq!(
            err.to_string(),
            "3 declared module(s) not in configs: gamma, delta, omega"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = VerifyError::EmptyConfigSet {
            path: "/suite/android-mts/testcases".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                path: None,
                ..
            }
        ));
    }

    #[test]
    fn test_user_hint_propagates_through_root_error() {
        let err: Error = ConfigError::MissingField {
            field: "suite.root".into(),
        }
        .into();
        assert!(err.user_hint().unwrap().contains("MTS_ROOT"));
        assert!(!err.is_retryable());
    }
}
