//! Folds settled upload outcomes into the response, or into the one error the caller sees

use emporium_core::{
    AppError, FailurePolicy, FileFailure, FilePayload, UploadOutcome, UploadResponse,
};

/// Build the response for a settled request.
///
/// Under `AllOrNothing` any failure fails the request with the cause of the lowest-index
/// failed file, discarding the successful URLs. Under `Partial` the request fails that way
/// only when no file succeeded; otherwise failed indices carry `null` and are listed in
/// `failures`.
pub fn aggregate(
    files: &[FilePayload],
    outcomes: Vec<UploadOutcome>,
    policy: FailurePolicy,
) -> Result<UploadResponse, AppError> {
    if outcomes.len() != files.len() {
        return Err(AppError::Internal(format!(
            "Upload produced {} outcomes for {} files",
            outcomes.len(),
            files.len()
        )));
    }

    let first_failure = outcomes.iter().find_map(|outcome| match outcome {
        UploadOutcome::Failure { cause } => Some(cause.clone()),
        UploadOutcome::Success { .. } => None,
    });

    match (first_failure, policy) {
        (Some(cause), FailurePolicy::AllOrNothing) => Err(AppError::UploadFailed(cause)),
        (Some(cause), FailurePolicy::Partial) if !outcomes.iter().any(|o| o.is_success()) => {
            Err(AppError::UploadFailed(cause))
        }
        (first_failure, _) => Ok(build_response(files, outcomes, first_failure.is_none())),
    }
}

fn build_response(
    files: &[FilePayload],
    outcomes: Vec<UploadOutcome>,
    all_succeeded: bool,
) -> UploadResponse {
    let mut urls = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for (index, (outcome, file)) in outcomes.into_iter().zip(files).enumerate() {
        match outcome {
            UploadOutcome::Success { url } => urls.push(Some(url)),
            UploadOutcome::Failure { cause } => {
                urls.push(None);
                failures.push(FileFailure {
                    index,
                    filename: file.filename.clone(),
                    error: cause,
                });
            }
        }
    }

    let primary_url = urls.iter().flatten().next().cloned().unwrap_or_default();

    UploadResponse {
        success: all_succeeded,
        urls,
        primary_url,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(count: usize) -> Vec<FilePayload> {
        (0..count)
            .map(|i| FilePayload::new(format!("file{}.png", i), "image/png", vec![i as u8]))
            .collect()
    }

    fn ok(url: &str) -> UploadOutcome {
        UploadOutcome::Success {
            url: url.to_string(),
        }
    }

    fn failed(cause: &str) -> UploadOutcome {
        UploadOutcome::Failure {
            cause: cause.to_string(),
        }
    }

    #[test]
    fn test_all_success_keeps_order_and_primary_url() {
        let response = aggregate(
            &files(2),
            vec![ok("https://cdn/a"), ok("https://cdn/b")],
            FailurePolicy::AllOrNothing,
        )
        .unwrap();

        assert!(response.success);
        assert_eq!(
            response.urls,
            vec![
                Some("https://cdn/a".to_string()),
                Some("https://cdn/b".to_string())
            ]
        );
        assert_eq!(response.primary_url, "https://cdn/a");
        assert!(response.failures.is_empty());
    }

    #[test]
    fn test_one_failure_of_three_fails_whole_request() {
        let result = aggregate(
            &files(3),
            vec![ok("https://cdn/a"), failed("quota exceeded"), ok("https://cdn/c")],
            FailurePolicy::AllOrNothing,
        );
        match result {
            Err(AppError::UploadFailed(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("Expected UploadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_first_error_is_lowest_index() {
        let result = aggregate(
            &files(3),
            vec![ok("https://cdn/a"), failed("second"), failed("third")],
            FailurePolicy::AllOrNothing,
        );
        assert!(matches!(result, Err(AppError::UploadFailed(msg)) if msg == "second"));
    }

    #[test]
    fn test_partial_reports_failed_indices() {
        let response = aggregate(
            &files(3),
            vec![failed("timeout talking to bucket"), ok("https://cdn/b"), ok("https://cdn/c")],
            FailurePolicy::Partial,
        )
        .unwrap();

        assert!(!response.success);
        assert_eq!(response.urls[0], None);
        assert_eq!(response.urls[1].as_deref(), Some("https://cdn/b"));
        assert_eq!(response.primary_url, "https://cdn/b");
        assert_eq!(
            response.failures,
            vec![FileFailure {
                index: 0,
                filename: "file0.png".to_string(),
                error: "timeout talking to bucket".to_string(),
            }]
        );
    }

    #[test]
    fn test_partial_with_nothing_uploaded_is_fatal() {
        let result = aggregate(
            &files(2),
            vec![failed("first"), failed("second")],
            FailurePolicy::Partial,
        );
        assert!(matches!(result, Err(AppError::UploadFailed(msg)) if msg == "first"));
    }

    #[test]
    fn test_partial_all_success_matches_all_or_nothing() {
        let outcomes = vec![ok("https://cdn/a")];
        let partial = aggregate(&files(1), outcomes.clone(), FailurePolicy::Partial).unwrap();
        let strict = aggregate(&files(1), outcomes, FailurePolicy::AllOrNothing).unwrap();
        assert_eq!(partial, strict);
    }

    #[test]
    fn test_outcome_count_mismatch_is_internal() {
        let result = aggregate(&files(2), vec![ok("https://cdn/a")], FailurePolicy::Partial);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
