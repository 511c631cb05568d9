//! Retention and lock configuration integration tests.

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use aws_sdk_s3::error::ProvideErrorMetadata;
    use aws_sdk_s3::primitives::DateTime;
    use aws_sdk_s3::types::{
        DefaultRetention, ObjectLockConfiguration, ObjectLockEnabled, ObjectLockRetention,
        ObjectLockRetentionMode, ObjectLockRule,
    };

    use crate::{cleanup_bucket, create_test_bucket, put_test_object, s3_client};

    fn retention(mode: ObjectLockRetentionMode, secs_from_now: u64) -> ObjectLockRetention {
        ObjectLockRetention::builder()
            .mode(mode)
            .retain_until_date(DateTime::from(
                SystemTime::now() + Duration::from_secs(secs_from_now),
            ))
            .build()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_gate_retention_on_bucket_lock() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "retplain", false).await;
        put_test_object(&client, &bucket, "k").await;

        let err = client
            .get_object_retention()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .expect_err("bucket without object lock");
        assert_eq!(err.code(), Some("ObjectLockConfigurationNotFoundError"));

        cleanup_bucket(&client, &bucket, &[("k", None)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_enforce_governance_bypass() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "gov", true).await;
        let version_id = put_test_object(&client, &bucket, "k").await;

        client
            .put_object_retention()
            .bucket(&bucket)
            .key("k")
            .retention(retention(ObjectLockRetentionMode::Governance, 3600))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put retention failed: {e}"));

        let output = client
            .get_object_retention()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("get retention failed: {e}"));
        assert_eq!(
            output.retention().and_then(|r| r.mode()),
            Some(&ObjectLockRetentionMode::Governance)
        );

        let err = client
            .delete_object()
            .bucket(&bucket)
            .key("k")
            .set_version_id(version_id.clone())
            .send()
            .await
            .expect_err("governance blocks without bypass");
        assert_eq!(err.code(), Some("AccessDenied"));

        client
            .delete_object()
            .bucket(&bucket)
            .key("k")
            .set_version_id(version_id)
            .bypass_governance_retention(true)
            .send()
            .await
            .unwrap_or_else(|e| panic!("bypass delete failed: {e}"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_round_trip_default_retention() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "defret", true).await;

        let configuration = ObjectLockConfiguration::builder()
            .object_lock_enabled(ObjectLockEnabled::Enabled)
            .rule(
                ObjectLockRule::builder()
                    .default_retention(
                        DefaultRetention::builder()
                            .mode(ObjectLockRetentionMode::Governance)
                            .days(1)
                            .build(),
                    )
                    .build(),
            )
            .build();
        client
            .put_object_lock_configuration()
            .bucket(&bucket)
            .object_lock_configuration(configuration)
            .send()
            .await
            .unwrap_or_else(|e| panic!("put lock configuration failed: {e}"));

        let output = client
            .get_object_lock_configuration()
            .bucket(&bucket)
            .send()
            .await
            .unwrap_or_else(|e| panic!("get lock configuration failed: {e}"));
        let days = output
            .object_lock_configuration()
            .and_then(|c| c.rule())
            .and_then(|r| r.default_retention())
            .and_then(DefaultRetention::days);
        assert_eq!(days, Some(1));

        // New versions pick up the default.
        let version_id = put_test_object(&client, &bucket, "k").await;
        let retention = client
            .get_object_retention()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("get retention failed: {e}"));
        assert!(retention.retention().is_some());

        cleanup_bucket(&client, &bucket, &[("k", version_id)]).await;
    }
}
