//! Legal hold integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ProvideErrorMetadata;
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::ObjectLockLegalHoldStatus;

    use crate::{cleanup_bucket, create_test_bucket, legal_hold, put_test_object, s3_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_bucket_lock_configuration() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nolock", false).await;

        let err = client
            .get_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .expect_err("bucket without object lock");

        assert_eq!(err.raw_response().map(|r| r.status().as_u16()), Some(404));
        assert_eq!(err.code(), Some("ObjectLockConfigurationNotFoundError"));
        let message = err.message().unwrap_or_default();
        assert!(message.contains("Object Lock configuration does not exist for this bucket"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_object_lock_configuration() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nohold", true).await;
        let version_id = put_test_object(&client, &bucket, "k").await;

        let err = client
            .get_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .expect_err("hold never set");

        assert_eq!(err.raw_response().map(|r| r.status().as_u16()), Some(404));
        assert_eq!(err.code(), Some("NoSuchObjectLockConfiguration"));
        let message = err.message().unwrap_or_default();
        assert!(message.contains("The specified object does not have a ObjectLock configuration"));

        cleanup_bucket(&client, &bucket, &[("k", version_id)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_legal_hold() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "hold", true).await;
        let version_id = put_test_object(&client, &bucket, "k").await;

        // Twice: the second call must succeed unchanged.
        for _ in 0..2 {
            client
                .put_object_legal_hold()
                .bucket(&bucket)
                .key("k")
                .legal_hold(legal_hold(ObjectLockLegalHoldStatus::On))
                .send()
                .await
                .unwrap_or_else(|e| panic!("put legal hold failed: {e}"));
        }

        let output = client
            .get_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("get legal hold failed: {e}"));
        assert_eq!(
            output.legal_hold().and_then(|lh| lh.status()),
            Some(&ObjectLockLegalHoldStatus::On)
        );

        cleanup_bucket(&client, &bucket, &[("k", version_id)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_isolate_same_key_across_buckets() {
        let client = s3_client();
        let held = create_test_bucket(&client, "held", true).await;
        let other = create_test_bucket(&client, "other", true).await;
        let held_version = put_test_object(&client, &held, "k").await;
        let other_version = put_test_object(&client, &other, "k").await;

        client
            .put_object_legal_hold()
            .bucket(&held)
            .key("k")
            .legal_hold(legal_hold(ObjectLockLegalHoldStatus::On))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put legal hold failed: {e}"));

        let err = client
            .get_object_legal_hold()
            .bucket(&other)
            .key("k")
            .send()
            .await
            .expect_err("other bucket has no hold");
        assert_eq!(err.code(), Some("NoSuchObjectLockConfiguration"));

        cleanup_bucket(&client, &held, &[("k", held_version)]).await;
        cleanup_bucket(&client, &other, &[("k", other_version)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_block_version_delete_while_held() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "block", true).await;
        let version_id = put_test_object(&client, &bucket, "k").await;

        client
            .put_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .legal_hold(legal_hold(ObjectLockLegalHoldStatus::On))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put legal hold failed: {e}"));

        let err = client
            .delete_object()
            .bucket(&bucket)
            .key("k")
            .set_version_id(version_id.clone())
            .send()
            .await
            .expect_err("held version cannot be deleted");
        assert_eq!(err.code(), Some("AccessDenied"));

        client
            .put_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .legal_hold(legal_hold(ObjectLockLegalHoldStatus::Off))
            .send()
            .await
            .unwrap_or_else(|e| panic!("release legal hold failed: {e}"));

        client
            .delete_object()
            .bucket(&bucket)
            .key("k")
            .set_version_id(version_id)
            .send()
            .await
            .unwrap_or_else(|e| panic!("delete after release failed: {e}"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_accept_legal_hold_header_on_put() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "header", true).await;

        let version_id = client
            .put_object()
            .bucket(&bucket)
            .key("k")
            .object_lock_legal_hold_status(ObjectLockLegalHoldStatus::On)
            .body(ByteStream::from_static(b"payload"))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put object failed: {e}"))
            .version_id()
            .map(ToOwned::to_owned);

        let head = client
            .head_object()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("head object failed: {e}"));
        assert_eq!(
            head.object_lock_legal_hold_status(),
            Some(&ObjectLockLegalHoldStatus::On)
        );

        cleanup_bucket(&client, &bucket, &[("k", version_id)]).await;
    }
}
