//! Bucket integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ProvideErrorMetadata;

    use crate::{cleanup_bucket, create_test_bucket, put_test_object, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_head_and_delete_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "crud", false).await;

        client
            .head_bucket()
            .bucket(&bucket)
            .send()
            .await
            .unwrap_or_else(|e| panic!("head bucket failed: {e}"));

        let listed = client
            .list_buckets()
            .send()
            .await
            .unwrap_or_else(|e| panic!("list buckets failed: {e}"));
        let found = listed
            .buckets()
            .iter()
            .any(|b| b.name() == Some(bucket.as_str()));
        assert!(found);

        client
            .delete_bucket()
            .bucket(&bucket)
            .send()
            .await
            .unwrap_or_else(|e| panic!("delete bucket failed: {e}"));

        assert!(client.head_bucket().bucket(&bucket).send().await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_duplicate_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "dup", false).await;

        let err = client
            .create_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect_err("name taken");
        assert_eq!(err.code(), Some("BucketAlreadyExists"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_refuse_to_delete_non_empty_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "full", false).await;
        put_test_object(&client, &bucket, "k").await;

        let err = client
            .delete_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect_err("bucket not empty");
        assert_eq!(err.code(), Some("BucketNotEmpty"));

        cleanup_bucket(&client, &bucket, &[("k", None)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_no_lock_configuration_for_plain_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "plaincfg", false).await;

        let err = client
            .get_object_lock_configuration()
            .bucket(&bucket)
            .send()
            .await
            .expect_err("plain bucket");
        assert_eq!(err.code(), Some("ObjectLockConfigurationNotFoundError"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_on_missing_bucket() {
        let client = s3_client();
        let bucket = test_bucket_name("ghost");

        let err = client
            .get_object_legal_hold()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .expect_err("missing bucket");
        assert_eq!(err.code(), Some("NoSuchBucket"));
    }
}
