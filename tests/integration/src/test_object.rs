//! Object and tagging integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ProvideErrorMetadata;
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::{Tag, Tagging};

    use crate::{cleanup_bucket, create_test_bucket, put_test_object, s3_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "obj", false).await;

        client
            .put_object()
            .bucket(&bucket)
            .key("dir/hello.txt")
            .content_type("text/plain")
            .body(ByteStream::from_static(b"hello"))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put object failed: {e}"));

        let output = client
            .get_object()
            .bucket(&bucket)
            .key("dir/hello.txt")
            .send()
            .await
            .unwrap_or_else(|e| panic!("get object failed: {e}"));
        assert_eq!(output.content_type(), Some("text/plain"));
        let body = output
            .body
            .collect()
            .await
            .unwrap_or_else(|e| panic!("read body failed: {e}"))
            .into_bytes();
        assert_eq!(body.as_ref(), b"hello");

        cleanup_bucket(&client, &bucket, &[("dir/hello.txt", None)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_key() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nokey", false).await;

        let err = client
            .get_object()
            .bucket(&bucket)
            .key("missing")
            .send()
            .await
            .expect_err("missing key");
        assert_eq!(err.code(), Some("NoSuchKey"));

        cleanup_bucket(&client, &bucket, &[]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_insert_delete_marker_in_lock_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "marker", true).await;
        let version_id = put_test_object(&client, &bucket, "k").await;
        assert!(version_id.is_some(), "lock buckets are versioned");

        let deleted = client
            .delete_object()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        assert_eq!(deleted.delete_marker(), Some(true));
        let marker = deleted.version_id().map(ToOwned::to_owned);

        // The original version is still readable by ID.
        client
            .get_object()
            .bucket(&bucket)
            .key("k")
            .set_version_id(version_id.clone())
            .send()
            .await
            .unwrap_or_else(|e| panic!("get by version failed: {e}"));

        cleanup_bucket(&client, &bucket, &[("k", marker), ("k", version_id)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_tagging() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "tags", false).await;
        put_test_object(&client, &bucket, "k").await;

        let tagging = Tagging::builder()
            .tag_set(
                Tag::builder()
                    .key("env")
                    .value("test")
                    .build()
                    .unwrap_or_else(|e| panic!("tag: {e}")),
            )
            .build()
            .unwrap_or_else(|e| panic!("tagging: {e}"));
        client
            .put_object_tagging()
            .bucket(&bucket)
            .key("k")
            .tagging(tagging)
            .send()
            .await
            .unwrap_or_else(|e| panic!("put tagging failed: {e}"));

        let output = client
            .get_object_tagging()
            .bucket(&bucket)
            .key("k")
            .send()
            .await
            .unwrap_or_else(|e| panic!("get tagging failed: {e}"));
        assert_eq!(output.tag_set().len(), 1);
        assert_eq!(output.tag_set()[0].key(), "env");

        cleanup_bucket(&client, &bucket, &[("k", None)]).await;
    }
}
