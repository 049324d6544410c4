use crate::object::{ObjectClient, ObjectInfo};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// S3-compatible object client
/// Compatible with: AWS S3, Cloudflare R2, MinIO, DigitalOcean Spaces, etc.
pub struct S3ObjectClient {
    client: Client,
    bucket_name: String,
    bucket_prefix: String,
}

impl S3ObjectClient {
    pub async fn new(
        endpoint_url: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
        bucket_name: String,
        bucket_prefix: String,
    ) -> Result<Self, StorageError> {
        if bucket_name.is_empty() {
            return Err(StorageError::ConfigError("remote.bucket_name is empty".to_string()));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region));

        // Fall back to the default provider chain (env, profile, IMDS) when no static keys are set
        if !access_key_id.is_empty() {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "mountfs-s3",
            );
            loader = loader.credentials_provider(credentials);
        }
        if !endpoint_url.is_empty() {
            loader = loader.endpoint_url(endpoint_url);
        }

        let config = loader.load().await;
        let client = Client::new(&config);

        Ok(Self {
            client,
            bucket_name,
            bucket_prefix: bucket_prefix.trim_matches('/').to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        if self.bucket_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.bucket_prefix, key)
        }
    }

    fn strip_key(&self, full_key: &str) -> String {
        if self.bucket_prefix.is_empty() {
            return full_key.to_string();
        }
        full_key
            .strip_prefix(&format!("{}/", self.bucket_prefix))
            .unwrap_or(full_key)
            .to_string()
    }
}

fn to_chrono(value: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(value.secs(), value.subsec_nanos())
}

#[async_trait::async_trait]
impl ObjectClient for S3ObjectClient {
    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let full_key = self.build_key(key);

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().map(|se| se.is_no_such_key()).unwrap_or(false) {
                    StorageError::FileNotFound(key.to_string())
                } else {
                    StorageError::ReadError(full_key.clone(), e.to_string())
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::ReadError(full_key.clone(), e.to_string()))?;

        Ok(data.into_bytes())
    }

    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        let full_key = self.build_key(key);

        tracing::info!("Uploading {} to S3 bucket {}", full_key, self.bucket_name);

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&full_key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::UploadError(full_key.clone(), e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let full_key = self.build_key(key);

        tracing::info!("Deleting {} from S3 bucket {}", full_key, self.bucket_name);

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteError(full_key.clone(), e.to_string()))?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let full_prefix = self.build_key(prefix);
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket_name)
                .prefix(&full_prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| StorageError::S3SdkError(e.to_string()))?;

            for object in output.contents() {
                let Some(full_key) = object.key() else {
                    continue;
                };
                objects.push(ObjectInfo {
                    key: self.strip_key(full_key),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: object.last_modified().and_then(to_chrono),
                    content_type: None,
                });
            }

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn head(&self, key: &str) -> Result<ObjectInfo, StorageError> {
        let full_key = self.build_key(key);

        let output = self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().map(|se| se.is_not_found()).unwrap_or(false) {
                    StorageError::FileNotFound(key.to_string())
                } else {
                    StorageError::S3SdkError(e.to_string())
                }
            })?;

        Ok(ObjectInfo {
            key: key.to_string(),
            size: output.content_length().unwrap_or(0).max(0) as u64,
            last_modified: output.last_modified().and_then(to_chrono),
            content_type: output.content_type().map(str::to_string),
        })
    }

    fn describe(&self) -> String {
        if self.bucket_prefix.is_empty() {
            format!("s3://{}", self.bucket_name)
        } else {
            format!("s3://{}/{}", self.bucket_name, self.bucket_prefix)
        }
    }
}
