//! Buckets

use crate::models::{Bucket, Buckets, PostBucketRequest};
use crate::{Client, HttpSnafu, RequestError, ReqwestProcessingSnafu, SerializingSnafu};
use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use snafu::ResultExt;
use tracing::{debug, info};

impl Client {
    /// List all buckets
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, RequestError> {
        let buckets_url = format!("{}/api/v2/buckets", self.url);
        let response = self
            .request(Method::GET, &buckets_url)
            .send()
            .await
            .context(ReqwestProcessingSnafu)?;
        match response.status() {
            StatusCode::OK => {
                let buckets = response
                    .json::<Buckets>()
                    .await
                    .context(ReqwestProcessingSnafu)?;
                debug!(count = buckets.buckets.len(), "listed buckets");
                Ok(buckets.buckets)
            }
            status => {
                let text = response.text().await.context(ReqwestProcessingSnafu)?;
                HttpSnafu { status, text }.fail()
            }
        }
    }

    /// List the buckets that were not created by the server for its own use
    pub async fn user_buckets(&self) -> Result<Vec<Bucket>, RequestError> {
        let mut buckets = self.list_buckets().await?;
        buckets.retain(|b| !b.is_system());
        Ok(buckets)
    }

    /// Whether a user bucket called `name` exists
    pub async fn bucket_exists(&self, name: &str) -> Result<bool, RequestError> {
        Ok(self.user_buckets().await?.iter().any(|b| b.name == name))
    }

    /// Create a user bucket with infinite retention
    pub async fn create_bucket(&self, org_id: &str, name: &str) -> Result<Bucket, RequestError> {
        let buckets_url = format!("{}/api/v2/buckets", self.url);
        let body = PostBucketRequest::new(org_id, name);
        let response = self
            .request(Method::POST, &buckets_url)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(&body).context(SerializingSnafu)?)
            .send()
            .await
            .context(ReqwestProcessingSnafu)?;
        match response.status() {
            StatusCode::CREATED => {
                let bucket = response
                    .json::<Bucket>()
                    .await
                    .context(ReqwestProcessingSnafu)?;
                info!(name, id = %bucket.id, "created bucket");
                Ok(bucket)
            }
            status => {
                let text = response.text().await.context(ReqwestProcessingSnafu)?;
                HttpSnafu { status, text }.fail()
            }
        }
    }

    /// Delete a bucket by ID
    pub async fn delete_bucket(&self, bucket_id: &str) -> Result<(), RequestError> {
        let delete_bucket_url = format!("{}/api/v2/buckets/{}", self.url, bucket_id);
        let response = self
            .request(Method::DELETE, &delete_bucket_url)
            .send()
            .await
            .context(ReqwestProcessingSnafu)?;
        match response.status() {
            StatusCode::NO_CONTENT => {
                info!(id = bucket_id, "deleted bucket");
                Ok(())
            }
            status => {
                let text = response.text().await.context(ReqwestProcessingSnafu)?;
                HttpSnafu { status, text }.fail()
            }
        }
    }

    /// Delete every user bucket called `name`. Returns whether one existed. System buckets
    /// are never touched.
    pub async fn remove_bucket_by_name(&self, name: &str) -> Result<bool, RequestError> {
        let mut removed = false;
        for bucket in self.user_buckets().await? {
            if bucket.name == name {
                self.delete_bucket(&bucket.id).await?;
                removed = true;
            }
        }
        if !removed {
            debug!(name, "no bucket to remove");
        }
        Ok(removed)
    }
}
