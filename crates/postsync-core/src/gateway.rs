//! Remote gateway
//!
//! Performs the four HTTP operations against the remote posts collection.
//!
//! ## Endpoints
//!
//! - `GET {base}`: list posts
//! - `POST {base}`: create a post, echoes the created record
//! - `PUT {base}/{id}`: replace a post, echoes the updated record
//! - `DELETE {base}/{id}`: delete a post, body ignored
//!
//! Any non-success status, transport failure or undecodable body becomes a
//! `RemoteError` for that operation. There are no retries and no timeouts.

use std::future::Future;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Operation, RemoteError, RemoteResult};
use crate::models::{NewPost, Post, PostId};

/// Boundary to the remote posts collection
pub trait Gateway {
    /// Fetch the whole remote list
    fn fetch_list(&self) -> impl Future<Output = RemoteResult<Vec<Post>>>;

    /// Create a post, returning the record echoed by the server
    fn create(&self, post: &NewPost) -> impl Future<Output = RemoteResult<Post>>;

    /// Replace a post, returning the record echoed by the server
    fn update(&self, post: &Post) -> impl Future<Output = RemoteResult<Post>>;

    /// Delete a post
    fn delete_one(&self, id: PostId) -> impl Future<Output = RemoteResult<()>>;
}

/// Gateway backed by a reqwest HTTP client
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the collection at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a gateway with a preconfigured client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The collection endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single post
    fn item_url(&self, id: PostId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl Gateway for HttpGateway {
    async fn fetch_list(&self) -> RemoteResult<Vec<Post>> {
        debug!("GET {}", self.base_url);
        let result = self.client.get(&self.base_url).send().await;
        decode(Operation::FetchList, result).await
    }

    async fn create(&self, post: &NewPost) -> RemoteResult<Post> {
        debug!("POST {}", self.base_url);
        let result = self.client.post(&self.base_url).json(post).send().await;
        decode(Operation::Create, result).await
    }

    async fn update(&self, post: &Post) -> RemoteResult<Post> {
        let url = self.item_url(post.id);
        debug!("PUT {}", url);
        let result = self.client.put(&url).json(post).send().await;
        decode(Operation::Update, result).await
    }

    async fn delete_one(&self, id: PostId) -> RemoteResult<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let result = self.client.delete(&url).send().await;
        check_status(Operation::Delete, result).map(|_| ())
    }
}

/// Reject transport failures and non-success statuses
fn check_status(
    operation: Operation,
    result: reqwest::Result<Response>,
) -> RemoteResult<Response> {
    let response = result.map_err(|e| {
        warn!("{:?} request failed: {}", operation, e);
        RemoteError::with_source(operation, e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{:?} returned status {}", operation, status);
        return Err(RemoteError::new(operation));
    }

    Ok(response)
}

/// Check the response and decode its JSON body
async fn decode<T: DeserializeOwned>(
    operation: Operation,
    result: reqwest::Result<Response>,
) -> RemoteResult<T> {
    let response = check_status(operation, result)?;
    response.json::<T>().await.map_err(|e| {
        warn!("{:?} returned an undecodable body: {}", operation, e);
        RemoteError::with_source(operation, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_json(id: u64) -> serde_json::Value {
        json!({"userId": 1, "id": id, "title": format!("title {id}"), "body": "body"})
    }

    fn gateway(server: &MockServer) -> HttpGateway {
        HttpGateway::new(&format!("{}/posts", server.uri()))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpGateway::new("http://example.com/posts/");
        assert_eq!(gateway.base_url(), "http://example.com/posts");
        assert_eq!(gateway.item_url(7), "http://example.com/posts/7");
    }

    #[tokio::test]
    async fn test_fetch_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_json(1), post_json(2)])),
            )
            .mount(&server)
            .await;

        let posts = gateway(&server).fetch_list().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "title 2");
    }

    #[tokio::test]
    async fn test_fetch_list_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway(&server).fetch_list().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch posts");
        assert_eq!(err.operation(), Operation::FetchList);
    }

    #[tokio::test]
    async fn test_fetch_list_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "x"}])))
            .mount(&server)
            .await;

        let err = gateway(&server).fetch_list().await.unwrap_err();
        assert_eq!(err.reason(), "Failed to fetch posts");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let gateway = HttpGateway::new("http://127.0.0.1:1/posts");
        let err = gateway.fetch_list().await.unwrap_err();
        assert_eq!(err.reason(), "Failed to fetch posts");
    }

    #[tokio::test]
    async fn test_create_sends_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"title": "A", "body": "B", "userId": 1})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 101, "title": "A", "body": "B", "userId": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let new_post = NewPost {
            title: "A".to_string(),
            body: "B".to_string(),
            user_id: 1,
        };
        let created = gateway(&server).create(&new_post).await.unwrap();
        assert_eq!(created.id, 101);
        assert_eq!(created.title, "A");
    }

    #[tokio::test]
    async fn test_create_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let new_post = NewPost {
            title: "A".to_string(),
            body: "B".to_string(),
            user_id: 1,
        };
        let err = gateway(&server).create(&new_post).await.unwrap_err();
        assert_eq!(err.reason(), "Failed to create post");
    }

    #[tokio::test]
    async fn test_update_puts_to_item_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/posts/2"))
            .and(body_json(json!({"id": 2, "title": "X", "body": "body", "userId": 1})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 2, "title": "X", "body": "body", "userId": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let post = Post {
            id: 2,
            title: "X".to_string(),
            body: "body".to_string(),
            user_id: 1,
        };
        let updated = gateway(&server).update(&post).await.unwrap();
        assert_eq!(updated, post);
    }

    #[tokio::test]
    async fn test_update_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let post = Post {
            id: 1_700_000_000_000,
            title: "X".to_string(),
            body: "body".to_string(),
            user_id: 1,
        };
        let err = gateway(&server).update(&post).await.unwrap_err();
        assert_eq!(err.reason(), "Failed to update post");
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/posts/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server).delete_one(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gateway(&server).delete_one(3).await.unwrap_err();
        assert_eq!(err.reason(), "Failed to delete post");
    }
}
