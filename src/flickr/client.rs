//! Flickr REST client.
//!
//! Requests go to the configured endpoint with `format=json&nojsoncallback=1`.
//! Only the API key is required; an auth token is forwarded when configured.
//! Requests are not signed, so the secret is held but never sent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::{FlickrError, PhotoInfo, PhotoSize, PhotoSource};
use crate::config::{Credentials, FlickrTagConfig};
use crate::constants::USER_AGENT;

/// Envelope fields present on every response.
#[derive(Debug, Deserialize)]
struct ApiStatus {
    stat: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    photo: RawPhoto,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    id: String,
    title: RawContent,
    #[serde(default)]
    urls: Option<RawUrls>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(rename = "_content")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawUrls {
    #[serde(default)]
    url: Vec<RawUrl>,
}

#[derive(Debug, Deserialize)]
struct RawUrl {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(rename = "_content")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct SizesResponse {
    sizes: RawSizes,
}

#[derive(Debug, Deserialize)]
struct RawSizes {
    #[serde(default, deserialize_with = "decodable_sizes")]
    size: Vec<PhotoSize>,
}

/// Keep the size entries that decode; one malformed entry must not hide the rest.
fn decodable_sizes<'de, D>(deserializer: D) -> Result<Vec<PhotoSize>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match PhotoSize::deserialize(&entry) {
            Ok(size) => Some(size),
            Err(e) => {
                debug!("Skipping size entry {}: {}", entry, e);
                None
            }
        })
        .collect())
}

/// [`PhotoSource`] backed by the Flickr REST API.
#[derive(Debug, Clone)]
pub struct FlickrClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl FlickrClient {
    /// Build a client for one generation run.
    ///
    /// The endpoint is not validated here; an unusable endpoint surfaces as a
    /// per-request [`FlickrError::Http`].
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be initialized.
    pub fn new(config: &FlickrTagConfig) -> Result<Self, FlickrError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            endpoint: config.api_endpoint.clone(),
            credentials: config.credentials.clone(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, photo_id: &str) -> Result<T, FlickrError> {
        let api_key = self.credentials.key.as_deref().ok_or(FlickrError::MissingApiKey)?;

        let mut query = vec![
            ("method", method),
            ("api_key", api_key),
            ("photo_id", photo_id),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ];
        if let Some(token) = self.credentials.token.as_deref() {
            query.push(("auth_token", token));
        }

        debug!("Calling {} for photo {}", method, photo_id);
        let response = self.http.get(&self.endpoint).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlickrError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

impl PhotoSource for FlickrClient {
    async fn photo_info(&self, photo_id: &str) -> Result<PhotoInfo, FlickrError> {
        let response: InfoResponse = self.call("flickr.photos.getInfo", photo_id).await?;
        photo_info_from(response)
    }

    async fn photo_sizes(&self, photo_id: &str) -> Result<Vec<PhotoSize>, FlickrError> {
        let response: SizesResponse = self.call("flickr.photos.getSizes", photo_id).await?;
        Ok(response.sizes.size)
    }
}

/// Check the `stat` envelope, then decode the payload.
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, FlickrError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let status = ApiStatus::deserialize(&value)?;
    if status.stat != "ok" {
        return Err(FlickrError::Api {
            code: status.code.unwrap_or_default(),
            message: status.message.unwrap_or_else(|| status.stat.clone()),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Prefer the `photopage` URL, fall back to the first listed one.
fn photo_info_from(response: InfoResponse) -> Result<PhotoInfo, FlickrError> {
    let RawPhoto {
        id,
        title,
        urls,
    } = response.photo;

    let urls = urls.map(|u| u.url).unwrap_or_default();
    let url = urls
        .iter()
        .find(|u| u.kind == "photopage")
        .or_else(|| urls.first())
        .map(|u| u.content.clone())
        .ok_or(FlickrError::MissingField("photo page URL"))?;

    Ok(PhotoInfo {
        id,
        title: title.content,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single request with `status` and `body`; the task yields the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/services/rest/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (endpoint, handle)
    }

    fn client_for(endpoint: &str, token: Option<&str>) -> FlickrClient {
        let mut settings = Settings::new();
        settings.insert("FLICKR_API_KEY", "key");
        settings.insert("FLICKR_API_ENDPOINT", endpoint);
        if let Some(token) = token {
            settings.insert("FLICKR_API_TOKEN", token);
        }
        FlickrClient::new(&FlickrTagConfig::from_settings(&mut settings)).unwrap()
    }

    const INFO_OK: &str = r#"{
        "photo": {
            "id": "12345",
            "secret": "abc",
            "title": {"_content": "Sunset"},
            "urls": {"url": [
                {"type": "photopage", "_content": "https://www.flickr.com/photos/someone/12345/"}
            ]}
        },
        "stat": "ok"
    }"#;

    const SIZES_OK: &str = r#"{
        "sizes": {"canblog": 0, "size": [
            {"label": "Medium", "width": 500, "height": 333,
             "source": "https://live.staticflickr.com/65535/12345_abc.jpg",
             "url": "https://www.flickr.com/photos/someone/12345/sizes/m/", "media": "photo"},
            {"label": "Medium 640", "width": "640", "height": "427",
             "source": "https://live.staticflickr.com/65535/12345_abc_z.jpg",
             "url": "https://www.flickr.com/photos/someone/12345/sizes/z/", "media": "photo"}
        ]},
        "stat": "ok"
    }"#;

    #[test]
    fn test_parse_info() {
        let response: InfoResponse = parse_response(INFO_OK).unwrap();
        let info = photo_info_from(response).unwrap();
        assert_eq!(info.id, "12345");
        assert_eq!(info.title, "Sunset");
        assert_eq!(info.url, "https://www.flickr.com/photos/someone/12345/");
    }

    #[test]
    fn test_parse_sizes() {
        let response: SizesResponse = parse_response(SIZES_OK).unwrap();
        let sizes = response.sizes.size;
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[1].label, "Medium 640");
        assert_eq!((sizes[1].width, sizes[1].height), (640, 427));
    }

    #[test]
    fn test_parse_sizes_skips_malformed_entries() {
        let body = r#"{
            "sizes": {"size": [
                {"label": "Square", "width": "n/a", "height": 75,
                 "source": "https://live.staticflickr.com/65535/12345_abc_s.jpg"},
                {"label": "Thumbnail", "width": 100},
                {"label": "Medium", "width": 500, "height": 333,
                 "source": "https://live.staticflickr.com/65535/12345_abc.jpg"}
            ]},
            "stat": "ok"
        }"#;
        let response: SizesResponse = parse_response(body).unwrap();
        let labels: Vec<_> = response.sizes.size.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Medium"]);
    }

    #[test]
    fn test_parse_api_failure() {
        let body = r#"{"stat": "fail", "code": 1, "message": "Photo \"999\" not found (invalid ID)"}"#;
        let err = parse_response::<InfoResponse>(body).unwrap_err();
        match err {
            FlickrError::Api {
                code,
                message,
            } => {
                assert_eq!(code, 1);
                assert!(message.contains("not found"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            parse_response::<InfoResponse>("<html>oops</html>"),
            Err(FlickrError::Decode(_))
        ));
        assert!(matches!(
            parse_response::<InfoResponse>(r#"{"stat": "ok"}"#),
            Err(FlickrError::Decode(_))
        ));
    }

    #[test]
    fn test_info_without_urls() {
        let body = r#"{"photo": {"id": "1", "title": {"_content": "t"}}, "stat": "ok"}"#;
        let response: InfoResponse = parse_response(body).unwrap();
        assert!(matches!(photo_info_from(response), Err(FlickrError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_photo_info_over_http() {
        let (endpoint, server) = serve_once("200 OK", INFO_OK).await;
        let client = client_for(&endpoint, Some("tok"));

        let info = client.photo_info("12345").await.unwrap();
        assert_eq!(info.title, "Sunset");
        assert_eq!(info.url, "https://www.flickr.com/photos/someone/12345/");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /services/rest/?"));
        assert!(request_line.contains("method=flickr.photos.getInfo"));
        assert!(request_line.contains("api_key=key"));
        assert!(request_line.contains("photo_id=12345"));
        assert!(request_line.contains("format=json"));
        assert!(request_line.contains("nojsoncallback=1"));
        assert!(request_line.contains("auth_token=tok"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;
        let client = client_for(&endpoint, None);

        let err = client.photo_sizes("12345").await.unwrap_err();
        assert!(matches!(
            err,
            FlickrError::Status {
                status: 500
            }
        ));

        let request_line = server.await.unwrap();
        assert!(request_line.contains("method=flickr.photos.getSizes"));
        assert!(!request_line.contains("auth_token"));
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let mut settings = Settings::new();
        settings.insert("FLICKR_API_ENDPOINT", "http://127.0.0.1:9/");
        let config = FlickrTagConfig::from_settings(&mut settings);
        let client = FlickrClient::new(&config).unwrap();

        let err = client.photo_info("12345").await.unwrap_err();
        assert!(matches!(err, FlickrError::MissingApiKey));
    }
}
