//! Search response decoding.

use crate::domain::{FetchError, GalleryItem, ResultPage};
use serde::Deserialize;

/// Longest upstream error text carried into a [`FetchError`].
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    total_hits: u64,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Hit {
    id: u64,
    #[serde(default)]
    tags: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    image_width: u32,
    #[serde(default)]
    image_height: u32,
    #[serde(default)]
    user: String,
    #[serde(default)]
    likes: u64,
}

impl From<Hit> for GalleryItem {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id,
            thumbnail_url: hit.webformat_url,
            caption: hit.tags,
            full_url: hit.large_image_url,
            width: hit.image_width,
            height: hit.image_height,
            author: hit.user,
            likes: hit.likes,
        }
    }
}

/// Turns a raw HTTP response into a result page.
///
/// # Errors
///
/// - [`FetchError::Network`] for any status outside `200..300`, carrying the
///   response body as the message
/// - [`FetchError::Decode`] when a successful body is not a search document
pub fn decode_response(status: u16, body: &[u8]) -> Result<ResultPage, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Network {
            status,
            message: error_message(body),
        });
    }

    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(ResultPage::new(
        response.hits.into_iter().map(GalleryItem::from).collect(),
        response.total_hits,
    ))
}

fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no response body".to_string();
    }

    let mut message: String = text.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
    if text.chars().count() > MAX_ERROR_MESSAGE_CHARS {
        message.push('…');
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "total": 4692,
        "totalHits": 500,
        "hits": [
            {
                "id": 195893,
                "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                "type": "photo",
                "tags": "blossom, bloom, flower",
                "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
                "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                "imageWidth": 4000,
                "imageHeight": 2250,
                "views": 7671,
                "likes": 5,
                "user": "Josch13"
            },
            {
                "id": 73424,
                "tags": "flower",
                "webformatURL": "https://pixabay.com/get/b_640.jpg",
                "largeImageURL": "https://pixabay.com/get/b_1280.jpg"
            }
        ]
    }"#;

    #[test]
    fn decodes_hits_and_total() {
        let page = decode_response(200, BODY.as_bytes()).unwrap();
        assert_eq!(page.total_hits, 500);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.id, 195_893);
        assert_eq!(first.caption, "blossom, bloom, flower");
        assert_eq!(first.thumbnail_url, "https://pixabay.com/get/35bbf209e13e39d2_640.jpg");
        assert_eq!(first.full_url, "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg");
        assert_eq!(first.dimensions().as_deref(), Some("4000x2250"));
        assert_eq!(first.author, "Josch13");

        assert_eq!(page.items[1].likes, 0);
        assert_eq!(page.items[1].dimensions(), None);
    }

    #[test]
    fn zero_hits_decode_to_empty_page() {
        let page = decode_response(200, br#"{"total":0,"totalHits":0,"hits":[]}"#).unwrap();
        assert_eq!(page, ResultPage::empty());
    }

    #[test]
    fn error_status_carries_body_text() {
        let err = decode_response(400, b"[ERROR 400] \"page\" is out of valid range.\n")
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Network {
                status: 400,
                message: "[ERROR 400] \"page\" is out of valid range.".to_string(),
            }
        );
    }

    #[test]
    fn empty_error_body_gets_placeholder() {
        let err = decode_response(502, b"").unwrap_err();
        assert_eq!(err.to_string(), "request failed with status 502: no response body");
    }

    #[test]
    fn long_error_body_is_truncated() {
        let body = "x".repeat(500);
        let FetchError::Network { message, .. } = decode_response(500, body.as_bytes()).unwrap_err()
        else {
            panic!("expected network error");
        };
        assert_eq!(message.chars().count(), MAX_ERROR_MESSAGE_CHARS + 1);
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn hit_without_image_urls_is_a_decode_error() {
        let err = decode_response(200, br#"{"totalHits":1,"hits":[{"id":1}]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
