use crate::error::{Error, Result};
use reqwest;
use std::path::Path;
use std::time::Duration;

/// Browser-like user agent; some image hosts reject unknown clients
pub fn get_user_agent() -> &'static str {
    "Mozilla/5.0"
}

/// Build the HTTP client shared by every request of a run
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Pick a file extension (without dot) for a downloaded image.
///
/// The URL path wins when it names a known image type; otherwise the
/// declared content type is consulted, falling back to `png`.
pub fn infer_extension(url: &str, content_type: Option<&str>) -> Result<&'static str> {
    let parsed = reqwest::Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let path_ext = Path::new(parsed.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match path_ext.as_deref() {
        Some("png") => return Ok("png"),
        Some("jpg") | Some("jpeg") => return Ok("jpg"),
        Some("webp") => return Ok("webp"),
        _ => {}
    }

    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    if content_type.contains("jpeg") {
        Ok("jpg")
    } else if content_type.contains("webp") {
        Ok("webp")
    } else {
        Ok("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_comes_from_url_path_first() {
        let cases = [
            ("https://host/a/card.PNG", Some("image/webp"), "png"),
            ("https://host/card.jpeg?size=large", None, "jpg"),
            ("https://host/card.jpg#frag", None, "jpg"),
            ("https://host/card.webp", Some("image/png"), "webp"),
        ];
        for (url, content_type, expected) in cases {
            assert_eq!(infer_extension(url, content_type).expect("valid url"), expected, "{url}");
        }
    }

    #[test]
    fn extension_falls_back_to_content_type_then_png() {
        let cases = [
            ("https://host/image?id=7", Some("image/jpeg"), "jpg"),
            ("https://host/image.php", Some("Image/WEBP; charset=binary"), "webp"),
            ("https://host/image", Some("application/octet-stream"), "png"),
            ("https://host/image.gif", None, "png"),
        ];
        for (url, content_type, expected) in cases {
            assert_eq!(infer_extension(url, content_type).expect("valid url"), expected, "{url}");
        }
    }

    #[test]
    fn unparsable_urls_are_rejected() {
        assert!(matches!(
            infer_extension("http://", None),
            Err(Error::InvalidUrl { .. })
        ));
    }
}
