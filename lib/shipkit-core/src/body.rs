//! Body content types.

/// Content type for request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`), used for responses.
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`), used for request bodies.
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Match a `Content-Type` header value, ignoring parameters such as `charset`.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        let mime = value.split(';').next().unwrap_or_default().trim();
        if mime.eq_ignore_ascii_case(Self::Json.as_str()) {
            Some(Self::Json)
        } else if mime.eq_ignore_ascii_case(Self::FormUrlEncoded.as_str()) {
            Some(Self::FormUrlEncoded)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Json.to_string(), "application/json");
    }

    #[test]
    fn content_type_from_header() {
        assert_eq!(
            ContentType::from_header("application/json; charset=utf-8"),
            Some(ContentType::Json)
        );
        assert_eq!(
            ContentType::from_header("Application/X-WWW-Form-Urlencoded"),
            Some(ContentType::FormUrlEncoded)
        );
        assert_eq!(ContentType::from_header("text/html"), None);
        assert_eq!(ContentType::from_header(""), None);
    }
}
