//! Helpers for `data:<mediatype>;base64,<payload>` urls
//!
//! These are plain string slicing. A malformed url produces an empty string rather than an
//! error, the provider rejects the resulting image part and that error is reported back.

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// The media type declared in the header of a base64 data url, e.g. `image/png`
pub fn media_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix(DATA_SCHEME)
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .map(|(media_type, _)| media_type)
        .filter(|media_type| !media_type.contains(','))
        .unwrap_or("")
}

/// The base64 payload following the first comma of a data url
pub fn base64_from_data_url(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_data_url() {
        let url = "data:image/png;base64,QUJD";
        assert_eq!(media_type_from_data_url(url), "image/png");
        assert_eq!(base64_from_data_url(url), "QUJD");
    }

    #[test]
    fn test_media_type_with_parameters_before_marker() {
        let url = "data:image/svg+xml;base64,PHN2Zz4=";
        assert_eq!(media_type_from_data_url(url), "image/svg+xml");
        assert_eq!(base64_from_data_url(url), "PHN2Zz4=");
    }

    #[test]
    fn test_malformed_urls_degrade_to_empty() {
        assert_eq!(media_type_from_data_url("https://example.com/cat.png"), "");
        assert_eq!(base64_from_data_url("https://example.com/cat.png"), "");
        assert_eq!(media_type_from_data_url("data:image/png,QUJD"), "");
        assert_eq!(base64_from_data_url("data:image/png,QUJD"), "QUJD");
    }
}
