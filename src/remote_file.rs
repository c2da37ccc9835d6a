use chrono::{DateTime, FixedOffset};
use reqwest::header::{HeaderMap, CONTENT_LENGTH, LAST_MODIFIED};

pub struct RemoteFileInfo {
    /// `None` when the server sent no usable `content-length`.
    pub total_length: Option<u64>,
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl RemoteFileInfo {
    pub fn new(head_map: &HeaderMap) -> Self {
        let mut total_length = None;
        let mut last_modified = None;
        if let Some(content_length) = head_map.get(CONTENT_LENGTH) {
            if let Ok(content_length_str) = content_length.to_str() {
                if let Ok(length) = content_length_str.trim().parse::<u64>() {
                    // a zero length gives nothing to measure progress against
                    if length > 0 {
                        total_length = Some(length);
                    }
                }
            }
        }
        if let Some(value) = head_map.get(LAST_MODIFIED) {
            if let Ok(value_str) = value.to_str() {
                if let Ok(datetime) = DateTime::parse_from_rfc2822(value_str) {
                    last_modified = Some(datetime);
                }
            }
        }

        Self {
            total_length,
            last_modified,
        }
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, LAST_MODIFIED};
    use crate::remote_file::RemoteFileInfo;

    #[test]
    fn test_remote_file_info() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("4096"));
        headers.insert(LAST_MODIFIED, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        let info = RemoteFileInfo::new(&headers);
        assert_eq!(info.total_length, Some(4096));
        assert_eq!(info.last_modified.unwrap().timestamp(), 1445412480);
    }

    #[test]
    fn test_missing_or_unusable_length() {
        let info = RemoteFileInfo::new(&HeaderMap::new());
        assert_eq!(info.total_length, None);
        assert!(info.last_modified.is_none());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert_eq!(RemoteFileInfo::new(&headers).total_length, None);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert_eq!(RemoteFileInfo::new(&headers).total_length, None);
    }
}
