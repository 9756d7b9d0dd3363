use url::Url;

use crate::{extractor::error::PlaylistError, model::PlaylistReference};

const LIST_PARAM: &str = "list";

/// Extracts the playlist id from a shareable playlist link.
///
/// An empty link is the "nothing entered yet" state and yields `Ok(None)`.
/// A link that does not parse as a URL fails with [`PlaylistError::InvalidLink`];
/// raising a user-facing warning for it is up to the caller.
/// A well-formed URL without a `list` parameter yields `Ok(None)`.
pub fn extract_playlist_id(link: &str) -> Result<Option<PlaylistReference>, PlaylistError> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(link).map_err(|e| PlaylistError::InvalidLink(format!("{link} ({e})")))?;

    Ok(url
        .query_pairs()
        .find(|(key, _)| key == LIST_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
        .map(PlaylistReference::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_list_param() {
        let reference =
            extract_playlist_id("https://www.youtube.com/playlist?list=PLabc123_-XYZ").unwrap();
        assert_eq!(reference, Some(PlaylistReference::new("PLabc123_-XYZ")));
    }

    #[test]
    fn test_extract_ignores_other_params_and_order() {
        let a = extract_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLx&index=3")
            .unwrap();
        let b = extract_playlist_id("https://www.youtube.com/watch?index=3&list=PLx&v=dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(a, Some(PlaylistReference::new("PLx")));
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_short_link() {
        let reference = extract_playlist_id("https://youtu.be/dQw4w9WgXcQ?list=PLshort").unwrap();
        assert_eq!(reference.map(|r| r.id), Some("PLshort".to_string()));
    }

    #[test]
    fn test_extract_decodes_value() {
        let reference = extract_playlist_id("https://example.com/?list=a%2Bb").unwrap();
        assert_eq!(reference.map(|r| r.id), Some("a+b".to_string()));
    }

    #[test]
    fn test_empty_link_is_absent() {
        assert_eq!(extract_playlist_id("").unwrap(), None);
        assert_eq!(extract_playlist_id("   ").unwrap(), None);
    }

    #[test]
    fn test_missing_list_param_is_absent() {
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            None
        );
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/playlist?list=").unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_link_is_error() {
        for link in ["not a url", "www.youtube.com/playlist?list=PLx", "http://"] {
            let err = extract_playlist_id(link).unwrap_err();
            assert!(matches!(err, PlaylistError::InvalidLink(_)), "{link}");
        }
    }
}
