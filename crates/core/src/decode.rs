use percent_encoding::percent_decode_str;

/// Digest algorithms whose `label:` prefix is stripped from payload digests.
const DIGEST_ALGORITHMS: [&str; 4] = ["sha1", "sha256", "sha512", "md5"];

/// Percent-decode a URL as found in an index line or archive header.
///
/// `+` is left alone (it only means space in form encoding), and byte
/// sequences that don't decode to valid UTF-8 are replaced with U+FFFD.
///
/// ```
/// use warcdiff_core::decode_url;
///
/// assert_eq!(decode_url("http%3A%2F%2Fexample.com%2Ffoo%20bar"), "http://example.com/foo bar");
/// ```
pub fn decode_url(url: &str) -> String {
    percent_decode_str(url).decode_utf8_lossy().into_owned()
}

/// Remove a known `algorithm:` label from a payload digest, leaving only the
/// hash itself. Index files store bare hashes, archive headers store
/// labelled ones.
///
/// ```
/// use warcdiff_core::strip_digest_prefix;
///
/// assert_eq!(strip_digest_prefix("sha1:EGD47VYGZKWHT6PTS7HJN7D4TCEKSWVC"), "EGD47VYGZKWHT6PTS7HJN7D4TCEKSWVC");
/// assert_eq!(strip_digest_prefix("EGD47VYGZKWHT6PTS7HJN7D4TCEKSWVC"), "EGD47VYGZKWHT6PTS7HJN7D4TCEKSWVC");
/// ```
pub fn strip_digest_prefix(digest: &str) -> &str {
    if let Some((algorithm, hash)) = digest.split_once(':')
        && DIGEST_ALGORITHMS.iter().any(|known| known.eq_ignore_ascii_case(algorithm))
    {
        return hash;
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http%3A%2F%2Fexample.com%2Ffoo%20bar", "http://example.com/foo bar")]
    #[case("http://example.com/", "http://example.com/")]
    #[case("http://example.com/a+b", "http://example.com/a+b")]
    #[case("http://example.com/%E2%9C%93", "http://example.com/\u{2713}")]
    #[case("http://example.com/%FF", "http://example.com/\u{FFFD}")]
    // Incomplete escapes pass through untouched.
    #[case("http://example.com/100%", "http://example.com/100%")]
    #[case("http://example.com/%zz", "http://example.com/%zz")]
    #[case("", "")]
    fn test_decode_url(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_url(input), expected);
    }

    #[rstest]
    #[case("sha1:ABCDEF", "ABCDEF")]
    #[case("SHA1:ABCDEF", "ABCDEF")]
    #[case("sha256:ABCDEF", "ABCDEF")]
    #[case("md5:ABCDEF", "ABCDEF")]
    #[case("ABCDEF", "ABCDEF")]
    #[case("crc32:ABCDEF", "crc32:ABCDEF")]
    #[case("sha1:", "")]
    #[case("", "")]
    fn test_strip_digest_prefix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_digest_prefix(input), expected);
    }
}
