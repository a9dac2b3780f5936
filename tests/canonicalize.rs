use uri_value::{unescape, Uri, DEFAULT_RESERVED};

#[test]
fn lowercases_host_only() {
    let mut uri = Uri::parse("HTTP://WWW.Example.COM/Path/File").unwrap();
    uri.canonicalize();
    // The scheme is left alone; paths stay case-sensitive.
    assert_eq!(uri.scheme(), "HTTP");
    assert_eq!(uri.host(), "www.example.com");
    assert_eq!(uri.path(), "/Path/File");
}

#[test]
fn normalizes_path_escapes() {
    let mut uri = Uri::parse("http://example.com/%7Euser/a%2fb%20c").unwrap();
    uri.canonicalize();
    // Unreserved octets decode, reserved ones stay encoded in uppercase.
    assert_eq!(uri.path(), "/~user/a%2Fb%20c");
    assert_eq!(uri.absolute_url(), "http://example.com/~user/a%2Fb%20c");
}

#[test]
fn encodes_raw_path_bytes() {
    let mut uri = Uri::new();
    uri.set_host("example.com").set_path("/a b/ä");
    uri.canonicalize();
    assert_eq!(uri.path(), "/a%20b/%C3%A4");
}

#[test]
fn is_idempotent() {
    let mut uri = Uri::parse("http://EXAMPLE.com/%7Euser/a%2fb%20c?q=1#f").unwrap();
    uri.canonicalize();
    let once = uri.absolute_url();
    uri.canonicalize();
    assert_eq!(uri.absolute_url(), once);
}

#[test]
fn chains_with_setters() {
    let mut uri = Uri::parse("http://EXAMPLE.com/A%2FB").unwrap();
    let url = uri.canonicalize().set_fragment("top").absolute_url();
    assert_eq!(url, "http://example.com/A%2FB#top");
}

#[test]
fn unescape_default_reserved() {
    // Reserved octets stay encoded, uppercased; others decode.
    assert_eq!(unescape("a%2fb%20c", DEFAULT_RESERVED), "a%2Fb c");
    assert_eq!(unescape("%3a%2F%3F", DEFAULT_RESERVED), "%3A%2F%3F");
    assert_eq!(unescape("%41%42%43", DEFAULT_RESERVED), "ABC");
}

#[test]
fn unescape_custom_reserved() {
    assert_eq!(unescape("%7Euser%2Fdocs", "%/"), "~user%2Fdocs");
    assert_eq!(unescape("%41%42", ""), "AB");
}

#[test]
fn unescape_is_total() {
    // Invalid or truncated escapes pass through untouched.
    assert_eq!(unescape("100%zz", DEFAULT_RESERVED), "100%zz");
    assert_eq!(unescape("tail%2", DEFAULT_RESERVED), "tail%2");
    assert_eq!(unescape("%", DEFAULT_RESERVED), "%");
    assert_eq!(unescape("%2525", DEFAULT_RESERVED), "%2525");
}
