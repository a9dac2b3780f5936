use uri_value::{Query, QueryValue, Uri};

#[test]
fn parse_scalars() {
    let query = Query::parse("a=1&b=two&c=");
    assert_eq!(query.len(), 3);
    assert_eq!(query.get("a"), Some(&QueryValue::Single("1".into())));
    assert_eq!(query.get("b"), Some(&QueryValue::Single("two".into())));
    assert_eq!(query.get("c"), Some(&QueryValue::Single("".into())));
    assert_eq!(query.get("d"), None);
}

#[test]
fn parse_form_decoding() {
    let query = Query::parse("a+b=c%26d&e=f+g");
    assert_eq!(query.get("a b"), Some(&QueryValue::Single("c&d".into())));
    assert_eq!(query.get("e"), Some(&QueryValue::Single("f g".into())));
}

#[test]
fn parse_missing_value_and_empty_pairs() {
    let query = Query::parse("flag&&a=1&");
    assert_eq!(query.len(), 2);
    assert_eq!(query.get("flag"), Some(&QueryValue::Single("".into())));
}

#[test]
fn parse_duplicate_keys_last_wins() {
    let query = Query::parse("a=1&b=2&a=3");
    assert_eq!(query.len(), 2);
    assert_eq!(query.get("a"), Some(&QueryValue::Single("3".into())));
    // The overwritten key keeps its original position.
    assert_eq!(query.to_string(), "a=3&b=2");
}

#[test]
fn parse_bracketed_keys_accumulate() {
    let query = Query::parse("t[]=x&t[]=y");
    assert_eq!(
        query.get("t"),
        Some(&QueryValue::List(vec!["x".into(), "y".into()]))
    );

    // Indexed brackets append as well.
    let query = Query::parse("t[0]=x&t[1]=y");
    assert_eq!(
        query.get("t"),
        Some(&QueryValue::List(vec!["x".into(), "y".into()]))
    );

    // A sequence displaces an earlier scalar under the same key.
    let query = Query::parse("t=x&t[]=y");
    assert_eq!(query.get("t"), Some(&QueryValue::List(vec!["y".into()])));
}

#[test]
fn serialize_encodes_per_rfc3986() {
    let query: Query = [("a b", "c d")].into_iter().collect();
    assert_eq!(query.to_string(), "a%20b=c%20d");

    let query = Query::parse("name=ferret&tag[]=a&tag[]=b");
    assert_eq!(query.to_string(), "name=ferret&tag%5B%5D=a&tag%5B%5D=b");
}

#[test]
fn serialize_round_trips() {
    let query = Query::parse("a+b=c%26d&t[]=x&t[]=y%20z&plain=1");
    assert_eq!(Query::parse(&query.to_string()), query);
}

#[test]
fn insert_replaces_in_place() {
    let mut query = Query::parse("a=1&b=2");
    query.insert("a", "9");
    assert_eq!(query.to_string(), "a=9&b=2");
    query.insert("c", vec!["x".to_owned(), "y".to_owned()]);
    assert_eq!(query.to_string(), "a=9&b=2&c%5B%5D=x&c%5B%5D=y");
}

#[test]
fn remove_and_merge() {
    let mut query = Query::parse("a=1&b=2");
    query.remove("a");
    assert_eq!(query.to_string(), "b=2");
    query.remove("missing");
    assert_eq!(query.len(), 1);

    query.merge_missing(Query::parse("b=9&c=3"));
    assert_eq!(query.to_string(), "b=2&c=3");
}

#[test]
fn iterate_in_order() {
    let query = Query::parse("z=1&a=2&m=3");
    let keys: Vec<&str> = query.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn uri_query_operations() {
    let mut uri = Uri::parse("http://example.com/?a=1&b=2").unwrap();
    assert_eq!(
        uri.query_parameter("a"),
        Some(&QueryValue::Single("1".into()))
    );
    assert_eq!(uri.query_parameter("z"), None);
    assert_eq!(
        uri.query_parameter("z").and_then(QueryValue::as_str).unwrap_or("default"),
        "default"
    );

    uri.set_query_parameter("c", "3").remove_query_parameter("a");
    assert_eq!(uri.query_string(), "b=2&c=3");

    // Mapping append: existing keys win.
    uri.append_query(Query::parse("b=9&d=4"));
    assert_eq!(uri.query_string(), "b=2&c=3&d=4");

    // String append: the appended string wins on duplicates.
    uri.append_query_str("b=9&e=5");
    assert_eq!(uri.query_string(), "b=9&c=3&d=4&e=5");

    uri.set_query("fresh=1");
    assert_eq!(uri.absolute_url(), "http://example.com/?fresh=1");

    uri.set_query(Query::new());
    assert_eq!(uri.absolute_url(), "http://example.com/");
}
