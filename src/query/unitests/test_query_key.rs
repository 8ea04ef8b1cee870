use crate::QueryKey;

#[test]
fn test_prefix_match() {
    let all = QueryKey::contacts();
    let one = QueryKey::contact("1");

    assert!(all.starts_with(&all));
    assert!(one.starts_with(&QueryKey::new(["contact"])));
    assert!(!one.starts_with(&all));
    assert!(!all.starts_with(&one));
}

#[test]
fn test_display() {
    assert_eq!(QueryKey::contacts().to_string(), "[contacts]");
    assert_eq!(QueryKey::contact("42").to_string(), "[contact, 42]");
    assert_eq!(QueryKey::contact("42").parts(), &["contact".to_string(), "42".to_string()]);
}
