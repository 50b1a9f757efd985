use super::*;

#[test]
fn blank_status_text_counts_as_absent() {
    assert_eq!(non_blank(String::new()), None);
    assert_eq!(non_blank("  ".to_owned()), None);
    assert_eq!(non_blank("Not Found".to_owned()).as_deref(), Some("Not Found"));
}
