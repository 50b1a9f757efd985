use super::*;
use serde_json::json;

#[test]
fn strings_pass_through_untouched() {
    assert_eq!(coerce_to_string(&json!("  spaced  ")), "  spaced  ");
}

#[test]
fn null_becomes_empty() {
    assert_eq!(coerce_to_string(&Value::Null), "");
}

#[test]
fn integral_floats_drop_the_fraction() {
    assert_eq!(coerce_to_string(&json!(42)), "42");
    assert_eq!(coerce_to_string(&json!(-7)), "-7");
    assert_eq!(coerce_to_string(&json!(3.0)), "3");
    assert_eq!(coerce_to_string(&json!(2.5)), "2.5");
}

#[test]
fn booleans_and_containers_render_like_a_page_script() {
    assert_eq!(coerce_to_string(&json!(true)), "true");
    assert_eq!(coerce_to_string(&json!([1, "a", null])), "1,a,");
    assert_eq!(coerce_to_string(&json!({"k": "v"})), "[object Object]");
}
