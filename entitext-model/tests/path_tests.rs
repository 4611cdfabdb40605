use entitext_model::{is_valid_path, join_path, split_path};

#[test]
fn split_qualified_path() {
    assert_eq!(split_path("a::b::C"), (Some("a::b"), "C"));
}

#[test]
fn split_bare_name() {
    assert_eq!(split_path("C"), (None, "C"));
}

#[test]
fn join_is_inverse_of_split() {
    for path in ["a::b::C", "model::Person", "Person"] {
        let (package, name) = split_path(path);
        assert_eq!(join_path(package.unwrap_or(""), name), path);
    }
}

#[test]
fn valid_paths() {
    assert!(is_valid_path("model::domain::Person"));
    assert!(is_valid_path("_internal::X1"));
    assert!(is_valid_path("Person"));
}

#[test]
fn invalid_paths() {
    assert!(!is_valid_path(""));
    assert!(!is_valid_path("model::"));
    assert!(!is_valid_path("::Person"));
    assert!(!is_valid_path("model::1Person"));
    assert!(!is_valid_path("model:Person"));
    assert!(!is_valid_path("model::Per son"));
}
