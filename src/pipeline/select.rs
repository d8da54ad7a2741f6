/// Field selector used by the text codec steps
///
/// True iff `field_key` contains any member of `skip_set` as a substring
/// (case-sensitive).
pub fn should_skip(field_key: &str, skip_set: &[&str]) -> bool {
    skip_set.iter().any(|skip| field_key.contains(skip))
}
