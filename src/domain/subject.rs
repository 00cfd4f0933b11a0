/// Prefix an email subject with a configured tag.
///
/// A blank prefix, or a subject that already starts with the trimmed prefix, leaves
/// the subject untouched, so relayed or retried messages are not tagged twice.
pub fn add_prefix(subject: &str, prefix: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() || subject.starts_with(prefix) {
        return subject.to_owned();
    }
    format!("{prefix} {subject}")
}
