/// Returns the singular form of an English word.
///
/// Relation names are usually plural for "many" relations (`children`,
/// `parentIds`) and the key naming conventions are built on the singular.
pub fn singular(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    pluralizer::pluralize(word, 1, false)
}
