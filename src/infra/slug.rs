//! Slug generation for note filenames.

/// Converts a title to a filesystem-safe slug.
///
/// - Converts to lowercase
/// - Replaces spaces with underscores
/// - Strips every character outside `[a-z0-9_]`
///
/// Returns an empty string when the title has no safe characters; the store
/// substitutes a timestamped `untitled_*` name in that case.
///
/// # Examples
///
/// ```
/// use markbook::infra::slugify;
///
/// assert_eq!(slugify("My First Note"), "my_first_note");
/// assert_eq!(slugify("Recipe: Tomato Soup!"), "recipe_tomato_soup");
/// assert_eq!(slugify("日本語"), "");
/// ```
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('_')
            } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}
