/// Trims a text segment and collapses every internal whitespace run to one space.
///
/// Whitespace is Unicode whitespace, so non-breaking spaces, tabs and line
/// breaks from the page source all fold into a single ASCII space.
pub fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins region buffers so that consecutive regions are separated by at least one space
pub fn join_regions<'a>(regions: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for region in regions {
        if !joined.is_empty() && !joined.ends_with(char::is_whitespace) {
            joined.push(' ');
        }
        joined.push_str(region);
    }
    joined
}
