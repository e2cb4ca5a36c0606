/// Case-insensitive equality that maps each char to exactly one char, like an
/// ordinal ignore-case comparison. A char whose uppercase form is several chars
/// (`ß` becomes `SS`) is compared as itself, so `straße` never equals `STRASSE`.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| fold(x) == fold(y))
}

fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
