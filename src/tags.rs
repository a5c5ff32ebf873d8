// ru-morph Tag Predicates
// Substring analysis of OpenCorpora tag strings

/// The six Russian cases handled by declension, in product order.
pub const CASES: [&str; 6] = ["nomn", "gent", "datv", "accs", "ablt", "loct"];

/// Grammatical numbers, in product order.
pub const NUMBERS: [&str; 2] = ["sing", "plur"];

/// Grammatical genders.
pub const GENDERS: [&str; 3] = ["masc", "femn", "neut"];

/// Animacy values.
pub const ANIMACIES: [&str; 2] = ["anim", "inan"];

/// Part-of-speech token of an OpenCorpora tag string: everything up to
/// the first comma or space, or the whole string if neither occurs.
///
/// # Example
/// ```
/// # use ru_morph::tags::tag_pos;
/// assert_eq!(tag_pos("NOUN,inan,masc sing,nomn"), "NOUN");
/// assert_eq!(tag_pos("ADVB"), "ADVB");
/// ```
pub fn tag_pos(tag: &str) -> &str {
    match tag.find([',', ' ']) {
        Some(end) => &tag[..end],
        None => tag,
    }
}

/// First candidate grammeme that appears in `tag`, or an empty string
/// if none does.
///
/// OpenCorpora grammeme tokens are designed to be unambiguous
/// substrings of tag strings, so plain containment is sufficient.
pub fn tag_grammeme<'a>(tag: &str, candidates: &[&'a str]) -> &'a str {
    for &grammeme in candidates {
        if tag.contains(grammeme) {
            return grammeme;
        }
    }
    ""
}

/// Whether `tag` carries all of the requested grammemes. An empty
/// string for any parameter means "don't care".
pub fn tag_matches(tag: &str, case: &str, number: &str, gender: &str, animacy: &str) -> bool {
    [case, number, gender, animacy]
        .into_iter()
        .all(|grammeme| grammeme.is_empty() || tag.contains(grammeme))
}
