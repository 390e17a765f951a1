//! Label normalization and ground-truth versus classifier label matching.

/// Trim and lowercase a single label.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Split a comma-separated classifier output into normalized terms.
///
/// Empty segments are kept; callers decide whether they are meaningful.
pub fn classifier_terms(output: &str) -> impl Iterator<Item = String> + '_ {
    output.split(',').map(normalize_label)
}

/// Returns true when any classifier term contains the ground-truth label.
///
/// Exact equality is the degenerate case of containment. Only the ground
/// truth is searched for inside each term, never the reverse: `cat` matches
/// `wildcat`, while `wildcat` does not match `cat`. An empty ground truth
/// matches every output.
pub fn labels_match(ground_truth: &str, classifier_output: &str) -> bool {
    let label = normalize_label(ground_truth);
    classifier_terms(classifier_output).any(|term| term.contains(label.as_str()))
}

/// Derive a ground-truth label from an image file name.
///
/// `Boston_terrier_02259.jpg` becomes `boston terrier`: the name is cut at
/// the first `.`, lowercased, split on `_`, and only fully alphabetic tokens
/// are kept.
pub fn pet_label_from_filename(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    stem.to_lowercase()
        .split('_')
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .collect::<Vec<_>>()
        .join(" ")
}
