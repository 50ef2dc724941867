/// Strips an oxidation-state qualifier from an element label, e.g. `Fe2+` → `Fe`.
pub fn strip_oxidation_state(label: &str) -> &str {
    let label = label.trim();
    let end = label
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(idx, _)| idx)
        .unwrap_or(label.len());
    &label[..end]
}

/// Whether the label carries a positive oxidation state.
pub fn is_cation(label: &str) -> bool {
    label.contains('+')
}
