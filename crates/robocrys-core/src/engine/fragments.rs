/// An ordered sequence of sentence fragments, joined once with single spaces.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragments {
    parts: Vec<String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment; blank fragments are dropped.
    pub fn push(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if !fragment.trim().is_empty() {
            self.parts.push(fragment);
        }
    }

    pub fn extend(&mut self, other: Fragments) {
        self.parts.extend(other.parts);
    }

    /// Prepends `lead` to the first fragment, e.g. `"The structure contains "`.
    pub fn prefix_first(&mut self, lead: &str) {
        if let Some(first) = self.parts.first_mut() {
            first.insert_str(0, lead);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.parts
    }

    pub fn join(&self) -> String {
        self.parts.join(" ")
    }
}

impl FromIterator<String> for Fragments {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut fragments = Fragments::new();
        for fragment in iter {
            fragments.push(fragment);
        }
        fragments
    }
}

/// Upper-cases the first character, e.g. for a sentence opening with a number word.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fragments_are_skipped_when_joining() {
        let mut fragments = Fragments::new();
        fragments.push("Na is bonded to six Cl atoms.");
        fragments.push("");
        fragments.push("  ");
        fragments.push("All Na–Cl bond lengths are 2.84 Å.");
        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments.join(),
            "Na is bonded to six Cl atoms. All Na–Cl bond lengths are 2.84 Å."
        );
    }

    #[test]
    fn prefix_applies_to_first_fragment_only() {
        let mut fragments: Fragments =
            vec!["corner-sharing SiO4 tetrahedra.".to_string(), "Mg is bonded.".to_string()]
                .into_iter()
                .collect();
        fragments.prefix_first("The structure contains ");
        assert_eq!(
            fragments.as_slice()[0],
            "The structure contains corner-sharing SiO4 tetrahedra."
        );
        assert_eq!(fragments.as_slice()[1], "Mg is bonded.");
    }

    #[test]
    fn prefix_on_empty_sequence_is_a_no_op() {
        let mut fragments = Fragments::new();
        fragments.prefix_first("The structure contains ");
        assert!(fragments.is_empty());
    }

    #[test]
    fn capitalize_handles_empty_and_words() {
        assert_eq!(capitalize("two of the sheets"), "Two of the sheets");
        assert_eq!(capitalize(""), "");
    }
}
