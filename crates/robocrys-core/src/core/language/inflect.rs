use phf::{Map, Set, phf_map, phf_set};

/// The linguistic formatting capability used by every describer.
///
/// Implementations must be pure: the same inputs always give the same text.
/// The describers receive an inflector explicitly, so tests can substitute a
/// double with simpler output.
pub trait Inflector {
    /// Spells out a count, e.g. `6` → `"six"`.
    fn number_to_words(&self, n: usize) -> String;

    /// The form of `noun` agreeing with `count`; the singular when `count == 1`.
    fn plural(&self, noun: &str, count: usize) -> String;

    /// Prefixes the indefinite article matching the phrase's leading sound.
    fn with_article(&self, phrase: &str) -> String;

    /// The form of a third-person verb agreeing with `count`, e.g. `is` → `are`.
    fn plural_verb(&self, verb: &str, count: usize) -> String;

    /// Joins items into a list using the given conjunction.
    fn join_with(&self, items: &[String], conjunction: &str) -> String;

    fn join(&self, items: &[String]) -> String {
        self.join_with(items, "and")
    }
}

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

static IRREGULAR_PLURALS: Map<&'static str, &'static str> = phf_map! {
    "tetrahedron" => "tetrahedra",
    "octahedron" => "octahedra",
    "polyhedron" => "polyhedra",
    "cuboctahedron" => "cuboctahedra",
    "icosahedron" => "icosahedra",
    "vertex" => "vertices",
    "matrix" => "matrices",
    "index" => "indices",
    "axis" => "axes",
    "datum" => "data",
    "child" => "children",
    "person" => "people",
    "man" => "men",
    "woman" => "women",
};

static UNINFLECTED_NOUNS: Set<&'static str> = phf_set! {
    "series", "species", "sheep", "data",
};

static IRREGULAR_VERBS: Map<&'static str, &'static str> = phf_map! {
    "is" => "are",
    "was" => "were",
    "has" => "have",
    "does" => "do",
};

const AN_CONSONANT_PREFIXES: [&str; 4] = ["hour", "honest", "honor", "heir"];

const A_VOWEL_PREFIXES: [&str; 10] = [
    "uni", "use", "usu", "uti", "ubiq", "ura", "uro", "eu", "one", "once",
];

/// Letters whose spoken name starts with a vowel sound.
const SPOKEN_AN_LETTERS: [char; 12] = ['a', 'e', 'f', 'h', 'i', 'l', 'm', 'n', 'o', 'r', 's', 'x'];

/// The default English inflector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct English;

impl English {
    fn below_thousand(n: usize) -> String {
        let hundreds = n / 100;
        let rest = n % 100;
        let tail = Self::below_hundred(rest);
        match (hundreds, rest) {
            (0, _) => tail,
            (h, 0) => format!("{} hundred", ONES[h]),
            (h, _) => format!("{} hundred and {}", ONES[h], tail),
        }
    }

    fn below_hundred(n: usize) -> String {
        if n < 20 {
            ONES[n].to_string()
        } else if n % 10 == 0 {
            TENS[n / 10].to_string()
        } else {
            format!("{}-{}", TENS[n / 10], ONES[n % 10])
        }
    }

    fn pluralize_word(word: &str) -> String {
        let lower = word.to_ascii_lowercase();
        if UNINFLECTED_NOUNS.contains(lower.as_str()) {
            return word.to_string();
        }
        if let Some(plural) = IRREGULAR_PLURALS.get(lower.as_str()) {
            return plural.to_string();
        }

        let ends_with_consonant_y = lower.ends_with('y')
            && lower
                .chars()
                .rev()
                .nth(1)
                .is_some_and(|c| !"aeiou".contains(c));

        if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
            format!("{}es", word)
        } else if ends_with_consonant_y {
            format!("{}ies", &word[..word.len() - 1])
        } else {
            format!("{}s", word)
        }
    }
}

impl Inflector for English {
    fn number_to_words(&self, n: usize) -> String {
        if n == 0 {
            return ONES[0].to_string();
        }

        let mut chunks = Vec::new();
        let mut remaining = n;
        while remaining > 0 {
            chunks.push(remaining % 1000);
            remaining /= 1000;
        }

        let mut words: Vec<String> = Vec::new();
        for (scale, &chunk) in chunks.iter().enumerate().rev() {
            if chunk == 0 {
                continue;
            }
            let chunk_words = Self::below_thousand(chunk);
            if scale == 0 {
                words.push(chunk_words);
            } else {
                words.push(format!("{} {}", chunk_words, SCALES[scale]));
            }
        }

        let lowest = chunks[0];
        if chunks.len() > 1 && lowest > 0 && lowest < 100 {
            let last = words.pop().unwrap_or_default();
            format!("{} and {}", words.join(", "), last)
        } else {
            words.join(", ")
        }
    }

    fn plural(&self, noun: &str, count: usize) -> String {
        if count == 1 || noun.is_empty() {
            return noun.to_string();
        }
        match noun.rsplit_once(' ') {
            Some((head, last)) => format!("{} {}", head, Self::pluralize_word(last)),
            None => Self::pluralize_word(noun),
        }
    }

    fn with_article(&self, phrase: &str) -> String {
        let mut lower = phrase.trim_start().to_ascii_lowercase();

        // Leading numerals take the article of their spoken form: "an 8-coordinate".
        let digits: String = lower.chars().take_while(char::is_ascii_digit).collect();
        if let Ok(n) = digits.parse::<usize>() {
            lower = self.number_to_words(n);
        }

        // A lone leading letter is read by its name: "an L-shaped", "a T-shaped".
        let mut chars = lower.chars();
        if let (Some(first), next) = (chars.next(), chars.next()) {
            if first.is_ascii_alphabetic() && !next.is_some_and(|c| c.is_ascii_alphabetic()) {
                let use_an = SPOKEN_AN_LETTERS.contains(&first);
                return format!("{} {}", if use_an { "an" } else { "a" }, phrase);
            }
        }

        let starts_with_vowel = lower.starts_with(['a', 'e', 'i', 'o', 'u']);

        let use_an = if AN_CONSONANT_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            true
        } else if A_VOWEL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            false
        } else {
            starts_with_vowel
        };

        format!("{} {}", if use_an { "an" } else { "a" }, phrase)
    }

    fn plural_verb(&self, verb: &str, count: usize) -> String {
        if count == 1 {
            return verb.to_string();
        }
        if let Some(plural) = IRREGULAR_VERBS.get(verb) {
            return plural.to_string();
        }
        if let Some(stem) = verb.strip_suffix("ies") {
            return format!("{}y", stem);
        }
        if ["sses", "shes", "ches", "xes", "zes"]
            .iter()
            .any(|s| verb.ends_with(s))
        {
            return verb[..verb.len() - 2].to_string();
        }
        match verb.strip_suffix('s') {
            Some(stem) if !stem.ends_with('s') => stem.to_string(),
            _ => verb.to_string(),
        }
    }

    fn join_with(&self, items: &[String], conjunction: &str) -> String {
        match items {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{} {} {}", first, conjunction, second),
            [head @ .., last] => format!("{}, {} {}", head.join(", "), conjunction, last),
        }
    }
}
