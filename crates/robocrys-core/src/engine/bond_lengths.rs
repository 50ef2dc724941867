use super::error::DescribeError;
use crate::core::language::Inflector;

/// Decimal places kept when grouping bond lengths into discrete classes.
pub const ROUNDING_DECIMALS: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum BondLengthCategory {
    Single {
        distance: f64,
    },
    Uniform {
        distance: f64,
        count: usize,
    },
    Bimodal {
        short: f64,
        short_count: usize,
        long: f64,
        long_count: usize,
    },
    Spread {
        min: f64,
        max: f64,
    },
}

pub fn round_distance(distance: f64) -> f64 {
    let scale = 10f64.powi(ROUNDING_DECIMALS);
    (distance * scale).round() / scale
}

pub fn format_distance(distance: f64) -> String {
    format!("{:.2} Å", distance)
}

pub fn format_distance_range(min: f64, max: f64) -> String {
    format!("{:.2}–{:.2} Å", min, max)
}

/// Classifies a list of bond lengths after rounding to [`ROUNDING_DECIMALS`].
///
/// `Single` and `Uniform` keep the first raw distance, the other categories
/// report rounded values.
pub fn classify(distances: &[f64]) -> Result<BondLengthCategory, DescribeError> {
    let first = *distances.first().ok_or(DescribeError::NoBondLengths)?;
    if distances.len() == 1 {
        return Ok(BondLengthCategory::Single { distance: first });
    }

    let rounded: Vec<f64> = distances.iter().copied().map(round_distance).collect();
    let mut distinct = rounded.clone();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    let category = match distinct.as_slice() {
        [_] => BondLengthCategory::Uniform {
            distance: first,
            count: distances.len(),
        },
        [short, long] => BondLengthCategory::Bimodal {
            short: *short,
            short_count: rounded.iter().filter(|d| *d == short).count(),
            long: *long,
            long_count: rounded.iter().filter(|d| *d == long).count(),
        },
        [min, .., max] => BondLengthCategory::Spread {
            min: *min,
            max: *max,
        },
        [] => return Err(DescribeError::NoBondLengths),
    };
    Ok(category)
}

pub struct BondLengthDescriber<'a> {
    inflector: &'a dyn Inflector,
}

impl<'a> BondLengthDescriber<'a> {
    pub fn new(inflector: &'a dyn Inflector) -> Self {
        Self { inflector }
    }

    pub fn describe(
        &self,
        element: &str,
        bond_element: &str,
        distances: &[f64],
    ) -> Result<String, DescribeError> {
        let category = classify(distances).map_err(|_| DescribeError::EmptyDistances {
            element: element.to_string(),
            bond_element: bond_element.to_string(),
        })?;
        Ok(self.render(element, bond_element, &category))
    }

    pub fn render(&self, element: &str, bond_element: &str, category: &BondLengthCategory) -> String {
        let en = self.inflector;
        match *category {
            BondLengthCategory::Single { distance } => format!(
                "The {}–{} bond length is {}.",
                element,
                bond_element,
                format_distance(distance)
            ),
            BondLengthCategory::Uniform { distance, count } => format!(
                "{} {}–{} bond lengths are {}.",
                if count == 2 { "Both" } else { "All" },
                element,
                bond_element,
                format_distance(distance)
            ),
            BondLengthCategory::Bimodal {
                short,
                short_count,
                long,
                long_count,
            } => {
                // Singular only when the integer mean of the two counts is one.
                let length = en.plural("length", (short_count + long_count) / 2);
                format!(
                    "In this arrangement, there {} {} shorter ({}) and {} longer ({}) {}–{} bond {}.",
                    en.plural_verb("is", short_count),
                    en.number_to_words(short_count),
                    format_distance(short),
                    en.number_to_words(long_count),
                    format_distance(long),
                    element,
                    bond_element,
                    length
                )
            }
            BondLengthCategory::Spread { min, max } => format!(
                "There are a spread of {}–{} bond distances ranging from {}.",
                element,
                bond_element,
                format_distance_range(min, max)
            ),
        }
    }
}
