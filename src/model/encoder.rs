use serde::{Deserialize, Serialize};

/// One-hot encoder over a fixed number of categorical columns.
///
/// Categories are learned at fit time and kept sorted. A value that was
/// never seen encodes as all zeros for its column instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn fit<'a, I, const N: usize>(rows: I) -> Self
    where
        I: IntoIterator<Item = [&'a str; N]>,
    {
        let mut categories: Vec<Vec<String>> = vec![Vec::new(); N];
        for row in rows {
            for (col, value) in row.iter().enumerate() {
                categories[col].push(value.to_string());
            }
        }
        for cats in &mut categories {
            cats.sort();
            cats.dedup();
        }
        Self { categories }
    }

    /// Total width of the encoded output.
    pub fn n_outputs(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Appends the encoding of `values` to `out`.
    pub fn encode_into(&self, values: &[&str], out: &mut Vec<f64>) {
        for (cats, value) in self.categories.iter().zip(values) {
            let hit = cats.binary_search_by(|c| c.as_str().cmp(*value)).ok();
            out.extend((0..cats.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
    }

    /// Output column names such as `PropertyType=Villa`.
    pub fn feature_names(&self, columns: &[&str]) -> Vec<String> {
        self.categories
            .iter()
            .zip(columns)
            .flat_map(|(cats, col)| cats.iter().map(move |c| format!("{col}={c}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> OneHotEncoder {
        OneHotEncoder::fit([
            ["Villa", "Suburbs"],
            ["Apartment", "Downtown"],
            ["Villa", "Downtown"],
        ])
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let enc = OneHotEncoder::fit([
            ["Villa", "Suburbs"],
            ["Apartment", "Suburbs"],
            ["Villa", "Downtown"],
        ]);
        assert_eq!(enc.n_outputs(), 4);
        assert_eq!(
            enc.feature_names(&["T", "L"]),
            vec!["T=Apartment", "T=Villa", "L=Downtown", "L=Suburbs"]
        );
    }

    #[test]
    fn encodes_known_values() {
        let mut out = Vec::new();
        fitted().encode_into(&["Villa", "Downtown"], &mut out);
        assert_eq!(out, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn unknown_values_encode_as_zeros() {
        let mut out = Vec::new();
        fitted().encode_into(&["Castle", "Suburbs"], &mut out);
        assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn names_follow_encoding_order() {
        let names = fitted().feature_names(&["PropertyType", "Location"]);
        assert_eq!(
            names,
            vec![
                "PropertyType=Apartment",
                "PropertyType=Villa",
                "Location=Downtown",
                "Location=Suburbs"
            ]
        );
    }
}
