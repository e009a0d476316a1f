use serde::{Deserialize, Serialize};

/// One predicted price for a (property type, location) group in a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "PropertyType")]
    pub property_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "PredictedPrice")]
    pub predicted_price: f64,
}

/// The records of one (property type, location) pair.
#[derive(Debug)]
pub struct RecordGroup<'a> {
    pub property_type: &'a str,
    pub location: &'a str,
    pub records: Vec<&'a ForecastRecord>,
}

impl RecordGroup<'_> {
    /// Legend label; only for display, two groups may share one.
    pub fn label(&self) -> String {
        format!("{} in {}", self.property_type, self.location)
    }
}

/// Splits records into (type, location) groups, keeping first-seen order.
pub fn group_records(records: &[ForecastRecord]) -> Vec<RecordGroup<'_>> {
    let mut groups: Vec<RecordGroup<'_>> = Vec::new();
    for rec in records {
        let key = (rec.property_type.as_str(), rec.location.as_str());
        match groups
            .iter_mut()
            .find(|g| (g.property_type, g.location) == key)
        {
            Some(group) => group.records.push(rec),
            None => groups.push(RecordGroup {
                property_type: key.0,
                location: key.1,
                records: vec![rec],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, kind: &str, loc: &str) -> ForecastRecord {
        ForecastRecord {
            year,
            property_type: kind.into(),
            location: loc.into(),
            predicted_price: 1.0,
        }
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let records = vec![
            rec(2026, "Villa", "Cairo"),
            rec(2026, "Flat", "Giza"),
            rec(2027, "Villa", "Cairo"),
        ];
        let groups = group_records(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "Villa in Cairo");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].label(), "Flat in Giza");
    }

    #[test]
    fn pairs_with_the_same_label_stay_apart() {
        let records = vec![
            rec(2026, "Villa in Old", "Town"),
            rec(2026, "Villa", "Old in Town"),
            rec(2027, "Villa in Old", "Town"),
        ];
        let groups = group_records(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), groups[1].label());
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].location, "Old in Town");
    }
}
