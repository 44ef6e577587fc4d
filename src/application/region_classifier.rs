// Region classifier - First-match substring labelling
use crate::domain::catalog::RegionLabel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegionClassifier {
    labels: Vec<RegionLabel>,
}

impl RegionClassifier {
    pub fn new(labels: Vec<RegionLabel>) -> Self {
        Self { labels }
    }

    /// Scan labels in table order and return the first one contained in
    /// `name`. Earlier entries win ties. Unmatched names label themselves
    /// with no color.
    pub fn classify(&self, name: &str) -> Classification {
        self.labels
            .iter()
            .find(|l| name.contains(l.label.as_str()))
            .map(|l| Classification {
                label: l.label.clone(),
                color: Some(l.color.clone()),
            })
            .unwrap_or_else(|| Classification {
                label: name.to_string(),
                color: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_region_labels;

    #[test]
    fn test_specific_label_checked_first() {
        let classifier = RegionClassifier::new(vec![
            RegionLabel::new("Part 75 from MW", "#111111"),
            RegionLabel::new("75 Blended", "#222222"),
        ]);
        let result = classifier.classify("4G Part 75 from MW");
        assert_eq!(result.label, "Part 75 from MW");
        assert_eq!(result.color.as_deref(), Some("#111111"));
    }

    #[test]
    fn test_order_decides_overlapping_labels() {
        // "JAVA" is a substring of "JAVA MW"; whichever comes first wins.
        let general_first = RegionClassifier::new(vec![
            RegionLabel::new("JAVA", "#aaaaaa"),
            RegionLabel::new("JAVA MW", "#bbbbbb"),
        ]);
        let specific_first = RegionClassifier::new(vec![
            RegionLabel::new("JAVA MW", "#bbbbbb"),
            RegionLabel::new("JAVA", "#aaaaaa"),
        ]);

        assert_eq!(general_first.classify("2G JAVA MW").label, "JAVA");
        assert_eq!(specific_first.classify("2G JAVA MW").label, "JAVA MW");
        assert_eq!(specific_first.classify("2G JAVA").label, "JAVA");
    }

    #[test]
    fn test_unmatched_name_labels_itself() {
        let classifier = RegionClassifier::new(default_region_labels());
        let result = classifier.classify("4G PAPUA");
        assert_eq!(result.label, "4G PAPUA");
        assert_eq!(result.color, None);
    }

    #[test]
    fn test_default_table_classifies_catalog_names() {
        let classifier = RegionClassifier::new(default_region_labels());
        assert_eq!(classifier.classify("2G Part 75 from SP").label, "Part 75 from SP");
        assert_eq!(classifier.classify("4G 75 Blended").label, "75 Blended");
        assert_eq!(classifier.classify("2G JAKARTA RAYA MW").label, "JAKARTA RAYA");
        assert_eq!(classifier.classify("4G NATIONAL SP").label, "NATIONAL");
    }
}
