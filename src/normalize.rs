//! Split `;` separated string fields into lists.

use bson::{Bson, Document};

/// Multi value delimiter.
pub const DELIMITER: char = ';';

/// Split `value` on [DELIMITER] and trim every piece.
///
/// Empty pieces are kept, so the result always has `count(';') + 1` elements.
pub fn split_multi_value(value: &str) -> Vec<String> {
    value
        .split(DELIMITER)
        .map(|piece| piece.trim().to_string())
        .collect()
}

/// Rewrite every field in `fields` which holds a string into a list of strings.
///
/// Absent, `null` or non-string values are left untouched, so applying it twice is the
/// same as applying it once.
///
/// # Example
/// ```
/// use bson::doc;
/// use mongo_doc_copy::normalize::normalize;
///
/// let mut d = doc! {"PracticeArea": "Tax; Litigation ", "FirmName": "Acme LLP"};
/// normalize(&mut d, &["PracticeArea", "FirmName"]);
/// assert_eq!(d, doc! {"PracticeArea": ["Tax", "Litigation"], "FirmName": ["Acme LLP"]});
/// ```
pub fn normalize(doc: &mut Document, fields: &[&str]) {
    for field in fields {
        let pieces = match doc.get(*field) {
            Some(Bson::String(s)) => split_multi_value(s),
            _ => continue,
        };
        doc.insert(*field, pieces);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, DateTime};

    const FIELDS: &[&str] = &["PracticeArea", "FirmName"];

    #[test]
    fn test_split_multi_value() {
        assert_eq!(split_multi_value("Tax; Litigation "), vec!["Tax", "Litigation"]);
        assert_eq!(split_multi_value("Acme LLP"), vec!["Acme LLP"]);
        assert_eq!(split_multi_value(""), vec![""]);
        assert_eq!(split_multi_value("a;;b;"), vec!["a", "", "b", ""]);
        assert_eq!(split_multi_value(" x ; x "), vec!["x", "x"]);
    }

    #[test]
    fn test_split_multi_value_piece_count() {
        for s in ["", ";", "a;b;c", " ; ; ", "no delimiter"] {
            let expected = s.matches(DELIMITER).count() + 1;
            assert_eq!(split_multi_value(s).len(), expected, "input: {:?}", s);
        }
    }

    #[test]
    fn test_normalize_string_fields() {
        let mut d = doc! {
            "PracticeArea": "Tax; Litigation ",
            "FirmName": "Acme LLP",
            "City": "a;b",
        };
        normalize(&mut d, FIELDS);
        assert_eq!(
            d,
            doc! {"PracticeArea": ["Tax", "Litigation"], "FirmName": ["Acme LLP"], "City": "a;b"}
        );
    }

    #[test]
    fn test_normalize_ignores_non_string_values() {
        let now = DateTime::now();
        let original = doc! {"PracticeArea": ["Tax ; Law"], "FirmName": null, "Other": now};
        let mut d = original.clone();
        normalize(&mut d, FIELDS);
        assert_eq!(d, original);

        let original = doc! {"PracticeArea": 12, "FirmName": {"name": "a;b"}};
        let mut d = original.clone();
        normalize(&mut d, FIELDS);
        assert_eq!(d, original);
    }

    #[test]
    fn test_normalize_absent_fields() {
        let mut d = doc! {"LName": "Doe"};
        normalize(&mut d, FIELDS);
        assert_eq!(d, doc! {"LName": "Doe"});
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = doc! {"PracticeArea": " a ;b;;", "FirmName": "x"};
        normalize(&mut once, FIELDS);
        let mut twice = once.clone();
        normalize(&mut twice, FIELDS);
        assert_eq!(once, twice);
    }
}
