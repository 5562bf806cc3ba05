//! Destination record layout.
//!
//! Source collections carry legacy and variable shapes, so every record written to the
//! destination is rebuilt from [OUTPUT_SCHEMA]: same names, same order, whatever the source
//! document looked like.  Names which are not in the schema are dropped, names which are
//! missing in the source are written as `null`.

use bson::{Bson, Document};

/// How a field value is treated before it's written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// value is copied as is.
    Scalar,
    /// a `;` separated string which is split into a list of strings.
    MultiValue,
}

/// One field of the destination record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputField {
    /// field name, both in source and destination.
    pub name: &'static str,
    /// field kind.
    pub kind: FieldKind,
}

impl OutputField {
    const fn scalar(name: &'static str) -> Self {
        OutputField {
            name,
            kind: FieldKind::Scalar,
        }
    }

    const fn multi_value(name: &'static str) -> Self {
        OutputField {
            name,
            kind: FieldKind::MultiValue,
        }
    }
}

/// Ordered destination schema, downstream consumers rely on this exact order.
pub const OUTPUT_SCHEMA: &[OutputField] = &[
    // identity
    OutputField::scalar("_id"),
    OutputField::scalar("FName"),
    OutputField::scalar("MName"),
    OutputField::scalar("LName"),
    OutputField::scalar("Suffix"),
    OutputField::multi_value("PracticeArea"),
    OutputField::multi_value("FirmName"),
    // contact
    OutputField::scalar("Address"),
    OutputField::scalar("City"),
    OutputField::scalar("State"),
    OutputField::scalar("Zip"),
    OutputField::scalar("Email"),
    OutputField::scalar("Website"),
    OutputField::scalar("Phone"),
    OutputField::scalar("Mobile"),
    OutputField::scalar("Fax"),
    // crm ids
    OutputField::scalar("ContactLegacyID"),
    OutputField::scalar("CompanyLegacyID"),
    OutputField::scalar("SFContactID"),
    OutputField::scalar("SFCompanyID"),
    OutputField::scalar("Status"),
    // bar and ratings
    OutputField::scalar("Bar"),
    OutputField::scalar("BarYear"),
    OutputField::scalar("Rating"),
    OutputField::scalar("RatingFactors"),
    OutputField::scalar("FirmRating"),
    // affiliations
    OutputField::scalar("Languages"),
    OutputField::scalar("AdvancedDegrees"),
    OutputField::scalar("Sections"),
    OutputField::scalar("StateCourts"),
    OutputField::scalar("FederalCourts"),
    OutputField::scalar("BoardCerts"),
    OutputField::scalar("NationalCerts"),
    OutputField::scalar("StateAdmitted"),
    OutputField::scalar("Companies"),
    OutputField::scalar("Undergrad"),
    OutputField::scalar("CircuitDistrict"),
    OutputField::scalar("LawSchoolName"),
    OutputField::scalar("StateAdmission"),
    OutputField::scalar("Associations"),
    OutputField::scalar("AwardName"),
    OutputField::scalar("SourceName"),
    OutputField::scalar("Updated"),
    OutputField::scalar("Avvo_Rating"),
    OutputField::scalar("BIO"),
    OutputField::scalar("AttorneyID"),
    OutputField::scalar("MartinAwardURL"),
    OutputField::scalar("MartinPhotoURL"),
    OutputField::scalar("ClientRating"),
    OutputField::scalar("ReerRating"),
    // registry
    OutputField::scalar("ISLN"),
    OutputField::scalar("RegistryImageURL"),
    OutputField::scalar("AdmitYear"),
    OutputField::scalar("BarStatus"),
    OutputField::scalar("StateBarAdmissions"),
    OutputField::scalar("BarSource"),
    OutputField::scalar("RegistryData"),
    OutputField::scalar("NonFirmCompany"),
    OutputField::scalar("OriginalDataSource"),
    OutputField::scalar("GroupID"),
    OutputField::scalar("RecordID"),
];

/// Names of the fields which hold `;` separated values.
pub fn multi_value_fields() -> Vec<&'static str> {
    OUTPUT_SCHEMA
        .iter()
        .filter(|f| f.kind == FieldKind::MultiValue)
        .map(|f| f.name)
        .collect()
}

/// Project `doc` onto [OUTPUT_SCHEMA].
///
/// # Example
/// ```
/// use bson::{doc, Bson};
/// use mongo_doc_copy::schema::{reshape, OUTPUT_SCHEMA};
///
/// let out = reshape(&doc! {"LName": "Doe", "Legacy": 1});
/// assert_eq!(out.len(), OUTPUT_SCHEMA.len());
/// assert_eq!(out.get_str("LName").unwrap(), "Doe");
/// assert_eq!(out.get("FName"), Some(&Bson::Null));
/// assert!(!out.contains_key("Legacy"));
/// ```
pub fn reshape(doc: &Document) -> Document {
    let mut out = Document::new();
    for field in OUTPUT_SCHEMA {
        let value = doc.get(field.name).cloned().unwrap_or(Bson::Null);
        out.insert(field.name, value);
    }
    out
}
