//! Where documents are read from and written to.

use crate::{CopyError, Result};
use bson::{doc, Document};
use mongodb::error::Result as MongoResult;
use mongodb::sync::Collection;

/// A collection which can be scanned as a whole.
pub trait DocSource {
    /// number of documents in the collection.
    fn count(&self) -> Result<u64>;

    /// Read every document into memory, in read order.
    ///
    /// The first document which can't be read aborts the scan with [CopyError::ReadError].
    fn scan(&self) -> Result<Vec<Document>>;
}

/// A collection which accepts new documents.
///
/// It's shared by all concurrent copy tasks.
pub trait DocSink: Send + Sync {
    /// Insert one document.  This is a plain insert, duplicate keys are errors.
    fn insert(&self, doc: Document) -> Result<()>;
}

/// Collect scanned documents, the first failed read becomes [CopyError::ReadError] carrying its
/// position.
pub fn collect_scan<I>(docs: I) -> Result<Vec<Document>>
where
    I: IntoIterator<Item = MongoResult<Document>>,
{
    docs.into_iter()
        .enumerate()
        .map(|(index, doc)| doc.map_err(|detail| CopyError::ReadError { index, detail }))
        .collect()
}

impl DocSource for Collection<Document> {
    fn count(&self) -> Result<u64> {
        Ok(self.count_documents(doc! {}, None)?)
    }

    fn scan(&self) -> Result<Vec<Document>> {
        collect_scan(self.find(doc! {}, None)?)
    }
}

impl DocSink for Collection<Document> {
    fn insert(&self, doc: Document) -> Result<()> {
        self.insert_one(doc, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::error::Error as MongoError;
    use std::io;

    fn broken() -> MongoError {
        MongoError::from(io::Error::new(io::ErrorKind::InvalidData, "corrupted bson"))
    }

    #[test]
    fn test_collect_scan_keeps_read_order() {
        let docs = collect_scan(vec![Ok(doc! {"_id": 1}), Ok(doc! {"_id": 2})]).unwrap();
        assert_eq!(docs, vec![doc! {"_id": 1}, doc! {"_id": 2}]);
    }

    #[test]
    fn test_collect_scan_stops_at_first_failure() {
        let err = collect_scan(vec![
            Ok(doc! {"_id": 1}),
            Ok(doc! {"_id": 2}),
            Err(broken()),
            Err(broken()),
        ])
        .unwrap_err();
        assert!(matches!(err, CopyError::ReadError { index: 2, .. }));
    }
}
