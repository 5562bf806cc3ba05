//! Tests against a running mongodb, run them with `cargo test -- --ignored`.
use bson::{doc, Bson, Document};
use mongo_doc_copy::schema::OUTPUT_SCHEMA;
use mongo_doc_copy::{Connection, CopyConf, CopyError, DocCopier, ThrottleMode};
use mongodb::sync::{Client, Database};

const TEST_DB: &str = "doc_copy_test";

struct Context {
    uri: String,
    db: Database,
}

impl Context {
    fn new() -> Self {
        let uri = option_env!("SYNCER_TEST_SOURCE").unwrap_or("mongodb://localhost:27017");
        let db = Client::with_uri_str(uri).unwrap().database(TEST_DB);
        Context {
            uri: uri.to_string(),
            db,
        }
    }

    fn conf(&self, throttle: ThrottleMode) -> CopyConf {
        CopyConf::new(
            self.uri.clone(),
            TEST_DB.to_string(),
            "source".to_string(),
            "target".to_string(),
            Some(8),
            Some(false),
            Some(throttle),
        )
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.db.drop(None).unwrap();
    }
}

#[test]
#[ignore]
fn test_copy_collection() {
    let context = Context::new();
    let source_coll = context.db.collection::<Document>("source");
    let target_coll = context.db.collection::<Document>("target");
    // setup.
    let docs: Vec<Document> = (0..1000)
        .map(|i| {
            doc! {
                "_id": i,
                "PracticeArea": "Tax; Litigation ",
                "FirmName": "Acme LLP",
                "Extra": 1,
            }
        })
        .collect();
    source_coll.insert_many(docs, None).unwrap();

    // execute.
    let conf = context.conf(ThrottleMode::Rounds);
    let conn = Connection::new(&conf).unwrap();
    conn.check_permissions().unwrap();
    let summary = DocCopier::new(conn).copy().unwrap();

    // check result in target collection.
    assert_eq!(summary.attempted, 1000);
    assert_eq!(summary.failed, 0);
    assert_eq!(target_coll.count_documents(None, None).unwrap(), 1000);
    let names: Vec<&str> = OUTPUT_SCHEMA.iter().map(|f| f.name).collect();
    for d in target_coll.find(None, None).unwrap() {
        let item = d.unwrap();
        let keys: Vec<&str> = item.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, names);
        assert_eq!(
            item.get_array("PracticeArea").unwrap(),
            &vec![Bson::from("Tax"), Bson::from("Litigation")]
        );
        assert_eq!(item.get_array("FirmName").unwrap(), &vec![Bson::from("Acme LLP")]);
        assert!(!item.contains_key("Extra"));
    }
}

#[test]
#[ignore]
fn test_copy_twice_reports_duplicates() {
    let context = Context::new();
    let source_coll = context.db.collection::<Document>("source");
    source_coll
        .insert_many(vec![doc! {"_id": 1, "LName": "Doe"}], None)
        .unwrap();

    let conf = context.conf(ThrottleMode::Pool);
    let copier = DocCopier::new(Connection::new(&conf).unwrap());
    let first = copier.copy().unwrap();
    assert_eq!((first.attempted, first.failed), (1, 0));
    let second = copier.copy().unwrap();
    assert_eq!((second.attempted, second.failed), (1, 1));
}

#[test]
#[ignore]
fn test_unreachable_server() {
    let conf = CopyConf::new(
        "mongodb://localhost:1/?serverSelectionTimeoutMS=200".to_string(),
        TEST_DB.to_string(),
        "source".to_string(),
        "target".to_string(),
        None,
        Some(false),
        None,
    );
    let conn = Connection::new(&conf).unwrap();
    let err = conn.check_permissions().unwrap_err();
    assert!(matches!(err, CopyError::PermissionError { .. }));
}
