use crate::error::{CopyError, Result};
use crate::CopyConf;
use bson::Document;
use mongodb::sync::{Client, Collection, Database};

#[derive(Clone)]
/// A simple abstraction for doc copy connection.
///
/// Source and destination collections live in the same database of the same server.
pub struct Connection<'a> {
    inner: ConnectionInner<'a>,
}

impl<'a> Connection<'a> {
    /// create a new connection from given `config`.
    pub fn new(config: &'a CopyConf) -> Result<Connection<'a>> {
        let client = Client::with_uri_str(config.get_uri())?;
        Ok(Connection {
            inner: ConnectionInner { client, config },
        })
    }

    /// Check if we can reach the server and read the configured database.
    pub fn check_permissions(&self) -> Result<()> {
        self.inner.check_permissions()
    }

    /// get database which holds both collections.
    pub fn get_db(&self) -> Database {
        self.inner.client.database(self.inner.config.get_db())
    }

    /// get collection to copy from.
    pub fn src_coll(&self) -> Collection<Document> {
        self.get_db().collection(self.inner.config.get_src_coll())
    }

    /// get collection to copy into.
    pub fn dst_coll(&self) -> Collection<Document> {
        self.get_db().collection(self.inner.config.get_dst_coll())
    }

    /// get copy configuration.
    pub fn get_conf(&self) -> &CopyConf {
        self.inner.config
    }
}

#[derive(Clone)]
struct ConnectionInner<'a> {
    client: Client,
    config: &'a CopyConf,
}

impl<'a> ConnectionInner<'a> {
    pub fn check_permissions(&self) -> Result<()> {
        let db_name = self.config.get_db();
        let db = self.client.database(db_name);
        if let Err(e) = db.list_collection_names(None) {
            return Err(CopyError::PermissionError {
                uri: self.config.get_uri().to_string(),
                db: db_name.to_string(),
                detail: e,
            });
        }
        Ok(())
    }
}
