//! SQLite-backed document store.
//!
//! Each collection is a table holding the serialized document next to the
//! columns it is looked up by. The `deleted` column is authoritative for the
//! soft-delete flag: it is written on every update and copied onto the
//! document on every read, so flipping it does not require rewriting the JSON.

use super::{ResponseStore, StoreError, SurveyStore};
use rusqlite::{params, Connection, OptionalExtension, Params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use survey_common::model::page::{PageRequest, Paged};
use survey_common::model::response::Response;
use survey_common::model::survey::Survey;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS surveys (
        seq      INTEGER PRIMARY KEY AUTOINCREMENT,
        id       TEXT NOT NULL UNIQUE,
        owner_id TEXT NOT NULL,
        deleted  INTEGER NOT NULL DEFAULT 0,
        document TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS surveys_owner ON surveys (owner_id, deleted);

    CREATE TABLE IF NOT EXISTS responses (
        seq       INTEGER PRIMARY KEY AUTOINCREMENT,
        id        TEXT NOT NULL UNIQUE,
        survey_id TEXT NOT NULL,
        user_id   TEXT NOT NULL,
        document  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS responses_survey ON responses (survey_id);
    CREATE INDEX IF NOT EXISTS responses_user ON responses (user_id);
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn query_surveys<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Survey>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
    })?;

    let surveys = rows
        .map(|row| -> Result<Survey, StoreError> {
            let (document, deleted) = row?;
            let mut survey: Survey = serde_json::from_str(&document)?;
            survey.deleted = deleted;
            Ok(survey)
        })
        .collect();
    surveys
}

fn query_responses<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Response>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| row.get::<_, String>(0))?;

    let responses = rows
        .map(|row| -> Result<Response, StoreError> { Ok(serde_json::from_str(&row?)?) })
        .collect();
    responses
}

impl SurveyStore for SqliteStore {
    fn insert_survey(&self, survey: &Survey) -> Result<(), StoreError> {
        let document = serde_json::to_string(survey)?;
        self.conn()?.execute(
            "INSERT INTO surveys (id, owner_id, deleted, document) VALUES (?1, ?2, ?3, ?4)",
            params![&survey.id, &survey.owner_id, survey.deleted, document],
        )?;
        Ok(())
    }

    fn find_survey(&self, id: &str) -> Result<Option<Survey>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT document, deleted FROM surveys WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?)),
            )
            .optional()?;

        match row {
            Some((document, deleted)) => {
                let mut survey: Survey = serde_json::from_str(&document)?;
                survey.deleted = deleted;
                Ok(Some(survey))
            }
            None => Ok(None),
        }
    }

    fn find_surveys_by_owner(&self, owner_id: &str) -> Result<Vec<Survey>, StoreError> {
        let conn = self.conn()?;
        query_surveys(
            &conn,
            "SELECT document, deleted FROM surveys WHERE owner_id = ?1 AND deleted = 0 ORDER BY seq",
            params![owner_id],
        )
    }

    fn find_all_surveys(&self) -> Result<Vec<Survey>, StoreError> {
        let conn = self.conn()?;
        query_surveys(
            &conn,
            "SELECT document, deleted FROM surveys ORDER BY seq",
            params![],
        )
    }

    fn update_survey(&self, survey: &Survey) -> Result<bool, StoreError> {
        let document = serde_json::to_string(survey)?;
        let changed = self.conn()?.execute(
            "UPDATE surveys SET owner_id = ?2, deleted = ?3, document = ?4 WHERE id = ?1",
            params![&survey.id, &survey.owner_id, survey.deleted, document],
        )?;
        Ok(changed > 0)
    }

    fn set_survey_deleted(&self, id: &str, deleted: bool) -> Result<bool, StoreError> {
        let changed = self.conn()?.execute(
            "UPDATE surveys SET deleted = ?2 WHERE id = ?1",
            params![id, deleted],
        )?;
        Ok(changed > 0)
    }
}

impl ResponseStore for SqliteStore {
    fn insert_response(&self, response: &Response) -> Result<(), StoreError> {
        let document = serde_json::to_string(response)?;
        self.conn()?.execute(
            "INSERT INTO responses (id, survey_id, user_id, document) VALUES (?1, ?2, ?3, ?4)",
            params![&response.id, &response.survey_id, &response.user_id, document],
        )?;
        Ok(())
    }

    fn find_response(&self, id: &str) -> Result<Option<Response>, StoreError> {
        let document = self
            .conn()?
            .query_row(
                "SELECT document FROM responses WHERE id = ?1",
                params![id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    fn find_responses_by_survey(&self, survey_id: &str) -> Result<Vec<Response>, StoreError> {
        let conn = self.conn()?;
        query_responses(
            &conn,
            "SELECT document FROM responses WHERE survey_id = ?1 ORDER BY seq",
            params![survey_id],
        )
    }

    fn find_responses_by_user(
        &self,
        user_id: &str,
        request: PageRequest,
    ) -> Result<Paged<Response>, StoreError> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM responses WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let content = query_responses(
            &conn,
            "SELECT document FROM responses WHERE user_id = ?1 ORDER BY seq LIMIT ?2 OFFSET ?3",
            params![user_id, i64::from(request.size), offset],
        )?;

        Ok(Paged::new(content, request, total.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn survey(id: &str, owner: &str) -> Survey {
        Survey {
            id: id.to_string(),
            title: format!("Survey {id}"),
            description: None,
            pages: Vec::new(),
            owner_id: owner.to_string(),
            edit_access_user_ids: BTreeSet::new(),
            is_public: false,
            deleted: false,
        }
    }

    fn response(id: &str, survey_id: &str, user_id: &str) -> Response {
        Response {
            id: id.to_string(),
            user_id: user_id.to_string(),
            survey_id: survey_id.to_string(),
            answers: Vec::new(),
        }
    }

    #[test]
    fn survey_round_trip_and_soft_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_survey(&survey("s1", "alice")).unwrap();
        store.insert_survey(&survey("s2", "alice")).unwrap();
        store.insert_survey(&survey("s3", "bob")).unwrap();

        assert_eq!(store.find_survey("s1").unwrap(), Some(survey("s1", "alice")));
        assert_eq!(store.find_survey("missing").unwrap(), None);

        assert!(store.set_survey_deleted("s1", true).unwrap());
        assert!(!store.set_survey_deleted("missing", true).unwrap());
        assert!(store.find_survey("s1").unwrap().unwrap().deleted);

        let owned: Vec<String> = store
            .find_surveys_by_owner("alice")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(owned, vec!["s2"]);
        assert_eq!(store.find_all_surveys().unwrap().len(), 3);
    }

    #[test]
    fn update_replaces_document() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_survey(&survey("s1", "alice")).unwrap();

        let mut edited = survey("s1", "alice");
        edited.title = "Renamed".to_string();
        edited.is_public = true;
        assert!(store.update_survey(&edited).unwrap());
        assert_eq!(store.find_survey("s1").unwrap(), Some(edited));

        assert!(!store.update_survey(&survey("ghost", "alice")).unwrap());
    }

    #[test]
    fn responses_by_user_are_paged_in_insert_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..5 {
            store
                .insert_response(&response(&format!("r{i}"), "s1", "carol"))
                .unwrap();
        }
        store.insert_response(&response("other", "s2", "dave")).unwrap();

        let page = store
            .find_responses_by_user("carol", PageRequest { page: 1, size: 2 })
            .unwrap();
        let ids: Vec<&str> = page.content.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r3"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);

        let past_end = store
            .find_responses_by_user("carol", PageRequest { page: 9, size: 2 })
            .unwrap();
        assert!(past_end.is_empty());

        assert_eq!(store.find_responses_by_survey("s1").unwrap().len(), 5);
        assert_eq!(
            store.find_response("other").unwrap(),
            Some(response("other", "s2", "dave"))
        );
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surveys.sqlite");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert_survey(&survey("s1", "alice")).unwrap();
            store.insert_response(&response("r1", "s1", "bob")).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert!(reopened.find_survey("s1").unwrap().is_some());
        assert!(reopened.find_response("r1").unwrap().is_some());
    }
}
