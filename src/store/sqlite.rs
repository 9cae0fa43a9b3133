use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{object_key, ImageUpload, ProjectStore};
use crate::error::StoreError;
use crate::projects::{Project, ProjectFields};

const PROJECT_COLUMNS: &str = "id, title, description, detailed_content, content_blocks,
     role, duration, image_url, technologies, achievements, category";

/// Local SQLite backend: project records plus a blob table.
///
/// Blobs are addressed as `{public_base_url}/{bucket}/{key}`; serving them is
/// left to the host through [`Database::get_blob`].
pub struct Database {
    conn: Mutex<Connection>,
    public_base_url: String,
    bucket: String,
}

impl Database {
    pub fn open(path: &Path, public_base_url: &str, bucket: &str) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn, public_base_url, bucket)
    }

    pub fn open_in_memory(public_base_url: &str, bucket: &str) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, public_base_url, bucket)
    }

    fn with_connection(
        conn: Connection,
        public_base_url: &str,
        bucket: &str,
    ) -> Result<Self, StoreError> {
        let db = Self {
            conn: Mutex::new(conn),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                detailed_content TEXT,
                content_blocks TEXT NOT NULL DEFAULT '[]',
                role TEXT NOT NULL DEFAULT '',
                duration TEXT NOT NULL DEFAULT '',
                image_url TEXT,
                technologies TEXT NOT NULL DEFAULT '[]',
                achievements TEXT NOT NULL DEFAULT '[]',
                category TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                content_type TEXT NOT NULL,
                bytes BLOB NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM projects ORDER BY created_at ASC, rowid ASC",
            PROJECT_COLUMNS
        ))?;

        let rows = stmt.query_map([], row_to_project)?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row?);
        }

        Ok(projects)
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let project = conn
            .query_row(
                &format!("SELECT {} FROM projects WHERE id = ?1", PROJECT_COLUMNS),
                [id],
                row_to_project,
            )
            .optional()?;

        Ok(project)
    }

    pub fn insert_project(&self, fields: &ProjectFields) -> Result<Project, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO projects (id, title, description, detailed_content, content_blocks,
                role, duration, image_url, technologies, achievements, category,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                id,
                fields.title,
                fields.description,
                fields.detailed_content,
                serde_json::to_string(&fields.content_blocks)?,
                fields.role,
                fields.duration,
                fields.image_url,
                serde_json::to_string(&fields.technologies)?,
                serde_json::to_string(&fields.achievements)?,
                fields.category,
                now,
                now,
            ],
        )?;

        Ok(Project::stored(id, fields.clone()))
    }

    pub fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let now = chrono::Utc::now().timestamp_millis();

        let affected = conn.execute(
            "UPDATE projects SET title = ?1, description = ?2, detailed_content = ?3,
                content_blocks = ?4, role = ?5, duration = ?6, image_url = ?7,
                technologies = ?8, achievements = ?9, category = ?10, updated_at = ?11
             WHERE id = ?12",
            params![
                fields.title,
                fields.description,
                fields.detailed_content,
                serde_json::to_string(&fields.content_blocks)?,
                fields.role,
                fields.duration,
                fields.image_url,
                serde_json::to_string(&fields.technologies)?,
                serde_json::to_string(&fields.achievements)?,
                fields.category,
                now,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    pub fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
        Ok(())
    }

    pub fn put_blob(&self, file: &ImageUpload) -> Result<String, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let now = chrono::Utc::now().timestamp_millis();
        let key = object_key(&file.file_name, now);

        conn.execute(
            "INSERT OR REPLACE INTO blobs (key, content_type, bytes, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, file.content_type, file.bytes, now],
        )?;

        Ok(self.public_url(&key))
    }

    /// Content type and bytes of a stored blob.
    pub fn get_blob(&self, key: &str) -> Result<Option<(String, Vec<u8>)>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let blob = conn
            .query_row(
                "SELECT content_type, bytes FROM blobs WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(blob)
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, key)
    }
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    let id: String = row.get(0)?;
    Ok(Project::stored(
        id,
        ProjectFields {
            title: row.get(1)?,
            description: row.get(2)?,
            detailed_content: row.get(3)?,
            content_blocks: json_column(row, 4)?,
            role: row.get(5)?,
            duration: row.get(6)?,
            image_url: row.get(7)?,
            technologies: json_column(row, 8)?,
            achievements: json_column(row, 9)?,
            category: row.get(10)?,
        },
    ))
}

#[async_trait]
impl ProjectStore for Database {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Database::list_projects(self)
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Database::get_project(self, id)
    }

    async fn insert_project(&self, draft: &ProjectFields) -> Result<Project, StoreError> {
        let project = Database::insert_project(self, draft)?;
        tracing::info!(id = ?project.id, title = %project.fields.title, "[insert_project] stored");
        Ok(project)
    }

    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<(), StoreError> {
        Database::update_project(self, id, fields)?;
        tracing::info!(id, "[update_project] overwritten");
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        Database::delete_project(self, id)?;
        tracing::info!(id, "[delete_project] removed");
        Ok(())
    }

    async fn upload_image(&self, file: &ImageUpload) -> Result<String, StoreError> {
        let url = self.put_blob(file)?;
        tracing::info!(%url, bytes = file.bytes.len(), "[upload_image] stored blob");
        Ok(url)
    }
}
