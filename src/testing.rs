//! Store double for unit tests: a real in-memory database that can be told
//! to fail specific calls and remembers which calls were made.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::projects::{Project, ProjectFields};
use crate::store::{Database, ImageUpload, ProjectStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Insert,
    Update,
    Delete,
    Upload,
}

pub struct FlakyStore {
    pub db: Database,
    failing: Mutex<HashSet<Op>>,
    calls: Mutex<Vec<Op>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            db: Database::open_in_memory("http://localhost/storage", "project-images").unwrap(),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, op: Op) -> bool {
        self.calls().contains(&op)
    }

    fn enter(&self, op: Op) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(StoreError::Status {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for FlakyStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.enter(Op::List)?;
        self.db.list_projects()
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        self.enter(Op::Get)?;
        self.db.get_project(id)
    }

    async fn insert_project(&self, draft: &ProjectFields) -> Result<Project, StoreError> {
        self.enter(Op::Insert)?;
        self.db.insert_project(draft)
    }

    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<(), StoreError> {
        self.enter(Op::Update)?;
        self.db.update_project(id, fields)
    }

    async fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        self.enter(Op::Delete)?;
        self.db.delete_project(id)
    }

    async fn upload_image(&self, file: &ImageUpload) -> Result<String, StoreError> {
        self.enter(Op::Upload)?;
        self.db.put_blob(file)
    }
}
