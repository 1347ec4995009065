use super::*;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Ordered in-process list. Nothing outlives the value.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    items: Mutex<Vec<Project>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, Vec<Project>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn insert(&self, project: Project) -> anyhow::Result<()> {
        let mut items = self.items();
        if items.iter().any(|p| p.id == project.id) {
            let id = &project.id;
            anyhow::bail!("insert: id already exists: {id}");
        }
        items.push(project);
        Ok(())
    }

    fn update(&self, project: &Project) -> anyhow::Result<()> {
        let mut items = self.items();
        match items.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project.clone();
                Ok(())
            }
            None => {
                let missing_id = &project.id;
                anyhow::bail!("update: id not found: {missing_id}");
            }
        }
    }

    fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|p| p.id != id);
        Ok(items.len() != before)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Project>> {
        Ok(self.items().iter().find(|p| p.id == id).cloned())
    }

    fn list(&self) -> anyhow::Result<Vec<Project>> {
        Ok(self.items().clone())
    }

    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
        write_lines(&self.items(), out)
    }

    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize> {
        let incoming = read_lines(input)?;
        let count = incoming.len();
        let mut items = self.items();
        for project in incoming {
            upsert(&mut items, project);
        }
        Ok(count)
    }
}
