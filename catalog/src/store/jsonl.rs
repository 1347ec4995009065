use super::*;
use std::path::Path;
use std::path::PathBuf;

/// JSONL-backed store. Each line encodes one `Project`; every mutation
/// rewrites the file except plain inserts, which append.
#[derive(Debug, Clone)]
pub struct JsonlProjectStore {
    path: PathBuf,
}

impl JsonlProjectStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<Vec<Project>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let mut items = Vec::new();
        for line in data.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Project>(line) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!("catalog: skipping unreadable line in {}: {e}", self.path.display()),
            }
        }
        Ok(items)
    }

    fn write_all(&self, items: &[Project]) -> anyhow::Result<()> {
        let mut out = Vec::new();
        write_lines(items, &mut out)?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, out)?;
        tracing::debug!("catalog: wrote {} projects to {}", items.len(), self.path.display());
        Ok(())
    }
}

impl ProjectStore for JsonlProjectStore {
    fn insert(&self, project: Project) -> anyhow::Result<()> {
        if self.read_all()?.iter().any(|p| p.id == project.id) {
            let id = &project.id;
            anyhow::bail!("insert: id already exists: {id}");
        }
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut line = serde_json::to_string(&project)?;
        line.push('\n');
        use std::io::Write as _;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(line.as_bytes())?;
        f.flush()?;
        Ok(())
    }

    fn update(&self, project: &Project) -> anyhow::Result<()> {
        let mut items = self.read_all()?;
        match items.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project.clone(),
            None => {
                let missing_id = &project.id;
                anyhow::bail!("update: id not found: {missing_id}");
            }
        }
        self.write_all(&items)
    }

    fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let items = self.read_all()?;
        let before = items.len();
        let items: Vec<_> = items.into_iter().filter(|p| p.id != id).collect();
        if items.len() == before {
            return Ok(false);
        }
        self.write_all(&items)?;
        Ok(true)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Project>> {
        Ok(self.read_all()?.into_iter().find(|p| p.id == id))
    }

    fn list(&self) -> anyhow::Result<Vec<Project>> {
        self.read_all()
    }

    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
        write_lines(&self.read_all()?, out)
    }

    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize> {
        let incoming = read_lines(input)?;
        let count = incoming.len();
        let mut items = self.read_all()?;
        for project in incoming {
            upsert(&mut items, project);
        }
        self.write_all(&items)?;
        Ok(count)
    }
}
