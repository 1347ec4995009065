use crate::types::Project;

/// Repository contract behind `ProjectCatalog`. Backends keep insertion
/// order for `list`.
pub trait ProjectStore: Send + Sync {
    /// Fails if a project with the same id is already stored.
    fn insert(&self, project: Project) -> anyhow::Result<()>;
    /// Fails if the id is unknown.
    fn update(&self, project: &Project) -> anyhow::Result<()>;
    /// Returns whether a project was removed.
    fn delete(&self, id: &str) -> anyhow::Result<bool>;
    fn get(&self, id: &str) -> anyhow::Result<Option<Project>>;
    fn list(&self) -> anyhow::Result<Vec<Project>>;
    /// Write every project as one JSON line.
    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()>;
    /// Upsert projects from JSON lines, returning how many were read.
    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize>;
}

pub mod jsonl;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub(crate) fn write_lines(items: &[Project], out: &mut dyn std::io::Write) -> anyhow::Result<()> {
    for item in items {
        let line = serde_json::to_string(item)?;
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

pub(crate) fn read_lines(input: &mut dyn std::io::Read) -> anyhow::Result<Vec<Project>> {
    let mut data = String::new();
    input.read_to_string(&mut data)?;
    let mut out = Vec::new();
    for (n, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let project: Project = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("line {}: invalid project: {e}", n + 1))?;
        out.push(project);
    }
    Ok(out)
}

fn upsert(items: &mut Vec<Project>, project: Project) {
    match items.iter_mut().find(|p| p.id == project.id) {
        Some(slot) => *slot = project,
        None => items.push(project),
    }
}
