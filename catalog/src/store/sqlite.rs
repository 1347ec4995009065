use super::*;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

fn init_db(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL,
            status TEXT NOT NULL,
            category TEXT NOT NULL,
            year INTEGER NOT NULL,
            featured INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            body_json TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_projects_slug ON projects(slug);
        CREATE INDEX IF NOT EXISTS idx_projects_status ON projects(status);
        CREATE INDEX IF NOT EXISTS idx_projects_category ON projects(category);
        "#,
    )?;
    Ok(())
}

fn open_conn(path: &std::path::Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

const UPSERT: &str = "INSERT INTO projects (
        id, slug, status, category, year, featured, created_at, updated_at, body_json
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(id) DO UPDATE SET
        slug=excluded.slug,
        status=excluded.status,
        category=excluded.category,
        year=excluded.year,
        featured=excluded.featured,
        created_at=excluded.created_at,
        updated_at=excluded.updated_at,
        body_json=excluded.body_json";

struct Cols {
    status: String,
    category: String,
    created_at: String,
    updated_at: String,
    body: String,
}

fn project_to_cols(p: &Project) -> anyhow::Result<Cols> {
    Ok(Cols {
        status: p.status.to_string(),
        category: p.category.to_string(),
        created_at: p.created_at.to_rfc3339(),
        updated_at: p.updated_at.to_rfc3339(),
        body: serde_json::to_string(p)?,
    })
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    let body: String = row.get(0)?;
    serde_json::from_str(&body).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// SQLite-backed store. The full record lives in `body_json`; the other
/// columns exist for indexing.
#[derive(Debug, Clone)]
pub struct SqliteProjectStore {
    path: std::path::PathBuf,
}

impl SqliteProjectStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProjectStore for SqliteProjectStore {
    fn insert(&self, project: Project) -> anyhow::Result<()> {
        let conn = open_conn(&self.path)?;
        let c = project_to_cols(&project)?;
        conn.execute(
            "INSERT INTO projects (
                id, slug, status, category, year, featured, created_at, updated_at, body_json
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                project.id,
                project.slug,
                c.status,
                c.category,
                project.year,
                project.featured,
                c.created_at,
                c.updated_at,
                c.body
            ],
        )?;
        Ok(())
    }

    fn update(&self, project: &Project) -> anyhow::Result<()> {
        let conn = open_conn(&self.path)?;
        let c = project_to_cols(project)?;
        let n = conn.execute(
            "UPDATE projects SET
                slug=?2, status=?3, category=?4, year=?5, featured=?6,
                created_at=?7, updated_at=?8, body_json=?9
             WHERE id=?1",
            params![
                project.id,
                project.slug,
                c.status,
                c.category,
                project.year,
                project.featured,
                c.created_at,
                c.updated_at,
                c.body
            ],
        )?;
        if n == 0 {
            let missing_id = &project.id;
            anyhow::bail!("update: id not found: {missing_id}");
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let conn = open_conn(&self.path)?;
        let n = conn.execute("DELETE FROM projects WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Project>> {
        let conn = open_conn(&self.path)?;
        let row = conn
            .query_row(
                "SELECT body_json FROM projects WHERE id=?1",
                params![id],
                row_to_project,
            )
            .optional()?;
        Ok(row)
    }

    fn list(&self) -> anyhow::Result<Vec<Project>> {
        let conn = open_conn(&self.path)?;
        let mut stmt = conn.prepare("SELECT body_json FROM projects ORDER BY rowid")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(row_to_project(row)?);
        }
        Ok(out)
    }

    fn export(&self, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
        write_lines(&self.list()?, out)
    }

    fn import(&self, input: &mut dyn std::io::Read) -> anyhow::Result<usize> {
        let incoming = read_lines(input)?;
        let mut conn = open_conn(&self.path)?;
        let tx = conn.transaction()?;
        for project in &incoming {
            let c = project_to_cols(project)?;
            tx.execute(
                UPSERT,
                params![
                    project.id,
                    project.slug,
                    c.status,
                    c.category,
                    project.year,
                    project.featured,
                    c.created_at,
                    c.updated_at,
                    c.body
                ],
            )?;
        }
        tx.commit()?;
        Ok(incoming.len())
    }
}
