use crate::error::CatalogError;
use crate::error::Result;
use crate::query::ProjectQuery;
use crate::store::ProjectStore;
use crate::store::read_lines;
use crate::store::write_lines;
use crate::store::memory::InMemoryProjectStore;
use crate::types::Category;
use crate::types::NewProject;
use crate::types::Project;
use crate::types::ProjectPatch;
use crate::types::Status;
use crate::validate::FieldError;
use crate::validate::validate_project;
use chrono::DateTime;
use chrono::Datelike;
use chrono::Utc;
use std::collections::BTreeMap;
use std::collections::HashSet;
use strum::IntoEnumIterator;

type IdSource = Box<dyn Fn() -> String + Send + Sync>;
type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Counts computed on demand from the current store contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    pub archived: usize,
    pub featured: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_year: BTreeMap<i32, usize>,
}

/// Query and CRUD surface over a `ProjectStore`. Ids and timestamps are
/// always assigned here, never taken from callers.
pub struct ProjectCatalog {
    store: Box<dyn ProjectStore>,
    next_id: IdSource,
    now: Clock,
}

impl ProjectCatalog {
    pub fn new(store: Box<dyn ProjectStore>) -> Self {
        Self {
            store,
            next_id: Box::new(|| uuid::Uuid::new_v4().to_string()),
            now: Box::new(Utc::now),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryProjectStore::new()))
    }

    /// Replace the id generator. Collisions surface as
    /// `CatalogError::DuplicateId`.
    pub fn with_id_source(mut self, f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.next_id = Box::new(f);
        self
    }

    pub fn with_clock(mut self, f: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.now = Box::new(f);
        self
    }

    pub fn store(&self) -> &dyn ProjectStore {
        self.store.as_ref()
    }

    fn current_year(&self) -> i32 {
        (self.now)().year()
    }

    pub fn get_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let plan = query
            .resolve(self.current_year())
            .map_err(CatalogError::Validation)?;
        Ok(plan.run(self.store.list()?))
    }

    pub fn get_project_by_id(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.store.get(id)?)
    }

    pub fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        Ok(self.store.list()?.into_iter().find(|p| p.slug == slug))
    }

    pub fn get_featured_projects(&self, limit: Option<usize>) -> Result<Vec<Project>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|p| p.featured && p.status == Status::Published)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    pub fn get_published_projects(&self) -> Result<Vec<Project>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|p| p.status == Status::Published)
            .collect())
    }

    pub fn create_project(&self, data: NewProject) -> Result<Project> {
        let id = (self.next_id)();
        if self.store.get(&id)?.is_some() {
            return Err(CatalogError::DuplicateId(id));
        }
        let project = data.into_project(id, (self.now)());
        self.check(&project)?;
        self.store.insert(project.clone())?;
        tracing::info!(id = %project.id, slug = %project.slug, "created project");
        Ok(project)
    }

    /// Merge `patch` over the stored record and persist it only if the
    /// merged record is valid.
    pub fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        let Some(existing) = self.store.get(id)? else {
            return Err(CatalogError::NotFound(id.to_string()));
        };
        let mut merged = existing;
        patch.apply_to(&mut merged);
        merged.updated_at = (self.now)();
        self.check(&merged)?;
        self.store.update(&merged)?;
        tracing::info!(id = %merged.id, "updated project");
        Ok(merged)
    }

    pub fn delete_project(&self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id)?;
        if removed {
            tracing::info!(%id, "deleted project");
        }
        Ok(removed)
    }

    /// Case-insensitive substring match over title, description, client and
    /// technologies of published projects.
    pub fn search_projects(&self, term: &str) -> Result<Vec<Project>> {
        let needle = term.trim().to_lowercase();
        Ok(self
            .get_published_projects()?
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.client.to_lowercase().contains(&needle)
                    || p
                        .technologies
                        .iter()
                        .any(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }

    pub fn get_project_stats(&self) -> Result<ProjectStats> {
        let mut stats = ProjectStats {
            by_category: Category::iter().map(|c| (c, 0)).collect(),
            ..Default::default()
        };
        for p in self.store.list()? {
            stats.total += 1;
            match p.status {
                Status::Published => stats.published += 1,
                Status::Draft => stats.draft += 1,
                Status::Archived => stats.archived += 1,
            }
            if p.featured {
                stats.featured += 1;
            }
            *stats.by_category.entry(p.category).or_default() += 1;
            *stats.by_year.entry(p.year).or_default() += 1;
        }
        Ok(stats)
    }

    /// Load records that already carry ids and timestamps. The whole batch
    /// is checked before anything is inserted; ids and slugs must be new.
    pub fn seed(&self, projects: Vec<Project>) -> Result<usize> {
        self.check_batch(&projects, false)?;
        let count = projects.len();
        for p in projects {
            self.store.insert(p)?;
        }
        tracing::info!(count, "seeded catalog");
        Ok(count)
    }

    /// Upsert projects from JSON lines. Records are held to the same rules
    /// as `create_project`; one bad line rejects the whole batch.
    pub fn import(&self, input: &mut dyn std::io::Read) -> Result<usize> {
        let projects = read_lines(input)?;
        self.check_batch(&projects, true)?;
        let mut buf = Vec::new();
        write_lines(&projects, &mut buf)?;
        let count = self.store.import(&mut buf.as_slice())?;
        tracing::info!(count, "imported projects");
        Ok(count)
    }

    /// Validate a batch and check its ids and slugs against each other and
    /// the store. With `replace_existing`, ids already stored are updates.
    fn check_batch(&self, projects: &[Project], replace_existing: bool) -> Result<()> {
        let year = self.current_year();
        let existing = self.store.list()?;
        let batch_ids: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        let mut seen_ids = HashSet::new();
        let mut seen_slugs = HashSet::new();
        let mut errors = Vec::new();
        for (i, p) in projects.iter().enumerate() {
            let at = |field: &str| format!("projects[{i}].{field}");
            for e in validate_project(p, year) {
                errors.push(FieldError::new(at(&e.field), e.message));
            }
            if !seen_ids.insert(p.id.as_str()) {
                errors.push(FieldError::new(at("id"), "is repeated in the batch"));
            } else if !replace_existing && existing.iter().any(|q| q.id == p.id) {
                errors.push(FieldError::new(at("id"), "already exists"));
            }
            if !seen_slugs.insert(p.slug.as_str()) {
                errors.push(FieldError::new(at("slug"), "is repeated in the batch"));
            } else if existing.iter().any(|q| {
                q.slug == p.slug
                    && q.id != p.id
                    && !(replace_existing && batch_ids.contains(q.id.as_str()))
            }) {
                errors.push(FieldError::new(at("slug"), "is already in use"));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = errors.len(), "batch rejected");
            Err(CatalogError::Validation(errors))
        }
    }

    fn check(&self, project: &Project) -> Result<()> {
        let mut errors = validate_project(project, self.current_year());
        let taken = self
            .store
            .list()?
            .iter()
            .any(|p| p.slug == project.slug && p.id != project.id);
        if taken {
            errors.push(FieldError::new("slug", "is already in use"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(id = %project.id, errors = errors.len(), "project rejected");
            Err(CatalogError::Validation(errors))
        }
    }
}
