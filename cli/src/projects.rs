use crate::config::StudioConfig;
use crate::print_json;
use std::path::Path;
use std::path::PathBuf;
use studio_catalog::ProjectCatalog;
use studio_catalog::factory;
use studio_catalog::query::ProjectFilters;
use studio_catalog::query::ProjectQuery;
use studio_catalog::query::SortOrder;
use studio_catalog::seed::sample_projects;
use studio_catalog::types::NewProject;
use studio_catalog::types::ProjectPatch;
use studio_catalog::types::Status;

/// CLI for portfolio catalog commands.
#[derive(Debug, clap::Parser)]
pub struct ProjectsCli {
    #[command(subcommand)]
    pub cmd: ProjectsCommand,
}

/// Catalog subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum ProjectsCommand {
    /// Query projects with filters, sorting and pagination.
    List(ListArgs),
    /// Show one project by id or slug.
    Show { id_or_slug: String },
    /// List featured, published projects.
    Featured {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search published projects by title, description, client or technology.
    Search { term: String },
    /// Show aggregate counts.
    Stats,
    /// Create a project from a JSON file (`-` reads stdin).
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Merge a JSON patch into an existing project.
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Remove a project by id.
    Delete { id: String },
    /// Load the sample portfolio.
    Seed,
    /// Export projects to stdout as JSONL.
    Export,
    /// Import projects from stdin as JSONL, validating every record first.
    Import,
    /// Compact a JSONL file, dropping unreadable lines and repeated ids.
    Compact {
        /// Input JSONL file to compact
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL file to write results
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Category wire name, or `all`.
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Repeatable; a project matches if it uses any of them.
    #[arg(long = "tech")]
    pub technologies: Vec<String>,
    /// Defaults to published.
    #[arg(long)]
    pub status: Option<Status>,
    /// year, title, featured or createdAt.
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long)]
    pub order: Option<SortOrder>,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub offset: Option<usize>,
}

impl From<ListArgs> for ProjectQuery {
    fn from(args: ListArgs) -> Self {
        ProjectQuery {
            filters: ProjectFilters {
                category: args.category,
                featured: args.featured,
                year: args.year,
                technologies: (!args.technologies.is_empty()).then_some(args.technologies),
                status: args.status,
            },
            sort_by: args.sort_by,
            sort_order: args.order,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

/// Execute a catalog command.
pub fn run(cli: ProjectsCli, config: &StudioConfig) -> anyhow::Result<()> {
    // Compaction works on a file directly and never opens the store.
    let cmd = match cli.cmd {
        ProjectsCommand::Compact { input, output } => {
            let (read, written) = factory::compact_jsonl(&input, &output)?;
            println!("Read {read} entries, wrote {written} entries");
            return Ok(());
        }
        other => other,
    };

    let store = factory::open_store(&config.catalog.dir, config.catalog.backend)?;
    let catalog = ProjectCatalog::new(store);
    match cmd {
        ProjectsCommand::List(args) => {
            print_json(&catalog.get_projects(&args.into())?)?;
        }
        ProjectsCommand::Show { id_or_slug } => {
            let found = match catalog.get_project_by_id(&id_or_slug)? {
                Some(p) => Some(p),
                None => catalog.get_project_by_slug(&id_or_slug)?,
            };
            match found {
                Some(p) => print_json(&p)?,
                None => anyhow::bail!("project not found: {id_or_slug}"),
            }
        }
        ProjectsCommand::Featured { limit } => {
            print_json(&catalog.get_featured_projects(limit)?)?;
        }
        ProjectsCommand::Search { term } => {
            print_json(&catalog.search_projects(&term)?)?;
        }
        ProjectsCommand::Stats => {
            print_json(&catalog.get_project_stats()?)?;
        }
        ProjectsCommand::Create { file } => {
            let input: NewProject = serde_json::from_str(&read_input(&file)?)?;
            print_json(&catalog.create_project(input)?)?;
        }
        ProjectsCommand::Update { id, file } => {
            let patch: ProjectPatch = serde_json::from_str(&read_input(&file)?)?;
            print_json(&catalog.update_project(&id, patch)?)?;
        }
        ProjectsCommand::Delete { id } => {
            let deleted = catalog.delete_project(&id)?;
            if !deleted {
                tracing::warn!("no project with id {id}");
            }
            print_json(&serde_json::json!({ "id": id, "deleted": deleted }))?;
        }
        ProjectsCommand::Seed => {
            let n = catalog.seed(sample_projects())?;
            println!("Seeded {n} projects");
        }
        ProjectsCommand::Export => {
            let mut out = std::io::stdout();
            catalog.store().export(&mut out)?;
        }
        ProjectsCommand::Import => {
            let mut input = std::io::stdin();
            let n = catalog.import(&mut input)?;
            println!("Imported {n} projects");
        }
        ProjectsCommand::Compact { .. } => {}
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut data = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut data)?;
        return Ok(data);
    }
    Ok(std::fs::read_to_string(path)?)
}
