use chrono::DateTime;
use chrono::Utc;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    Web,
    Mobile,
    Branding,
    UiUx,
    Fintech,
    VrAr,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Published,
    Draft,
    Archived,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Image {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CaseStudy {
    pub challenge: String,
    pub solution: String,
    pub results: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// A portfolio entry as stored by the catalog.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub client: String,
    pub year: i32,
    pub technologies: Vec<String>,
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudy>,
    pub status: Status,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller input for `ProjectCatalog::create_project`. The catalog assigns
/// the id and both timestamps; a missing slug is derived from the title.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NewProject {
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub client: String,
    pub year: i32,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub case_study: Option<CaseStudy>,
    #[serde(default = "default_status")]
    pub status: Status,
    #[serde(default)]
    pub featured: bool,
}

fn default_status() -> Status {
    Status::Draft
}

impl NewProject {
    pub fn into_project(self, id: String, now: DateTime<Utc>) -> Project {
        let slug = self
            .slug
            .unwrap_or_else(|| crate::validate::slugify(&self.title));
        Project {
            id,
            slug,
            title: self.title,
            description: self.description,
            category: self.category,
            client: self.client,
            year: self.year,
            technologies: self.technologies,
            images: self.images,
            case_study: self.case_study,
            status: self.status,
            featured: self.featured,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update merged over a stored project. Has no `id` field: ids never
/// change once assigned.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub client: Option<String>,
    pub year: Option<i32>,
    pub technologies: Option<Vec<String>>,
    pub images: Option<Vec<Image>>,
    /// `null` removes the case study; absent leaves it alone.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub case_study: Option<Option<CaseStudy>>,
    pub status: Option<Status>,
    pub featured: Option<bool>,
}

impl ProjectPatch {
    /// Merge onto `project`, leaving fields the patch does not carry intact.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(v) = self.slug {
            project.slug = v;
        }
        if let Some(v) = self.title {
            project.title = v;
        }
        if let Some(v) = self.description {
            project.description = v;
        }
        if let Some(v) = self.category {
            project.category = v;
        }
        if let Some(v) = self.client {
            project.client = v;
        }
        if let Some(v) = self.year {
            project.year = v;
        }
        if let Some(v) = self.technologies {
            project.technologies = v;
        }
        if let Some(v) = self.images {
            project.images = v;
        }
        if let Some(v) = self.case_study {
            project.case_study = v;
        }
        if let Some(v) = self.status {
            project.status = v;
        }
        if let Some(v) = self.featured {
            project.featured = v;
        }
    }
}
