//! Query shape accepted by `ProjectCatalog::get_projects` and the resolved
//! plan that actually filters, sorts and paginates.

use crate::types::Category;
use crate::types::Project;
use crate::types::Status;
use crate::validate::FieldError;
use crate::validate::MIN_YEAR;
use crate::validate::year_in_range;
use std::cmp::Ordering;
use std::str::FromStr;

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectFilters {
    /// A category wire name, or `"all"`.
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub year: Option<i32>,
    /// Matches when the project uses at least one of these.
    pub technologies: Option<Vec<String>>,
    /// Defaults to `published` when unset.
    pub status: Option<Status>,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
pub enum SortField {
    #[strum(serialize = "year")]
    Year,
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "featured")]
    Featured,
    #[strum(serialize = "createdAt", serialize = "created_at")]
    CreatedAt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectQuery {
    pub filters: ProjectFilters,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ProjectQuery {
    /// Validate the filters and turn the query into an executable plan.
    /// An unrecognised `sort_by` leaves the order untouched.
    pub fn resolve(&self, current_year: i32) -> Result<QueryPlan, Vec<FieldError>> {
        let mut errors = Vec::new();
        let f = &self.filters;

        let category = match f.category.as_deref().map(str::trim) {
            None | Some(ALL_CATEGORIES) => None,
            Some(raw) => match Category::from_str(raw) {
                Ok(c) => Some(c),
                Err(_) => {
                    errors.push(FieldError::new(
                        "filters.category",
                        format!("unsupported category: {raw}"),
                    ));
                    None
                }
            },
        };

        if let Some(year) = f.year
            && !year_in_range(year, current_year)
        {
            let max = current_year + 1;
            errors.push(FieldError::new(
                "filters.year",
                format!("must be between {MIN_YEAR} and {max}"),
            ));
        }

        let mut technologies = Vec::new();
        for (i, tech) in f.technologies.iter().flatten().enumerate() {
            let tech = tech.trim();
            if tech.is_empty() {
                errors.push(FieldError::new(
                    format!("filters.technologies[{i}]"),
                    "must not be blank",
                ));
            } else {
                technologies.push(tech.to_lowercase());
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let sort = self
            .sort_by
            .as_deref()
            .and_then(|s| SortField::from_str(s).ok())
            .map(|field| (field, self.sort_order.unwrap_or_default()));

        Ok(QueryPlan {
            category,
            featured: f.featured,
            year: f.year,
            technologies: (!technologies.is_empty()).then_some(technologies),
            status: f.status.unwrap_or(Status::Published),
            sort,
            offset: self.offset.unwrap_or(0),
            limit: self.limit,
        })
    }
}

/// A validated query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryPlan {
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub year: Option<i32>,
    /// Lowercased. An empty list in the query means no filter.
    pub technologies: Option<Vec<String>>,
    pub status: Status,
    pub sort: Option<(SortField, SortOrder)>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl QueryPlan {
    pub fn matches(&self, p: &Project) -> bool {
        if p.status != self.status {
            return false;
        }
        if let Some(c) = self.category
            && p.category != c
        {
            return false;
        }
        if let Some(f) = self.featured
            && p.featured != f
        {
            return false;
        }
        if let Some(y) = self.year
            && p.year != y
        {
            return false;
        }
        if let Some(wanted) = &self.technologies
            && !p
                .technologies
                .iter()
                .any(|t| wanted.contains(&t.to_lowercase()))
        {
            return false;
        }
        true
    }

    /// Filter, then stable-sort, then slice. Offsets past the end yield an
    /// empty page.
    pub fn run(&self, projects: Vec<Project>) -> Vec<Project> {
        let mut out: Vec<Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        if let Some((field, order)) = self.sort {
            out.sort_by(|a, b| {
                let ord = compare(field, a, b);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        out.into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

fn compare(field: SortField, a: &Project, b: &Project) -> Ordering {
    match field {
        SortField::Year => a.year.cmp(&b.year),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Featured => a.featured.cmp(&b.featured),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query(filters: ProjectFilters) -> ProjectQuery {
        ProjectQuery {
            filters,
            ..Default::default()
        }
    }

    #[test]
    fn default_query_lists_published_unsorted() {
        let plan = ProjectQuery::default().resolve(2025).unwrap();
        assert_eq!(plan.status, Status::Published);
        assert_eq!(plan.category, None);
        assert_eq!(plan.sort, None);
        assert_eq!(plan.offset, 0);
        assert_eq!(plan.limit, None);
    }

    #[test]
    fn all_category_disables_filter() {
        let plan = query(ProjectFilters {
            category: Some("all".into()),
            ..Default::default()
        })
        .resolve(2025)
        .unwrap();
        assert_eq!(plan.category, None);
    }

    #[test]
    fn malformed_filters_report_each_field() {
        let err = query(ProjectFilters {
            category: Some("print".into()),
            year: Some(1995),
            technologies: Some(vec!["React".into(), "  ".into()]),
            ..Default::default()
        })
        .resolve(2025)
        .unwrap_err();
        let fields: Vec<_> = err.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["filters.category", "filters.year", "filters.technologies[1]"]
        );
    }

    #[test]
    fn unknown_sort_field_is_ignored() {
        let q = ProjectQuery {
            sort_by: Some("popularity".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        assert_eq!(q.resolve(2025).unwrap().sort, None);
    }

    #[test]
    fn sort_field_accepts_both_spellings() {
        assert_eq!(SortField::from_str("createdAt").unwrap(), SortField::CreatedAt);
        assert_eq!(SortField::from_str("created_at").unwrap(), SortField::CreatedAt);
        let q = ProjectQuery {
            sort_by: Some("year".into()),
            ..Default::default()
        };
        assert_eq!(
            q.resolve(2025).unwrap().sort,
            Some((SortField::Year, SortOrder::Asc))
        );
    }

    #[test]
    fn query_deserializes_from_external_shape() {
        let q: ProjectQuery = serde_json::from_str(
            r#"{"filters":{"category":"web","technologies":["Rust"]},"sort_by":"title","sort_order":"desc","limit":2}"#,
        )
        .unwrap();
        assert_eq!(q.filters.category.as_deref(), Some("web"));
        assert_eq!(q.sort_order, Some(SortOrder::Desc));
        assert_eq!(q.limit, Some(2));
        assert_eq!(q.offset, None);
    }
}
