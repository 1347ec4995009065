use crate::types::CaseStudy;
use crate::types::Image;
use crate::types::Project;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_YEAR: i32 = 2000;

static SLUG_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$"));

/// One violated rule, addressed by field path (`images[1].alt`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.as_ref().is_ok_and(|re| re.is_match(slug))
}

/// Lowercase ASCII alphanumeric runs of `title` joined by single dashes.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn year_in_range(year: i32, current_year: i32) -> bool {
    (MIN_YEAR..=current_year + 1).contains(&year)
}

/// Check every record invariant and report all violations.
pub fn validate_project(project: &Project, current_year: i32) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "title", &project.title);
    require_text(&mut errors, "description", &project.description);
    require_text(&mut errors, "client", &project.client);

    if !is_valid_slug(&project.slug) {
        errors.push(FieldError::new(
            "slug",
            "must be lowercase alphanumerics separated by single dashes",
        ));
    }
    if !year_in_range(project.year, current_year) {
        let max = current_year + 1;
        errors.push(FieldError::new(
            "year",
            format!("must be between {MIN_YEAR} and {max}"),
        ));
    }

    if project.images.is_empty() {
        errors.push(FieldError::new("images", "at least one image is required"));
    }
    for (i, image) in project.images.iter().enumerate() {
        validate_image(&mut errors, i, image);
    }

    if project.technologies.is_empty() {
        errors.push(FieldError::new(
            "technologies",
            "at least one technology is required",
        ));
    }
    for (i, tech) in project.technologies.iter().enumerate() {
        require_text(&mut errors, &format!("technologies[{i}]"), tech);
    }

    if let Some(cs) = &project.case_study {
        validate_case_study(&mut errors, cs);
    }

    errors
}

fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

fn validate_image(errors: &mut Vec<FieldError>, i: usize, image: &Image) {
    require_text(errors, &format!("images[{i}].id"), &image.id);
    require_text(errors, &format!("images[{i}].url"), &image.url);
    require_text(errors, &format!("images[{i}].alt"), &image.alt);
    if image.width == 0 {
        errors.push(FieldError::new(
            format!("images[{i}].width"),
            "must be greater than zero",
        ));
    }
    if image.height == 0 {
        errors.push(FieldError::new(
            format!("images[{i}].height"),
            "must be greater than zero",
        ));
    }
}

fn validate_case_study(errors: &mut Vec<FieldError>, cs: &CaseStudy) {
    require_text(errors, "case_study.challenge", &cs.challenge);
    require_text(errors, "case_study.solution", &cs.solution);
    require_text(errors, "case_study.results", &cs.results);
    for (i, metric) in cs.metrics.iter().enumerate() {
        require_text(errors, &format!("case_study.metrics[{i}].label"), &metric.label);
        require_text(errors, &format!("case_study.metrics[{i}].value"), &metric.value);
    }
}
