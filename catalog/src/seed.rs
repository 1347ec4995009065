//! The studio's sample portfolio, used to populate empty catalogs.

use crate::types::CaseStudy;
use crate::types::Category;
use crate::types::Image;
use crate::types::Metric;
use crate::types::Project;
use crate::types::Status;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn image(slug: &str, n: usize, alt: &str) -> Image {
    Image {
        id: format!("{slug}-img-{n}"),
        url: format!("/images/projects/{slug}/{n}.jpg"),
        alt: alt.to_string(),
        width: 1600,
        height: 1000,
        caption: None,
    }
}

struct Entry<'a> {
    id: &'a str,
    slug: &'a str,
    title: &'a str,
    description: &'a str,
    category: Category,
    client: &'a str,
    year: i32,
    technologies: &'a [&'a str],
    status: Status,
    featured: bool,
    created: (i32, u32, u32),
}

impl Entry<'_> {
    fn build(self, images: Vec<Image>, case_study: Option<CaseStudy>) -> Project {
        let created = at(self.created.0, self.created.1, self.created.2);
        Project {
            id: self.id.to_string(),
            slug: self.slug.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category,
            client: self.client.to_string(),
            year: self.year,
            technologies: self.technologies.iter().map(|t| t.to_string()).collect(),
            images,
            case_study,
            status: self.status,
            featured: self.featured,
            created_at: created,
            updated_at: created,
        }
    }
}

pub fn sample_projects() -> Vec<Project> {
    vec![
        Entry {
            id: "proj-001",
            slug: "lumen-banking-app",
            title: "Lumen Banking App",
            description: "A calm, accessible mobile banking experience for first-time savers.",
            category: Category::Fintech,
            client: "Lumen Financial",
            year: 2024,
            technologies: &["React Native", "TypeScript", "Node.js"],
            status: Status::Published,
            featured: true,
            created: (2024, 3, 12),
        }
        .build(
            vec![
                image("lumen-banking-app", 1, "Lumen app dashboard on a phone"),
                image("lumen-banking-app", 2, "Savings goal screen"),
            ],
            Some(CaseStudy {
                challenge: "Onboarding lost half of new users before the first deposit.".into(),
                solution: "A three-step guided setup with instant account previews.".into(),
                results: "Completed onboarding rose sharply within one quarter.".into(),
                metrics: vec![
                    Metric {
                        label: "Onboarding completion".into(),
                        value: "+48%".into(),
                    },
                    Metric {
                        label: "App store rating".into(),
                        value: "4.8".into(),
                    },
                ],
            }),
        ),
        Entry {
            id: "proj-002",
            slug: "harbor-and-co-rebrand",
            title: "Harbor & Co Rebrand",
            description: "Identity system and packaging for a coastal coffee roaster.",
            category: Category::Branding,
            client: "Harbor & Co",
            year: 2023,
            technologies: &["Figma", "Illustrator"],
            status: Status::Published,
            featured: true,
            created: (2023, 6, 2),
        }
        .build(
            vec![image("harbor-and-co-rebrand", 1, "Harbor & Co logo on a cup")],
            None,
        ),
        Entry {
            id: "proj-003",
            slug: "atlas-commerce-platform",
            title: "Atlas Commerce Platform",
            description: "Headless storefront with a fast catalog and checkout.",
            category: Category::Web,
            client: "Atlas Outfitters",
            year: 2022,
            technologies: &["Next.js", "GraphQL", "PostgreSQL"],
            status: Status::Published,
            featured: false,
            created: (2022, 9, 20),
        }
        .build(
            vec![image("atlas-commerce-platform", 1, "Atlas storefront home page")],
            None,
        ),
        Entry {
            id: "proj-004",
            slug: "pulse-fitness-tracker",
            title: "Pulse Fitness Tracker",
            description: "Native workout tracking with adaptive training plans.",
            category: Category::Mobile,
            client: "Pulse Labs",
            year: 2023,
            technologies: &["Swift", "Kotlin"],
            status: Status::Published,
            featured: false,
            created: (2023, 11, 8),
        }
        .build(
            vec![image("pulse-fitness-tracker", 1, "Workout summary screen")],
            None,
        ),
        Entry {
            id: "proj-005",
            slug: "orbit-vr-showroom",
            title: "Orbit VR Showroom",
            description: "Virtual showroom for configuring electric vehicles.",
            category: Category::VrAr,
            client: "Orbit Motors",
            year: 2024,
            technologies: &["Unity", "C#"],
            status: Status::Draft,
            featured: true,
            created: (2024, 7, 1),
        }
        .build(
            vec![image("orbit-vr-showroom", 1, "Car interior in the VR showroom")],
            None,
        ),
        Entry {
            id: "proj-006",
            slug: "meridian-design-system",
            title: "Meridian Design System",
            description: "Component library and tokens shared across product teams.",
            category: Category::UiUx,
            client: "Meridian Health",
            year: 2021,
            technologies: &["Figma", "Storybook", "React"],
            status: Status::Archived,
            featured: false,
            created: (2021, 4, 15),
        }
        .build(
            vec![image("meridian-design-system", 1, "Meridian component overview")],
            None,
        ),
    ]
}
