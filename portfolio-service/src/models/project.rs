use serde::{Deserialize, Serialize};

pub const PROJECT_COLLECTION: &str = "project";
pub const UNTITLED: &str = "Untitled";

/// A portfolio project as served to the site. Absent optionals serialize as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub repo: Option<String>,
    pub demo: Option<String>,
}

/// A project exactly as stored. Records are written by an external process,
/// so every field may be missing; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub repo: Option<String>,
    pub demo: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Project {
            title: record.title.unwrap_or_else(|| UNTITLED.to_string()),
            description: record.description,
            tags: record.tags.unwrap_or_default(),
            repo: record.repo,
            demo: record.demo,
        }
    }
}

/// Sample projects served when stored projects cannot be read.
pub fn fallback_projects() -> Vec<Project> {
    vec![
        Project {
            title: "Realtime Chat App".to_string(),
            description: Some(
                "Full-stack chat app with websockets, auth, and sleek UI.".to_string(),
            ),
            tags: tags(&["React", "FastAPI", "WebSockets", "MongoDB"]),
            repo: Some("https://github.com/".to_string()),
            demo: None,
        },
        Project {
            title: "Design System Kit".to_string(),
            description: Some(
                "Composable components, tokens, and docs powered by Storybook.".to_string(),
            ),
            tags: tags(&["React", "TypeScript", "Storybook"]),
            repo: Some("https://github.com/".to_string()),
            demo: None,
        },
        Project {
            title: "AI Image Playground".to_string(),
            description: Some(
                "Modern UI to explore image generation with server-side pipelines.".to_string(),
            ),
            tags: tags(&["Next.js", "Python", "Inference"]),
            repo: None,
            demo: Some("https://example.com".to_string()),
        },
    ]
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|t| t.to_string()).collect()
}
