use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 资源类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub enum ResourceType {
    Book,
    Article,
    Video,
    Link,
    Other,
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ResourceType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid resource type: '{s}'. Supported types: book, article, video, link, other"
            ))
        })
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceType::Book => "book",
            ResourceType::Article => "article",
            ResourceType::Video => "video",
            ResourceType::Link => "link",
            ResourceType::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(ResourceType::Book),
            "article" => Ok(ResourceType::Article),
            "video" => Ok(ResourceType::Video),
            "link" => Ok(ResourceType::Link),
            "other" => Ok(ResourceType::Other),
            _ => Err(format!("Invalid resource type: {s}")),
        }
    }
}

// 图书馆资源
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct LibraryResource {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub resource_type: ResourceType,
    pub url: Option<String>,
    pub isbn: Option<String>,
    pub course_id: Option<i64>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
