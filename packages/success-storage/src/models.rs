use std::{fmt, str::FromStr};

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::Error;

/// The three entity tables projected into `search_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
	Link,
	Person,
	Project,
}
impl ItemKind {
	pub const ALL: [Self; 3] = [Self::Link, Self::Person, Self::Project];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Link => "link",
			Self::Person => "person",
			Self::Project => "project",
		}
	}
}
impl fmt::Display for ItemKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for ItemKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"link" => Ok(Self::Link),
			"person" => Ok(Self::Person),
			"project" => Ok(Self::Project),
			other => Err(Error::InvalidArgument(format!("unknown item type: {other}"))),
		}
	}
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Link {
	pub link_id: Uuid,
	pub url: String,
	pub title: String,
	pub description: String,
	pub tags: Vec<String>,
	pub click_count: i64,
	pub hidden: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Person {
	pub person_id: Uuid,
	pub name: String,
	pub email: String,
	pub team: String,
	pub role: String,
	pub hidden: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PersonLog {
	pub log_id: Uuid,
	pub person_id: Uuid,
	pub date: Date,
	pub note: String,
	pub hidden: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Project {
	pub project_id: Uuid,
	pub name: String,
	pub description: String,
	pub due: Date,
	pub complete: bool,
	pub notes: String,
	pub position: i32,
	pub hidden: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PromptTemplate {
	pub template_id: Uuid,
	pub name: String,
	pub system_message: String,
	pub request_template: String,
	pub hidden: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Conversation {
	pub conversation_id: Uuid,
	pub system_message: String,
	pub description: String,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Message {
	pub message_id: Uuid,
	pub conversation_id: Uuid,
	/// Position within the conversation, starting at zero.
	pub seq: i32,
	pub role: String,
	pub content: String,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct AssistantAnswer {
	pub answer_id: Uuid,
	pub system_message: String,
	pub request: String,
	pub response: String,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ScratchPad {
	pub body: String,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct SystemLog {
	pub log_id: Uuid,
	pub logger_name: String,
	pub level: String,
	pub msg: String,
	pub trace: Option<String>,
	pub created_at: OffsetDateTime,
}

/// One matching row of `search_index` before ranking.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct SearchCandidate {
	pub item_type: String,
	pub item_id: Uuid,
	pub created_at: OffsetDateTime,
	pub relevance: f32,
	pub click_count: i64,
}
