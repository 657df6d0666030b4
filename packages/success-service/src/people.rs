use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, Result, SuccessService};
use success_storage::{
	models::{Person, PersonLog},
	people, search_index,
};

const DEFAULT_LOG_PAGE: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonRequest {
	pub name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub team: String,
	#[serde(default)]
	pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePersonRequest {
	pub person_id: Uuid,
	pub name: Option<String>,
	pub email: Option<String>,
	pub team: Option<String>,
	pub role: Option<String>,
	pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOrder {
	#[default]
	NewestFirst,
	OldestFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonLogsRequest {
	pub person_id: Uuid,
	#[serde(default)]
	pub offset: i64,
	pub limit: Option<i64>,
	#[serde(default)]
	pub order: LogOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonLogRequest {
	pub person_id: Uuid,
	pub date: Date,
	pub note: String,
}

impl SuccessService {
	pub async fn people(&self) -> Result<Vec<Person>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(people::list_people(&mut conn).await?)
	}

	pub async fn person(&self, person_id: Uuid) -> Result<Person> {
		let mut conn = self.db.pool.acquire().await?;

		people::get_person(&mut conn, person_id).await?.ok_or_else(|| person_not_found(person_id))
	}

	pub async fn create_person(&self, req: CreatePersonRequest) -> Result<Person> {
		let now = OffsetDateTime::now_utc();
		let person = Person {
			person_id: Uuid::new_v4(),
			name: crate::require_text("name", &req.name)?,
			email: req.email.trim().to_string(),
			team: req.team.trim().to_string(),
			role: req.role.trim().to_string(),
			hidden: false,
			created_at: now,
			updated_at: now,
		};
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		people::insert_person(&mut tx, &person).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(person_id = %person.person_id, "Person created.");

		Ok(person)
	}

	pub async fn update_person(&self, req: UpdatePersonRequest) -> Result<Person> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		let mut person = people::get_person_for_update(&mut tx, req.person_id)
			.await?
			.ok_or_else(|| person_not_found(req.person_id))?;

		if let Some(name) = req.name.as_deref() {
			person.name = crate::require_text("name", name)?;
		}
		if let Some(email) = req.email {
			person.email = email.trim().to_string();
		}
		if let Some(team) = req.team {
			person.team = team.trim().to_string();
		}
		if let Some(role) = req.role {
			person.role = role.trim().to_string();
		}
		if let Some(hidden) = req.hidden {
			person.hidden = hidden;
		}

		person.updated_at = OffsetDateTime::now_utc();

		people::update_person(&mut tx, &person).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		Ok(person)
	}

	pub async fn delete_person(&self, person_id: Uuid) -> Result<Uuid> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		if !people::delete_person(&mut tx, person_id).await? {
			return Err(person_not_found(person_id));
		}

		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(person_id = %person_id, "Person deleted.");

		Ok(person_id)
	}

	pub async fn person_logs(&self, req: PersonLogsRequest) -> Result<Vec<PersonLog>> {
		let (offset, limit) =
			crate::validate_page(req.offset, req.limit.unwrap_or(DEFAULT_LOG_PAGE))?;
		let mut conn = self.db.pool.acquire().await?;

		Ok(people::list_person_logs(
			&mut conn,
			req.person_id,
			offset,
			limit,
			req.order == LogOrder::NewestFirst,
		)
		.await?)
	}

	/// Logs are not indexed, so no refresh follows the insert.
	pub async fn create_person_log(&self, req: CreatePersonLogRequest) -> Result<PersonLog> {
		let note = crate::require_text("note", &req.note)?;
		let mut conn = self.db.pool.acquire().await?;

		if people::get_person(&mut conn, req.person_id).await?.is_none() {
			return Err(person_not_found(req.person_id));
		}

		let log = PersonLog {
			log_id: Uuid::new_v4(),
			person_id: req.person_id,
			date: req.date,
			note,
			hidden: false,
			created_at: OffsetDateTime::now_utc(),
		};

		people::insert_person_log(&mut conn, &log).await?;

		Ok(log)
	}
}

fn person_not_found(person_id: Uuid) -> Error {
	Error::not_found(format!("Person {person_id} does not exist."))
}
