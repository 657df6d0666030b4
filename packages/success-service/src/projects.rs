use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, Result, SuccessService};
use success_storage::{models::Project, projects, search_index};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub due: Date,
	#[serde(default)]
	pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
	pub project_id: Uuid,
	pub name: Option<String>,
	pub description: Option<String>,
	pub due: Option<Date>,
	pub complete: Option<bool>,
	pub notes: Option<String>,
	pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderProjectRequest {
	pub project_id: Uuid,
	/// Target position. Out-of-range values land at the nearest end.
	pub order: i32,
}

impl SuccessService {
	pub async fn projects(&self) -> Result<Vec<Project>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(projects::list_projects(&mut conn).await?)
	}

	pub async fn project(&self, project_id: Uuid) -> Result<Project> {
		let mut conn = self.db.pool.acquire().await?;

		projects::get_project(&mut conn, project_id)
			.await?
			.ok_or_else(|| project_not_found(project_id))
	}

	/// New projects go to the end of the ordering.
	pub async fn create_project(&self, req: CreateProjectRequest) -> Result<Project> {
		let name = crate::require_text("name", &req.name)?;
		let now = OffsetDateTime::now_utc();
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;
		projects::lock_ordering(&mut tx).await?;

		let position = position_from_count(projects::count_positions(&mut tx).await?)?;
		let project = Project {
			project_id: Uuid::new_v4(),
			name,
			description: req.description.trim().to_string(),
			due: req.due,
			complete: false,
			notes: req.notes,
			position,
			hidden: false,
			created_at: now,
			updated_at: now,
		};

		projects::insert_project(&mut tx, &project).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(project_id = %project.project_id, position, "Project created.");

		Ok(project)
	}

	pub async fn update_project(&self, req: UpdateProjectRequest) -> Result<Project> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		let mut project = projects::get_project_for_update(&mut tx, req.project_id)
			.await?
			.ok_or_else(|| project_not_found(req.project_id))?;

		if let Some(name) = req.name.as_deref() {
			project.name = crate::require_text("name", name)?;
		}
		if let Some(description) = req.description {
			project.description = description.trim().to_string();
		}
		if let Some(due) = req.due {
			project.due = due;
		}
		if let Some(complete) = req.complete {
			project.complete = complete;
		}
		if let Some(notes) = req.notes {
			project.notes = notes;
		}
		if let Some(hidden) = req.hidden {
			project.hidden = hidden;
		}

		project.updated_at = OffsetDateTime::now_utc();

		projects::update_project(&mut tx, &project).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		Ok(project)
	}

	/// Later projects move up one place to keep positions dense.
	pub async fn delete_project(&self, project_id: Uuid) -> Result<Uuid> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;
		projects::lock_ordering(&mut tx).await?;

		if !projects::delete_project(&mut tx, project_id).await? {
			return Err(project_not_found(project_id));
		}

		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(project_id = %project_id, "Project deleted.");

		Ok(project_id)
	}

	pub async fn reorder_project(&self, req: ReorderProjectRequest) -> Result<Project> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;
		projects::lock_ordering(&mut tx).await?;

		let project = projects::get_project_for_update(&mut tx, req.project_id)
			.await?
			.ok_or_else(|| project_not_found(req.project_id))?;
		let len = projects::count_positions(&mut tx).await?;
		let target = clamp_position(req.order, len);

		projects::move_project(&mut tx, project.project_id, project.position, target).await?;
		search_index::refresh(&mut tx).await?;

		let project = projects::get_project(&mut tx, project.project_id)
			.await?
			.ok_or_else(|| project_not_found(req.project_id))?;

		tx.commit().await?;

		Ok(project)
	}
}

fn project_not_found(project_id: Uuid) -> Error {
	Error::not_found(format!("Project {project_id} does not exist."))
}

fn position_from_count(count: i64) -> Result<i32> {
	i32::try_from(count).map_err(|_| Error::invalid("Too many projects to append another."))
}

/// Clamps `order` into `[0, len - 1]`.
fn clamp_position(order: i32, len: i64) -> i32 {
	let last = i32::try_from(len.saturating_sub(1)).unwrap_or(i32::MAX).max(0);

	order.clamp(0, last)
}

#[cfg(test)]
mod tests {
	use super::clamp_position;

	#[test]
	fn clamp_keeps_in_range_targets() {
		assert_eq!(clamp_position(2, 5), 2);
	}

	#[test]
	fn clamp_pins_out_of_range_targets() {
		assert_eq!(clamp_position(-3, 5), 0);
		assert_eq!(clamp_position(99, 5), 4);
	}

	#[test]
	fn clamp_handles_single_row() {
		assert_eq!(clamp_position(7, 1), 0);
	}
}
