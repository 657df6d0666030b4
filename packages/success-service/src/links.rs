use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, SuccessService};
use success_storage::{links, models::Link, search_index};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
	pub url: String,
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub tags: Vec<String>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLinkRequest {
	pub link_id: Uuid,
	pub url: Option<String>,
	pub title: Option<String>,
	pub description: Option<String>,
	pub tags: Option<Vec<String>>,
	pub hidden: Option<bool>,
}

impl SuccessService {
	pub async fn links(&self) -> Result<Vec<Link>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(links::list_links(&mut conn).await?)
	}

	pub async fn link(&self, link_id: Uuid) -> Result<Link> {
		let mut conn = self.db.pool.acquire().await?;

		links::get_link(&mut conn, link_id).await?.ok_or_else(|| link_not_found(link_id))
	}

	pub async fn tags(&self) -> Result<Vec<String>> {
		let mut conn = self.db.pool.acquire().await?;

		Ok(links::list_tags(&mut conn).await?)
	}

	pub async fn create_link(&self, req: CreateLinkRequest) -> Result<Link> {
		let now = OffsetDateTime::now_utc();
		let link = Link {
			link_id: Uuid::new_v4(),
			url: crate::require_text("url", &req.url)?,
			title: crate::require_text("title", &req.title)?,
			description: req.description.trim().to_string(),
			tags: normalize_tags(req.tags),
			click_count: 0,
			hidden: false,
			created_at: now,
			updated_at: now,
		};
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		links::insert_link(&mut tx, &link).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(link_id = %link.link_id, "Link created.");

		Ok(link)
	}

	pub async fn update_link(&self, req: UpdateLinkRequest) -> Result<Link> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		let mut link = links::get_link_for_update(&mut tx, req.link_id)
			.await?
			.ok_or_else(|| link_not_found(req.link_id))?;

		if let Some(url) = req.url.as_deref() {
			link.url = crate::require_text("url", url)?;
		}
		if let Some(title) = req.title.as_deref() {
			link.title = crate::require_text("title", title)?;
		}
		if let Some(description) = req.description {
			link.description = description.trim().to_string();
		}
		if let Some(tags) = req.tags {
			link.tags = normalize_tags(tags);
		}
		if let Some(hidden) = req.hidden {
			link.hidden = hidden;
		}

		link.updated_at = OffsetDateTime::now_utc();

		links::update_link(&mut tx, &link).await?;
		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		Ok(link)
	}

	pub async fn delete_link(&self, link_id: Uuid) -> Result<Uuid> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		if !links::delete_link(&mut tx, link_id).await? {
			return Err(link_not_found(link_id));
		}

		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		tracing::info!(link_id = %link_id, "Link deleted.");

		Ok(link_id)
	}

	/// Records one visit. The count feeds the search click boost.
	pub async fn click_link(&self, link_id: Uuid) -> Result<Link> {
		let mut tx = self.db.pool.begin().await?;

		search_index::lock_writes(&mut tx).await?;

		let link = links::increment_click_count(&mut tx, link_id)
			.await?
			.ok_or_else(|| link_not_found(link_id))?;

		search_index::refresh(&mut tx).await?;

		tx.commit().await?;

		Ok(link)
	}
}

fn link_not_found(link_id: Uuid) -> Error {
	Error::not_found(format!("Link {link_id} does not exist."))
}

/// Trims, drops blanks, and removes repeats while keeping first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
	let mut out: Vec<String> = Vec::with_capacity(tags.len());

	for tag in tags {
		let tag = tag.trim();

		if tag.is_empty() || out.iter().any(|seen| seen == tag) {
			continue;
		}

		out.push(tag.to_string());
	}

	out
}
