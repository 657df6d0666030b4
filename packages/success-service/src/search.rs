mod ranking;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{Result, SuccessService};
use ranking::{RankedCandidate, compute_rank_keys, order_candidates, resolve_request};
use success_storage::{
	links,
	models::{ItemKind, Link, Person, Project},
	people, projects, search_index,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// `link`, `person`, or `project`. Blank means every kind.
	#[serde(default, rename = "type")]
	pub item_type: Option<String>,
	#[serde(default)]
	pub order: Option<SearchOrder>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOrder {
	pub field: String,
	#[serde(default)]
	pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub enum SearchEntity {
	Link(Link),
	Person(Person),
	Project(Project),
}
impl SearchEntity {
	pub fn kind(&self) -> ItemKind {
		match self {
			Self::Link(_) => ItemKind::Link,
			Self::Person(_) => ItemKind::Person,
			Self::Project(_) => ItemKind::Project,
		}
	}

	pub fn id(&self) -> Uuid {
		match self {
			Self::Link(link) => link.link_id,
			Self::Person(person) => person.person_id,
			Self::Project(project) => project.project_id,
		}
	}
}

#[derive(Debug, Clone)]
pub struct SearchHit {
	pub entity: SearchEntity,
	pub relevance: f32,
	pub click_boost: f32,
}

impl SuccessService {
	/// Ranked links, people, and projects whose indexed text matches `req.query`.
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<SearchHit>> {
		let Some(resolved) = resolve_request(&req)? else {
			return Ok(vec![]);
		};
		let mut conn = self.db.pool.acquire().await?;
		let rows =
			search_index::fetch_candidates(&mut conn, &resolved.query, resolved.kind).await?;
		let mut candidates = compute_rank_keys(rows, self.cfg.search.click_boost_weight);

		order_candidates(&mut candidates, resolved.sort);

		let candidate_count = candidates.len();
		let hits = expand(&mut conn, candidates).await?;

		tracing::debug!(
			query = %resolved.query,
			kind = ?resolved.kind,
			candidates = candidate_count,
			hits = hits.len(),
			"Search completed."
		);

		Ok(hits)
	}
}

async fn expand(
	conn: &mut PgConnection,
	candidates: Vec<RankedCandidate>,
) -> Result<Vec<SearchHit>> {
	let mut ids_by_kind: HashMap<ItemKind, Vec<Uuid>> = HashMap::new();

	for candidate in &candidates {
		ids_by_kind.entry(candidate.kind).or_default().push(candidate.item_id);
	}

	let mut entities = HashMap::with_capacity(candidates.len());

	for (kind, ids) in ids_by_kind {
		match kind {
			ItemKind::Link =>
				for link in links::fetch_links_by_ids(conn, &ids).await? {
					entities.insert(link.link_id, SearchEntity::Link(link));
				},
			ItemKind::Person =>
				for person in people::fetch_people_by_ids(conn, &ids).await? {
					entities.insert(person.person_id, SearchEntity::Person(person));
				},
			ItemKind::Project =>
				for project in projects::fetch_projects_by_ids(conn, &ids).await? {
					entities.insert(project.project_id, SearchEntity::Project(project));
				},
		}
	}

	Ok(assemble_hits(candidates, entities))
}

/// Pairs ranked candidates with their loaded rows, keeping rank order.
fn assemble_hits(
	candidates: Vec<RankedCandidate>,
	mut entities: HashMap<Uuid, SearchEntity>,
) -> Vec<SearchHit> {
	let mut hits = Vec::with_capacity(candidates.len());

	for candidate in candidates {
		match entities.remove(&candidate.item_id) {
			Some(entity) if entity.kind() == candidate.kind => hits.push(SearchHit {
				entity,
				relevance: candidate.relevance,
				click_boost: candidate.click_boost,
			}),
			_ => tracing::debug!(
				item_id = %candidate.item_id,
				kind = %candidate.kind,
				"Skipping index row without a visible entity."
			),
		}
	}

	hits
}
