use crate::{
	Error, Result,
	search::{SearchOrder, SearchRequest, SortDirection},
};
use success_storage::models::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
	CreatedAt,
	ItemType,
	ClickCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
	pub field: SortField,
	pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
	pub query: String,
	pub kind: Option<ItemKind>,
	pub sort: Option<SortKey>,
}

/// `Ok(None)` means the request can only produce an empty result.
pub fn resolve_request(req: &SearchRequest) -> Result<Option<ResolvedQuery>> {
	let sort = req.order.as_ref().map(parse_sort_key).transpose()?;
	let query = req.query.trim();

	if query.is_empty() {
		return Ok(None);
	}

	let kind = match req.item_type.as_deref().map(str::trim) {
		None | Some("") => None,
		Some(raw) => match parse_item_type(raw) {
			Some(kind) => Some(kind),
			None => {
				tracing::debug!(item_type = raw, "Unknown item type; returning no results.");

				return Ok(None);
			},
		},
	};

	Ok(Some(ResolvedQuery { query: query.to_string(), kind, sort }))
}

pub fn parse_item_type(raw: &str) -> Option<ItemKind> {
	raw.trim().to_lowercase().parse().ok()
}

pub fn parse_sort_key(order: &SearchOrder) -> Result<SortKey> {
	let field = match order.field.trim() {
		"created_at" | "createdAt" => SortField::CreatedAt,
		"item_type" | "itemType" => SortField::ItemType,
		"click_count" | "clickCount" => SortField::ClickCount,
		other => return Err(Error::invalid(format!("Unknown sort field: {other}."))),
	};

	Ok(SortKey { field, direction: order.direction })
}
