use time::macros::date;
use uuid::Uuid;

use super::{build_service, scripted_providers, test_db};
use success_service::{
	CreateLinkRequest, CreatePersonRequest, CreateProjectRequest, Error, ItemKind, SearchHit,
	SearchOrder, SearchRequest, SortDirection, SuccessService,
};

struct Seed {
	success_page: Uuid,
	work_success: Uuid,
	success_project: Uuid,
	mike: Uuid,
	mikado: Uuid,
}

async fn seed(service: &SuccessService) -> Seed {
	let success_page = service
		.create_link(CreateLinkRequest {
			url: "https://intranet.example/success".to_string(),
			title: "Success Page".to_string(),
			description: String::new(),
			tags: vec!["home".to_string()],
		})
		.await
		.expect("Failed to create link.");
	let work_success = service
		.create_link(CreateLinkRequest {
			url: "https://blog.example/stories".to_string(),
			title: "Work success stories".to_string(),
			description: String::new(),
			tags: vec![],
		})
		.await
		.expect("Failed to create link.");
	let mikado = service
		.create_link(CreateLinkRequest {
			url: "https://docs.example/mikado".to_string(),
			title: "Mikado Planning Guide".to_string(),
			description: String::new(),
			tags: vec!["planning".to_string()],
		})
		.await
		.expect("Failed to create link.");
	let mike = service
		.create_person(CreatePersonRequest {
			name: "Mike Jones".to_string(),
			email: "mike.jones@example.com".to_string(),
			team: "Platform".to_string(),
			role: "Engineer".to_string(),
		})
		.await
		.expect("Failed to create person.");
	let success_project = service
		.create_project(CreateProjectRequest {
			name: "Success Metrics".to_string(),
			description: "Quarterly goals review".to_string(),
			due: date!(2026 - 12 - 31),
			notes: String::new(),
		})
		.await
		.expect("Failed to create project.");

	service
		.create_project(CreateProjectRequest {
			name: "Office Move".to_string(),
			description: "Coordinate the work schedule".to_string(),
			due: date!(2026 - 11 - 30),
			notes: String::new(),
		})
		.await
		.expect("Failed to create project.");

	Seed {
		success_page: success_page.link_id,
		work_success: work_success.link_id,
		success_project: success_project.project_id,
		mike: mike.person_id,
		mikado: mikado.link_id,
	}
}

async fn search(service: &SuccessService, query: &str, item_type: Option<&str>) -> Vec<SearchHit> {
	service
		.search(SearchRequest {
			query: query.to_string(),
			item_type: item_type.map(str::to_string),
			order: None,
		})
		.await
		.expect("Search failed.")
}

fn ids(hits: &[SearchHit]) -> Vec<Uuid> {
	hits.iter().map(|hit| hit.entity.id()).collect()
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn seeded_queries_return_expected_counts() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping seeded_queries_return_expected_counts; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let seed = seed(&service).await;
	let success = search(&service, "success", None).await;

	assert!(success.len() >= 2, "Expected at least two hits for success: {success:?}");
	assert!(ids(&success).contains(&seed.success_page));
	assert!(ids(&success).contains(&seed.success_project));
	assert!(search(&service, "fubar", None).await.is_empty());
	assert_eq!(ids(&search(&service, "work success", None).await), vec![seed.work_success]);
	assert_eq!(ids(&search(&service, "mike", Some("person")).await), vec![seed.mike]);
	assert!(search(&service, "mike", Some("link")).await.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn substring_fallback_and_type_filter() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping substring_fallback_and_type_filter; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let seed = seed(&service).await;
	let partial = ids(&search(&service, "mik", None).await);

	assert_eq!(partial.len(), 2);
	assert!(partial.contains(&seed.mike));
	assert!(partial.contains(&seed.mikado));

	for hit in search(&service, "success", Some("project")).await {
		assert_eq!(hit.entity.kind(), ItemKind::Project);
	}

	assert!(search(&service, "success", Some("robot")).await.is_empty());
	assert!(search(&service, "   ", None).await.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn repeated_searches_are_identical() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping repeated_searches_are_identical; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;

	seed(&service).await;

	let first = ids(&search(&service, "success", None).await);

	for _ in 0..3 {
		assert_eq!(ids(&search(&service, "success", None).await), first);
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn explicit_order_and_unknown_sort_field() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping explicit_order_and_unknown_sort_field; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;

	seed(&service).await;

	let by_type = service
		.search(SearchRequest {
			query: "success".to_string(),
			item_type: None,
			order: Some(SearchOrder {
				field: "itemType".to_string(),
				direction: SortDirection::Asc,
			}),
		})
		.await
		.expect("Search failed.");
	let kinds = by_type.iter().map(|hit| hit.entity.kind().as_str()).collect::<Vec<_>>();
	let mut sorted = kinds.clone();

	sorted.sort();

	assert_eq!(kinds, sorted);

	let err = service
		.search(SearchRequest {
			query: "success".to_string(),
			item_type: None,
			order: Some(SearchOrder {
				field: "title".to_string(),
				direction: SortDirection::Asc,
			}),
		})
		.await
		.expect_err("Expected unknown sort field to fail.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn clicks_lift_equally_relevant_links() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping clicks_lift_equally_relevant_links; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let mut created = Vec::new();

	for url in ["https://a.example/x", "https://b.example/x"] {
		let link = service
			.create_link(CreateLinkRequest {
				url: url.to_string(),
				title: "Quarterly roadmap".to_string(),
				description: String::new(),
				tags: vec![],
			})
			.await
			.expect("Failed to create link.");

		created.push(link.link_id);
	}

	let favourite = *created.iter().max().expect("Expected two links.");

	for _ in 0..5 {
		service.click_link(favourite).await.expect("Failed to click link.");
	}

	let hits = search(&service, "roadmap", None).await;

	assert_eq!(hits.len(), 2);
	assert_eq!(hits[0].entity.id(), favourite);
	assert!(hits[0].click_boost > hits[1].click_boost);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
