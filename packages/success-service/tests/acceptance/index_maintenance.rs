use std::sync::Arc;

use super::{build_service, scripted_providers, test_db};
use success_service::{
	CreateLinkRequest, CreatePersonRequest, Error, SearchRequest, SuccessService,
	UpdateLinkRequest, UpdatePersonRequest,
};

async fn hit_count(service: &SuccessService, query: &str) -> usize {
	service
		.search(SearchRequest { query: query.to_string(), item_type: None, order: None })
		.await
		.expect("Search failed.")
		.len()
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn link_writes_are_visible_to_the_next_search() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping link_writes_are_visible_to_the_next_search; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let link = service
		.create_link(CreateLinkRequest {
			url: "https://handbook.example".to_string(),
			title: "Zebra Handbook".to_string(),
			description: String::new(),
			tags: vec!["onboarding".to_string()],
		})
		.await
		.expect("Failed to create link.");

	assert_eq!(hit_count(&service, "zebra").await, 1);
	assert_eq!(hit_count(&service, "onboarding").await, 1);

	service
		.update_link(UpdateLinkRequest {
			link_id: link.link_id,
			title: Some("Giraffe Handbook".to_string()),
			..Default::default()
		})
		.await
		.expect("Failed to update link.");

	assert_eq!(hit_count(&service, "zebra").await, 0);
	assert_eq!(hit_count(&service, "giraffe").await, 1);

	service.delete_link(link.link_id).await.expect("Failed to delete link.");

	assert_eq!(hit_count(&service, "giraffe").await, 0);

	let err = service.link(link.link_id).await.expect_err("Expected deleted link to be gone.");

	assert!(matches!(err, Error::NotFound { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn hidden_people_leave_the_index() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping hidden_people_leave_the_index; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let person = service
		.create_person(CreatePersonRequest {
			name: "Priya Raman".to_string(),
			email: String::new(),
			team: "Design".to_string(),
			role: String::new(),
		})
		.await
		.expect("Failed to create person.");

	assert_eq!(hit_count(&service, "priya").await, 1);

	service
		.update_person(UpdatePersonRequest {
			person_id: person.person_id,
			hidden: Some(true),
			..Default::default()
		})
		.await
		.expect("Failed to hide person.");

	assert_eq!(hit_count(&service, "priya").await, 0);
	assert_eq!(service.counts().await.expect("Failed to count.").people, 0);

	service
		.update_person(UpdatePersonRequest {
			person_id: person.person_id,
			hidden: Some(false),
			..Default::default()
		})
		.await
		.expect("Failed to show person.");

	assert_eq!(hit_count(&service, "priya").await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn validation_and_missing_rows() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping validation_and_missing_rows; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let err = service
		.create_link(CreateLinkRequest {
			url: "https://example.com".to_string(),
			title: "  ".to_string(),
			description: String::new(),
			tags: vec![],
		})
		.await
		.expect_err("Expected blank title to be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	let err = service
		.click_link(uuid::Uuid::new_v4())
		.await
		.expect_err("Expected unknown link to be rejected.");

	assert!(matches!(err, Error::NotFound { .. }));

	let err = service
		.delete_person(uuid::Uuid::new_v4())
		.await
		.expect_err("Expected unknown person to be rejected.");

	assert!(matches!(err, Error::NotFound { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn rebuild_reports_indexed_rows() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping rebuild_reports_indexed_rows; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;

	for name in ["Ada", "Grace"] {
		service
			.create_person(CreatePersonRequest {
				name: name.to_string(),
				email: String::new(),
				team: String::new(),
				role: String::new(),
			})
			.await
			.expect("Failed to create person.");
	}

	let report = service.rebuild_search_index().await.expect("Failed to rebuild index.");

	assert_eq!(report.indexed_rows, 2);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn concurrent_writes_are_all_indexed() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping concurrent_writes_are_all_indexed; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = Arc::new(build_service(&test_db, providers).await);
	let writes = (0..12)
		.map(|i| {
			let service = service.clone();

			tokio::spawn(async move {
				if i % 2 == 0 {
					service
						.create_link(CreateLinkRequest {
							url: format!("https://quokka.example/{i}"),
							title: format!("Quokka {i}"),
							description: String::new(),
							tags: vec![],
						})
						.await
						.map(|link| link.link_id)
				} else {
					service
						.create_person(CreatePersonRequest {
							name: format!("Quokka {i}"),
							email: String::new(),
							team: String::new(),
							role: String::new(),
						})
						.await
						.map(|person| person.person_id)
				}
			})
		})
		.collect::<Vec<_>>();
	let searches = (0..4)
		.map(|_| {
			let service = service.clone();

			tokio::spawn(async move {
				service
					.search(SearchRequest {
						query: "quokka".to_string(),
						item_type: None,
						order: None,
					})
					.await
					.map(|hits| hits.len())
			})
		})
		.collect::<Vec<_>>();

	for write in writes {
		write.await.expect("Write task panicked.").expect("Concurrent write failed.");
	}
	for search in searches {
		let hits = search.await.expect("Search task panicked.").expect("Concurrent search failed.");

		assert!(hits <= 12);
	}

	assert_eq!(hit_count(&service, "quokka").await, 12);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
