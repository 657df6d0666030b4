use time::macros::date;
use uuid::Uuid;

use super::{build_service, scripted_providers, test_db};
use success_service::{CreateProjectRequest, ReorderProjectRequest, SuccessService};

async fn create(service: &SuccessService, name: &str) -> Uuid {
	service
		.create_project(CreateProjectRequest {
			name: name.to_string(),
			description: String::new(),
			due: date!(2027 - 01 - 15),
			notes: String::new(),
		})
		.await
		.expect("Failed to create project.")
		.project_id
}

async fn names(service: &SuccessService) -> Vec<(String, i32)> {
	service
		.projects()
		.await
		.expect("Failed to list projects.")
		.into_iter()
		.map(|project| (project.name, project.position))
		.collect()
}

fn expected(names: &[&str]) -> Vec<(String, i32)> {
	names.iter().zip(0..).map(|(name, position)| (name.to_string(), position)).collect()
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn reorder_shifts_and_clamps() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping reorder_shifts_and_clamps; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;

	create(&service, "Alpha").await;
	create(&service, "Bravo").await;

	let charlie = create(&service, "Charlie").await;

	assert_eq!(names(&service).await, expected(&["Alpha", "Bravo", "Charlie"]));

	let moved = service
		.reorder_project(ReorderProjectRequest { project_id: charlie, order: 0 })
		.await
		.expect("Failed to reorder project.");

	assert_eq!(moved.position, 0);
	assert_eq!(names(&service).await, expected(&["Charlie", "Alpha", "Bravo"]));

	service
		.reorder_project(ReorderProjectRequest { project_id: charlie, order: 99 })
		.await
		.expect("Failed to reorder project.");

	assert_eq!(names(&service).await, expected(&["Alpha", "Bravo", "Charlie"]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn delete_closes_gap_and_create_appends() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping delete_closes_gap_and_create_appends; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let alpha = create(&service, "Alpha").await;

	create(&service, "Bravo").await;
	create(&service, "Charlie").await;
	service.delete_project(alpha).await.expect("Failed to delete project.");

	assert_eq!(names(&service).await, expected(&["Bravo", "Charlie"]));

	create(&service, "Delta").await;

	assert_eq!(names(&service).await, expected(&["Bravo", "Charlie", "Delta"]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
