use time::macros::date;

use super::{build_service, scripted_providers, test_db};
use success_service::{
	CreateLinkRequest, CreatePersonLogRequest, CreatePersonRequest, LogOrder, PersonLogsRequest,
	RecordSystemLogRequest,
};

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn scratch_pad_counts_and_system_logs() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping scratch_pad_counts_and_system_logs; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;

	assert_eq!(service.scratch_pad().await.expect("Failed to read pad.").body, "");

	service.update_scratch_pad("call Mike").await.expect("Failed to update pad.");

	assert_eq!(service.scratch_pad().await.expect("Failed to read pad.").body, "call Mike");

	service
		.create_link(CreateLinkRequest {
			url: "https://example.com".to_string(),
			title: "Example".to_string(),
			description: String::new(),
			tags: vec!["b".to_string(), "a".to_string()],
		})
		.await
		.expect("Failed to create link.");

	let counts = service.counts().await.expect("Failed to count.");

	assert_eq!((counts.people, counts.links), (0, 1));
	assert_eq!(service.tags().await.expect("Failed to list tags."), vec!["a", "b"]);

	for msg in ["first", "second"] {
		service
			.record_system_log(RecordSystemLogRequest {
				logger_name: "graphql".to_string(),
				level: "error".to_string(),
				msg: msg.to_string(),
				trace: None,
			})
			.await
			.expect("Failed to record log.");
	}

	let logs = service.system_logs(0, 10).await.expect("Failed to list logs.");

	assert_eq!(logs.len(), 2);
	assert_eq!(logs[0].level, "ERROR");
	assert_eq!(service.system_logs(1, 10).await.expect("Failed to list logs.").len(), 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn person_logs_page_by_date() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping person_logs_page_by_date; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("unused");
	let service = build_service(&test_db, providers).await;
	let person = service
		.create_person(CreatePersonRequest {
			name: "Mike".to_string(),
			email: String::new(),
			team: String::new(),
			role: String::new(),
		})
		.await
		.expect("Failed to create person.");

	for (date, note) in [
		(date!(2026 - 03 - 01), "march"),
		(date!(2026 - 01 - 01), "january"),
		(date!(2026 - 02 - 01), "february"),
	] {
		service
			.create_person_log(CreatePersonLogRequest {
				person_id: person.person_id,
				date,
				note: note.to_string(),
			})
			.await
			.expect("Failed to create log.");
	}

	let newest = service
		.person_logs(PersonLogsRequest {
			person_id: person.person_id,
			offset: 0,
			limit: Some(2),
			order: LogOrder::NewestFirst,
		})
		.await
		.expect("Failed to list logs.");
	let notes = newest.iter().map(|log| log.note.as_str()).collect::<Vec<_>>();

	assert_eq!(notes, vec!["march", "february"]);

	let oldest = service
		.person_logs(PersonLogsRequest {
			person_id: person.person_id,
			offset: 1,
			limit: None,
			order: LogOrder::OldestFirst,
		})
		.await
		.expect("Failed to list logs.");
	let notes = oldest.iter().map(|log| log.note.as_str()).collect::<Vec<_>>();

	assert_eq!(notes, vec!["february", "march"]);

	service.delete_person(person.person_id).await.expect("Failed to delete person.");

	let remaining: i64 = sqlx::query_scalar("SELECT count(*) FROM person_logs")
		.fetch_one(&service.db.pool)
		.await
		.expect("Failed to count logs.");

	assert_eq!(remaining, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
