use std::sync::Arc;

use super::{FailingChat, build_service, scripted_providers, test_db};
use success_service::{
	AskRequest, CopyEditRequest, Error, Providers, SendMessageRequest, StartConversationRequest,
};

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn conversation_replays_history() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping conversation_replays_history; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, calls) = scripted_providers("Sure.");
	let service = build_service(&test_db, providers).await;
	let long_request = "Plan the offsite. ".repeat(20);
	let started = service
		.start_conversation(StartConversationRequest {
			system_message: "Be brief.".to_string(),
			request: long_request.clone(),
		})
		.await
		.expect("Failed to start conversation.");
	let roles = started.messages.iter().map(|message| message.role.as_str()).collect::<Vec<_>>();

	assert_eq!(roles, vec!["system", "user", "assistant"]);
	assert_eq!(started.conversation.description.chars().count(), 120);
	assert!(long_request.starts_with(&started.conversation.description));

	let continued = service
		.send_message(SendMessageRequest {
			conversation_id: started.conversation.conversation_id,
			request: "And the budget?".to_string(),
		})
		.await
		.expect("Failed to send message.");

	assert_eq!(continued.messages.len(), 5);
	assert_eq!(continued.messages[3].content, "And the budget?");

	let stored = service
		.conversation(started.conversation.conversation_id)
		.await
		.expect("Failed to load conversation.");
	let seqs = stored.messages.iter().map(|message| message.seq).collect::<Vec<_>>();

	assert_eq!(seqs, vec![0, 1, 2, 3, 4]);

	let calls = calls.lock().unwrap_or_else(|err| err.into_inner());

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[1].len(), 4);
	assert_eq!(calls[1][2].role, "assistant");

	drop(calls);
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn ask_stores_answers_and_copy_edit_uses_editor_prompt() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping ask_stores_answers_and_copy_edit; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, calls) = scripted_providers("Polished text.");
	let service = build_service(&test_db, providers).await;
	let answer = service
		.ask(AskRequest {
			system_message: String::new(),
			request: "What is a tsvector?".to_string(),
		})
		.await
		.expect("Failed to ask.");

	assert_eq!(answer.response, "Polished text.");
	assert_eq!(
		service.answer(answer.answer_id).await.expect("Failed to load answer.").request,
		"What is a tsvector?"
	);
	assert_eq!(service.answers().await.expect("Failed to list answers.").len(), 1);

	let edited = service
		.copy_edit(CopyEditRequest {
			text: "teh draft".to_string(),
			editor_type: Some("brand".to_string()),
		})
		.await
		.expect("Failed to copy edit.");

	assert_eq!(edited, "Polished text.");

	{
		let calls = calls.lock().unwrap_or_else(|err| err.into_inner());
		let last = calls.last().expect("Expected a provider call.");

		assert_eq!(calls[0].len(), 1);
		assert_eq!(last[0].content, "Rewrite in the company voice.");
		assert_eq!(last[1].content, "teh draft");
	}

	let err = service
		.copy_edit(CopyEditRequest {
			text: "x".to_string(),
			editor_type: Some("pirate".to_string()),
		})
		.await
		.expect_err("Expected unknown editor to fail.");

	assert!(matches!(err, Error::InvalidRequest { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn provider_failure_stores_nothing() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping provider_failure_stores_nothing; set SUCCESS_PG_DSN to run.");

		return;
	};
	let service = build_service(&test_db, Providers::new(Arc::new(FailingChat))).await;
	let err = service
		.start_conversation(StartConversationRequest {
			system_message: String::new(),
			request: "Hello".to_string(),
		})
		.await
		.expect_err("Expected provider failure.");

	assert!(matches!(err, Error::Provider { .. }));
	assert!(service.conversations().await.expect("Failed to list conversations.").is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "Requires external Postgres. Set SUCCESS_PG_DSN to run."]
async fn concurrent_sends_append_in_order() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping concurrent_sends_append_in_order; set SUCCESS_PG_DSN to run.");

		return;
	};
	let (providers, _) = scripted_providers("Noted.");
	let service = Arc::new(build_service(&test_db, providers).await);
	let started = service
		.start_conversation(StartConversationRequest {
			system_message: String::new(),
			request: "Track the launch.".to_string(),
		})
		.await
		.expect("Failed to start conversation.");
	let conversation_id = started.conversation.conversation_id;
	let sends = ["First update.", "Second update."]
		.into_iter()
		.map(|request| {
			let service = service.clone();

			tokio::spawn(async move {
				service
					.send_message(SendMessageRequest {
						conversation_id,
						request: request.to_string(),
					})
					.await
			})
		})
		.collect::<Vec<_>>();

	for send in sends {
		send.await.expect("Send task panicked.").expect("Concurrent send failed.");
	}

	let stored = service.conversation(conversation_id).await.expect("Failed to load conversation.");
	let seqs = stored.messages.iter().map(|message| message.seq).collect::<Vec<_>>();
	let roles = stored.messages.iter().map(|message| message.role.as_str()).collect::<Vec<_>>();

	assert_eq!(seqs, vec![0, 1, 2, 3, 4, 5]);
	assert_eq!(roles, vec!["user", "assistant", "user", "assistant", "user", "assistant"]);
	assert!(stored.messages.iter().any(|message| message.content == "First update."));
	assert!(stored.messages.iter().any(|message| message.content == "Second update."));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
