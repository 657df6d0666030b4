pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_links.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_links.sql")),
				"tables/002_people.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_people.sql")),
				"tables/003_person_logs.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_person_logs.sql")),
				"tables/004_projects.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_projects.sql")),
				"tables/005_prompt_templates.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_prompt_templates.sql")),
				"tables/006_assistant_conversations.sql" => out
					.push_str(include_str!("../../../sql/tables/006_assistant_conversations.sql")),
				"tables/007_assistant_messages.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_assistant_messages.sql")),
				"tables/008_assistant_answers.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_assistant_answers.sql")),
				"tables/009_scratch_pads.sql" =>
					out.push_str(include_str!("../../../sql/tables/009_scratch_pads.sql")),
				"tables/010_system_logs.sql" =>
					out.push_str(include_str!("../../../sql/tables/010_system_logs.sql")),
				"views/020_search_index.sql" =>
					out.push_str(include_str!("../../../sql/views/020_search_index.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
