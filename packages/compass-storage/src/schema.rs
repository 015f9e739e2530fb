pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_mentor_profiles.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_mentor_profiles.sql")),
				"tables/002_mentee_profiles.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_mentee_profiles.sql")),
				"tables/003_profile_embeddings.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_profile_embeddings.sql")),
				"tables/004_mentorship_matches.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_mentorship_matches.sql")),
				"tables/005_recommendation_cache.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_recommendation_cache.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_every_table_and_leaves_no_includes() {
		let sql = render_schema();

		for table in [
			"mentor_profiles",
			"mentee_profiles",
			"profile_embeddings",
			"mentorship_matches",
			"recommendation_cache",
		] {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
				"Missing table {table}"
			);
		}

		assert!(!sql.contains("\\ir "));
	}
}
