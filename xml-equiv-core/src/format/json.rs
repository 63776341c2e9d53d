use crate::diff::result::DiffResult;

/// Format a comparison result as JSON.
pub fn format_json(result: &DiffResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::format_json;
    use crate::config::DiffConfiguration;
    use crate::xml_diff::compare_str;

    #[test]
    fn lists_differences_with_severity_and_node_kinds() {
        let result = compare_str("<a>1</a>", "<a><b/></a>", &DiffConfiguration::default())
            .expect("compare");
        let json: serde_json::Value = serde_json::from_str(&format_json(&result)).expect("json");

        assert_eq!(json["equal"], false);
        assert_eq!(json["differences"][0]["kind"], "node_type");
        assert_eq!(json["differences"][0]["severity"], "major");
        assert_eq!(json["differences"][0]["control_kind"], "text");
        assert_eq!(json["differences"][0]["test_kind"], "element");
    }
}
