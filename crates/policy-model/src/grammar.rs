use tracing::trace;

use crate::model::{PolicyModel, Rule};

/// Split one policy line into its rule-type tag and field tuple.
///
/// The grammar is one rule per line: the tag first, then one or more fields,
/// separated by commas with optional surrounding whitespace (`p, alice,
/// data1, read`). Empty lines, `#` comments, lines with an empty tag, and
/// lines with no fields after the tag all yield `None`.
pub fn parse_rule_line(line: &str) -> Option<(&str, Rule)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split(',').map(str::trim);
    let tag = tokens.next().filter(|tag| !tag.is_empty())?;
    let fields: Rule = tokens.map(str::to_string).collect();
    if fields.is_empty() {
        return None;
    }

    Some((tag, fields))
}

/// The model section a rule-type tag belongs to.
///
/// Tags starting with `p` (`p`, `p2`, ...) are permission rules; tags
/// starting with `g` (`g`, `g2`, ...) are grouping rules. Any other tag is
/// unrecognized.
pub fn section_of(ptype: &str) -> Option<&'static str> {
    if ptype.starts_with('p') {
        Some("p")
    } else if ptype.starts_with('g') {
        Some("g")
    } else {
        None
    }
}

/// Default line handler: parse `line` and append the rule into `model`.
///
/// Lines the grammar rejects are skipped without error, so a policy file may
/// freely contain blank lines and `#` comments. This is the handler durable
/// stores use unless the caller injects its own.
pub fn load_policy_line(line: &str, model: &mut PolicyModel) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }

    match parse_rule_line(line) {
        Some((tag, fields)) => match section_of(tag) {
            Some(section) => model.add_rule(section, tag, fields),
            None => trace!(line, tag, "skipping rule with unrecognized type tag"),
        },
        None => trace!(line, "skipping malformed policy line"),
    }
}

/// Render a rule's fields as a comma-and-space separated string.
///
/// This is the canonical inverse of [`parse_rule_line`] for the field
/// portion of a line.
pub fn join_rule(fields: &[String]) -> String {
    fields.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Rule {
        values.iter().map(|v| v.to_string()).collect()
    }

    // -- parse_rule_line --------------------------------------------------

    #[test]
    fn parse_basic_permission_line() {
        let (tag, rule) = parse_rule_line("p, alice, data1, read").unwrap();
        assert_eq!(tag, "p");
        assert_eq!(rule, fields(&["alice", "data1", "read"]));
    }

    #[test]
    fn parse_grouping_line() {
        let (tag, rule) = parse_rule_line("g, alice, admin").unwrap();
        assert_eq!(tag, "g");
        assert_eq!(rule, fields(&["alice", "admin"]));
    }

    #[test]
    fn parse_numbered_tag() {
        let (tag, rule) = parse_rule_line("p2, bob, data2, write").unwrap();
        assert_eq!(tag, "p2");
        assert_eq!(rule, fields(&["bob", "data2", "write"]));
    }

    #[test]
    fn parse_tolerates_irregular_whitespace() {
        let (tag, rule) = parse_rule_line("  p,alice ,  data1,read  ").unwrap();
        assert_eq!(tag, "p");
        assert_eq!(rule, fields(&["alice", "data1", "read"]));
    }

    #[test]
    fn parse_rejects_empty_and_comment_lines() {
        assert!(parse_rule_line("").is_none());
        assert!(parse_rule_line("   ").is_none());
        assert!(parse_rule_line("# p, alice, data1, read").is_none());
    }

    #[test]
    fn parse_rejects_bare_tag() {
        assert!(parse_rule_line("p").is_none());
    }

    #[test]
    fn parse_rejects_empty_tag() {
        assert!(parse_rule_line(", alice, data1").is_none());
    }

    // -- section_of -------------------------------------------------------

    #[test]
    fn section_follows_tag_prefix() {
        assert_eq!(section_of("p"), Some("p"));
        assert_eq!(section_of("p2"), Some("p"));
        assert_eq!(section_of("g"), Some("g"));
        assert_eq!(section_of("g2"), Some("g"));
    }

    #[test]
    fn unknown_prefix_has_no_section() {
        assert_eq!(section_of("r"), None);
        assert_eq!(section_of("x7"), None);
        assert_eq!(section_of(""), None);
    }

    // -- load_policy_line -------------------------------------------------

    #[test]
    fn handler_appends_parsed_rules() {
        let mut model = PolicyModel::new();
        load_policy_line("p, alice, data1, read", &mut model);
        load_policy_line("g, alice, admin", &mut model);

        assert_eq!(model.rules("p", "p"), [fields(&["alice", "data1", "read"])]);
        assert_eq!(model.rules("g", "g"), [fields(&["alice", "admin"])]);
    }

    #[test]
    fn handler_routes_numbered_tags_by_prefix() {
        let mut model = PolicyModel::new();
        load_policy_line("p2, bob, data2, write", &mut model);

        assert_eq!(model.rules("p", "p2"), [fields(&["bob", "data2", "write"])]);
        assert!(model.rules("p", "p").is_empty());
    }

    #[test]
    fn handler_ignores_blanks_comments_and_noise() {
        let mut model = PolicyModel::new();
        load_policy_line("", &mut model);
        load_policy_line("   ", &mut model);
        load_policy_line("# comment", &mut model);
        load_policy_line("r, sub, obj, act", &mut model);
        load_policy_line("p", &mut model);

        assert!(model.is_empty());
    }

    // -- join_rule --------------------------------------------------------

    #[test]
    fn join_renders_comma_space() {
        assert_eq!(join_rule(&fields(&["alice", "data1", "read"])), "alice, data1, read");
        assert_eq!(join_rule(&fields(&["solo"])), "solo");
        assert_eq!(join_rule(&[]), "");
    }

    #[test]
    fn join_is_inverse_of_parse_for_canonical_lines() {
        let line = "p, alice, data1, read";
        let (tag, rule) = parse_rule_line(line).unwrap();
        assert_eq!(format!("{}, {}", tag, join_rule(&rule)), line);
    }
}
