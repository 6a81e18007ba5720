// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that closes every prompt expecting a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY valid JSON. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";

/// Substitutes `{name}` placeholders in a template in one pass.
/// Substituted values are never scanned again, so braces in user text stay literal.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = vars.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });
        match hit {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        let out = render("{a} / {b}", &[("a", "{b}"), ("b", "y")]);
        assert_eq!(out, "{b} / y");
    }

    #[test]
    fn test_render_keeps_literal_json_braces() {
        let out = render(r#"{"name": "{a}"}"#, &[("a", "x")]);
        assert_eq!(out, r#"{"name": "x"}"#);
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{missing}", &[("a", "x")]), "{missing}");
    }
}
