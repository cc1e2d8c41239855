//! Locating a structured `{answer, confidence}` object inside model text.
//!
//! Candidates are tried in order:
//! 1. ` ```json` fenced blocks
//! 2. other fenced blocks
//! 3. the whole text
//! 4. the span from the first `{` to the last `}`
//!
//! The first candidate that parses as a JSON object with a non-empty string
//! `answer` wins.

use serde_json::Value;

/// A structured reply found in model output.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredReply {
    /// Trimmed, non-empty answer text
    pub answer: String,
    /// Raw `confidence` field, if present (not yet validated)
    pub confidence: Option<Value>,
}

/// Find the first usable structured reply in `text`.
pub fn find_structured_reply(text: &str) -> Option<StructuredReply> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let blocks = fenced_blocks(text);
    let json_blocks = blocks
        .iter()
        .filter(|b| b.lang.eq_ignore_ascii_case("json"))
        .map(|b| b.content.as_str());
    let other_blocks = blocks
        .iter()
        .filter(|b| !b.lang.eq_ignore_ascii_case("json"))
        .map(|b| b.content.as_str());

    json_blocks
        .chain(other_blocks)
        .chain(std::iter::once(text))
        .chain(brace_span(text))
        .find_map(parse_candidate)
}

struct FencedBlock {
    lang: String,
    content: String,
}

/// Collect fenced code blocks (` ```lang ... ``` `), line based.
fn fenced_blocks(text: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<FencedBlock> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        match current.take() {
            None => {
                if let Some(lang) = trimmed.strip_prefix("```") {
                    current = Some(FencedBlock {
                        lang: lang.trim().to_string(),
                        content: String::new(),
                    });
                }
            }
            Some(mut block) => {
                if trimmed == "```" {
                    blocks.push(block);
                } else {
                    block.content.push_str(line);
                    block.content.push('\n');
                    current = Some(block);
                }
            }
        }
    }

    blocks
}

/// The outermost `{ ... }` span, if any.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_candidate(candidate: &str) -> Option<StructuredReply> {
    let value: Value = serde_json::from_str(candidate.trim()).ok()?;
    let object = value.as_object()?;
    let answer = object.get("answer")?.as_str()?.trim();
    if answer.is_empty() {
        return None;
    }
    Some(StructuredReply {
        answer: answer.to_string(),
        confidence: object.get("confidence").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let reply = find_structured_reply(r#"{"answer": "SMA info", "confidence": 0.9}"#).unwrap();
        assert_eq!(reply.answer, "SMA info");
        assert_eq!(reply.confidence, Some(json!(0.9)));
    }

    #[test]
    fn test_fenced_json_block() {
        let text = "```json\n{\"answer\": \"SMA info\", \"confidence\": 0.9}\n```";
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "SMA info");
    }

    #[test]
    fn test_json_block_preferred_over_plain_block() {
        let text = r#"```
{"answer": "from plain", "confidence": 0.5}
```

```json
{"answer": "from json", "confidence": 0.8}
```"#;
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "from json");
    }

    #[test]
    fn test_plain_fenced_block() {
        let text = "Sure:\n```\n{\"answer\": \"fenced\"}\n```\nDone.";
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "fenced");
        assert_eq!(reply.confidence, None);
    }

    #[test]
    fn test_surrounding_text() {
        let text = r#"Here is the response: {"answer": "SMA info", "confidence": 0.9} Hope this helps!"#;
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "SMA info");
    }

    #[test]
    fn test_nested_braces_in_span() {
        let text = r#"Result: {"answer": "uses {braces}", "confidence": 0.7, "meta": {"k": 1}}"#;
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "uses {braces}");
    }

    #[test]
    fn test_no_json() {
        assert!(find_structured_reply("This is not JSON at all").is_none());
        assert!(find_structured_reply("").is_none());
        assert!(find_structured_reply("{ broken json").is_none());
    }

    #[test]
    fn test_object_without_answer_is_not_structured() {
        assert!(find_structured_reply(r#"{"confidence": 0.9}"#).is_none());
        assert!(find_structured_reply(r#"{"answer": "  ", "confidence": 0.9}"#).is_none());
        assert!(find_structured_reply(r#"{"answer": 42}"#).is_none());
        assert!(find_structured_reply("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_unterminated_fence_falls_back_to_span() {
        let text = "```json\n{\"answer\": \"still found\", \"confidence\": 0.6}";
        let reply = find_structured_reply(text).unwrap();
        assert_eq!(reply.answer, "still found");
    }
}
