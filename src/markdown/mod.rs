//! Line-oriented markdown block segmentation for transcript rendering.
//!
//! A greedy single-pass dispatcher, not a CommonMark grammar: each scan
//! position tries fence, heading, list item, quote, and table rules in that
//! order, and anything unmatched coalesces into a text run. Nested
//! constructs (a list inside a quote, say) degrade to whichever single-line
//! rule matches first.

use serde::Serialize;

/// One renderable segment of a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text {
        content: String,
    },
    Code {
        content: String,
        language: String,
    },
    Heading {
        content: String,
        level: usize,
    },
    ListItem {
        content: String,
        indent: usize,
    },
    Quote {
        content: String,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Segment `content` into an ordered sequence of blocks.
///
/// Total over any input: unterminated code fences consume to end of input,
/// and a lone pipe-prefixed line is consumed without emitting a table
/// (matching the behavior of the tool this renders for).
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.starts_with("```") {
            let language = line[3..].trim().to_string();
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].starts_with("```") {
                code_lines.push(lines[i]);
                i += 1;
            }
            // Skip the closing fence; an unterminated fence ran to EOF
            if i < lines.len() {
                i += 1;
            }
            blocks.push(Block::Code {
                content: code_lines.join("\n"),
                language,
            });
            continue;
        }

        if let Some((content, level)) = parse_heading(line) {
            blocks.push(Block::Heading { content, level });
            i += 1;
            continue;
        }

        if let Some((content, indent)) = parse_list_item(line) {
            blocks.push(Block::ListItem { content, indent });
            i += 1;
            continue;
        }

        if let Some(rest) = line.strip_prefix("> ") {
            blocks.push(Block::Quote {
                content: rest.to_string(),
            });
            i += 1;
            continue;
        }

        if line.trim_start().starts_with('|') {
            let start = i;
            while i < lines.len() && lines[i].trim_start().starts_with('|') {
                i += 1;
            }
            // A single pipe line is consumed but yields no table
            if let Some(table) = parse_table(&lines[start..i]) {
                blocks.push(table);
            }
            continue;
        }

        // Fallback: coalesce everything up to the next special-syntax line
        let start = i;
        while i < lines.len() && !is_special_line(lines[i]) {
            i += 1;
        }
        let text = lines[start..i].join("\n");
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            blocks.push(Block::Text {
                content: trimmed.to_string(),
            });
        }
    }

    blocks
}

fn is_special_line(line: &str) -> bool {
    line.starts_with("```")
        || parse_heading(line).is_some()
        || parse_list_item(line).is_some()
        || line.starts_with("> ")
        || line.trim_start().starts_with('|')
}

/// `#` through `######` with non-empty trailing text; seven or more hashes
/// (or empty text) is not a heading
fn parse_heading(line: &str) -> Option<(String, usize)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let text = line[level..].trim();
    if text.is_empty() {
        return None;
    }
    Some((text.to_string(), level))
}

/// `- ` or `* ` after leading whitespace; indent = leading whitespace / 2
fn parse_list_item(line: &str) -> Option<(String, usize)> {
    let stripped = line.trim_start();
    let content = stripped
        .strip_prefix("- ")
        .or_else(|| stripped.strip_prefix("* "))?;
    let leading = line.len() - stripped.len();
    Some((content.trim().to_string(), leading / 2))
}

/// Parse a contiguous run of pipe-prefixed lines: header row, optional
/// `---` separator row, then data rows
fn parse_table(lines: &[&str]) -> Option<Block> {
    if lines.len() < 2 {
        return None;
    }

    let headers = parse_table_row(lines[0])?;

    let mut rest = &lines[1..];
    if rest[0].contains("---") {
        rest = &rest[1..];
    }

    let rows: Vec<Vec<String>> = rest.iter().filter_map(|line| parse_table_row(line)).collect();

    Some(Block::Table { headers, rows })
}

/// Strip outer pipes, split on `|`, trim cells. Rows with no cells
/// (a bare `|`) yield `None`.
fn parse_table_row(line: &str) -> Option<Vec<String>> {
    let mut inner = line.trim();
    inner = inner.strip_prefix('|').unwrap_or(inner);
    inner = inner.strip_suffix('|').unwrap_or(inner);
    if inner.is_empty() {
        return None;
    }
    Some(inner.split('|').map(|cell| cell.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_round_trip() {
        let input = "| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |";
        let blocks = parse_blocks(input);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Table { headers, rows } => {
                assert_eq!(headers, &vec!["A".to_string(), "B".to_string()]);
                assert_eq!(
                    rows,
                    &vec![
                        vec!["1".to_string(), "2".to_string()],
                        vec!["3".to_string(), "4".to_string()]
                    ]
                );
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_table_without_separator_row() {
        let input = "| A | B |\n| 1 | 2 |";
        let blocks = parse_blocks(input);
        match &blocks[0] {
            Block::Table { headers, rows } => {
                assert_eq!(headers, &vec!["A".to_string(), "B".to_string()]);
                assert_eq!(rows, &vec![vec!["1".to_string(), "2".to_string()]]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_single_pipe_line_is_dropped() {
        let blocks = parse_blocks("| orphan |");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_code_fence_capture() {
        let blocks = parse_blocks("```swift\nlet x = 1\n```");
        assert_eq!(
            blocks,
            vec![Block::Code {
                content: "let x = 1".to_string(),
                language: "swift".to_string()
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_consumes_to_eof() {
        let blocks = parse_blocks("```rust\nfn main() {}\nmore");
        assert_eq!(
            blocks,
            vec![Block::Code {
                content: "fn main() {}\nmore".to_string(),
                language: "rust".to_string()
            }]
        );
    }

    #[test]
    fn test_fence_without_language() {
        let blocks = parse_blocks("```\nplain\n```");
        assert_eq!(
            blocks,
            vec![Block::Code {
                content: "plain".to_string(),
                language: String::new()
            }]
        );
    }

    #[test]
    fn test_paragraph_coalescing() {
        let input = "line one\nline two\n\nline three";
        let blocks = parse_blocks(input);
        assert_eq!(
            blocks,
            vec![Block::Text {
                content: "line one\nline two\n\nline three".to_string()
            }]
        );
    }

    #[test]
    fn test_text_run_broken_by_heading() {
        let blocks = parse_blocks("intro\n# Title\noutro");
        assert_eq!(
            blocks,
            vec![
                Block::Text {
                    content: "intro".to_string()
                },
                Block::Heading {
                    content: "Title".to_string(),
                    level: 1
                },
                Block::Text {
                    content: "outro".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse_blocks("###### Heading");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                content: "Heading".to_string(),
                level: 6
            }]
        );
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let blocks = parse_blocks("####### Not a heading");
        assert_eq!(
            blocks,
            vec![Block::Text {
                content: "####### Not a heading".to_string()
            }]
        );
    }

    #[test]
    fn test_hashes_without_text_fall_through() {
        let blocks = parse_blocks("###");
        assert_eq!(
            blocks,
            vec![Block::Text {
                content: "###".to_string()
            }]
        );
    }

    #[test]
    fn test_list_items() {
        let blocks = parse_blocks("- top\n  - nested\n* star");
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    content: "top".to_string(),
                    indent: 0
                },
                Block::ListItem {
                    content: "nested".to_string(),
                    indent: 1
                },
                Block::ListItem {
                    content: "star".to_string(),
                    indent: 0
                },
            ]
        );
    }

    #[test]
    fn test_blockquote_keeps_inner_whitespace() {
        let blocks = parse_blocks(">  spaced");
        assert_eq!(
            blocks,
            vec![Block::Quote {
                content: " spaced".to_string()
            }]
        );
    }

    #[test]
    fn test_crlf_normalization() {
        let blocks = parse_blocks("# Title\r\nbody\r\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    content: "Title".to_string(),
                    level: 1
                },
                Block::Text {
                    content: "body".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n\n\n").is_empty());
    }

    #[test]
    fn test_mixed_document() {
        let input = "# Report\n\nSome intro text.\n\n```sh\nls -la\n```\n- item one\n- item two\n> quoted\n| H1 | H2 |\n|----|----|\n| a | b |";
        let blocks = parse_blocks(input);
        assert_eq!(blocks.len(), 7);
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], Block::Text { .. }));
        assert!(matches!(blocks[2], Block::Code { .. }));
        assert!(matches!(blocks[3], Block::ListItem { .. }));
        assert!(matches!(blocks[4], Block::ListItem { .. }));
        assert!(matches!(blocks[5], Block::Quote { .. }));
        assert!(matches!(blocks[6], Block::Table { .. }));
    }
}
