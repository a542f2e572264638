use std::path::Path;
use std::path::PathBuf;

/// A markdown compatibility test: a TOC fragment, the session commands to
/// feed the CLI, and the expected output.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub toc: String,
    pub input: String,
    pub result: String,
    pub path: PathBuf,
    pub disabled: bool,
}

fn parse_name(content: &str) -> String {
    content
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("# "))
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn parse_markdown_block(content: &str, language: &str) -> String {
    content
        .split(&format!("```{}\n", language))
        .nth(1)
        .and_then(|rest| rest.split("```").next())
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl TestCase {
    pub fn from_string<A, B>(content: A, path: B) -> Self
    where
        A: AsRef<str>,
        B: AsRef<Path>,
    {
        let content = content.as_ref();
        let name = parse_name(content);
        let toc = parse_markdown_block(content, "toc");
        let input = parse_markdown_block(content, "input");
        let result = parse_markdown_block(content, "result");
        let disabled = content.trim().ends_with("!!! disabled");

        TestCase {
            name,
            toc,
            input,
            result,
            path: path.as_ref().into(),
            disabled,
        }
    }

    /// Input lines joined the way the CLI `run` command expects them.
    pub fn input_string(&self) -> String {
        self.input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>()
            .join(",")
    }
}
