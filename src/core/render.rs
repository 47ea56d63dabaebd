//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub quiet: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            quiet: false,
        }
    }

    /// Create a new render config with pretty option
    #[allow(dead_code)]
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            quiet: false,
        }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Print the rendered result set to stdout. Quiet mode prints nothing;
    /// the exit code still reports the outcome.
    pub fn print(&self, result_set: &ResultSet) {
        if self.config.quiet {
            return;
        }
        println!("{}", self.render(result_set));
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        // Group by kind
        let mut actions = Vec::new();
        let mut records = Vec::new();
        let mut sessions = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Action => actions.push(item),
                Kind::Record => records.push(item),
                Kind::Session => sessions.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        // Action items render as the numbered list the UI shows
        if !actions.is_empty() {
            output.push_str("## Action Items\n\n");
            for (idx, item) in actions.iter().enumerate() {
                if let Some(text) = &item.text {
                    output.push_str(&format!("{}. {}\n", idx + 1, text));
                }
            }
            output.push('\n');
        }

        if !sessions.is_empty() {
            output.push_str("## Session\n\n");
            for item in sessions {
                if let Some(text) = &item.text {
                    output.push_str(&format!("- {}\n", text));
                }
            }
            output.push('\n');
        }

        if !records.is_empty() {
            output.push_str("## Records\n\n");
            for item in records {
                self.render_record_md(&mut output, item);
            }
        }

        output
    }

    fn render_record_md(&self, output: &mut String, item: &ResultItem) {
        match (&item.collection, &item.id) {
            (Some(collection), Some(id)) => {
                output.push_str(&format!("### `{}` / `{}`", collection, id));
            }
            (Some(collection), None) => {
                output.push_str(&format!("### `{}`", collection));
            }
            _ => {}
        }
        if let Some(count) = item.meta.count {
            output.push_str(&format!(" ({} entries)", count));
        }
        output.push('\n');

        if let Some(text) = &item.text {
            output.push_str(&format!("\n{}\n", text));
        }

        if let Some(data) = &item.data {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            output.push_str("\n```json\n");
            output.push_str(&json);
            output.push_str("\n```\n");
        }

        output.push('\n');
    }

    /// Render as raw output (for debugging)
    fn render_raw(&self, result_set: &ResultSet) -> String {
        // Raw mode: just output text lines directly
        result_set
            .items
            .iter()
            .filter_map(|item| item.text.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
