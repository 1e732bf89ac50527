use serde::Serialize;
use tera::{Context, Tera};

use summarize_core::{LayoutOptions, SummarizeConfig};
use summarize_engine::SummaryRow;

use crate::error::RenderError;
use crate::sanitize::Sanitizer;

const TEMPLATE_NAME: &str = "summary_block";
const BLOCK_TEMPLATE: &str = include_str!("../templates/summary_block.html.tera");

#[derive(Serialize)]
struct BlockContext {
    primary_color: String,
    title: Option<String>,
    label_width: Option<u32>,
    value_width: Option<u32>,
    rows: Vec<RowContext>,
}

#[derive(Serialize)]
struct RowContext {
    label: String,
    value: String,
    background: String,
    /// Value sits under the label instead of beside it.
    stacked: bool,
}

/// Renders summary rows into the styled HTML block written to the
/// destination field.
///
/// Every piece of stored text goes through the [`Sanitizer`] before it
/// reaches the template; the template itself does no escaping.
pub struct BlockRenderer {
    tera: Tera,
}

impl BlockRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, BLOCK_TEMPLATE)
            .map_err(|e| RenderError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render(
        &self,
        rows: &[SummaryRow],
        title: Option<&str>,
        layout: &LayoutOptions,
        sanitizer: &dyn Sanitizer,
    ) -> Result<String, RenderError> {
        let block = BlockContext {
            primary_color: sanitizer.sanitize_attribute(layout.primary()),
            title: title
                .filter(|t| !t.trim().is_empty())
                .map(|t| sanitizer.sanitize(t)),
            label_width: layout.label_width(),
            value_width: layout.value_width(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, row)| RowContext {
                    label: sanitizer.sanitize(&row.label),
                    value: line_breaks(&sanitizer.sanitize(&row.value)),
                    background: sanitizer.sanitize_attribute(if i % 2 == 0 {
                        layout.primary()
                    } else {
                        layout.secondary()
                    }),
                    stacked: layout.disp_value_under_name
                        || layout.forces_stacked(row.value.chars().count()),
                })
                .collect(),
        };

        let context = Context::from_serialize(&block)?;
        let html = self.tera.render(TEMPLATE_NAME, &context)?;

        tracing::debug!(rows = rows.len(), bytes = html.len(), "rendered summary block");
        Ok(html.trim().to_string())
    }
}

/// Render `rows` with the configuration's title and layout.
pub fn render_block(
    rows: &[SummaryRow],
    config: &SummarizeConfig,
    sanitizer: &dyn Sanitizer,
) -> Result<String, RenderError> {
    BlockRenderer::new()?.render(rows, config.title.as_deref(), &config.layout, sanitizer)
}

fn line_breaks(text: &str) -> String {
    text.replace("\r\n", "<br>").replace(['\n', '\r'], "<br>")
}
