use super::*;
use anyhow::Result;
use rust_embed::RustEmbed;
use serde_json::{json, Value};
use std::collections::HashMap;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.html"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "src/output/assets/"]
#[include = "*.css"]
#[include = "*.js"]
struct Assets;

pub struct HtmlGenerator {
    tera: Tera,
}

impl HtmlGenerator {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Load templates from embedded resources
        for file in Templates::iter() {
            let template_name = file.as_ref();
            let template_content = Templates::get(template_name)
                .ok_or_else(|| anyhow::anyhow!("Template {} not found", template_name))?;
            let template_str = std::str::from_utf8(&template_content.data)
                .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in template {}: {}", template_name, e))?;

            tera.add_raw_template(template_name, template_str)
                .map_err(|e| anyhow::anyhow!("Failed to add template {}: {}", template_name, e))?;
        }

        tera.register_filter("percent", Self::percent_filter);

        Ok(Self { tera })
    }

    fn load_asset(&self, filename: &str) -> Result<String> {
        let asset = Assets::get(filename)
            .ok_or_else(|| anyhow::anyhow!("Asset {} not found", filename))?;
        let content = std::str::from_utf8(&asset.data)
            .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in asset {}: {}", filename, e))?;
        Ok(content.to_string())
    }

    fn percent_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let share = value.as_f64().unwrap_or(0.0);
        Ok(Value::String(format!("{:.1}%", share)))
    }

    fn prepare_template_context(&self, report: &ChartReport) -> Result<Context> {
        let mut context = Context::new();

        context.insert("css_content", &self.load_asset("chart.css")?);
        context.insert("js_content", &self.load_asset("chart.js")?);
        context.insert("title", &report.title());
        context.insert(
            "generated_date",
            &report.generated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        context.insert("has_chart", &report.chart.is_some());
        context.insert("rejected", &Self::rejected_rows(report));
        context.insert("duplicates", &report.duplicates);

        if let Some(chart) = &report.chart {
            let total = chart.total();
            let rows: Vec<Value> = chart
                .iter()
                .map(|(author, count)| {
                    let share = if total > 0 {
                        count as f64 / total as f64 * 100.0
                    } else {
                        0.0
                    };
                    json!({ "author": author, "count": count, "share": share })
                })
                .collect();

            context.insert("rows", &rows);
            context.insert("total", &total);
            context.insert("chart_class", chart.display_kind().css_class());
            context.insert("chart_json", &Self::embeddable_json(chart)?);
        }

        Ok(context)
    }

    fn rejected_rows(report: &ChartReport) -> Vec<Value> {
        report
            .rejected
            .iter()
            .map(|rejection| {
                json!({
                    "index": rejection.index,
                    "reason": rejection.defect.to_string(),
                    "entry": rejection.entry.to_string(),
                })
            })
            .collect()
    }

    /// JSON that is safe to place inside a `<script>` element.
    fn embeddable_json(chart: &ChartViewModel) -> Result<String> {
        let raw = serde_json::to_string(chart)?;
        Ok(raw.replace("</", "<\\/"))
    }
}

impl OutputGenerator for HtmlGenerator {
    async fn generate(&mut self, report: &ChartReport) -> Result<String> {
        let context = self.prepare_template_context(report)?;
        let html = self.tera.render("chart.html", &context)?;
        Ok(html)
    }
}
