//! Markdown report exporter.
//!
//! Renders a [`SessionReport`] with a minijinja template and writes it to
//! `<out_dir>/<prefix>_<short id>.md`. A data-URL concept image is written
//! next to the report and linked instead of being inlined.

use crate::image_processing::DataUrl;
use async_trait::async_trait;
use intake_core::report::{ExportedReport, ReportExporter, SessionReport};
use intake_core::{IntakeError, Result};
use minijinja::{Environment, context};
use std::path::PathBuf;

pub const DEFAULT_REPORT_PREFIX: &str = "intake_report";

const REPORT_TEMPLATE: &str = r#"# {{ report.name }} ({{ report.short_id }})

- 状态: {{ report.status }}
- 更新时间: {{ updated_at }}

## 用户画像

- 家庭结构: {{ report.family_structure }}
- 出行频率: {{ report.travel_frequency }}
- 广告认知: {{ report.ad_knowledge }}
- 广告接受度: {{ report.ad_acceptance }}
- 情感需求: {{ report.emotional_needs | join("、") }}
- 社交需求: {{ report.social_needs | join("、") }}

## 功能配置

{% for option in report.functional_choices -%}
- **{{ option.title }}**: {{ option.description }}
{% else -%}
- (无)
{% endfor %}
{% if report.functional_comment %}> {{ report.functional_comment }}
{% endif %}
## 交互配置

{% for option in report.interaction_choices -%}
- **{{ option.title }}**: {{ option.description }}
{% else -%}
- (无)
{% endfor %}
{% if report.interaction_comment %}> {{ report.interaction_comment }}
{% endif %}
## 概念设计

{% if report.style_description %}风格描述: {{ report.style_description }}

{% endif %}{% if image_link %}![concept]({{ image_link }})

{% endif %}| 维度 | 喜欢 | 不喜欢 |
| --- | --- | --- |
{% for row in report.evaluation -%}
| {{ row.category }} | {{ row.liked }} | {{ row.disliked }} |
{% endfor %}
## AI 总结

{{ report.summary or "(暂无)" }}
"#;

/// Writes Markdown reports into a directory.
pub struct MarkdownReportExporter {
    out_dir: PathBuf,
    prefix: String,
}

impl MarkdownReportExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            prefix: DEFAULT_REPORT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn file_stem(&self, report: &SessionReport) -> String {
        format!("{}_{}", self.prefix, report.short_id)
    }

    /// Renders the report body. `image_link` replaces the final image.
    pub fn render(report: &SessionReport, image_link: Option<&str>) -> Result<String> {
        let mut env = Environment::new();
        env.add_template("report", REPORT_TEMPLATE)
            .map_err(|e| IntakeError::export(format!("Invalid report template: {}", e)))?;
        let template = env
            .get_template("report")
            .map_err(|e| IntakeError::export(e.to_string()))?;

        template
            .render(context! {
                report => report,
                updated_at => report.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                image_link => image_link,
            })
            .map_err(|e| IntakeError::export(format!("Failed to render report: {}", e)))
    }
}

#[async_trait]
impl ReportExporter for MarkdownReportExporter {
    async fn export(&self, report: &SessionReport) -> Result<ExportedReport> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let stem = self.file_stem(report);

        let image_link = match report.final_image.as_deref() {
            Some(image) if DataUrl::is_image_data_url(image) => match DataUrl::parse(image) {
                Ok(data) => {
                    let file_name = format!("{}.{}", stem, data.extension());
                    tokio::fs::write(self.out_dir.join(&file_name), &data.bytes).await?;
                    Some(file_name)
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable concept image: {}", e);
                    None
                }
            },
            Some(url) => Some(url.to_string()),
            None => None,
        };

        let body = Self::render(report, image_link.as_deref())?;
        let path = self.out_dir.join(format!("{}.md", stem));
        tokio::fs::write(&path, body.as_bytes()).await?;
        tracing::info!("Exported report for session {} to {}", report.session_id, path.display());

        Ok(ExportedReport {
            path,
            bytes_written: body.len(),
        })
    }
}
