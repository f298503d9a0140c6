//! Document renderers.

use crate::assemble::{AssembledReport, AssembledSection, ResolvedField};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::service::ReportMeta;
use tracing::info;

/// Turns an assembled report into a document.
pub trait DocumentRenderer {
    fn render(&self, meta: &ReportMeta, report: &AssembledReport) -> Result<String>;
}

/// Standalone single-file HTML renderer.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    config: RenderConfig,
}

impl HtmlRenderer {
    /// Create a renderer with configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn title(&self, meta: &ReportMeta) -> String {
        self.config
            .title
            .clone()
            .unwrap_or_else(|| format!("Assessment Report {}", meta.session_id))
    }

    fn generate_html(&self, meta: &ReportMeta, report: &AssembledReport) -> String {
        let title = self.title(meta);
        let subtitle = if self.config.show_assessment_type {
            format!(
                "Session {} | {} | Generated: {}",
                html_escape(&meta.session_id),
                html_escape(&meta.assessment_type),
                meta.generated_at.format("%Y-%m-%d %H:%M UTC")
            )
        } else {
            format!(
                "Session {} | Generated: {}",
                html_escape(&meta.session_id),
                meta.generated_at.format("%Y-%m-%d %H:%M UTC")
            )
        };

        let sections: String = report
            .sections
            .iter()
            .filter(|s| self.config.show_empty_sections || !s.fields.is_empty())
            .map(generate_section)
            .collect();

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="ar-report {version}">
    <meta name="robots" content="noindex, nofollow">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f9fafb;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --border-color: #e5e7eb;
            --accent-color: #2563eb;
        }}
        .dark {{
            --bg-primary: #111827;
            --bg-secondary: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --border-color: #374151;
            --accent-color: #60a5fa;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-primary: #111827;
                --bg-secondary: #1f2937;
                --text-primary: #f9fafb;
                --text-secondary: #9ca3af;
                --border-color: #374151;
                --accent-color: #60a5fa;
            }}
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
            margin: 0;
        }}
        .page {{
            max-width: 56rem;
            margin: 0 auto;
            padding: 2rem 1rem;
        }}
        .subtitle {{
            color: var(--text-secondary);
            font-size: 0.875rem;
        }}
        .card {{
            background-color: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1.5rem;
            margin-bottom: 1rem;
        }}
        .card h2 {{
            margin-top: 0;
            font-size: 1.25rem;
            color: var(--accent-color);
        }}
        .field-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr));
            gap: 0.75rem;
        }}
        .field-label {{
            font-size: 0.875rem;
            color: var(--text-secondary);
        }}
        .field-value {{
            font-size: 1.125rem;
            font-weight: 600;
        }}
        .empty {{
            color: var(--text-secondary);
            font-style: italic;
        }}
        .badge {{
            display: inline-flex;
            align-items: center;
            margin-left: 0.5rem;
            padding: 0.125rem 0.625rem;
            border-radius: 9999px;
            font-size: 0.75rem;
            font-weight: 500;
        }}
        .badge-good {{ background-color: #dcfce7; color: #166534; }}
        .badge-caution {{ background-color: #fef9c3; color: #854d0e; }}
        .badge-elevated {{ background-color: #ffedd5; color: #9a3412; }}
        .badge-alert {{ background-color: #fee2e2; color: #991b1b; }}
        footer {{
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid var(--border-color);
            font-size: 0.875rem;
            text-align: center;
            color: var(--text-secondary);
        }}
        @page {{ size: A4; margin: 20mm; }}
        @media print {{
            body {{ font-size: 10pt; background: #ffffff; color: #000000; }}
            .page {{ max-width: none; padding: 0; }}
            .card {{ page-break-inside: avoid; }}
            .no-print {{ display: none !important; }}
        }}
    </style>
</head>
<body>
    <div class="page">
        <header>
            <h1>{title}</h1>
            <p class="subtitle">{subtitle}</p>
        </header>
        <main>
            {sections}
        </main>
        <footer class="no-print">
            <p>Assessment Report v{version}</p>
        </footer>
    </div>
</body>
</html>"##,
            theme_class = self.config.theme.css_class(),
            title = html_escape(&title),
            version = env!("CARGO_PKG_VERSION"),
            subtitle = subtitle,
            sections = sections,
        )
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, meta: &ReportMeta, report: &AssembledReport) -> Result<String> {
        let html = self.generate_html(meta, report);

        let output = if cfg!(debug_assertions) {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(
            bytes = output.len(),
            session_id = %meta.session_id,
            fields = report.field_count(),
            "Report rendered"
        );

        Ok(output)
    }
}

fn generate_section(section: &AssembledSection) -> String {
    let body = if section.fields.is_empty() {
        r#"<p class="empty">No data recorded.</p>"#.to_string()
    } else {
        let fields: String = section.fields.iter().map(generate_field).collect();
        format!(r#"<div class="field-grid">{}</div>"#, fields)
    };

    format!(
        r#"<section class="card">
                <h2>{name}</h2>
                {body}
            </section>"#,
        name = html_escape(&section.name),
        body = body,
    )
}

fn generate_field(field: &ResolvedField) -> String {
    let badge = field
        .classification
        .as_deref()
        .map(|status| {
            format!(
                r#"<span class="badge {}">{}</span>"#,
                status_class(status),
                html_escape(status)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="field">
                    <div class="field-label">{label}</div>
                    <div class="field-value">{value}{badge}</div>
                </div>"#,
        label = html_escape(&field.label),
        value = html_escape(&field.rendered()),
        badge = badge,
    )
}

/// Badge class for a classification status.
pub fn status_class(status: &str) -> &'static str {
    match status {
        "Normal" => "badge-good",
        "Underweight" => "badge-caution",
        "Overweight" => "badge-elevated",
        _ => "badge-alert",
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportTheme;

    fn meta() -> ReportMeta {
        ReportMeta::new("sess-1", "as_hr_02")
    }

    fn report() -> AssembledReport {
        AssembledReport {
            sections: vec![
                AssembledSection {
                    name: "Body Composition".to_string(),
                    fields: vec![ResolvedField {
                        label: "BMI".to_string(),
                        value: "17".to_string(),
                        unit: None,
                        classification: Some("Underweight".to_string()),
                    }],
                },
                AssembledSection {
                    name: "Empty".to_string(),
                    fields: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class("Normal"), "badge-good");
        assert_eq!(status_class("Underweight"), "badge-caution");
        assert_eq!(status_class("Overweight"), "badge-elevated");
        assert_eq!(status_class("Obese"), "badge-alert");
        assert_eq!(status_class("Unknown"), "badge-alert");
    }

    #[test]
    fn test_render_contains_fields() {
        let html = HtmlRenderer::default().render(&meta(), &report()).unwrap();
        assert!(html.contains("<!DOCTYPE html>") || html.contains("<!doctype html>"));
        assert!(html.contains("Assessment Report sess-1"));
        assert!(html.contains("Body Composition"));
        assert!(html.contains("badge-caution"));
        assert!(html.contains("Underweight"));
        assert!(html.contains("No data recorded."));
    }

    #[test]
    fn test_hide_empty_sections() {
        let renderer = HtmlRenderer::new(RenderConfig::new().hide_empty_sections());
        let html = renderer.render(&meta(), &report()).unwrap();
        assert!(!html.contains("No data recorded."));
    }

    #[test]
    fn test_custom_title_and_theme() {
        let renderer = HtmlRenderer::new(
            RenderConfig::new()
                .with_title("Clinic <A>")
                .with_theme(ReportTheme::Dark),
        );
        let html = renderer.render(&meta(), &AssembledReport::default()).unwrap();
        assert!(html.contains("Clinic &lt;A&gt;"));
        assert!(html.contains(r#"class="dark""#) || html.contains("class=dark"));
    }
}
