//! HTML format output: a standalone page that renders the ERD with mermaid.js
//! and offers the rendered SVG as a download.

use super::mermaid;
use super::MarkupOptions;
use crate::model::{column_count, TableInfo};
use crate::render::RenderConfig;

/// Page-level settings for [`to_html`]
#[derive(Debug, Clone, Copy)]
pub struct HtmlPage<'a> {
    pub title: &'a str,
    /// File name offered by the download button
    pub download_name: &'a str,
    pub render: &'a RenderConfig,
}

/// Generate an HTML page embedding the Mermaid ERD
pub fn to_html(tables: &[TableInfo], options: &MarkupOptions, page: &HtmlPage<'_>) -> String {
    let mermaid_code = mermaid::to_mermaid(tables, options);

    let stats = format!(
        "{} tables · {} columns",
        tables.len(),
        column_count(tables)
    );

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/panzoom@9/dist/panzoom.min.js"></script>
  <style>
    :root {{
      --color-bg: #f9fafb;
      --color-surface: #ffffff;
      --color-text: #111827;
      --color-text-muted: #6b7280;
      --color-border: #d1d5db;
      --color-accent: #4f46e5;
      --color-error: #b91c1c;
    }}

    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    html, body {{ height: 100%; overflow: hidden; }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
      background: var(--color-bg);
      color: var(--color-text);
    }}

    .diagram-container {{
      position: absolute;
      top: 0;
      left: 0;
      right: 0;
      bottom: 44px;
      overflow: hidden;
      cursor: grab;
    }}

    .diagram-container:active {{
      cursor: grabbing;
    }}

    .diagram {{
      display: inline-block;
      transform-origin: 0 0;
      padding: 24px;
    }}

    .diagram svg {{
      max-width: none !important;
    }}

    .error {{
      color: var(--color-error);
      padding: 24px;
      white-space: pre-wrap;
    }}

    .bottom-bar {{
      position: fixed;
      bottom: 0;
      left: 0;
      right: 0;
      height: 44px;
      background: var(--color-surface);
      border-top: 1px solid var(--color-border);
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 0 16px;
      font-size: 13px;
    }}

    .bar-left, .bar-right {{
      display: flex;
      align-items: center;
      gap: 12px;
    }}

    .logo {{
      font-weight: 700;
    }}

    .title, .stats {{
      color: var(--color-text-muted);
    }}

    .btn {{
      background: none;
      border: 1px solid var(--color-border);
      border-radius: 4px;
      padding: 5px 10px;
      cursor: pointer;
      color: var(--color-text-muted);
      font-family: inherit;
      font-size: 12px;
      transition: border-color 0.15s, color 0.15s;
    }}

    .btn:hover:not(:disabled) {{
      border-color: var(--color-accent);
      color: var(--color-accent);
    }}

    .btn:disabled {{
      opacity: 0.5;
      cursor: default;
    }}

    .btn.copied {{
      border-color: #16a34a;
      color: #16a34a;
    }}

    @media (max-width: 600px) {{
      .title, .stats {{ display: none; }}
    }}
  </style>
</head>
<body>
  <div class="diagram-container">
    <div class="diagram" id="diagram"></div>
  </div>

  <div class="bottom-bar">
    <div class="bar-left">
      <span class="logo">sql-erd</span>
      <span class="title">{title}</span>
    </div>

    <div class="bar-right">
      <span class="stats">{stats}</span>
      <button class="btn" id="copyBtn" onclick="copyMermaid()" title="Copy Mermaid code">
        <span id="copyText">Copy</span>
      </button>
      <button class="btn" id="downloadBtn" onclick="downloadSvg()" title="Download SVG" disabled>
        Download SVG
      </button>
    </div>
  </div>

  <script>
    const mermaidCode = `{mermaid_code_escaped}`;
    const mermaidConfig = {mermaid_config};
    const downloadName = "{download_name}";
    let renderedSvg = '';
    let panzoomInstance = null;

    function copyMermaid() {{
      navigator.clipboard.writeText(mermaidCode).then(() => {{
        const btn = document.getElementById('copyBtn');
        const txt = document.getElementById('copyText');
        btn.classList.add('copied');
        txt.textContent = 'Copied!';
        setTimeout(() => {{
          btn.classList.remove('copied');
          txt.textContent = 'Copy';
        }}, 2000);
      }});
    }}

    function downloadSvg() {{
      if (!renderedSvg) return;
      const blob = new Blob([renderedSvg], {{ type: 'image/svg+xml' }});
      const url = URL.createObjectURL(blob);
      const link = document.createElement('a');
      link.href = url;
      link.download = downloadName;
      link.style.display = 'none';
      document.body.appendChild(link);
      link.click();
      document.body.removeChild(link);
      URL.revokeObjectURL(url);
    }}

    function initPanzoom() {{
      const diagram = document.getElementById('diagram');
      if (panzoomInstance) panzoomInstance.dispose();
      panzoomInstance = panzoom(diagram, {{
        maxZoom: 5,
        minZoom: 0.1,
        bounds: false,
        boundsPadding: 0.1
      }});
    }}

    document.addEventListener('DOMContentLoaded', async () => {{
      const container = document.getElementById('diagram');
      mermaid.initialize(Object.assign({{ startOnLoad: false }}, mermaidConfig));
      try {{
        const {{ svg }} = await mermaid.render('erd-diagram', mermaidCode);
        renderedSvg = svg;
        container.innerHTML = svg;
        document.getElementById('downloadBtn').disabled = false;
        initPanzoom();
      }} catch (error) {{
        container.classList.add('error');
        container.textContent = error instanceof Error ? error.message : String(error);
      }}
    }});
  </script>
</body>
</html>"##,
        title = escape_html(page.title),
        stats = stats,
        mermaid_code_escaped = escape_js(&mermaid_code),
        mermaid_config = page.render.mermaid_config(),
        download_name = escape_js_string(page.download_name),
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape for a JS template literal
fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
        .replace("</script", "<\\/script")
}

/// Escape for a double-quoted JS string
fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('<', "\\u003c")
}
