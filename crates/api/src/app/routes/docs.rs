//! Documentation endpoints: an HTML page and a JSON listing of the route catalog.

use axum::response::{Html, IntoResponse};

use advance_api_core::RouteEntry;

use crate::context::ApiRequest;
use crate::handler::HandlerResult;
use crate::registry::CatalogHandle;
use crate::response::ApiResponse;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the catalog as a standalone HTML page, one table row per entry.
pub fn render_docs_page(title: &str, entries: &[RouteEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|entry| {
            format!(
                "      <tr class=\"route\"><td class=\"method method-{lower}\">{method}</td><td><code>{path}</code></td><td>{module}</td><td>{description}</td></tr>\n",
                lower = escape(&entry.method().to_ascii_lowercase()),
                method = escape(entry.method()),
                path = escape(entry.path()),
                module = escape(entry.module().unwrap_or("")),
                description = escape(entry.description().unwrap_or("")),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ text-align: left; padding: .4rem .8rem; border-bottom: 1px solid #ddd; }}
    .method {{ font-weight: bold; font-family: monospace; }}
    .method-get {{ color: #2f855a; }}
    .method-post {{ color: #2b6cb0; }}
    .method-put {{ color: #b7791f; }}
    .method-delete {{ color: #c53030; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p class="route-count">{count} routes</p>
  <table>
    <thead><tr><th>Method</th><th>Path</th><th>Module</th><th>Description</th></tr></thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        title = escape(title),
        count = entries.len(),
        rows = rows,
    )
}

/// HTML page over the catalog as it is at request time.
pub async fn docs_page(catalog: CatalogHandle, _req: ApiRequest, _res: ApiResponse) -> HandlerResult {
    Ok(Html(render_docs_page("Advance API", &catalog.list())).into_response())
}

/// Catalog entries in a success envelope.
pub async fn docs_routes(catalog: CatalogHandle, _req: ApiRequest, res: ApiResponse) -> HandlerResult {
    Ok(res.success(catalog.list()))
}
