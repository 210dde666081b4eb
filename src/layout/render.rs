//! HTML rendering
//!
//! Serialises the page tree into a complete document with the stylesheet and
//! the page script. The script keeps the two click counters, posts the five
//! inputs on every change and applies the returned figures.

use super::node::{Element, Node};
use super::LayoutOptions;

const STYLES: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; background: #f4f6f9; color: #222; margin: 0; }
.dashboard { max-width: 1400px; margin: 0 auto; padding: 1.5rem; }
.dashboard-header { text-align: center; color: #232f3e; }
.metric-container { display: flex; gap: 1rem; justify-content: space-around; margin-bottom: 1.5rem; }
.metric-box { background: #fff; border-radius: 8px; padding: 0.5rem 1rem; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
.filter-section { display: flex; gap: 1rem; justify-content: space-between; margin-bottom: 1.5rem; }
.dropdown { width: 100%; padding: 0.4rem; }
.graph-container { display: grid; grid-template-columns: repeat(auto-fit, minmax(560px, 1fr)); gap: 1rem; }
.graph { background: #fff; border-radius: 8px; min-height: 420px; }
.fade-in { animation: fade-in 0.6s ease-in; }
@keyframes fade-in { from { opacity: 0; } to { opacity: 1; } }
.modal { position: fixed; z-index: 10; inset: 0; background: rgba(0,0,0,0.5); }
.modal-content { background: #fff; margin: 5% auto; padding: 1rem; width: 80%; border-radius: 8px; }
.close { float: right; font-size: 2rem; cursor: pointer; }
"#;

const SCRIPT: &str = r#"
(function () {
  const UPDATE_URL = __UPDATE_URL__;
  const clicks = { open: 0, close: 0 };
  const value = (id) => document.getElementById(id).value;

  async function refresh() {
    const year = value("year_filter");
    const body = {
      year: year === "" ? null : parseInt(year, 10),
      state: value("state_filter") || null,
      sub_category: value("subcategory_filter") || null,
      open_clicks: clicks.open,
      close_clicks: clicks.close,
    };
    const response = await fetch(UPDATE_URL, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    if (!response.ok) {
      console.error("dashboard update failed", response.status);
      return;
    }
    const update = await response.json();
    for (const chart of update.charts) {
      Plotly.react(chart.id, chart.figure.data, chart.figure.layout, { displayModeBar: false });
    }
    document.getElementById("modal").style.display = update.modal.style.display;
  }

  ["year_filter", "state_filter", "subcategory_filter"].forEach((id) =>
    document.getElementById(id).addEventListener("change", refresh));
  document.getElementById("open-modal-button").addEventListener("click", () => {
    clicks.open += 1;
    refresh();
  });
  document.getElementById("close-modal").addEventListener("click", () => {
    clicks.close += 1;
    refresh();
  });
  refresh();
})();
"#;

/// Render a full HTML document around the page tree
pub fn render_page(root: &Node, options: &LayoutOptions) -> String {
    let mut body = String::new();
    render_node(root, &mut body);

    // JSON string literal is a valid JS string literal
    let update_url = serde_json::Value::String(options.update_url.clone()).to_string();
    let script = SCRIPT.replace("__UPDATE_URL__", &update_url);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>{styles}</style>\n\
         <script src=\"{plotly}\"></script>\n</head>\n<body>\n{body}\n\
         <script>{script}</script>\n</body>\n</html>\n",
        title = escape_html(&options.title),
        styles = STYLES,
        plotly = escape_html(&options.plotly_src),
        body = body,
        script = script,
    )
}

/// Append the HTML for a node
pub fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Element(el) => render_element(el, out),
    }
}

fn render_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');

    for child in &el.children {
        render_node(child, out);
    }

    out.push_str("</");
    out.push_str(el.tag);
    out.push('>');
}

/// Escape text for use in element content or a quoted attribute
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A & B <c> \"d\" 'e'"), "A &amp; B &lt;c&gt; &quot;d&quot; &#39;e&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_node() {
        let node: Node = Element::new("select")
            .id("state_filter")
            .child(Element::new("option").attr("value", "Jammu & Kashmir").text("Jammu & Kashmir"))
            .into();

        let mut out = String::new();
        render_node(&node, &mut out);
        assert_eq!(
            out,
            "<select id=\"state_filter\"><option value=\"Jammu &amp; Kashmir\">Jammu &amp; Kashmir</option></select>"
        );
    }

    #[test]
    fn test_render_page_wires_update_url() {
        let node: Node = Element::new("div").id("root").into();
        let options = LayoutOptions {
            update_url: "/custom/update".to_string(),
            ..Default::default()
        };

        let html = render_page(&node, &options);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Amazon Sales Dashboard</title>"));
        assert!(html.contains("const UPDATE_URL = \"/custom/update\";"));
        assert!(html.contains("<div id=\"root\"></div>"));
        assert!(html.contains("plotly"));
        assert!(!html.contains("__UPDATE_URL__"));
    }
}
