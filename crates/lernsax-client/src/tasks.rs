//! Legacy task page scraping.
//!
//! Tasks predate the JSON-RPC surface: they are listed on an HTML page keyed
//! by the session token. The anchors of interest are `a.oc` elements with a
//! popup payload.

use scraper::{Html, Selector};

/// Selector for task anchors on the listing page.
const TASK_ANCHOR_SELECTOR: &str = r##"a.oc[href="#"][data-popup]"##;

/// An anchor extracted from the legacy task listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskLink {
    /// `data-popup` payload identifying the task dialog.
    pub popup: String,
    /// Anchor text.
    pub text: String,
    /// Raw outer HTML of the anchor.
    pub html: String,
}

/// Extract the task anchors from a listing page body.
pub(crate) fn extract_task_links(body: &str) -> Result<Vec<TaskLink>, String> {
    let selector = Selector::parse(TASK_ANCHOR_SELECTOR).map_err(|e| e.to_string())?;
    let document = Html::parse_document(body);
    Ok(document
        .select(&selector)
        .map(|anchor| TaskLink {
            popup: anchor
                .value()
                .attr("data-popup")
                .unwrap_or_default()
                .to_string(),
            text: anchor.text().collect::<String>().trim().to_string(),
            html: anchor.html(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
          <a href="#" class="oc" data-popup="task_1">Math homework</a>
          <a href="#" class="oc">no popup payload</a>
          <a href="/elsewhere" class="oc" data-popup="task_2">wrong href</a>
          <a href="#" class="other" data-popup="task_3">wrong class</a>
          <div>
            <a href="#" class="oc extra" data-popup="task_4">
              Essay <b>draft</b>
            </a>
          </div>
        </body></html>"##;

    #[test]
    fn extracts_only_matching_anchors() {
        let links = extract_task_links(PAGE).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].popup, "task_1");
        assert_eq!(links[0].text, "Math homework");
        assert_eq!(links[1].popup, "task_4");
    }

    #[test]
    fn anchor_text_is_flattened_and_trimmed() {
        let links = extract_task_links(PAGE).unwrap();
        assert_eq!(links[1].text, "Essay draft");
        assert!(links[1].html.contains("data-popup=\"task_4\""));
    }

    #[test]
    fn empty_page_yields_no_links() {
        assert!(extract_task_links("").unwrap().is_empty());
        assert!(extract_task_links("<html><body></body></html>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_html_is_parsed_best_effort() {
        let body = r##"<div><a href="#" class="oc" data-popup="t">open task"##;
        let links = extract_task_links(body).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].popup, "t");
    }
}
