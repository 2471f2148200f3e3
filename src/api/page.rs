//! The single HTML page: form, spinner overlay, result banners.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::SummarizeError;
use crate::summarize::Summary;

pub const PAGE_TITLE: &str = "SkyChat: Summarize Text From YT or Website";

/// What the page shows below the form.
pub enum Outcome {
    Success(Summary),
    Failure(SummarizeError),
}

pub struct PageView<'a> {
    /// When set, the credential came from the environment and the field is hidden.
    pub credential_configured: bool,
    pub url: &'a str,
    pub outcome: Option<Outcome>,
}

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; background: #0e1117; color: #fafafa; }
    aside { width: 18rem; padding: 2rem 1.5rem; background: #262730; }
    main { flex: 1; padding: 2rem 3rem; max-width: 48rem; }
    .neon-title { color: #00FF00; font-size: 40px; font-weight: bold; text-align: center;
        text-shadow: 0 0 5px #00FF00, 0 0 10px #00FF00, 0 0 15px #00FF00, 0 0 20px #00FF00, 0 0 25px #00FF00, 0 0 30px #00FF00, 0 0 35px #00FF00; }
    label { display: block; margin-bottom: .5rem; font-size: .9rem; }
    input { width: 100%; box-sizing: border-box; padding: .6rem; border-radius: .4rem; border: 1px solid #555; background: #1a1c24; color: inherit; }
    button { margin-top: 1rem; padding: .6rem 1rem; border-radius: .4rem; border: 1px solid #888; background: transparent; color: inherit; cursor: pointer; }
    .banner { margin-top: 1.5rem; padding: 1rem; border-radius: .4rem; white-space: pre-wrap; }
    .banner.success { background: rgba(33, 195, 84, .15); color: #7df1a0; }
    .banner.error { background: rgba(255, 43, 43, .15); color: #ff8c8c; }
    #spinner { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, .6); align-items: center; justify-content: center; font-size: 1.2rem; }
    #spinner.active { display: flex; }
"#;

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", encode_text(PAGE_TITLE)));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<form method=\"post\" action=\"/\" onsubmit=\"document.getElementById('spinner').classList.add('active')\" style=\"display: contents\">\n");
    html.push_str("<aside>\n");
    if view.credential_configured {
        html.push_str("<p>Huggingface API Token loaded from the environment.</p>\n");
    } else {
        // The secret is never echoed back into the page.
        html.push_str("<label for=\"credential\">Huggingface API Token</label>\n");
        html.push_str("<input id=\"credential\" name=\"credential\" type=\"password\" value=\"\" autocomplete=\"off\">\n");
    }
    html.push_str("</aside>\n<main>\n");

    html.push_str(&format!("<h1 class=\"neon-title\">&#x1F47D;{}</h1>\n", encode_text(PAGE_TITLE)));
    html.push_str("<h3>Summarize the URL</h3>\n");
    html.push_str(&format!(
        "<input id=\"url\" name=\"url\" type=\"text\" aria-label=\"URL\" value=\"{}\">\n",
        encode_double_quoted_attribute(view.url)
    ));
    html.push_str("<button type=\"submit\">Summarize the Content from YT or Website</button>\n");

    match &view.outcome {
        Some(Outcome::Success(summary)) => {
            html.push_str(&format!(
                "<div class=\"banner success\">{}</div>\n",
                encode_text(&summary.text)
            ));
        }
        Some(Outcome::Failure(err)) if err.is_input_error() => {
            html.push_str(&format!(
                "<div class=\"banner error\">{}</div>\n",
                encode_text(&err.to_string())
            ));
        }
        Some(Outcome::Failure(err)) => {
            html.push_str(&format!(
                "<div class=\"banner error\">Exception: {}</div>\n",
                encode_text(&err.to_string())
            ));
        }
        None => {}
    }

    html.push_str("</main>\n</form>\n");
    html.push_str("<div id=\"spinner\">Waiting...</div>\n");
    html.push_str("</body>\n</html>\n");

    html
}
