use pulldown_cmark::{html, Parser};

use crate::Content;

/// HTML is produced by rendering the Markdown document through
/// pulldown-cmark; raw `<details>` blocks pass through untouched.
pub fn to_html(content: &Content) -> String {
    let md = super::markdown::to_markdown(content);
    let mut out = String::with_capacity(md.len() * 2);
    html::push_html(&mut out, Parser::new(&md));
    out
}
