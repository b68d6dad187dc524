//! Template filters.

#![expect(clippy::inline_always)]

use std::fmt::Display;

use askama::Values;
use pulldown_cmark::{Event, Options, Parser, html};

/// Renders Markdown course descriptions to HTML.
#[askama::filter_fn]
pub fn markdown<T: Display>(s: T, _: &dyn Values) -> askama::Result<String> {
    Ok(render_markdown(&s.to_string()))
}

/// Raw HTML in the source is emitted as escaped text.
fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

    let mut output = String::new();
    html::push_html(&mut output, parser);

    output
}
