//! Terminal rendering of persona markdown using pulldown-cmark

use colored::Colorize;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Inline style active for a run of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

/// A styled run of rendered text; may span lines
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    text: String,
    style: Style,
}

/// Render markdown for the terminal: strong text is bold, emphasis is
/// italic, code is plain, and block structure becomes line breaks.
pub fn render(text: &str) -> String {
    spans(text).iter().map(paint).collect()
}

fn paint(span: &Span) -> String {
    let Style {
        bold,
        italic,
        strikethrough,
    } = span.style;
    if !(bold || italic || strikethrough) {
        return span.text.clone();
    }

    let mut styled = span.text.as_str().normal();
    if bold {
        styled = styled.bold();
    }
    if italic {
        styled = styled.italic();
    }
    if strikethrough {
        styled = styled.strikethrough();
    }
    styled.to_string()
}

fn spans(text: &str) -> Vec<Span> {
    let mut collector = Collector::default();
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        collector.event(event);
    }
    collector.trim_trailing_newlines();
    collector.spans
}

#[derive(Default)]
struct Collector {
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    /// Open lists, innermost last; `Some(n)` is the next ordered number
    lists: Vec<Option<u64>>,
    code_block: bool,
    /// An item marker was written and nothing follows it yet
    item_open: bool,
}

impl Collector {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) | Event::Start(Tag::BlockQuote(_)) => self.block(),
            Event::Start(Tag::Heading { .. }) => {
                self.block();
                self.strong += 1;
            }
            Event::End(TagEnd::Heading(_)) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => {
                self.block();
                self.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => self.code_block = false,
            Event::Start(Tag::List(start)) => {
                if self.lists.is_empty() {
                    self.block();
                }
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => self.item(),
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::Strikethrough) => self.strikethrough += 1,
            Event::End(TagEnd::Strikethrough) => {
                self.strikethrough = self.strikethrough.saturating_sub(1)
            }
            Event::Text(text) => {
                let style = if self.code_block {
                    Style::default()
                } else {
                    self.style()
                };
                self.push(&text, style);
            }
            Event::Code(code) => self.plain(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.plain(&html),
            Event::SoftBreak | Event::HardBreak => self.plain("\n"),
            Event::Rule => {
                self.block();
                self.plain("---");
            }
            _ => {}
        }
    }

    fn style(&self) -> Style {
        Style {
            bold: self.strong > 0,
            italic: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        self.item_open = false;
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn plain(&mut self, text: &str) {
        self.push(text, Style::default());
    }

    /// Separate a new block from the previous one by a blank line
    fn block(&mut self) {
        if self.spans.is_empty() || self.item_open {
            return;
        }
        self.trim_trailing_newlines();
        self.plain("\n\n");
    }

    fn item(&mut self) {
        if self
            .spans
            .last()
            .is_some_and(|span| !span.text.ends_with('\n'))
        {
            self.plain("\n");
        }

        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{}. ", n);
                *n += 1;
                marker
            }
            _ => "- ".to_string(),
        };
        self.plain(&format!("{}{}", "  ".repeat(depth), marker));
        self.item_open = true;
    }

    fn trim_trailing_newlines(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let len = last.text.trim_end_matches('\n').len();
            last.text.truncate(len);
            if !last.text.is_empty() {
                break;
            }
            self.spans.pop();
        }
    }
}
