use anyhow::anyhow;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::CMarkParser;
use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum SectionLevel {
    #[default]
    H1 = 1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl From<HeadingLevel> for SectionLevel {
    fn from(value: HeadingLevel) -> Self {
        match value {
            HeadingLevel::H1 => SectionLevel::H1,
            HeadingLevel::H2 => SectionLevel::H2,
            HeadingLevel::H3 => SectionLevel::H3,
            HeadingLevel::H4 => SectionLevel::H4,
            HeadingLevel::H5 => SectionLevel::H5,
            HeadingLevel::H6 => SectionLevel::H6,
        }
    }
}

impl Display for SectionLevel {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", *self as u8)
    }
}

/// A block level node of a parsed Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    /// Inline content placed directly in a tight list item, without a wrapping paragraph.
    TextBlock(TextBlock),
    FencedCodeBlock(FencedCodeBlock),
    List(List),
    BlockQuote(Vec<Block>),
    /// Thematic breaks, HTML, tables, indented code and footnote definitions.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: SectionLevel,
    /// Plain text of the heading with all inline markup removed.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FencedCodeBlock {
    /// The full info string following the opening fence.
    pub info: String,
    /// The verbatim contents of the block.
    pub text: String,
}

impl FencedCodeBlock {
    pub const LANGUAGE_MISSING: &'static str = "MISSING";
    pub const LANGUAGE_TERRAFORM: &'static str = "terraform";

    /// The first word of the info string, if any.
    pub fn language(&self) -> Option<&str> {
        self.info.split_whitespace().next()
    }

    /// The language for display in messages.
    pub fn language_or_missing(&self) -> &str {
        self.language().unwrap_or(Self::LANGUAGE_MISSING)
    }

    /// The contents of the block without surrounding whitespace.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

impl ListItem {
    /// The text of the first text carrying block of the item: the inline text of a tight item,
    /// or the first paragraph of a loose item.
    pub fn first_text(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::TextBlock(TextBlock { text }) | Block::Paragraph(Paragraph { text }) => {
                Some(text.as_str())
            }
            _ => None,
        })
    }

    /// Lists nested directly inside this item.
    pub fn nested_lists(&self) -> impl Iterator<Item = &List> {
        self.blocks.iter().filter_map(|block| match block {
            Block::List(list) => Some(list),
            _ => None,
        })
    }
}

/// Builds a [`Block`] tree out of the flat event stream produced by pulldown-cmark.
pub(crate) struct TreeParser<'a> {
    parser: CMarkParser<'a>,
}

impl<'a> TreeParser<'a> {
    pub(crate) fn new(parser: CMarkParser<'a>) -> Self {
        Self { parser }
    }

    pub(crate) fn parse(mut self) -> Result<Vec<Block>> {
        self.parse_blocks(None)
    }

    /// Parse blocks until the end of `container`, or the end of the stream for the document root.
    fn parse_blocks(&mut self, container: Option<&Tag<'a>>) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();

        loop {
            match self.parser.peek_event() {
                Some(event) if is_inline(event) => {
                    let text = self.parse_text_run();
                    blocks.push(Block::TextBlock(TextBlock { text }));
                }
                Some(_) => (),
                None => {
                    return match container {
                        Some(tag) => {
                            let message = format!("unexpected end of document inside {:?}", tag);
                            Err(self.parse_error(message))
                        }
                        None => Ok(blocks),
                    };
                }
            }

            let Some(event) = self.parser.next_event() else {
                continue;
            };

            match event {
                Event::End(tag) => match container {
                    Some(container) if &tag == container => return Ok(blocks),
                    _ => return Err(self.parse_error(format!("unexpected end of {:?}", tag))),
                },
                Event::Start(Tag::Heading(level, ..)) => {
                    let text = self.parse_inline_text(|event| {
                        matches!(event, Event::End(Tag::Heading(..)))
                    });
                    blocks.push(Block::Heading(Heading {
                        level: level.into(),
                        text,
                    }));
                }
                Event::Start(Tag::Paragraph) => {
                    let text =
                        self.parse_inline_text(|event| matches!(event, Event::End(Tag::Paragraph)));
                    blocks.push(Block::Paragraph(Paragraph { text }));
                }
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    let text = self.parse_inline_text(|event| {
                        matches!(event, Event::End(Tag::CodeBlock(_)))
                    });
                    blocks.push(Block::FencedCodeBlock(FencedCodeBlock {
                        info: info.to_string(),
                        text,
                    }));
                }
                Event::Start(Tag::List(start)) => {
                    let items = self.parse_list_items()?;
                    blocks.push(Block::List(List {
                        ordered: start.is_some(),
                        items,
                    }));
                }
                Event::Start(tag @ Tag::BlockQuote) => {
                    let children = self.parse_blocks(Some(&tag))?;
                    blocks.push(Block::BlockQuote(children));
                }
                Event::Start(other) => {
                    self.skip_tag(&other)?;
                    blocks.push(Block::Other);
                }
                _ => blocks.push(Block::Other), // Block level HTML and thematic breaks.
            }
        }
    }

    fn parse_list_items(&mut self) -> Result<Vec<ListItem>> {
        let mut items = Vec::new();

        loop {
            match self.parser.next_event() {
                Some(Event::Start(tag @ Tag::Item)) => {
                    let blocks = self.parse_blocks(Some(&tag))?;
                    items.push(ListItem { blocks });
                }
                Some(Event::End(Tag::List(_))) => return Ok(items),
                Some(other) => {
                    return Err(self.parse_error(format!("unexpected {:?} inside list", other)))
                }
                None => return Err(self.parse_error("unexpected end of document inside list")),
            }
        }
    }

    /// Collect the text of a run of inline events in a tight list item. The run ends at the
    /// first block level event, which is left in the stream.
    fn parse_text_run(&mut self) -> String {
        let mut text = String::new();

        loop {
            match self.parser.peek_event() {
                Some(event) if is_inline(event) || is_inline_end(event) => (),
                Some(Event::Html(_)) if !text.is_empty() => (),
                _ => break,
            }

            if let Some(event) = self.parser.next_event() {
                push_text(&mut text, event);
            }
        }

        text
    }

    /// Collect the text of all events up to and including the event matched by `end`.
    fn parse_inline_text(&mut self, end: impl Fn(&Event<'a>) -> bool + 'a) -> String {
        self.parser
            .iter_until_and_consume(end)
            .fold(String::new(), |mut text, event| {
                push_text(&mut text, event);
                text
            })
    }

    /// Skip all events up to and including the end of `tag`.
    fn skip_tag(&mut self, tag: &Tag<'a>) -> Result<()> {
        let mut depth = 1;

        while depth > 0 {
            match self.parser.next_event() {
                Some(Event::Start(ref other)) if other == tag => depth += 1,
                Some(Event::End(ref other)) if other == tag => depth -= 1,
                Some(_) => (),
                None => {
                    let message = format!("unexpected end of document inside {:?}", tag);
                    return Err(self.parse_error(message));
                }
            }
        }

        Ok(())
    }

    fn parse_error(&self, message: impl Display) -> Error {
        let position = self.parser.position();

        anyhow!("failed to parse Markdown {}: {}", position, message)
    }
}

fn push_text(text: &mut String, event: Event<'_>) {
    match event {
        Event::Text(value) | Event::Code(value) => text.push_str(&value),
        Event::SoftBreak => text.push(' '),
        Event::HardBreak => text.push('\n'),
        _ => (),
    }
}

/// Events that may start a run of inline content.
fn is_inline(event: &Event<'_>) -> bool {
    match event {
        Event::Text(_)
        | Event::Code(_)
        | Event::SoftBreak
        | Event::HardBreak
        | Event::FootnoteReference(_)
        | Event::TaskListMarker(_) => true,
        Event::Start(tag) => is_inline_tag(tag),
        _ => false,
    }
}

fn is_inline_end(event: &Event<'_>) -> bool {
    matches!(event, Event::End(tag) if is_inline_tag(tag))
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link(..) | Tag::Image(..)
    )
}
