use serde::{Deserialize, Serialize};

use crate::cmark::{Block, FencedCodeBlock, Heading, List, Paragraph, SectionLevel};

use super::SchemaAttributeList;

/// All expected sections of a resource documentation page. Each section is only captured
/// for its first occurrence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub title: Option<Section>,
    pub example: Option<Section>,
    pub arguments: Option<SchemaAttributeSection>,
    pub attributes: Option<SchemaAttributeSection>,
    pub timeouts: Option<Section>,
    pub import: Option<Section>,
}

/// A section started by a recognized heading, holding the blocks that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: Heading,
    pub paragraphs: Vec<Paragraph>,
    pub fenced_code_blocks: Vec<FencedCodeBlock>,
    /// Only collected for the timeouts section.
    pub lists: Vec<List>,
}

/// An arguments or attributes section, which documents schema attributes as lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttributeSection {
    pub heading: Heading,
    /// Typically the byline of the section.
    pub paragraphs: Vec<Paragraph>,
    pub fenced_code_blocks: Vec<FencedCodeBlock>,
    pub lists: Vec<List>,
    /// One entry for every list in the section, including lists nested inside list items.
    /// A nested list follows its parent list.
    pub schema_attribute_lists: Vec<SchemaAttributeList>,
}

impl Section {
    fn new(heading: &Heading) -> Self {
        Self {
            heading: heading.clone(),
            paragraphs: Vec::new(),
            fenced_code_blocks: Vec::new(),
            lists: Vec::new(),
        }
    }
}

impl SchemaAttributeSection {
    fn new(heading: &Heading) -> Self {
        Self {
            heading: heading.clone(),
            paragraphs: Vec::new(),
            fenced_code_blocks: Vec::new(),
            lists: Vec::new(),
            schema_attribute_lists: Vec::new(),
        }
    }

    fn push_list(&mut self, list: &List) {
        self.lists.push(list.clone());
        push_schema_attribute_lists(&mut self.schema_attribute_lists, list);
    }
}

fn push_schema_attribute_lists(lists: &mut Vec<SchemaAttributeList>, list: &List) {
    lists.push(SchemaAttributeList::from_list(list));

    for nested in list.items.iter().flat_map(|item| item.nested_lists()) {
        push_schema_attribute_lists(lists, nested);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    None,
    Title,
    Example,
    Arguments,
    Attributes,
    Timeouts,
    Import,
}

impl Sections {
    /// Segment a block tree into sections.
    ///
    /// Headings are classified in order: a heading containing `resource_name` is the title,
    /// otherwise the prefixes `Example`, `Argument`, `Attribute`, `Timeout` and `Import` select
    /// a section. Blocks following a recognized heading belong to its section until the next
    /// heading at the same level, or any heading that is not recognized. Content under an
    /// unrecognized heading belongs to no section, even when it is nested inside a
    /// recognized one.
    pub fn from_blocks(blocks: &[Block], resource_name: &str) -> Sections {
        let mut walker = SectionsWalker {
            resource_name,
            sections: Sections::default(),
            current: SectionKind::None,
            start_level: None,
        };

        walker.walk(blocks);
        walker.sections
    }
}

struct SectionsWalker<'a> {
    resource_name: &'a str,
    sections: Sections,
    current: SectionKind,
    /// The heading level that started the current section.
    start_level: Option<SectionLevel>,
}

impl<'a> SectionsWalker<'a> {
    fn walk(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Heading(heading) => self.enter_heading(heading),
                Block::FencedCodeBlock(code_block) => self.push_fenced_code_block(code_block),
                Block::Paragraph(paragraph) => self.push_paragraph(paragraph),
                Block::List(list) => self.push_list(list),
                Block::BlockQuote(children) => self.walk(children),
                Block::TextBlock(_) | Block::Other => (),
            }
        }
    }

    fn enter_heading(&mut self, heading: &Heading) {
        if Some(heading.level) == self.start_level {
            self.current = SectionKind::None;
        }

        let kind = self.classify(&heading.text);
        let sections = &mut self.sections;

        match kind {
            SectionKind::None => {
                self.current = SectionKind::None;
                return;
            }
            SectionKind::Title => sections.title = Some(Section::new(heading)),
            SectionKind::Example => sections.example = Some(Section::new(heading)),
            SectionKind::Arguments => {
                sections.arguments = Some(SchemaAttributeSection::new(heading))
            }
            SectionKind::Attributes => {
                sections.attributes = Some(SchemaAttributeSection::new(heading))
            }
            SectionKind::Timeouts => sections.timeouts = Some(Section::new(heading)),
            SectionKind::Import => sections.import = Some(Section::new(heading)),
        }

        self.current = kind;
        self.start_level = Some(heading.level);
    }

    fn classify(&self, text: &str) -> SectionKind {
        let sections = &self.sections;

        if sections.title.is_none() && text.contains(self.resource_name) {
            SectionKind::Title
        } else if sections.example.is_none() && text.starts_with("Example") {
            SectionKind::Example
        } else if sections.arguments.is_none() && text.starts_with("Argument") {
            SectionKind::Arguments
        } else if sections.attributes.is_none() && text.starts_with("Attribute") {
            SectionKind::Attributes
        } else if sections.timeouts.is_none() && text.starts_with("Timeout") {
            SectionKind::Timeouts
        } else if sections.import.is_none() && text.starts_with("Import") {
            SectionKind::Import
        } else {
            SectionKind::None
        }
    }

    fn push_fenced_code_block(&mut self, code_block: &FencedCodeBlock) {
        let code_block = code_block.clone();

        match self.current {
            SectionKind::Arguments | SectionKind::Attributes => {
                if let Some(section) = self.current_schema_section() {
                    section.fenced_code_blocks.push(code_block);
                }
            }
            _ => {
                if let Some(section) = self.current_section() {
                    section.fenced_code_blocks.push(code_block);
                }
            }
        }
    }

    fn push_paragraph(&mut self, paragraph: &Paragraph) {
        let paragraph = paragraph.clone();

        match self.current {
            SectionKind::Arguments | SectionKind::Attributes => {
                if let Some(section) = self.current_schema_section() {
                    section.paragraphs.push(paragraph);
                }
            }
            _ => {
                if let Some(section) = self.current_section() {
                    section.paragraphs.push(paragraph);
                }
            }
        }
    }

    fn push_list(&mut self, list: &List) {
        match self.current {
            SectionKind::Arguments | SectionKind::Attributes => {
                if let Some(section) = self.current_schema_section() {
                    section.push_list(list);
                }
            }
            SectionKind::Timeouts => {
                if let Some(section) = self.sections.timeouts.as_mut() {
                    section.lists.push(list.clone());
                }
            }
            _ => (),
        }
    }

    fn current_section(&mut self) -> Option<&mut Section> {
        match self.current {
            SectionKind::Title => self.sections.title.as_mut(),
            SectionKind::Example => self.sections.example.as_mut(),
            SectionKind::Timeouts => self.sections.timeouts.as_mut(),
            SectionKind::Import => self.sections.import.as_mut(),
            _ => None,
        }
    }

    fn current_schema_section(&mut self) -> Option<&mut SchemaAttributeSection> {
        match self.current {
            SectionKind::Arguments => self.sections.arguments.as_mut(),
            SectionKind::Attributes => self.sections.attributes.as_mut(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmark;

    fn sections(source: &str) -> Sections {
        let markdown = cmark::parse(source.as_bytes()).expect("should parse");

        Sections::from_blocks(&markdown.blocks, "test_thing")
    }

    const FULL: &str = r#"# Resource: test_thing

Manages a thing.

## Example Usage

```terraform
resource "test_thing" "example" {
  name = "example"
}
```

## Argument Reference

The following arguments are supported:

* `name` - (Required) The name.
* `tags` - (Optional) Tags.

## Attributes Reference

In addition to all arguments above, the following attributes are exported:

* `id` - The identifier.

## Timeouts

* `create` - (Default `10m`) How long to wait.

## Import

```
$ terraform import test_thing.example example
```
"#;

    #[test]
    fn segments_all_sections() {
        let sections = sections(FULL);

        let title = sections.title.expect("title section");
        assert_eq!("Resource: test_thing", title.heading.text);
        assert_eq!(SectionLevel::H1, title.heading.level);
        assert_eq!(1, title.paragraphs.len());

        let example = sections.example.expect("example section");
        assert_eq!(1, example.fenced_code_blocks.len());
        assert_eq!(Some("terraform"), example.fenced_code_blocks[0].language());

        let arguments = sections.arguments.expect("arguments section");
        assert_eq!(1, arguments.paragraphs.len());
        assert_eq!(1, arguments.lists.len());
        assert_eq!(1, arguments.schema_attribute_lists.len());
        assert_eq!(2, arguments.schema_attribute_lists[0].items.len());

        let attributes = sections.attributes.expect("attributes section");
        assert_eq!(
            "In addition to all arguments above, the following attributes are exported:",
            attributes.paragraphs[0].text
        );
        assert_eq!("id", attributes.schema_attribute_lists[0].items[0].name);

        let timeouts = sections.timeouts.expect("timeouts section");
        assert_eq!(1, timeouts.lists.len());

        let import = sections.import.expect("import section");
        assert_eq!(1, import.fenced_code_blocks.len());
    }

    #[test]
    fn empty_document_has_no_sections() {
        assert_eq!(Sections::default(), sections(""));
    }

    #[test]
    fn captures_only_the_first_occurrence() {
        let sections = sections("## Example Usage\n\nFirst\n\n## Example Other\n\nSecond\n");

        let example = sections.example.expect("example section");
        assert_eq!("Example Usage", example.heading.text);
        assert_eq!(1, example.paragraphs.len());
        assert_eq!("First", example.paragraphs[0].text);
    }

    #[test]
    fn unrecognized_heading_ends_the_current_section() {
        let sections = sections(concat!(
            "## Argument Reference\n\n",
            "* `a` - A.\n\n",
            "### Nested Block\n\n",
            "* `z` - Z.\n\n",
            "Ignored paragraph.\n",
        ));

        let arguments = sections.arguments.expect("arguments section");
        assert_eq!(1, arguments.lists.len());
        assert!(arguments.paragraphs.is_empty());
    }

    #[test]
    fn content_before_any_heading_is_ignored() {
        let sections = sections("Intro paragraph.\n\n# Resource: test_thing\n");

        assert!(sections.title.expect("title section").paragraphs.is_empty());
    }

    #[test]
    fn subheadings_of_recognized_kinds_start_new_sections() {
        let sections = sections(concat!(
            "# Resource: test_thing\n\n",
            "## Example Usage\n\n",
            "Text\n\n",
            "### Import\n\n",
            "```\ntest_thing\n```\n",
        ));

        assert_eq!(
            1,
            sections.example.expect("example section").paragraphs.len()
        );

        let import = sections.import.expect("import section");
        assert_eq!(SectionLevel::H3, import.heading.level);
        assert_eq!(1, import.fenced_code_blocks.len());
    }

    #[test]
    fn extracts_nested_schema_attribute_lists() {
        let source = concat!(
            "## Argument Reference\n\n",
            "* `block` - (Optional) A block.\n",
            "    * `b` - (Required) B.\n",
            "    * `a` - (Required) A.\n",
            "* `name` - (Required) Name.\n",
        );
        let arguments = sections(source).arguments.expect("arguments section");

        assert_eq!(1, arguments.lists.len());
        assert_eq!(2, arguments.schema_attribute_lists.len());

        let names = |index: usize| -> Vec<String> {
            arguments.schema_attribute_lists[index]
                .items
                .iter()
                .map(|item| item.name.clone())
                .collect()
        };

        assert_eq!(vec!["block", "name"], names(0));
        assert_eq!(vec!["b", "a"], names(1));
    }

    #[test]
    fn walks_into_block_quotes() {
        let source = "## Argument Reference\n\n> Note: arguments are case sensitive.\n";
        let arguments = sections(source).arguments.expect("arguments section");

        assert_eq!(1, arguments.paragraphs.len());
    }

    #[test]
    fn segmenting_is_idempotent() {
        assert_eq!(sections(FULL), sections(FULL));
    }
}
