use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::error::Result;

const DELIMITER: &str = "---";
const END_DELIMITER: &str = "...";

/// Key/value pairs taken from the YAML front matter block at the top of a document.
/// Documents without front matter have empty metadata.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    /// Fetch a scalar value rendered as a string. Numbers and booleans are stringified,
    /// sequences and mappings are not scalars and yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The result of splitting a front matter block off the top of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// The raw YAML between the delimiters, if the source starts with a closed front matter block.
    pub yaml: Option<&'a str>,
    /// Everything following the closing delimiter.
    pub body: &'a str,
    /// Number of lines taken up by the front matter block, including delimiters.
    pub lines: usize,
}

impl<'a> FrontMatter<'a> {
    /// Split a leading `---` delimited block off `source`. A leading byte order mark is dropped.
    /// An unterminated block is not front matter, and the whole source is returned as the body.
    pub fn split(source: &'a str) -> FrontMatter<'a> {
        let content = source.strip_prefix('\u{feff}').unwrap_or(source);
        let unsplit = FrontMatter {
            yaml: None,
            body: content,
            lines: 0,
        };

        let mut lines = content.split_inclusive('\n');
        let Some(first) = lines.next() else {
            return unsplit;
        };

        if trim_line_ending(first) != DELIMITER {
            return unsplit;
        }

        let yaml_start = first.len();
        let mut offset = yaml_start;

        for (index, line) in lines.enumerate() {
            let line_end = offset + line.len();
            let line_text = trim_line_ending(line);

            if line_text == DELIMITER || line_text == END_DELIMITER {
                return FrontMatter {
                    yaml: Some(&content[yaml_start..offset]),
                    body: &content[line_end..],
                    lines: index + 2,
                };
            }

            offset = line_end;
        }

        unsplit
    }

    /// Parse the YAML block into metadata. Missing or empty front matter yields empty metadata.
    pub fn metadata(&self) -> Result<Metadata> {
        let Some(yaml) = self.yaml else {
            return Ok(Metadata::default());
        };

        if yaml.trim().is_empty() {
            return Ok(Metadata::default());
        }

        let value: Value =
            serde_yaml::from_str(yaml).with_context(|| "error parsing YAML frontmatter")?;

        match value {
            Value::Null => Ok(Metadata::default()),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(key, value)| match key {
                    Value::String(key) => Ok((key, value)),
                    other => Err(anyhow!("YAML frontmatter key ({:?}) should be a string", other)),
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Metadata),
            _ => bail!("YAML frontmatter should be a mapping of keys to values"),
        }
    }
}

fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
