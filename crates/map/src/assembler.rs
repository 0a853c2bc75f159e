use context_render::{elision_marker, render_file, ContextConfig};
use context_tags::Tag;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Tags of one file, in the order the file first appeared
struct FileGroup<'a> {
    rel_fname: &'a str,
    fname: &'a Path,
    lines: Vec<usize>,
    has_placeholder: bool,
}

/// Turns an ordered tag list into map text
pub struct MapAssembler<'a> {
    config: &'a ContextConfig,
    max_line_chars: usize,
}

impl<'a> MapAssembler<'a> {
    pub fn new(config: &'a ContextConfig, max_line_chars: usize) -> Self {
        Self {
            config,
            max_line_chars,
        }
    }

    /// Render each file once, in order of its first tag, then truncate every
    /// line to `max_line_chars` characters.
    pub fn assemble(&self, tags: &[Tag]) -> String {
        if tags.is_empty() {
            return String::new();
        }

        let blocks: Vec<String> = group_by_file(tags)
            .par_iter()
            .map(|group| self.render_group(group))
            .collect();

        truncate_lines(&blocks.concat(), self.max_line_chars)
    }

    fn render_group(&self, group: &FileGroup<'_>) -> String {
        let header = format!("{}:\n", group.rel_fname);

        if group.lines.is_empty() {
            if group.has_placeholder {
                return header + elision_marker(self.config.line_number);
            }
            return header + "\n";
        }

        match render_file(group.fname, group.rel_fname, &group.lines, self.config) {
            Ok(body) if !body.is_empty() => header + &body,
            Ok(_) => header + "\n",
            Err(e) => {
                log::warn!("Failed to render {}: {e}", group.rel_fname);
                header + "\n"
            }
        }
    }
}

/// Definition lines per file; references only open a group
fn group_by_file(tags: &[Tag]) -> Vec<FileGroup<'_>> {
    let mut groups: Vec<FileGroup<'_>> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for tag in tags {
        let index = *slots.entry(tag.rel_fname.as_str()).or_insert_with(|| {
            groups.push(FileGroup {
                rel_fname: &tag.rel_fname,
                fname: &tag.fname,
                lines: Vec::new(),
                has_placeholder: false,
            });
            groups.len() - 1
        });

        let group = &mut groups[index];
        match tag.line {
            None => group.has_placeholder = true,
            Some(line) if tag.is_definition() => group.lines.push(line),
            Some(_) => {}
        }
    }
    groups
}

/// Cut every line to at most `max_chars` characters and join with `\n`
pub fn truncate_lines(text: &str, max_chars: usize) -> String {
    text.lines()
        .map(|line| match line.char_indices().nth(max_chars) {
            Some((cut, _)) => &line[..cut],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
