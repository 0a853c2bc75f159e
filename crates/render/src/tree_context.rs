use crate::config::ContextConfig;
use crate::error::{RenderError, Result};
use context_tags::Language;
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Row span of a syntax node in preorder
#[derive(Debug, Clone, Copy)]
struct NodeSpan {
    start: usize,
    end: usize,
    /// One past the last preorder index of this node's subtree
    subtree_end: usize,
}

impl NodeSpan {
    fn size(&self) -> usize {
        self.end - self.start
    }
}

/// Syntax-aware excerpt builder for one file.
///
/// Add lines of interest, expand them with [`TreeContext::add_context`],
/// then [`TreeContext::format`] the shown lines with `⋮` markers for the
/// elided runs.
pub struct TreeContext {
    config: ContextConfig,
    lines: Vec<String>,
    num_lines: usize,
    spans: Vec<NodeSpan>,
    /// Preorder indices of the nodes starting on each line
    nodes: Vec<Vec<usize>>,
    /// Start lines of every scope covering each line
    scopes: Vec<BTreeSet<usize>>,
    /// Header range `[start, end)` of the scope starting on each line
    header: Vec<(usize, usize)>,
    show_lines: BTreeSet<usize>,
    lines_of_interest: BTreeSet<usize>,
    done_parent_scopes: BTreeSet<usize>,
}

impl TreeContext {
    /// Parse `code` with the grammar picked from `rel_fname`
    pub fn new(rel_fname: &str, code: &str, config: ContextConfig) -> Result<Self> {
        let language = Language::from_path(rel_fname);
        let mut parser = language
            .parser()
            .map_err(|_| RenderError::UnsupportedLanguage(rel_fname.to_string()))?;
        let tree = parser
            .parse(code, None)
            .ok_or_else(|| RenderError::Parse(rel_fname.to_string()))?;

        let lines: Vec<String> = code.lines().map(str::to_string).collect();
        let num_lines = lines.len() + 1;
        let spans = collect_spans(tree.root_node());

        let rows = spans
            .iter()
            .map(|s| s.end + 1)
            .max()
            .unwrap_or(0)
            .max(num_lines);
        let mut nodes = vec![Vec::new(); rows];
        let mut scopes = vec![BTreeSet::new(); rows];
        let mut headers: Vec<Vec<(usize, usize, usize)>> = vec![Vec::new(); rows];

        for (idx, span) in spans.iter().enumerate() {
            nodes[span.start].push(idx);
            if span.size() > 0 {
                headers[span.start].push((span.size(), span.start, span.end));
            }
            for scope in &mut scopes[span.start..=span.end] {
                scope.insert(span.start);
            }
        }

        // The smallest multi-line scope starting on a line is its header,
        // capped at `header_max` lines
        let header = headers
            .into_iter()
            .enumerate()
            .map(|(i, mut candidates)| {
                candidates.sort_unstable();
                if candidates.len() > 1 {
                    let (size, head_start, head_end) = candidates[0];
                    if size > config.header_max {
                        (head_start, head_start + config.header_max)
                    } else {
                        (head_start, head_end)
                    }
                } else {
                    (i, i + 1)
                }
            })
            .collect();

        Ok(Self {
            config,
            lines,
            num_lines,
            spans,
            nodes,
            scopes,
            header,
            show_lines: BTreeSet::new(),
            lines_of_interest: BTreeSet::new(),
            done_parent_scopes: BTreeSet::new(),
        })
    }

    /// Mark zero-based lines as interesting
    pub fn add_lines_of_interest(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.lines_of_interest.extend(lines);
    }

    /// Expand the lines of interest into the set of lines to show
    pub fn add_context(&mut self) {
        if self.lines_of_interest.is_empty() {
            return;
        }

        self.done_parent_scopes.clear();
        self.show_lines = self.lines_of_interest.clone();

        if self.config.loi_pad > 0 {
            let pad = self.config.loi_pad;
            let padded: Vec<usize> = self
                .show_lines
                .iter()
                .flat_map(|&line| line.saturating_sub(pad)..=line + pad)
                .filter(|&line| line < self.num_lines)
                .collect();
            self.show_lines.extend(padded);
        }

        if self.config.last_line {
            let bottom_line = self.num_lines.saturating_sub(2);
            self.show_lines.insert(bottom_line);
            self.add_parent_scopes(bottom_line);
        }

        let lois: Vec<usize> = self.lines_of_interest.iter().copied().collect();
        if self.config.parent_context {
            for &line in &lois {
                self.add_parent_scopes(line);
            }
        }

        if self.config.child_context {
            for &line in &lois {
                self.add_child_context(line);
            }
        }

        if self.config.margin > 0 {
            self.show_lines.extend(0..self.config.margin);
        }

        self.close_small_gaps();
    }

    fn add_parent_scopes(&mut self, line: usize) {
        let mut pending = vec![line];
        while let Some(i) = pending.pop() {
            if !self.done_parent_scopes.insert(i) {
                continue;
            }
            if i >= self.scopes.len() {
                continue;
            }
            for &scope_start in &self.scopes[i] {
                let (head_start, head_end) = self.header[scope_start];
                if head_start > 0 || self.config.show_top_of_file_parent_scope {
                    self.show_lines.extend(head_start..head_end);
                }
                if self.config.last_line {
                    if let Some(last) = self.last_line_of_scope(scope_start) {
                        pending.push(last);
                    }
                }
            }
        }
    }

    fn add_child_context(&mut self, line: usize) {
        let Some(last_line) = self.last_line_of_scope(line) else {
            return;
        };
        let size = last_line - line;
        if size < 5 {
            self.show_lines.extend(line..=last_line);
            return;
        }

        let mut children: Vec<NodeSpan> = self.nodes[line]
            .iter()
            .flat_map(|&idx| self.spans[idx..self.spans[idx].subtree_end].iter().copied())
            .collect();
        children.sort_by(|a, b| b.size().cmp(&a.size()));

        let currently_showing = self.show_lines.len() as f64;
        let max_to_show = (size as f64 * 0.10).min(25.0).max(5.0);
        for child in children {
            if self.show_lines.len() as f64 > currently_showing + max_to_show {
                break;
            }
            self.add_parent_scopes(child.start);
        }
    }

    fn last_line_of_scope(&self, line: usize) -> Option<usize> {
        self.nodes
            .get(line)?
            .iter()
            .map(|&idx| self.spans[idx].end)
            .max()
    }

    /// Fill one-line gaps and keep the blank line after a shown line
    fn close_small_gaps(&mut self) {
        let mut closed = self.show_lines.clone();
        let sorted: Vec<usize> = self.show_lines.iter().copied().collect();
        for pair in sorted.windows(2) {
            if pair[1] - pair[0] == 2 {
                closed.insert(pair[0] + 1);
            }
        }

        for (i, line) in self.lines.iter().enumerate() {
            if !closed.contains(&i) {
                continue;
            }
            if !line.trim().is_empty()
                && i + 2 < self.num_lines
                && self.lines[i + 1].trim().is_empty()
            {
                closed.insert(i + 1);
            }
        }

        self.show_lines = closed;
    }

    /// Render shown lines; empty when nothing is shown
    pub fn format(&self) -> String {
        if self.show_lines.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let mut dots = !self.show_lines.contains(&0);
        for (i, line) in self.lines.iter().enumerate() {
            if !self.show_lines.contains(&i) {
                if dots {
                    output.push_str(elision_marker(self.config.line_number));
                    dots = false;
                }
                continue;
            }

            let spacer = if self.config.mark_lois && self.lines_of_interest.contains(&i) {
                "█"
            } else {
                "│"
            };
            if self.config.line_number {
                output.push_str(&format!("{:3}", i + 1));
            }
            output.push_str(spacer);
            output.push_str(line);
            output.push('\n');
            dots = true;
        }
        output
    }
}

/// Line printed in place of a run of hidden lines
pub fn elision_marker(line_number: bool) -> &'static str {
    if line_number {
        "...⋮...\n"
    } else {
        "⋮...\n"
    }
}

/// Flatten the tree in preorder, anonymous nodes included
fn collect_spans(root: Node) -> Vec<NodeSpan> {
    let mut spans = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut cursor = root.walk();
    'walk: loop {
        let node = cursor.node();
        open.push(spans.len());
        spans.push(NodeSpan {
            start: node.start_position().row,
            end: node.end_position().row,
            subtree_end: 0,
        });
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if let Some(idx) = open.pop() {
                spans[idx].subtree_end = spans.len();
            }
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }
    spans
}
