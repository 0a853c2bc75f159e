use crate::config::ContextConfig;
use crate::error::Result;
use crate::tree_context::TreeContext;
use context_tags::read_text;
use std::path::Path;

/// Render the lines of interest of one file with their syntax context.
///
/// Unreadable files render as an empty source. Returns an empty string when
/// no line of interest was given.
pub fn render_file(
    fname: &Path,
    rel_fname: &str,
    lines_of_interest: &[usize],
    config: &ContextConfig,
) -> Result<String> {
    let mut code = read_text(fname).unwrap_or_else(|| {
        log::debug!("No readable text in {}, rendering it empty", fname.display());
        String::new()
    });
    if !code.ends_with('\n') {
        code.push('\n');
    }

    let mut context = TreeContext::new(rel_fname, &code, config.clone())?;
    context.add_lines_of_interest(lines_of_interest.iter().copied());
    context.add_context();
    Ok(context.format())
}
