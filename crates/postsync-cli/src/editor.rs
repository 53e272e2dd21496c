//! Interactive editing support
//!
//! Opens $EDITOR for post bodies and asks for confirmation before deletes.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Edit `initial` in the user's editor and return the saved text
pub fn edit_text(initial: &str) -> Result<String> {
    let Some(editor) = editor_from_env(|var| env::var(var).ok()) else {
        bail!("No editor configured. Set $EDITOR or pass the text with --body.");
    };

    let mut scratch = tempfile::Builder::new()
        .prefix("postsync_body_")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create scratch file")?;
    scratch
        .write_all(initial.as_bytes())
        .context("Failed to write scratch file")?;

    let status = Command::new(&editor)
        .arg(scratch.path())
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}", editor, status);
    }

    let text = fs::read_to_string(scratch.path()).context("Failed to read edited text")?;
    Ok(text.trim_end().to_string())
}

/// First non-empty of $EDITOR and $VISUAL
fn editor_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["EDITOR", "VISUAL"]
        .into_iter()
        .filter_map(lookup)
        .find(|editor| !editor.trim().is_empty())
}

/// Whether stdin is attached to a terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Ask a y/N question on stdout
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_prefers_editor_over_visual() {
        let env = |var: &str| match var {
            "EDITOR" => Some("hx".to_string()),
            "VISUAL" => Some("code -w".to_string()),
            _ => None,
        };
        assert_eq!(editor_from_env(env).as_deref(), Some("hx"));
    }

    #[test]
    fn test_editor_skips_blank_values() {
        let env = |var: &str| match var {
            "EDITOR" => Some("  ".to_string()),
            "VISUAL" => Some("vi".to_string()),
            _ => None,
        };
        assert_eq!(editor_from_env(env).as_deref(), Some("vi"));
        assert_eq!(editor_from_env(|_| None), None);
    }
}
