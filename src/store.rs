//! XML documents backing the system prompt and the model catalog.
//!
//! The system prompt document is `<system>...</system>`; its direct text is
//! the prompt. The catalog document is a root element holding one `<model>`
//! child per identifier, either as text (`<model>openai/gpt-4o</model>`) or
//! as an `id` attribute (`<model id="openai/gpt-4o" />`).
//!
//! Saving always writes the text form. Other attributes on attribute-form
//! entries (such as `name`) are not carried over.
//!
//! Both readers reject documents that are not well-formed: no root, more
//! than one root, or text after the root.

use anyhow::{Result, bail};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs::atomic_write;

const SYSTEM_TAG: &[u8] = b"system";
const MODELS_TAG: &str = "models";
const MODEL_TAG: &[u8] = b"model";

/// The system prompt document is missing or unusable.
#[derive(Debug, Error)]
#[error("Could not read system prompt from {}: {reason}", path.display())]
pub struct PromptNotFound {
    pub path: PathBuf,
    pub reason: String,
}

/// Reads the system prompt from `path`.
///
/// Absence, malformed XML, a root other than `<system>` and an empty prompt
/// are all reported as [`PromptNotFound`].
pub fn load_system_prompt(path: &Path) -> Result<String, PromptNotFound> {
    let not_found = |reason: String| PromptNotFound {
        path: path.to_path_buf(),
        reason,
    };

    let xml = fs::read_to_string(path).map_err(|e| not_found(e.to_string()))?;
    let prompt = parse_system_prompt(&xml).map_err(|e| not_found(e.to_string()))?;

    if prompt.is_empty() {
        return Err(not_found("the <system> element is empty".to_string()));
    }

    tracing::debug!(path = %path.display(), chars = prompt.len(), "loaded system prompt");
    Ok(prompt)
}

/// Reads the model catalog from `path`.
///
/// A missing or malformed document yields an empty list; callers fall back to
/// their default model. Duplicate identifiers are dropped, first one wins.
pub fn load_models(path: &Path) -> Vec<String> {
    let xml = match fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no model catalog");
            return Vec::new();
        }
    };

    match parse_models(&xml) {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed model catalog");
            Vec::new()
        }
    }
}

/// Rewrites the whole catalog document at `path`.
pub fn save_models(path: &Path, models: &[String]) -> Result<()> {
    let xml = render_models(models)?;
    atomic_write(path, &xml)?;
    tracing::debug!(path = %path.display(), count = models.len(), "saved model catalog");
    Ok(())
}

/// Tracks nesting so that content around the single root element is
/// rejected the way a conforming XML parser would.
#[derive(Debug, Default)]
struct RootGuard {
    depth: usize,
    seen: bool,
}

impl RootGuard {
    /// Records an opening tag and returns the depth it sits at (0 is the root).
    fn open(&mut self, self_closing: bool) -> Result<usize> {
        let at = self.depth;
        if at == 0 {
            if self.seen {
                bail!("document has more than one root element");
            }
            self.seen = true;
        }
        if !self_closing {
            self.depth += 1;
        }
        Ok(at)
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn outside_root(&self) -> bool {
        self.depth == 0
    }

    /// Only whitespace may appear outside the root.
    fn reject_text(&self, raw: &[u8]) -> Result<()> {
        if self.outside_root() && !raw.iter().all(u8::is_ascii_whitespace) {
            bail!("text outside the root element");
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if !self.seen {
            bail!("document has no root element");
        }
        if self.depth != 0 {
            bail!("unexpected end of document");
        }
        Ok(())
    }
}

fn parse_system_prompt(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut root = RootGuard::default();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.open(false)? == 0 && e.name().as_ref() != SYSTEM_TAG {
                    bail!("root element must be <system>");
                }
            }
            Event::Empty(e) => {
                if root.open(true)? == 0 && e.name().as_ref() != SYSTEM_TAG {
                    bail!("root element must be <system>");
                }
            }
            Event::End(_) => root.close(),
            Event::Text(t) => {
                root.reject_text(&t)?;
                if root.depth == 1 {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if root.outside_root() {
                    bail!("CDATA outside the root element");
                }
                if root.depth == 1 {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.finish()?;
    Ok(text.trim().to_string())
}

fn parse_models(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut root = RootGuard::default();
    let mut current: Option<String> = None;
    let mut models: Vec<String> = Vec::new();

    let mut push = |id: &str| {
        let id = id.trim();
        if !id.is_empty() && !models.iter().any(|m| m == id) {
            models.push(id.to_string());
        }
    };

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.open(false)? == 1 && e.name().as_ref() == MODEL_TAG {
                    current = Some(String::new());
                }
            }
            Event::End(_) => {
                root.close();
                if root.depth == 1
                    && let Some(id) = current.take()
                {
                    push(&id);
                }
            }
            Event::Empty(e) => {
                if root.open(true)? == 1
                    && e.name().as_ref() == MODEL_TAG
                    && let Some(attr) = e.try_get_attribute("id")?
                {
                    push(&attr.unescape_value()?);
                }
            }
            Event::Text(t) => {
                root.reject_text(&t)?;
                if root.depth == 2
                    && let Some(id) = current.as_mut()
                {
                    id.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if root.outside_root() {
                    bail!("CDATA outside the root element");
                }
                if root.depth == 2
                    && let Some(id) = current.as_mut()
                {
                    id.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.finish()?;
    Ok(models)
}

fn render_models(models: &[String]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(MODELS_TAG)))?;
    for model in models {
        writer
            .create_element("model")
            .write_text_content(BytesText::new(model))?;
    }
    writer.write_event(Event::End(BytesEnd::new(MODELS_TAG)))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}
