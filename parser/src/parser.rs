use crate::markup::{self, Element};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use scrollbox_common::markers;
use scrollbox_common::*;
use std::fmt::Display;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed markup at byte {position}: {message}")]
    Markup { message: String, position: u64 },
    #[error("unexpected <{tag}> at byte {position}")]
    UnexpectedTag { tag: String, position: u64 },
    #[error("unexpected end of markup")]
    UnexpectedEndOfFile,
}

impl ParseError {
    pub(crate) fn markup<E: Display>(err: E, position: u64) -> Self {
        ParseError::Markup {
            message: err.to_string(),
            position,
        }
    }
}

#[derive(Debug, Clone)]
enum FrameKind {
    /// `<ol>`: entries inside belong to `parent`.
    List {
        parent: Option<EntryId>,
        level: usize,
        last_chapter: Option<EntryId>,
    },
    /// `<li>` that produced an entry.
    Item(EntryId),
    /// `<li>` that only wraps a nested list.
    Wrapper,
    Link,
    Toggle,
    Number,
    Inline,
}

#[derive(Debug, Clone)]
struct Frame {
    tag: String,
    kind: FrameKind,
}

enum TextTarget {
    Label(EntryId),
    Number(EntryId),
    Ignore,
}

/// Builds a [`NavigationTree`] from the table-of-contents fragment.
#[derive(Debug, Default)]
pub struct Parser {
    tree: NavigationTree,
    stack: Vec<Frame>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<A>(&mut self, markup: A) -> Result<NavigationTree, ParseError>
    where
        A: AsRef<str>,
    {
        self.tree = NavigationTree::new();
        self.stack.clear();

        let mut reader = Reader::from_str(markup.as_ref());
        let config = reader.config_mut();
        config.trim_text(false);
        // void elements like `<br>` are closed by us, not by the reader
        config.check_end_names = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let element = markup::element_from_start(&reader, &start)?;
                    if !markup::is_void(&element.tag) {
                        self.open(element, markup::position(&reader))?;
                    }
                }
                Ok(Event::Empty(start)) => {
                    let element = markup::element_from_start(&reader, &start)?;
                    let tag = element.tag.clone();
                    if !markup::is_void(&tag) {
                        self.open(element, markup::position(&reader))?;
                        self.close(&tag, markup::position(&reader))?;
                    }
                }
                Ok(Event::End(end)) => {
                    let tag = markup::decode_tag_name(&reader, end.name().as_ref())?;
                    if !markup::is_void(&tag) {
                        self.close(&tag, markup::position(&reader))?;
                    }
                }
                Ok(Event::Text(text)) => {
                    let text = markup::decode_text(&reader, &text)?;
                    self.push_text(&text);
                }
                Ok(Event::CData(data)) => {
                    let text = reader
                        .decoder()
                        .decode(&data)
                        .map_err(|err| ParseError::markup(err, markup::position(&reader)))?;
                    self.push_text(&text);
                }
                Ok(Event::GeneralRef(entity)) => {
                    let text = markup::decode_entity(&reader, &entity)?;
                    self.push_text(&text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(ParseError::markup(err, reader.error_position() as u64));
                }
            }
        }

        if !self.stack.is_empty() {
            return Err(ParseError::UnexpectedEndOfFile);
        }

        debug!(entries = self.tree.len(), "parsed table of contents");
        Ok(std::mem::take(&mut self.tree))
    }

    fn open(&mut self, element: Element, position: u64) -> Result<(), ParseError> {
        let kind = match element.tag.as_str() {
            "ol" | "ul" => self.open_list(&element, position)?,
            "li" => self.open_item(&element, position)?,
            "a" => match self.current_item() {
                Some(entry_id) if element.has_class(markers::TOGGLE) => {
                    self.tree.entries[entry_id].has_toggle = true;
                    FrameKind::Toggle
                }
                Some(entry_id) => {
                    if let EntryKind::Chapter { href, .. } = &mut self.tree.entries[entry_id].kind {
                        if href.is_none() {
                            *href = element.href.clone();
                        }
                    }
                    FrameKind::Link
                }
                None => FrameKind::Inline,
            },
            "strong" if element.aria_hidden && self.current_item().is_some() => FrameKind::Number,
            _ => FrameKind::Inline,
        };

        self.stack.push(Frame {
            tag: element.tag,
            kind,
        });
        Ok(())
    }

    fn open_list(&self, element: &Element, position: u64) -> Result<FrameKind, ParseError> {
        let (parent, level) = match self.stack.last().map(|frame| &frame.kind) {
            None => (None, 0),
            Some(FrameKind::Item(entry_id)) => {
                (Some(*entry_id), self.tree.entries[*entry_id].level + 1)
            }
            // a nested list belongs to the chapter listed just before its wrapper
            Some(FrameKind::Wrapper) | Some(FrameKind::List { .. }) => match self.current_list() {
                Some((parent, level, last_chapter)) => match last_chapter {
                    Some(chapter_id) => (Some(chapter_id), level + 1),
                    None => (parent, level),
                },
                None => (None, 0),
            },
            Some(_) => {
                return Err(ParseError::UnexpectedTag {
                    tag: element.tag.clone(),
                    position,
                })
            }
        };

        Ok(FrameKind::List {
            parent,
            level,
            last_chapter: None,
        })
    }

    fn open_item(&mut self, element: &Element, position: u64) -> Result<FrameKind, ParseError> {
        let (parent, level) = match self.stack.last().map(|frame| &frame.kind) {
            Some(FrameKind::List { parent, level, .. }) => (*parent, *level),
            _ => {
                return Err(ParseError::UnexpectedTag {
                    tag: element.tag.clone(),
                    position,
                })
            }
        };

        let kind = if element.has_class(markers::CHAPTER_ITEM) {
            EntryKind::Chapter {
                label: String::new(),
                number: None,
                href: None,
            }
        } else if element.has_class(markers::SPACER) {
            EntryKind::Spacer
        } else if element.has_class(markers::PART_TITLE) {
            EntryKind::PartTitle(String::new())
        } else {
            return Ok(FrameKind::Wrapper);
        };

        let is_chapter = matches!(kind, EntryKind::Chapter { .. });
        let mut entry = Entry::new(kind, parent, level);
        if element.has_class(markers::EXPANDED) {
            entry.initial_state = SectionState::Expanded;
        }
        entry.classes = element
            .classes
            .iter()
            .filter(|class| !markers::is_generated(class))
            .cloned()
            .collect();

        let entry_id = self.tree.add_entry(entry);
        trace!(entry_id, level, "opened list item");

        if is_chapter {
            if let Some(Frame {
                kind: FrameKind::List { last_chapter, .. },
                ..
            }) = self.stack.last_mut()
            {
                *last_chapter = Some(entry_id);
            }
        }

        Ok(FrameKind::Item(entry_id))
    }

    fn close(&mut self, tag: &str, position: u64) -> Result<(), ParseError> {
        let frame = match self.stack.pop() {
            Some(frame) if frame.tag == tag => frame,
            _ => {
                return Err(ParseError::Markup {
                    message: format!("unmatched closing tag </{}>", tag),
                    position,
                })
            }
        };

        if let FrameKind::Item(entry_id) = frame.kind {
            self.finish_entry(entry_id);
        }
        Ok(())
    }

    fn finish_entry(&mut self, entry_id: EntryId) {
        match &mut self.tree.entries[entry_id].kind {
            EntryKind::Chapter { label, number, .. } => {
                *label = markup::collapse_whitespace(label);
                *number = number
                    .as_deref()
                    .map(markup::collapse_whitespace)
                    .filter(|n| !n.is_empty());
            }
            EntryKind::PartTitle(title) => *title = markup::collapse_whitespace(title),
            EntryKind::Spacer => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.text_target() {
            TextTarget::Label(entry_id) => match &mut self.tree.entries[entry_id].kind {
                EntryKind::Chapter { label, .. } => label.push_str(text),
                EntryKind::PartTitle(title) => title.push_str(text),
                EntryKind::Spacer => {}
            },
            TextTarget::Number(entry_id) => {
                if let EntryKind::Chapter { number, .. } = &mut self.tree.entries[entry_id].kind {
                    number.get_or_insert_with(String::new).push_str(text);
                }
            }
            TextTarget::Ignore => {}
        }
    }

    fn text_target(&self) -> TextTarget {
        let mut in_number = false;
        for frame in self.stack.iter().rev() {
            match frame.kind {
                FrameKind::Toggle => return TextTarget::Ignore,
                FrameKind::Number => in_number = true,
                FrameKind::Item(entry_id) if in_number => return TextTarget::Number(entry_id),
                FrameKind::Item(entry_id) => return TextTarget::Label(entry_id),
                FrameKind::List { .. } | FrameKind::Wrapper => return TextTarget::Ignore,
                FrameKind::Link | FrameKind::Inline => {}
            }
        }
        TextTarget::Ignore
    }

    /// Entry of the innermost open list item, if text or links here belong to one.
    fn current_item(&self) -> Option<EntryId> {
        for frame in self.stack.iter().rev() {
            match frame.kind {
                FrameKind::Item(entry_id) => return Some(entry_id),
                FrameKind::List { .. } | FrameKind::Wrapper | FrameKind::Toggle => return None,
                _ => {}
            }
        }
        None
    }

    fn current_list(&self) -> Option<(Option<EntryId>, usize, Option<EntryId>)> {
        self.stack.iter().rev().find_map(|frame| match frame.kind {
            FrameKind::List {
                parent,
                level,
                last_chapter,
            } => Some((parent, level, last_chapter)),
            _ => None,
        })
    }
}
