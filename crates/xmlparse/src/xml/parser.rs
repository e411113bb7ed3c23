//! XML parser implementation

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::chars::{is_bare_value_char, is_name_char, strip_quotes};
use crate::lexer::Cursor;
use crate::xml::filter::{AcceptAll, Filter};
use crate::xml::model::{Attributes, Document, Element, Node, ProcessingInstruction};

/// Configuration for the XML parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Trim leading and trailing whitespace from the input
    pub trim: bool,
    /// Remove every `<!-- ... -->` span from the input before parsing
    pub strip_comments: bool,
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trim: true,
            strip_comments: false,
            max_depth: 512,
        }
    }
}

impl Config {
    pub const fn new(trim: bool, strip_comments: bool, max_depth: usize) -> Self {
        Self {
            trim,
            strip_comments,
            max_depth,
        }
    }

    pub const fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub const fn with_strip_comments(mut self, strip_comments: bool) -> Self {
        self.strip_comments = strip_comments;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// XML parser
pub struct Parser<'a, F = AcceptAll> {
    input: &'a str,
    config: Config,
    filter: F,
}

impl<'a> Parser<'a> {
    /// Create a new XML parser keeping every node
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            config: Config::default(),
            filter: AcceptAll,
        }
    }
}

impl<'a, F: Filter> Parser<'a, F> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the node filter
    pub fn with_filter<G: Filter>(self, filter: G) -> Parser<'a, G> {
        Parser {
            input: self.input,
            config: self.config,
            filter,
        }
    }

    pub const fn config(&self) -> Config {
        self.config
    }

    /// Parse the input into a document
    pub fn parse(&self) -> Result<Document> {
        debug!(len = self.input.len(), config = ?self.config, "parsing xml");
        let source = Source::prepare(self.input, self.config);
        let mut walker = Walker {
            cursor: Cursor::new(&source.text),
            filter: &self.filter,
            max_depth: self.config.max_depth,
            depth: 0,
        };
        let document = walker.document().map_err(|err| source.relocate(err))?;
        debug!(children = document.children.len(), "parsed xml document");
        Ok(document)
    }
}

impl<F> fmt::Debug for Parser<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("input_len", &self.input.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Input after the textual preprocessing selected by [`Config`].
///
/// Trimming only cuts the tail, so offsets into `text` match the caller's
/// input unless comments were stripped; `removed` maps those back.
struct Source<'a> {
    original: &'a str,
    text: Cow<'a, str>,
    /// `(offset in text, bytes removed there)` per stripped comment
    removed: Vec<(usize, usize)>,
}

impl<'a> Source<'a> {
    fn prepare(input: &'a str, config: Config) -> Self {
        let (mut text, removed) = if config.strip_comments {
            let (stripped, removed) = strip_comments(input);
            (Cow::Owned(stripped), removed)
        } else {
            (Cow::Borrowed(input), Vec::new())
        };

        // Leading whitespace is skipped by the walker instead.
        if config.trim {
            match &mut text {
                Cow::Borrowed(s) => *s = s.trim_end(),
                Cow::Owned(s) => s.truncate(s.trim_end().len()),
            }
        }
        Self {
            original: input,
            text,
            removed,
        }
    }

    /// Move an error detected in `text` onto the caller's input
    fn relocate(&self, err: Error) -> Error {
        if self.removed.is_empty() {
            return err;
        }
        err.map_span(|pos| Cursor::locate(self.original, self.original_offset(pos.offset)))
    }

    fn original_offset(&self, offset: usize) -> usize {
        self.removed
            .iter()
            .take_while(|&&(at, _)| at <= offset)
            .fold(offset, |acc, &(_, len)| acc.saturating_add(len))
    }
}

/// Remove complete comments; an unterminated `<!--` is left in place.
///
/// Also returns where each comment was cut, as offsets into the result.
fn strip_comments(input: &str) -> (String, Vec<(usize, usize)>) {
    let mut out = String::with_capacity(input.len());
    let mut removed = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("<!--") {
        let (before, tail) = rest.split_at(start);
        let Some(end) = tail.find("-->") else {
            break;
        };
        let len = end.saturating_add(3);
        out.push_str(before);
        removed.push((out.len(), len));
        rest = tail.get(len..).unwrap_or_default();
    }
    out.push_str(rest);
    (out, removed)
}

/// A parsed node plus the filter's verdict on it
#[derive(Debug)]
struct Candidate {
    node: Node,
    keep: bool,
}

/// Recursive-descent walk over one prepared input
struct Walker<'s, 'f, F> {
    cursor: Cursor<'s>,
    filter: &'f F,
    max_depth: usize,
    depth: usize,
}

impl<F: Filter> Walker<'_, '_, F> {
    fn document(&mut self) -> Result<Document> {
        self.cursor.skip_whitespace();
        let declaration = self.declaration()?;

        let mut root: Option<Element> = None;
        let mut children = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            let start = self.cursor.position();
            let Some(candidate) = self.next_top_level()? else {
                break;
            };
            trace!(kind = %candidate.node.kind(), keep = candidate.keep, "top-level node");

            if let Node::Element(element) = &candidate.node {
                if root.is_some() {
                    return Err(Error::at(ErrorKind::MultipleRoots, start));
                }
                // `Document` holds the root twice: as `root` and in `children`.
                root = Some(element.clone());
            }
            if candidate.keep {
                children.push(candidate.node);
            }
        }

        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::NotWellFormed));
        }
        let Some(root) = root else {
            return Err(self.error_here(ErrorKind::RootNotFound));
        };

        Ok(Document {
            declaration,
            root,
            children,
        })
    }

    fn next_top_level(&mut self) -> Result<Option<Candidate>> {
        if let Some(element) = self.element(true)? {
            return Ok(Some(element));
        }
        if let Some(node) = self.comment().or_else(|| self.doctype()) {
            return Ok(Some(node));
        }
        self.processing_instruction()
    }

    fn next_child(&mut self) -> Result<Option<Candidate>> {
        if let Some(element) = self.element(false)? {
            return Ok(Some(element));
        }
        Ok(self
            .text()
            .or_else(|| self.comment())
            .or_else(|| self.cdata()))
    }

    /// The `<?xml ...?>` declaration, only recognized before any other node
    fn declaration(&mut self) -> Result<Option<ProcessingInstruction>> {
        let is_declaration = self
            .cursor
            .remaining()
            .strip_prefix("<?xml")
            .is_some_and(|rest| !rest.starts_with(is_name_char));
        if !is_declaration {
            return Ok(None);
        }
        self.instruction().map(Some)
    }

    fn processing_instruction(&mut self) -> Result<Option<Candidate>> {
        if !self.at_tag_start("<?") {
            return Ok(None);
        }
        let pi = self.instruction()?;
        Ok(Some(self.admit(pi.into())))
    }

    fn instruction(&mut self) -> Result<ProcessingInstruction> {
        self.cursor.eat("<?");
        let name = self.cursor.eat_while(is_name_char).to_string();
        let attributes = self.attributes(&name, &["?>"])?;
        self.cursor.eat("?>");
        Ok(ProcessingInstruction { name, attributes })
    }

    fn element(&mut self, top_level: bool) -> Result<Option<Candidate>> {
        if !self.at_tag_start("<") {
            return Ok(None);
        }
        let start = self.cursor.position();
        let depth = self.depth.saturating_add(1);
        if self.max_depth > 0 && depth > self.max_depth {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.max_depth,
                },
                start,
            ));
        }

        self.cursor.eat("<");
        let name = self.cursor.eat_while(is_name_char).to_string();
        let attributes = self.attributes(&name, &["/>", ">", "?>"])?;

        if self.cursor.eat("/>") {
            let element = Element {
                name,
                attributes,
                children: None,
            };
            return Ok(Some(self.judge(element.into(), top_level)));
        }

        self.cursor.eat("?");
        self.cursor.eat(">");
        let header = Element {
            name,
            attributes,
            children: Some(Vec::new()),
        };
        let mut candidate = self.judge(header.into(), top_level);

        if let Node::Element(element) = &mut candidate.node {
            self.depth = depth;
            element.children = Some(self.children()?);
            self.depth = depth.saturating_sub(1);
            self.closing_tag(&element.name);
        }
        Ok(Some(candidate))
    }

    fn children(&mut self) -> Result<Vec<Node>> {
        let mut children = Vec::new();
        while let Some(candidate) = self.next_child()? {
            if candidate.keep {
                children.push(candidate.node);
            }
        }
        Ok(children)
    }

    /// Consume `</name>` if present. The name is not required to match.
    fn closing_tag(&mut self, open: &str) {
        let mut probe = self.cursor.clone();
        if !probe.eat("</") {
            return;
        }
        probe.skip_whitespace();
        let name = probe.eat_while(is_name_char);
        if name.is_empty() {
            return;
        }
        probe.skip_whitespace();
        if probe.eat(">") {
            if name != open {
                debug!(open, close = name, pos = %self.cursor.position(), "mismatched closing tag");
            }
            self.cursor = probe;
        }
    }

    /// Attributes up to (not including) one of `terminators`
    fn attributes(&mut self, name: &str, terminators: &[&str]) -> Result<Attributes> {
        let mut attributes = Attributes::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Err(self.error_here(ErrorKind::UnterminatedTag {
                    name: name.to_string(),
                }));
            }
            if terminators.iter().any(|end| self.cursor.starts_with(end)) {
                return Ok(attributes);
            }
            let Some((key, value)) = self.attribute() else {
                return Err(Error::with_message(
                    ErrorKind::MalformedAttribute,
                    Span::at(self.cursor.position()),
                    format!("malformed attribute in `{name}`"),
                ));
            };
            attributes.insert(key, value);
        }
    }

    /// `name = "value"`, `name = 'value'` or `name = value`
    fn attribute(&mut self) -> Option<(String, String)> {
        let mut probe = self.cursor.clone();
        let name = probe.eat_while(is_name_char);
        if name.is_empty() {
            return None;
        }
        probe.skip_whitespace();
        if !probe.eat("=") {
            return None;
        }
        probe.skip_whitespace();
        let raw = match probe.current()? {
            '"' => probe.eat_delimited("\"", "\"")?,
            '\'' => probe.eat_delimited("'", "'")?,
            _ => probe.eat_while(is_bare_value_char),
        };
        if raw.is_empty() {
            return None;
        }
        probe.skip_whitespace();
        self.cursor = probe;
        Some((name.to_string(), strip_quotes(raw).to_string()))
    }

    fn text(&mut self) -> Option<Candidate> {
        let content = self.cursor.eat_while(|ch| ch != '<');
        if content.is_empty() {
            return None;
        }
        Some(self.admit(Node::text(content)))
    }

    fn comment(&mut self) -> Option<Candidate> {
        let content = self.cursor.eat_delimited("<!--", "-->")?;
        Some(self.admit(Node::comment(content)))
    }

    fn cdata(&mut self) -> Option<Candidate> {
        let content = self.cursor.eat_delimited("<![CDATA[", "]]>")?;
        Some(self.admit(Node::cdata(content)))
    }

    fn doctype(&mut self) -> Option<Candidate> {
        let spaced = self
            .cursor
            .remaining()
            .strip_prefix("<!DOCTYPE")
            .is_some_and(|rest| rest.starts_with(char::is_whitespace));
        if !spaced {
            return None;
        }
        let content = self.cursor.eat_delimited("<!DOCTYPE", ">")?;
        Some(self.admit(Node::doctype(content)))
    }

    /// `open` followed by at least one name character
    fn at_tag_start(&self, open: &str) -> bool {
        self.cursor
            .remaining()
            .strip_prefix(open)
            .is_some_and(|rest| rest.starts_with(is_name_char))
    }

    fn admit(&self, node: Node) -> Candidate {
        let keep = self.filter.accept(&node);
        Candidate { node, keep }
    }

    /// Top-level elements bypass the filter so the root is always kept.
    fn judge(&self, node: Node, top_level: bool) -> Candidate {
        if top_level {
            Candidate { node, keep: true }
        } else {
            self.admit(node)
        }
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        let pos: Pos = self.cursor.position();
        Error::at(kind, pos)
    }
}
