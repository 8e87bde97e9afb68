//! Text stream adapter: flattening a rendered page tree into fragments.
//!
//! The upstream renderer hands over a hierarchical tree of visual nodes
//! (pages containing figures, text boxes, text lines and glyphs). This
//! module walks that tree and emits the flat stream of positioned
//! [`Fragment`]s the layout pipeline consumes:
//!
//! - adjacent glyphs sharing the same font context inside one enclosing box
//!   coalesce into a single fragment anchored at the box position;
//! - a font change starts a new fragment;
//! - the end of a text line appends the [`LINE_BREAK`] marker to the current
//!   fragment rather than starting a new one;
//! - curves and images carry no text and are skipped.
//!
//! Fragment `y` coordinates are downward-increasing distances from a running
//! top offset accumulated across pages, which keeps document-local
//! comparisons well ordered. Cross-page y comparisons carry no other meaning.

use crate::fragment::{Fragment, LINE_BREAK};
use crate::geometry::Rect;

/// Vertical offset applied before the first page.
const TOP_OFFSET: f32 = 50.0;

/// One node of the rendered page tree.
///
/// Each variant has a fixed handling rule in [`TextStream::collect_page`];
/// there is no open-ended dispatch.
#[derive(Debug, Clone)]
pub enum RenderNode {
    /// A whole page; `bbox` spans the page in page-local coordinates
    /// (y downward from the page top).
    Page {
        /// Page bounds; `height` advances the running offset
        bbox: Rect,
        /// Child nodes in render order
        children: Vec<RenderNode>,
    },
    /// A figure grouping other content.
    Figure {
        /// Figure bounds in page-local coordinates
        bbox: Rect,
        /// Child nodes in render order
        children: Vec<RenderNode>,
    },
    /// A box of text lines; its position anchors the fragments inside it.
    TextBox {
        /// Box bounds in page-local coordinates
        bbox: Rect,
        /// Child nodes in render order
        children: Vec<RenderNode>,
    },
    /// One visual line of glyphs inside a text box.
    TextLine {
        /// Child nodes, normally glyphs
        children: Vec<RenderNode>,
    },
    /// A single rendered glyph (or pre-shaped glyph run).
    Glyph {
        /// Text content of the glyph
        text: String,
        /// Font name, part of the coalescing key
        font_name: String,
        /// Font size, part of the coalescing key
        font_size: f32,
    },
    /// A vector path; carries no text.
    Curve,
    /// A raster image; carries no text.
    Image,
    /// Logical grouping metadata; its content is already reachable through
    /// the box hierarchy and must not be visited twice.
    Group {
        /// Grouped child nodes (not visited)
        children: Vec<RenderNode>,
    },
}

/// Stateful adapter turning rendered pages into fragment streams.
///
/// One `TextStream` lives for the duration of a document so the vertical
/// offset accumulates across pages.
#[derive(Debug)]
pub struct TextStream {
    offset: f32,
}

impl Default for TextStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStream {
    /// Create an adapter positioned before the first page.
    pub fn new() -> Self {
        Self { offset: TOP_OFFSET }
    }

    /// Flatten one page into its fragments and advance the running offset.
    ///
    /// A non-page node yields no fragments.
    pub fn collect_page(&mut self, page: &RenderNode) -> Vec<Fragment> {
        let RenderNode::Page { bbox, children } = page else {
            log::warn!("collect_page called on a non-page node; ignoring");
            return Vec::new();
        };

        let mut walker = PageWalker {
            base: self.offset,
            font: None,
            font_stack: Vec::new(),
            box_stack: Vec::new(),
            fragments: Vec::new(),
        };
        for child in children {
            walker.visit(child);
        }

        self.offset += bbox.height;
        walker.fragments
    }
}

/// Font context key: glyphs coalesce while this stays unchanged.
type FontKey = (String, f32);

struct PageWalker {
    base: f32,
    font: Option<FontKey>,
    font_stack: Vec<Option<FontKey>>,
    box_stack: Vec<Rect>,
    fragments: Vec<Fragment>,
}

impl PageWalker {
    fn visit(&mut self, node: &RenderNode) {
        match node {
            RenderNode::Figure { bbox, children } | RenderNode::TextBox { bbox, children } => {
                self.begin_box(bbox);
                for child in children {
                    self.visit(child);
                }
                self.end_box();
            },
            RenderNode::TextLine { children } => {
                for child in children {
                    self.visit(child);
                }
                self.put_newline();
            },
            RenderNode::Glyph {
                text,
                font_name,
                font_size,
            } => {
                self.put_text(text, font_name, *font_size);
            },
            RenderNode::Curve | RenderNode::Image | RenderNode::Group { .. } => {},
            RenderNode::Page { .. } => {
                log::warn!("nested page node encountered; ignoring");
            },
        }
    }

    fn begin_box(&mut self, bbox: &Rect) {
        // A new box resets the font context so its first glyph always opens
        // a fresh fragment anchored at the box position.
        self.font_stack.push(self.font.take());
        self.box_stack.push(Rect::new(
            bbox.x,
            self.base + bbox.y,
            bbox.width,
            bbox.height,
        ));
    }

    fn end_box(&mut self) {
        self.font = self.font_stack.pop().unwrap_or(None);
        self.box_stack.pop();
    }

    fn put_text(&mut self, text: &str, font_name: &str, font_size: f32) {
        let Some(&anchor) = self.box_stack.last() else {
            log::warn!("glyph outside any text box; dropping '{}'", text);
            return;
        };

        let font = (font_name.to_string(), font_size);
        if self.font.as_ref() != Some(&font) || self.fragments.is_empty() {
            self.font = Some(font);
            self.fragments.push(Fragment::new(anchor, String::new()));
        }

        if let Some(last) = self.fragments.last_mut() {
            last.text.push_str(text);
        }
    }

    fn put_newline(&mut self) {
        if let Some(last) = self.fragments.last_mut() {
            last.text.push_str(LINE_BREAK);
        }
    }
}
