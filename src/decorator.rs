//! Line decorator - maps document nodes to styled ranges
//!
//! For each node handed to it during a render pass the decorator flattens
//! the node to text, tokenizes it and returns one `RangeAnnotation` per
//! classified token. Results are memoized per line: when a line's text is
//! unchanged since the last call, the stored ranges are returned as-is and
//! the tokenizer is not run.
//!
//! # Cache keys
//!
//! `PositionalCache` keys entries by the node's top-level index. Inserting
//! or removing a line shifts the lines below it onto slots holding other
//! lines' text, which costs re-tokenization but never wrong output, since
//! an entry is only reused when its text matches exactly.
//! `IdentityCache` keys by `NodeId` instead and survives such edits.
//!
//! Neither cache keys on the grammar: after `set_tokenizer`, unchanged
//! lines keep their old ranges until their text changes or the cache is
//! cleared.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::trace;

use crate::document::{ContentNode, Document, NodeId, Path};
use crate::syntax::{Token, TokenType, Tokenizer};

/// A position inside a node's text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// Node the offset refers to
    pub path: Path,
    /// Byte offset into the node's flattened text
    pub offset: usize,
}

/// A styled span of one node's text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeAnnotation {
    /// Start of the span (inclusive)
    pub anchor: Point,
    /// End of the span (exclusive)
    pub focus: Point,
    /// Style class, `token <type>`
    pub class_name: String,
}

impl RangeAnnotation {
    pub fn new(path: &Path, start: usize, end: usize, kind: TokenType) -> Self {
        Self {
            anchor: Point { path: path.clone(), offset: start },
            focus: Point { path: path.clone(), offset: end },
            class_name: kind.class_name(),
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.offset
    }

    pub fn end(&self) -> usize {
        self.focus.offset
    }

    pub fn len(&self) -> usize {
        self.end().saturating_sub(self.start())
    }

    pub fn is_empty(&self) -> bool {
        self.start() >= self.end()
    }

    /// Token type encoded in the class name, if recognized
    pub fn token_type(&self) -> Option<TokenType> {
        self.class_name
            .strip_prefix("token ")
            .and_then(TokenType::from_name)
    }
}

/// Memoized decoration of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Text the ranges were computed from
    pub text: String,
    /// Computed ranges
    pub ranges: Rc<[RangeAnnotation]>,
}

/// Storage for decoration results, injected into `LineDecorator`
pub trait DecorationCache {
    /// Entry previously stored for this node, if any
    fn lookup(&self, node: &dyn ContentNode, path: &Path) -> Option<&CacheEntry>;

    /// Store an entry for this node, replacing any previous one
    fn store(&mut self, node: &dyn ContentNode, path: &Path, entry: CacheEntry);

    /// Drop every entry
    fn clear(&mut self);
}

/// Cache with one slot per top-level index
///
/// Slots are never removed; entries for deleted lines stay until
/// overwritten or the cache is cleared.
#[derive(Debug, Default)]
pub struct PositionalCache {
    slots: Vec<Option<CacheEntry>>,
}

impl PositionalCache {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Entry stored at a top-level index
    pub fn get(&self, index: usize) -> Option<&CacheEntry> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Store an entry, growing the slot list as needed
    pub fn insert(&mut self, index: usize, entry: CacheEntry) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(entry);
    }

    /// Number of slots (filled or not)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl DecorationCache for PositionalCache {
    fn lookup(&self, _node: &dyn ContentNode, path: &Path) -> Option<&CacheEntry> {
        self.get(path.root_index()?)
    }

    fn store(&mut self, _node: &dyn ContentNode, path: &Path, entry: CacheEntry) {
        if let Some(index) = path.root_index() {
            self.insert(index, entry);
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Cache keyed by node identity
///
/// Nodes without an id are never cached.
#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: HashMap<NodeId, CacheEntry>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn get(&self, id: NodeId) -> Option<&CacheEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries for nodes not in `live`
    pub fn retain_live(&mut self, live: impl IntoIterator<Item = NodeId>) {
        let live: HashSet<NodeId> = live.into_iter().collect();
        self.entries.retain(|id, _| live.contains(id));
    }
}

impl DecorationCache for IdentityCache {
    fn lookup(&self, node: &dyn ContentNode, _path: &Path) -> Option<&CacheEntry> {
        self.entries.get(&node.id()?)
    }

    fn store(&mut self, node: &dyn ContentNode, _path: &Path, entry: CacheEntry) {
        if let Some(id) = node.id() {
            self.entries.insert(id, entry);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Counters for decoration calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorateStats {
    /// Calls answered from the cache
    pub hits: u64,
    /// Calls that ran the tokenizer
    pub misses: u64,
    /// Calls for nodes that are not elements
    pub skipped: u64,
}

/// Decorates nodes with token ranges, caching per line
pub struct LineDecorator<T, C = PositionalCache> {
    tokenizer: T,
    cache: C,
    stats: DecorateStats,
}

impl<T: Tokenizer> LineDecorator<T, PositionalCache> {
    /// Create a decorator with a positional cache
    pub fn new(tokenizer: T) -> Self {
        Self::with_cache(tokenizer, PositionalCache::new())
    }
}

impl<T: Tokenizer, C: DecorationCache> LineDecorator<T, C> {
    /// Create a decorator with a caller-supplied cache
    pub fn with_cache(tokenizer: T, cache: C) -> Self {
        Self {
            tokenizer,
            cache,
            stats: DecorateStats::default(),
        }
    }

    /// Ranges to style for one node
    ///
    /// Non-element nodes get no decoration. The returned slice is shared
    /// with the cache, so a hit returns the very same allocation.
    pub fn decorate<N: ContentNode>(&mut self, node: &N, path: &Path) -> Rc<[RangeAnnotation]> {
        if !node.is_element() {
            self.stats.skipped += 1;
            return Rc::from(Vec::new());
        }

        let text = node.text();

        if let Some(entry) = self.cache.lookup(node, path) {
            if entry.text == text {
                self.stats.hits += 1;
                trace!(path = %path, "decoration cache hit");
                return Rc::clone(&entry.ranges);
            }
        }

        self.stats.misses += 1;
        trace!(path = %path, grammar = self.tokenizer.name(), len = text.len(), "decoration cache miss");

        let tokens = self.tokenizer.tokenize(&text);
        let ranges: Rc<[RangeAnnotation]> = Rc::from(build_ranges(&tokens, path));
        self.cache.store(
            node,
            path,
            CacheEntry {
                text,
                ranges: Rc::clone(&ranges),
            },
        );
        ranges
    }

    /// Decorate every top-level node of a document, in order
    pub fn decorate_document(&mut self, doc: &Document) -> Vec<Rc<[RangeAnnotation]>> {
        doc.entries()
            .map(|(node, path)| self.decorate(node, &path))
            .collect()
    }

    /// Replace the tokenizer; cached entries are kept
    pub fn set_tokenizer(&mut self, tokenizer: T) {
        self.tokenizer = tokenizer;
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Mutable access to the cache, e.g. to prune entries for deleted lines
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Forget all cached decorations
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> DecorateStats {
        self.stats
    }
}

/// Turn a token sequence into ranges, one per typed token
fn build_ranges(tokens: &[Token<'_>], path: &Path) -> Vec<RangeAnnotation> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for token in tokens {
        let end = start + token.len();
        if let Some(kind) = token.kind() {
            ranges.push(RangeAnnotation::new(path, start, end, kind));
        }
        start = end;
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Node};
    use crate::syntax::{javascript_grammar, markdown_grammar, Grammar};
    use std::cell::Cell;

    /// Wraps a grammar and counts tokenize calls
    struct Counting {
        grammar: Grammar,
        calls: Cell<usize>,
    }

    impl Counting {
        fn javascript() -> Self {
            Self {
                grammar: javascript_grammar(),
                calls: Cell::new(0),
            }
        }
    }

    impl Tokenizer for Counting {
        fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
            self.calls.set(self.calls.get() + 1);
            self.grammar.tokenize(text)
        }

        fn name(&self) -> &str {
            &self.grammar.name
        }
    }

    fn line(id: u64, text: &str) -> Node {
        Node::Element(Element {
            id: NodeId::new(id),
            children: vec![Node::Text(text.to_string())],
        })
    }

    fn spans(ranges: &[RangeAnnotation]) -> Vec<(usize, usize, &str)> {
        ranges
            .iter()
            .map(|r| (r.start(), r.end(), r.class_name.as_str()))
            .collect()
    }

    #[test]
    fn test_let_statement_ranges() {
        let mut decorator = LineDecorator::new(javascript_grammar());
        let ranges = decorator.decorate(&line(0, "let x = 1;"), &Path::root(0));

        let spans = spans(&ranges);
        assert!(spans.contains(&(0, 3, "token keyword")));
        assert!(spans.contains(&(8, 9, "token number")));
        // " x " is plain text and gets no range
        assert!(!spans.iter().any(|&(s, _, _)| s == 3));
        assert!(ranges.iter().all(|r| r.anchor.path == Path::root(0)));
    }

    #[test]
    fn test_unchanged_text_hits_cache() {
        let mut decorator = LineDecorator::new(Counting::javascript());
        let node = line(0, "let x = 1;");
        let path = Path::root(0);

        let first = decorator.decorate(&node, &path);
        let second = decorator.decorate(&node, &path);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(decorator.tokenizer().calls.get(), 1);
        assert_eq!(decorator.stats(), DecorateStats { hits: 1, misses: 1, skipped: 0 });
    }

    #[test]
    fn test_changed_text_overwrites_entry() {
        let mut decorator = LineDecorator::new(Counting::javascript());
        let path = Path::root(0);

        decorator.decorate(&line(0, "let a = 1;"), &path);
        let ranges = decorator.decorate(&line(0, "const a = 2;"), &path);

        assert_eq!(decorator.tokenizer().calls.get(), 2);
        let entry = decorator.cache().get(0).unwrap();
        assert_eq!(entry.text, "const a = 2;");
        assert!(Rc::ptr_eq(&entry.ranges, &ranges));
    }

    #[test]
    fn test_empty_text() {
        let mut decorator = LineDecorator::new(Counting::javascript());
        let ranges = decorator.decorate(&line(0, ""), &Path::root(0));

        assert!(ranges.is_empty());
        let entry = decorator.cache().get(0).unwrap();
        assert_eq!(entry.text, "");
        assert!(entry.ranges.is_empty());
    }

    #[test]
    fn test_text_leaf_is_never_decorated() {
        let mut decorator = LineDecorator::new(Counting::javascript());
        let path = Path::root(0);

        // Prime the slot with matching text first
        decorator.decorate(&line(0, "let"), &path);
        let leaf = Node::Text("let".to_string());
        assert!(decorator.decorate(&leaf, &path).is_empty());
        assert_eq!(decorator.tokenizer().calls.get(), 1);
        assert_eq!(decorator.stats().skipped, 1);
    }

    #[test]
    fn test_grammar_switch_still_hits() {
        let mut decorator = LineDecorator::new(javascript_grammar());
        let node = line(0, "let x = 1;");
        let path = Path::root(0);

        let js = decorator.decorate(&node, &path);
        decorator.set_tokenizer(markdown_grammar());
        let after = decorator.decorate(&node, &path);

        // The cache ignores the grammar, so the JavaScript ranges come back
        assert!(Rc::ptr_eq(&js, &after));

        decorator.clear_cache();
        let fresh = decorator.decorate(&node, &path);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_ranges_sorted_and_disjoint() {
        let mut decorator = LineDecorator::new(javascript_grammar());
        let text = "const s = `a ${b}`; // é done /* x */ 0x1F";
        let ranges = decorator.decorate(&line(0, text), &Path::root(0));

        let mut last_end = 0;
        for range in ranges.iter() {
            assert!(range.start() >= last_end);
            assert!(range.end() > range.start());
            assert!(range.end() <= text.len());
            assert!(text.is_char_boundary(range.start()));
            assert!(text.is_char_boundary(range.end()));
            assert!(range.token_type().is_some());
            last_end = range.end();
        }
    }

    #[test]
    fn test_nested_element_uses_flattened_text() {
        let mut decorator = LineDecorator::new(javascript_grammar());
        let node = Node::Element(Element {
            id: NodeId::new(1),
            children: vec![
                Node::Text("le".to_string()),
                Node::Text("t y".to_string()),
            ],
        });
        let ranges = decorator.decorate(&node, &Path::root(2));
        assert_eq!(spans(&ranges), vec![(0, 3, "token keyword")]);
        assert_eq!(ranges[0].focus.path, Path::root(2));
    }

    #[test]
    fn test_positional_cache_after_insert() {
        let mut doc = Document::from_text("let a = 1;\nlet b = 2;");
        let mut decorator = LineDecorator::new(Counting::javascript());
        decorator.decorate_document(&doc);
        assert_eq!(decorator.tokenizer().calls.get(), 2);

        // Every line below the insertion point lands on a slot holding other text
        doc.insert_line(0, "// header");
        decorator.decorate_document(&doc);
        assert_eq!(decorator.tokenizer().calls.get(), 5);
    }

    #[test]
    fn test_identity_cache_after_insert() {
        let mut doc = Document::from_text("let a = 1;\nlet b = 2;");
        let mut decorator = LineDecorator::with_cache(Counting::javascript(), IdentityCache::new());
        let before = decorator.decorate_document(&doc);

        doc.insert_line(0, "// header");
        let after = decorator.decorate_document(&doc);

        // Only the new line is tokenized
        assert_eq!(decorator.tokenizer().calls.get(), 3);
        assert!(Rc::ptr_eq(&before[0], &after[1]));
        assert_eq!(decorator.cache().len(), 3);
    }

    #[test]
    fn test_identity_cache_retain_live() {
        let mut doc = Document::from_text("a\nb\nc");
        let mut decorator = LineDecorator::with_cache(Counting::javascript(), IdentityCache::new());
        let before = decorator.decorate_document(&doc);
        assert_eq!(decorator.cache().len(), 3);

        let removed = doc.remove_line(1).and_then(|node| node.id()).unwrap();
        let live: Vec<NodeId> = doc.children().iter().filter_map(|n| n.id()).collect();
        decorator.cache_mut().retain_live(live);

        assert_eq!(decorator.cache().len(), 2);
        assert!(decorator.cache().get(removed).is_none());

        // Surviving lines still hit
        let after = decorator.decorate_document(&doc);
        assert_eq!(decorator.tokenizer().calls.get(), 3);
        assert!(Rc::ptr_eq(&before[0], &after[0]));
        assert!(Rc::ptr_eq(&before[2], &after[1]));
    }

    #[test]
    fn test_build_ranges_offsets() {
        let tokens = vec![
            Token::Plain("  "),
            Token::Typed { kind: TokenType::Keyword, content: "if" },
            Token::Plain(" "),
            Token::Typed { kind: TokenType::Number, content: "1" },
        ];
        let ranges = build_ranges(&tokens, &Path::root(4));
        assert_eq!(
            spans(&ranges),
            vec![(2, 4, "token keyword"), (5, 6, "token number")]
        );
    }
}
