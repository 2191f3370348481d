use dry_mustache_parser::{DelimiterCache, Parser, Tags, Token, TokenKind};
use proptest::prelude::*;

/// A template fragment together with what it should parse into
#[derive(Debug, Clone)]
enum Node {
    Text(String),
    Variable(String),
    Section(String, Vec<Node>),
}

fn render(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(name) => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
            Node::Section(name, body) => {
                out.push_str("{{#");
                out.push_str(name);
                out.push_str("}}");
                render(body, out);
                out.push_str("{{/");
                out.push_str(name);
                out.push_str("}}");
            }
        }
    }
}

fn plain_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(_) => {}
            Node::Section(_, body) => plain_text(body, out),
        }
    }
}

fn tree_text(tokens: &[Token], out: &mut String) {
    for token in tokens {
        if token.is_text() {
            out.push_str(&token.value);
        }
        tree_text(&token.children, out);
    }
}

fn count_sections(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Section(_, body) => 1 + count_sections(body),
            _ => 0,
        })
        .sum()
}

fn count_section_tokens(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .map(|token| usize::from(token.kind == TokenKind::Section) + count_section_tokens(&token.children))
        .sum()
}

/// Inline templates whose text is never all whitespace, so no line of them
/// is ever standalone
fn nodes() -> impl Strategy<Value = Vec<Node>> {
    let leaf = prop_oneof![
        "[a-z<>.!][a-z <>.!]{0,7}".prop_map(Node::Text),
        "[a-z]{1,6}".prop_map(Node::Variable),
    ];
    let node = leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone(),
            ("[a-z]{1,6}", prop::collection::vec(inner, 0..4))
                .prop_map(|(name, body)| Node::Section(name, body)),
        ]
    });
    prop::collection::vec(node, 0..6)
}

fn delimiters() -> impl Strategy<Value = Tags> {
    (0usize..12).prop_map(|n| Tags::new(format!("<{n}"), format!("{n}>")))
}

proptest! {
    #[test]
    fn balanced_templates_keep_their_text(nodes in nodes()) {
        let mut src = String::new();
        render(&nodes, &mut src);
        let cache = DelimiterCache::new();
        let tree = Parser::new().with_cache(&cache).parse(&src).unwrap();

        let mut expected = String::new();
        plain_text(&nodes, &mut expected);
        let mut actual = String::new();
        tree_text(&tree, &mut actual);
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(count_section_tokens(&tree), count_sections(&nodes));
    }

    #[test]
    fn top_level_offsets_increase(nodes in nodes()) {
        let mut src = String::new();
        render(&nodes, &mut src);
        let tree = Parser::new().parse(&src).unwrap();
        for pair in tree.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for token in &tree {
            if let Some(end) = token.section_end {
                prop_assert!(token.end <= end);
            }
        }
    }

    #[test]
    fn cache_never_exceeds_capacity(
        lookups in prop::collection::vec(delimiters(), 0..40),
        capacity in 1usize..6,
        shrink_to in 1usize..6,
    ) {
        let cache = DelimiterCache::with_capacity(capacity);
        for tags in &lookups {
            cache.get_or_build(tags);
            prop_assert!(cache.len() <= capacity);
            prop_assert!(cache.contains(tags));
        }
        cache.set_capacity(shrink_to);
        prop_assert!(cache.len() <= shrink_to);
    }

    #[test]
    fn rebuilt_patterns_match_alike(tags in delimiters(), body in "[a-z ]{0,10}") {
        let cache = DelimiterCache::new();
        let first = cache.get_or_build(&tags);
        let size = cache.len();
        let second = cache.get_or_build(&tags);
        prop_assert_eq!(cache.len(), size);

        let haystack = format!("{}{}{}", tags.open(), body, tags.close());
        prop_assert_eq!(
            first.open.find(&haystack).map(|m| m.range()),
            second.open.find(&haystack).map(|m| m.range())
        );
        prop_assert_eq!(
            first.close.find(&haystack).map(|m| m.range()),
            second.close.find(&haystack).map(|m| m.range())
        );
    }
}
