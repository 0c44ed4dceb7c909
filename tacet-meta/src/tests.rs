use super::*;
use tacet_lexer::{Matcher, Regex};

#[test]
fn bootstrap_table_is_built_once_and_non_empty() {
    assert!(meta_table().num_rows() > 0);
    assert!(std::ptr::eq(meta_table(), meta_table()));
}

#[test]
fn given_description_then_parse_tree_rooted_at_grammar() {
    let root = parse_grammar("x = \"0\"\n").unwrap();
    assert_eq!("GRAMMAR", root.key());
}

#[test]
fn given_missing_final_newline_then_supplied() {
    assert_eq!(
        compile_grammar("x = \"0\"\n").unwrap(),
        compile_grammar("x = \"0\"").unwrap()
    );
}

#[test]
fn given_unexpected_character_then_scanner_error_with_position() {
    let error = compile_grammar("x = @\n").unwrap_err();
    match error {
        MetaError::Scanner(error) => {
            assert_eq!(0, error.line());
            assert_eq!(4, error.column());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn given_malformed_description_then_parser_error() {
    let error = compile_grammar("x = = \"0\"\n").unwrap_err();
    assert!(matches!(error, MetaError::Parser(_)));
}

#[test]
fn compiled_grammar_drives_the_core_end_to_end() {
    use tacet_parser::driver::parse;
    use tacet_parser::grammar::augment;
    use tacet_parser::graph::graph_for;
    use tacet_parser::table::table_for;

    let grammar = compile_grammar("x = c , \"0\" | c\nc = \"0\" | \"1\"\n").unwrap();
    assert_eq!(4, grammar.len());

    let grammar = augment(&grammar, "x");
    let graph = graph_for(&grammar);
    let table = table_for(&grammar, &graph).unwrap();

    let matchers = [
        Matcher::new("0", Regex::literal("0")),
        Matcher::new("1", Regex::literal("1")),
    ];
    let tokens = tacet_lexer::scan(&["10"], &matchers).unwrap();
    let root = parse(&tokens, &grammar, &table).unwrap();

    fn leaves(node: &Node, values: &mut String) {
        match node.token() {
            Some(token) => values.push_str(token.value()),
            None => {
                for child in node.children() {
                    leaves(child, values);
                }
            }
        }
    }
    let mut spelled = String::new();
    leaves(&root, &mut spelled);
    assert_eq!("10", spelled);
}

#[test]
fn bootstrap_language_describes_itself() {
    let description = "\
GRAMMAR = LINE , GRAMMAR | LINE
LINE = DEFINITION , eol | comment , eol | eol
DEFINITION = identifier , \"=\" , OPTION
OPTION = SEQUENCE , \"|\" , OPTION | SEQUENCE
SEQUENCE = ANCHOR , \",\" , SEQUENCE | ANCHOR
ANCHOR = string | identifier | \"[\" , OPTION , \"]\" | \"{\" , OPTION , \"}\"
";
    let compiled = compile_grammar(description).unwrap();
    assert_eq!(Grammar::new(bootstrap_rules()), compiled);
}
