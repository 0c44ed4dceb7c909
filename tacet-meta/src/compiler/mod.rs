//! Compiles the parse tree of a grammar description into rules.
//!
//! Bracket operators are rewritten into plain rules: `[X]` distributes the
//! alternatives of `X` and an empty choice over the surrounding sequence,
//! while `{X}` synthesizes a right-recursive helper nonterminal named
//! `<key>#<n>` (a name the lexicon cannot produce, so it can never collide
//! with user symbols).

use tacet_ast::{prune, skip, squash, Node};
use tacet_parser::grammar::{Grammar, Rule};

use crate::MetaError;

/// Alternative expansions of a construct; each entry is one symbol
/// sequence, possibly empty for optional constructs.
type Alternatives = Vec<Vec<String>>;

struct Compiler {
    rules: Vec<Rule>,
    temp_count: usize,
}

/// Compiles a parsed grammar description into a [`Grammar`] with one rule
/// per alternative per definition.
pub fn compile(root: Node) -> Result<Grammar, MetaError> {
    let root = squash(root, &["GRAMMAR", "OPTION", "SEQUENCE"]);
    let root = prune(root, &["comment", "=", "|", ",", "eol"]);
    let root = skip(root, &["LINE"]);

    let mut compiler = Compiler {
        rules: Vec::new(),
        temp_count: 0,
    };
    for definition in root.children() {
        compiler.add_definition(definition)?;
    }
    Ok(Grammar::new(compiler.rules))
}

impl Compiler {
    fn add_definition(&mut self, definition: &Node) -> Result<(), MetaError> {
        // shape is guaranteed by the bootstrap grammar
        assert_eq!("DEFINITION", definition.key());
        let children = definition.children();
        assert_eq!(2, children.len());
        let key = children[0].token().unwrap().value().to_string();
        let alternatives = self.compile_option(&children[1], &key)?;
        for symbols in alternatives {
            if symbols.is_empty() {
                return Err(MetaError::EmptyProduction { key });
            }
            if symbols.len() == 1 && symbols[0] == key {
                return Err(MetaError::CyclicDefinition { key });
            }
            self.rules.push(Rule::new(key.clone(), symbols));
        }
        Ok(())
    }

    fn compile_option(&mut self, option: &Node, key: &str) -> Result<Alternatives, MetaError> {
        assert_eq!("OPTION", option.key());
        let mut alternatives = Vec::new();
        for sequence in option.children() {
            alternatives.extend(self.compile_sequence(sequence, key)?);
        }
        Ok(alternatives)
    }

    fn compile_sequence(&mut self, sequence: &Node, key: &str) -> Result<Alternatives, MetaError> {
        assert_eq!("SEQUENCE", sequence.key());
        let mut alternatives: Alternatives = vec![Vec::new()];
        for anchor in sequence.children() {
            let choices = self.compile_anchor(anchor, key)?;
            let mut combined = Vec::new();
            for alternative in &alternatives {
                for choice in &choices {
                    let mut symbols = alternative.clone();
                    symbols.extend(choice.iter().cloned());
                    combined.push(symbols);
                }
            }
            alternatives = combined;
        }
        Ok(alternatives)
    }

    fn compile_anchor(&mut self, anchor: &Node, key: &str) -> Result<Alternatives, MetaError> {
        assert_eq!("ANCHOR", anchor.key());
        let children = anchor.children();
        match children[0].key() {
            "identifier" => {
                let symbol = children[0].token().unwrap().value().to_string();
                Ok(vec![vec![symbol]])
            }
            "string" => {
                let quoted = children[0].token().unwrap().value();
                let symbol = quoted[1..quoted.len() - 1].to_string();
                Ok(vec![vec![symbol]])
            }
            "[" => {
                let mut choices = self.compile_option(&children[1], key)?;
                choices.push(Vec::new());
                Ok(choices)
            }
            "{" => {
                let bodies: Alternatives = self
                    .compile_option(&children[1], key)?
                    .into_iter()
                    .filter(|symbols| !symbols.is_empty())
                    .collect();
                if bodies.is_empty() {
                    return Err(MetaError::EmptyProduction {
                        key: key.to_string(),
                    });
                }
                let repeated = self.temp_symbol(key);
                for body in bodies {
                    let mut recursive = body.clone();
                    recursive.push(repeated.clone());
                    self.rules.push(Rule::new(repeated.clone(), recursive));
                    self.rules.push(Rule::new(repeated.clone(), body));
                }
                Ok(vec![vec![repeated], Vec::new()])
            }
            other => panic!("unexpected anchor {:?}", other),
        }
    }

    fn temp_symbol(&mut self, key: &str) -> String {
        self.temp_count += 1;
        format!("{}#{}", key, self.temp_count)
    }
}
