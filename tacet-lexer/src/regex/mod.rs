/// A prefix matcher over printable ASCII. Variants are closed and matched
/// exhaustively; all matchers are pure.
#[derive(Debug, Clone)]
pub enum Regex {
    /// Matches iff the input starts with the literal.
    Eq(String),
    /// Matches the inner pattern or the empty prefix; never fails.
    Maybe(Box<Regex>),
    /// Concatenates greedy successive matches of the inner pattern. Each
    /// match must consume at least one character; fails when fewer than
    /// `at_least` matches succeed.
    Repeat { inner: Box<Regex>, at_least: usize },
    /// First non-failing alternative wins; order matters.
    FirstOf(Vec<Regex>),
    /// Concatenates in order; fails as soon as any element fails. Once an
    /// element has matched, its match is committed.
    Seq(Vec<Regex>),
}

impl Regex {
    pub fn literal(value: impl Into<String>) -> Regex {
        Regex::Eq(value.into())
    }

    pub fn maybe(inner: Regex) -> Regex {
        Regex::Maybe(Box::new(inner))
    }

    pub fn repeat(inner: Regex) -> Regex {
        Regex::at_least(inner, 0)
    }

    pub fn at_least(inner: Regex, at_least: usize) -> Regex {
        Regex::Repeat {
            inner: Box::new(inner),
            at_least,
        }
    }

    pub fn first_of(alternatives: Vec<Regex>) -> Regex {
        Regex::FirstOf(alternatives)
    }

    pub fn seq(elements: Vec<Regex>) -> Regex {
        Regex::Seq(elements)
    }

    /// The matched prefix of `input`, or `None` when the pattern does not
    /// match at the very start.
    pub fn matched<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.match_len(input).map(|len| &input[..len])
    }

    fn match_len(&self, input: &str) -> Option<usize> {
        match self {
            Regex::Eq(literal) => {
                if input.starts_with(literal.as_str()) {
                    Some(literal.len())
                } else {
                    None
                }
            }
            Regex::Maybe(inner) => Some(inner.match_len(input).unwrap_or(0)),
            Regex::Repeat { inner, at_least } => {
                let mut len = 0;
                let mut count = 0;
                while let Some(part) = inner.match_len(&input[len..]) {
                    assert!(part > 0, "repeated pattern must consume input");
                    len += part;
                    count += 1;
                }
                if count < *at_least {
                    None
                } else {
                    Some(len)
                }
            }
            Regex::FirstOf(alternatives) => alternatives
                .iter()
                .find_map(|alternative| alternative.match_len(input)),
            Regex::Seq(elements) => {
                let mut len = 0;
                for element in elements {
                    len += element.match_len(&input[len..])?;
                }
                Some(len)
            }
        }
    }
}

/// Single-character literal alternatives for every character in the
/// inclusive range, skipping `exclude`. Swapped bounds are normalized.
pub fn expand(begin: char, end: char, exclude: Option<char>) -> Vec<Regex> {
    let (begin, end) = if begin > end { (end, begin) } else { (begin, end) };
    (begin..=end)
        .filter(|ch| Some(*ch) != exclude)
        .map(|ch| Regex::Eq(ch.to_string()))
        .collect()
}
