//! Token-based clause segmentation
//!
//! Splits a query into labeled, contiguous clauses without building a parse
//! tree. The query is tokenized with the sqlparser tokenizer and walked once;
//! a clause starts at each recognized keyword and runs until the next one.
//! Working on tokens rather than raw text means keywords inside string
//! literals (`'pick up from here'`) or quoted identifiers never start a
//! clause.
//!
//! ## Recognized boundaries
//!
//! | Stage            | Keyword(s)                              |
//! |------------------|-----------------------------------------|
//! | before `SELECT`  | `SELECT`                                |
//! | inside `SELECT`  | `FROM`                                  |
//! | after `FROM`     | `WHERE`, `GROUP BY`, `ORDER BY`, `LIMIT` |
//!
//! Text before `SELECT` is kept as an [`ClauseKind::Unrecognized`] clause.
//!
//! Tokens only decide where clauses start. Clause text is sliced out of the
//! original query at the boundary tokens' locations, so literals and
//! operators come through byte for byte (`'O''Brien'` stays doubled, `!=` is
//! not turned into `<>`). Concatenating every clause's text gives back the
//! original query, minus whitespace-only text before `SELECT`.

use sqlparser::dialect::GenericDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};

use crate::error::SqlAliasError;
use crate::util::strip_leading_keyword;

/// Label of one clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Select,
    From,
    Where,
    GroupBy,
    OrderBy,
    Limit,
    Unrecognized,
}

impl ClauseKind {
    /// Leading keyword text, as it is matched (case-insensitively).
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ClauseKind::Select => Some("SELECT"),
            ClauseKind::From => Some("FROM"),
            ClauseKind::Where => Some("WHERE"),
            ClauseKind::GroupBy => Some("GROUP BY"),
            ClauseKind::OrderBy => Some("ORDER BY"),
            ClauseKind::Limit => Some("LIMIT"),
            ClauseKind::Unrecognized => None,
        }
    }

    /// True for the clauses that may follow FROM.
    pub fn is_qualifier(&self) -> bool {
        matches!(
            self,
            ClauseKind::Where | ClauseKind::GroupBy | ClauseKind::OrderBy | ClauseKind::Limit
        )
    }
}

/// A labeled span of the query, including its leading keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub kind: ClauseKind,
    pub text: String,
}

impl Clause {
    /// Clause text with the leading keyword removed.
    pub fn body(&self) -> &str {
        self.kind
            .keyword()
            .and_then(|keyword| strip_leading_keyword(&self.text, keyword))
            .unwrap_or(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    BeforeSelect,
    Select,
    AfterFrom,
}

/// Maps tokenizer locations (1-based line, 1-based character column) back to
/// byte offsets in the query
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));
        Self { text, line_starts }
    }

    fn offset(&self, location: Location) -> Option<usize> {
        let line = usize::try_from(location.line).ok()?.checked_sub(1)?;
        let column = usize::try_from(location.column).ok()?.checked_sub(1)?;
        let start = *self.line_starts.get(line)?;
        self.text[start..]
            .char_indices()
            .nth(column)
            .map(|(idx, _)| start + idx)
    }
}

/// Single-pass scanner over the token stream
struct ClauseScanner<'a> {
    query: &'a str,
    tokens: Vec<TokenWithSpan>,
    pos: usize,
}

impl<'a> ClauseScanner<'a> {
    fn new(query: &'a str) -> Result<Self, SqlAliasError> {
        let dialect = GenericDialect {};
        let tokens = Tokenizer::new(&dialect, query)
            .tokenize_with_location()
            .map_err(|e| SqlAliasError::malformed("query", e.to_string()))?;

        Ok(Self {
            query,
            tokens,
            pos: 0,
        })
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn current_token(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Check if the token at `pos` is an unquoted keyword.
    fn is_keyword_at(&self, pos: usize, keyword: Keyword) -> bool {
        matches!(
            self.tokens.get(pos).map(|t| &t.token),
            Some(Token::Word(w)) if w.keyword == keyword && w.quote_style.is_none()
        )
    }

    /// Check if the next non-whitespace token after the current one is `keyword`.
    fn next_word_is(&self, keyword: Keyword) -> bool {
        let mut pos = self.pos + 1;
        while let Some(token) = self.tokens.get(pos) {
            match &token.token {
                Token::Whitespace(_) => pos += 1,
                _ => return self.is_keyword_at(pos, keyword),
            }
        }
        false
    }

    /// Clause started by the current token in the given stage, if any.
    fn clause_start(&self, stage: Stage) -> Option<ClauseKind> {
        let at = |keyword| self.is_keyword_at(self.pos, keyword);
        match stage {
            Stage::BeforeSelect if at(Keyword::SELECT) => Some(ClauseKind::Select),
            Stage::Select if at(Keyword::FROM) => Some(ClauseKind::From),
            Stage::AfterFrom => {
                if at(Keyword::WHERE) {
                    Some(ClauseKind::Where)
                } else if at(Keyword::LIMIT) {
                    Some(ClauseKind::Limit)
                } else if at(Keyword::GROUP) && self.next_word_is(Keyword::BY) {
                    Some(ClauseKind::GroupBy)
                } else if at(Keyword::ORDER) && self.next_word_is(Keyword::BY) {
                    Some(ClauseKind::OrderBy)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Byte offset of every clause start, in source order.
    fn boundaries(&mut self) -> Result<Vec<(ClauseKind, usize)>, SqlAliasError> {
        let index = LineIndex::new(self.query);
        let mut boundaries = vec![(ClauseKind::Unrecognized, 0)];
        let mut stage = Stage::BeforeSelect;

        while !self.is_at_end() {
            if let Some(kind) = self.clause_start(stage) {
                let Some(location) = self.current_token().map(|token| token.span.start) else {
                    break;
                };
                let offset = index.offset(location).ok_or_else(|| {
                    SqlAliasError::malformed(
                        kind.keyword().unwrap_or("query"),
                        format!(
                            "keyword location {}:{} is outside the query",
                            location.line, location.column
                        ),
                    )
                })?;
                boundaries.push((kind, offset));
                stage = match kind {
                    ClauseKind::Select => Stage::Select,
                    _ => Stage::AfterFrom,
                };
            }
            self.advance();
        }

        Ok(boundaries)
    }

    fn scan(&mut self) -> Result<Vec<Clause>, SqlAliasError> {
        let boundaries = self.boundaries()?;
        let mut clauses = Vec::with_capacity(boundaries.len());

        for (idx, &(kind, start)) in boundaries.iter().enumerate() {
            let end = boundaries
                .get(idx + 1)
                .map_or(self.query.len(), |&(_, next)| next);
            let text = &self.query[start..end];
            if kind == ClauseKind::Unrecognized && text.trim().is_empty() {
                continue;
            }
            clauses.push(Clause {
                kind,
                text: text.to_string(),
            });
        }

        Ok(clauses)
    }
}

/// Split a query into labeled clauses in source order.
pub fn segment(query: &str) -> Result<Vec<Clause>, SqlAliasError> {
    let mut scanner = ClauseScanner::new(query)?;
    scanner.scan()
}

/// First clause of the given kind, or a `MalformedClause` error naming it.
pub fn require_clause(clauses: &[Clause], kind: ClauseKind) -> Result<&Clause, SqlAliasError> {
    clauses.iter().find(|c| c.kind == kind).ok_or_else(|| {
        let keyword = kind.keyword().unwrap_or("query");
        SqlAliasError::malformed(keyword, format!("no {} keyword found", keyword))
    })
}
