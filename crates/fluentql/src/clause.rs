//! Predicate lists for `WHERE` and `HAVING`.
//!
//! A [`ClauseList`] is an ordered list of `(connective, predicate)` pairs plus
//! the connective that the *next* pushed predicate will take. Pushing reads
//! the pending connective and resets it to `AND`, so `or()` only ever affects
//! one predicate.

/// Boolean operator placed in front of a predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Connective {
    #[default]
    And,
    Or,
    AndNot,
}

impl Connective {
    pub fn as_sql(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::AndNot => "AND NOT",
        }
    }
}

/// A rendered predicate and the connective that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub connective: Connective,
    pub sql: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseList {
    predicates: Vec<Predicate>,
    pending: Connective,
}

impl ClauseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connective for the next predicate.
    pub fn set_pending(&mut self, connective: Connective) {
        self.pending = connective;
    }

    pub fn pending(&self) -> Connective {
        self.pending
    }

    /// Append a predicate under the pending connective.
    pub fn push(&mut self, sql: impl Into<String>) {
        let connective = std::mem::take(&mut self.pending);
        self.predicates.push(Predicate {
            connective,
            sql: sql.into(),
        });
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Render `p1 C2 p2 C3 p3 ...`.
    ///
    /// With `include_leading` the first predicate is also preceded by its
    /// connective, which is how the top-level `WHERE 1 AND ...` form is built.
    pub fn compile(&self, include_leading: bool) -> String {
        let mut out = String::new();
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if include_leading || i != 0 {
                out.push_str(p.connective.as_sql());
                out.push(' ');
            }
            out.push_str(&p.sql);
        }
        out
    }
}
