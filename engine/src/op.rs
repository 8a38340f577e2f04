use std::cmp::Ordering;

const LESS: u8 = 0b001;
const GREATER: u8 = 0b010;
const EQUAL: u8 = 0b100;

lex_enum!(EqualityOp {
    "!=" => NotEqual,
    "=" => Equal,
});

lex_enum!(TextOp {
    "!~=" => NotContains,
    "~=" => Contains,
    "^=" => StartsWith,
    "$=" => EndsWith,
});

lex_enum!(PatternOp {
    "@=" => Regex,
    "*=" => Wildcard,
});

lex_enum!(EmptinessOp {
    ":not-empty" => NotEmpty,
    ":empty" => Empty,
});

lex_enum!(#[repr(u8)] OrderingOp {
    ">=" => GreaterThanEqual = GREATER | EQUAL,
    "<=" => LessThanEqual = LESS | EQUAL,
    ">" => GreaterThan = GREATER,
    "<" => LessThan = LESS,
});

impl OrderingOp {
    pub fn matches(self, ordering: Ordering) -> bool {
        let mask = self as u8;
        let flag = match ordering {
            Ordering::Less => LESS,
            Ordering::Greater => GREATER,
            Ordering::Equal => EQUAL,
        };
        mask & flag != 0
    }

    /// Incomparable sides (absent, non-numeric or NaN) never match.
    pub fn matches_opt(self, ordering: Option<Ordering>) -> bool {
        ordering.map_or(false, |ordering| self.matches(ordering))
    }
}

lex_enum!(ComparisonOp {
    TextOp => Text,
    PatternOp => Pattern,
    EmptinessOp => Emptiness,
    OrderingOp => Ordering,
    EqualityOp => Equality,
});
