use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as DeError};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// One component of a matched node location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Object member name.
    Member(String),
    /// Array position.
    Index(usize),
}

impl Serialize for PathElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathElement::Member(value) => serializer.serialize_str(value),
            PathElement::Index(value) => serializer.serialize_u64(*value as u64),
        }
    }
}

impl<'de> Deserialize<'de> for PathElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => Ok(PathElement::Member(s)),
            Value::Number(n) => n
                .as_u64()
                .and_then(|index| usize::try_from(index).ok())
                .map(PathElement::Index)
                .ok_or_else(|| D::Error::custom("path index must be a non-negative integer")),
            _ => Err(D::Error::custom(
                "path element must be string or non-negative integer",
            )),
        }
    }
}

/// Location of a matched node, relative to the document root.
///
/// Serialized as `["$", "credentialSubject", "age"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<PathElement>);

impl NodePath {
    /// Path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Components below the root.
    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    fn child(&self, element: PathElement) -> Self {
        let mut elements = self.0.clone();
        elements.push(element);
        Self(elements)
    }
}

impl fmt::Display for NodePath {
    /// Normalized JSONPath form, e.g. `$['credentialSubject']['degrees'][0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for element in &self.0 {
            match element {
                PathElement::Member(name) => {
                    write!(f, "['{}']", name.replace('\\', "\\\\").replace('\'', "\\'"))?
                }
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.0.len() + 1))?;
        seq.serialize_element("$")?;
        for element in &self.0 {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut elements = Vec::<PathElement>::deserialize(deserializer)?;
        match elements.first() {
            Some(PathElement::Member(root)) if root == "$" => {
                elements.remove(0);
                Ok(Self(elements))
            }
            _ => Err(D::Error::custom("node path must start with \"$\"")),
        }
    }
}

/// A matched value together with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    /// Location of the value in the queried document.
    pub path: NodePath,
    /// Matched value.
    pub value: Value,
}

/// JSONPath syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Expression is empty.
    #[error("empty json path")]
    Empty,
    /// Expression does not start at the root (`$`).
    #[error("json path must start with '$'")]
    MissingRoot,
    /// Character not allowed at this position.
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { position: usize, found: char },
    /// Expression ended inside a segment.
    #[error("unexpected end of json path")]
    UnexpectedEnd,
    /// Array index is not a valid integer.
    #[error("invalid array index at position {position}")]
    InvalidIndex { position: usize },
    /// Slice step is zero or negative.
    #[error("invalid slice step at position {position}: step must be positive")]
    InvalidSlice { position: usize },
    /// Filter literal is neither a string, a number, `true`, `false` nor `null`.
    #[error("invalid filter literal at position {position}")]
    InvalidLiteral { position: usize },
    /// Syntax the selector does not implement.
    #[error("unsupported json path syntax at position {position}: {feature}")]
    Unsupported {
        position: usize,
        feature: &'static str,
    },
}

/// Path expression failure, together with the offending expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid json path {expression:?}: {source}")]
pub struct ExtractError {
    /// Expression as written in the definition.
    pub expression: String,
    /// Underlying syntax error.
    #[source]
    pub source: PathError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Name(String),
    Index(i64),
    Wildcard,
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: i64,
    },
    Filter(FilterExpr),
}

/// Singular step of a relative query such as `@.degree['type'][0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Name(String),
    Index(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Current(Vec<Step>),
    Literal(Value),
}

impl Operand {
    fn resolve<'a>(&'a self, node: &'a Value) -> Option<&'a Value> {
        match self {
            Operand::Current(steps) => resolve_steps(steps, node),
            Operand::Literal(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn apply(self, left: Option<&Value>, right: Option<&Value>) -> bool {
        match self {
            CompareOp::Eq => values_equal(left, right),
            CompareOp::Ne => !values_equal(left, right),
            CompareOp::Lt => compare_values(left, right) == Some(Ordering::Less),
            CompareOp::Le => matches!(
                compare_values(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            CompareOp::Gt => compare_values(left, right) == Some(Ordering::Greater),
            CompareOp::Ge => matches!(
                compare_values(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterExpr {
    Or(Box<FilterExpr>, Box<FilterExpr>),
    And(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
    /// Bare relative query: kept when it resolves to a truthy value.
    Truthy(Vec<Step>),
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
}

impl FilterExpr {
    fn matches(&self, node: &Value) -> bool {
        match self {
            FilterExpr::Or(left, right) => left.matches(node) || right.matches(node),
            FilterExpr::And(left, right) => left.matches(node) && right.matches(node),
            FilterExpr::Not(inner) => !inner.matches(node),
            FilterExpr::Truthy(steps) => resolve_steps(steps, node).is_some_and(is_truthy),
            FilterExpr::Compare { left, op, right } => {
                op.apply(left.resolve(node), right.resolve(node))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Child(Vec<Selector>),
    Descendant(Vec<Selector>),
}

/// Parsed JSONPath expression.
///
/// Supported forms:
/// - `$.a.b`, `$.*`
/// - `$['a']['b']`, `$["a"]`, `$['a','b']`
/// - `$.a[0]`, `$.a[-1]`, `$.a[0,2]`, `$.a[*]`, `$.a[1:3]`, `$.a[::2]`
/// - `$..a`, `$..*`, `$..[0]`
/// - `$.a[?(@.b == 'x')]`, `$.a[?@ > 1 && @ < 5]`, `$.a[?(@.b)]`, `$.a[?(!(@.b))]`
///
/// Filters test each child of the selected node against relative queries (`@`,
/// `@.b`, `@['b'][0]`) and string, number, boolean or null literals, combined with
/// `==`, `!=`, `<`, `<=`, `>`, `>=`, `&&`, `||`, `!` and parentheses. Ordering
/// operators only hold between two numbers or two strings. A bare relative query
/// keeps children where it resolves to something other than `false`, `null`, `0`
/// or `""`.
///
/// Script expressions (`[(...)]`) and root queries inside filters are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parses a JSONPath expression.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        Parser::new(expression).parse()
    }

    /// Selects all matching nodes in document order.
    ///
    /// Unresolved members, out-of-range indices and type mismatches simply drop the
    /// current candidate; an expression that matches nothing yields an empty list.
    pub fn select(&self, root: &Value) -> Vec<PathNode> {
        let mut current = vec![(NodePath::root(), root)];
        for segment in &self.segments {
            let mut next = Vec::new();
            match segment {
                Segment::Child(selectors) => {
                    for (path, node) in &current {
                        apply_selectors(selectors, path, *node, &mut next);
                    }
                }
                Segment::Descendant(selectors) => {
                    for (path, node) in &current {
                        let mut stack = vec![(path.clone(), *node)];
                        // Pre-order walk; children are pushed in reverse to keep document order.
                        while let Some((path, node)) = stack.pop() {
                            apply_selectors(selectors, &path, node, &mut next);
                            let mut children = Vec::new();
                            push_children(&path, node, &mut children);
                            stack.extend(children.into_iter().rev());
                        }
                    }
                }
            }
            if next.is_empty() {
                return Vec::new();
            }
            current = next;
        }

        current
            .into_iter()
            .map(|(path, value)| PathNode {
                path,
                value: value.clone(),
            })
            .collect()
    }
}

fn apply_selectors<'a>(
    selectors: &[Selector],
    path: &NodePath,
    node: &'a Value,
    out: &mut Vec<(NodePath, &'a Value)>,
) {
    for selector in selectors {
        match selector {
            Selector::Name(name) => {
                if let Value::Object(map) = node
                    && let Some(child) = map.get(name)
                {
                    out.push((path.child(PathElement::Member(name.clone())), child));
                }
            }
            Selector::Wildcard => push_children(path, node, out),
            Selector::Index(index) => {
                if let Value::Array(arr) = node
                    && let Some(idx) = resolve_index(*index, arr.len())
                {
                    out.push((path.child(PathElement::Index(idx)), &arr[idx]));
                }
            }
            Selector::Slice { start, end, step } => {
                if let Value::Array(arr) = node {
                    let len = arr.len() as i64;
                    let bound = |value: i64| {
                        if value < 0 {
                            (len + value).max(0)
                        } else {
                            value.min(len)
                        }
                    };
                    let lower = start.map(bound).unwrap_or(0);
                    let upper = end.map(bound).unwrap_or(len);
                    let mut idx = lower;
                    while idx < upper {
                        let position = idx as usize;
                        out.push((path.child(PathElement::Index(position)), &arr[position]));
                        match idx.checked_add(*step) {
                            Some(next) => idx = next,
                            None => break,
                        }
                    }
                }
            }
            Selector::Filter(expr) => {
                let mut children = Vec::new();
                push_children(path, node, &mut children);
                out.extend(children.into_iter().filter(|(_, child)| expr.matches(child)));
            }
        }
    }
}

fn push_children<'a>(path: &NodePath, node: &'a Value, out: &mut Vec<(NodePath, &'a Value)>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                out.push((path.child(PathElement::Member(key.clone())), child));
            }
        }
        Value::Array(arr) => {
            for (idx, child) in arr.iter().enumerate() {
                out.push((path.child(PathElement::Index(idx)), child));
            }
        }
        _ => {}
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

fn resolve_steps<'a>(steps: &[Step], node: &'a Value) -> Option<&'a Value> {
    steps.iter().try_fold(node, |current, step| match step {
        Step::Name(name) => current.as_object()?.get(name),
        Step::Index(index) => {
            let arr = current.as_array()?;
            arr.get(resolve_index(*index, arr.len())?)
        }
    })
}

fn values_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    match (left?, right?) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn is_name_first(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch as u32 >= 0x80
}

fn is_name_char(ch: char) -> bool {
    is_name_first(ch) || ch.is_ascii_digit()
}

/// Runs the candidate expressions in order and returns the matches of the first one
/// that resolves at least one node.
///
/// Later expressions are only parsed when every earlier one matched nothing.
pub fn extract_input_field(
    document: &Value,
    paths: &[String],
) -> Result<Vec<PathNode>, ExtractError> {
    for expression in paths {
        let query = JsonPath::parse(expression).map_err(|source| ExtractError {
            expression: expression.clone(),
            source,
        })?;
        let nodes = query.select(document);
        if !nodes.is_empty() {
            return Ok(nodes);
        }
    }
    Ok(Vec::new())
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(found) => Err(PathError::UnexpectedChar {
                position: self.pos,
                found,
            }),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse(mut self) -> Result<JsonPath, PathError> {
        if self.input.trim().is_empty() {
            return Err(PathError::Empty);
        }
        if self.peek() != Some('$') {
            return Err(PathError::MissingRoot);
        }
        self.bump();

        let mut segments = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                '.' if self.peek_at(1) == Some('.') => {
                    self.pos += 2;
                    let selectors = match self.peek() {
                        Some('[') => self.bracket()?,
                        Some('*') => {
                            self.bump();
                            vec![Selector::Wildcard]
                        }
                        _ => vec![Selector::Name(self.member_name()?)],
                    };
                    segments.push(Segment::Descendant(selectors));
                }
                '.' => {
                    self.bump();
                    let selector = if self.peek() == Some('*') {
                        self.bump();
                        Selector::Wildcard
                    } else {
                        Selector::Name(self.member_name()?)
                    };
                    segments.push(Segment::Child(vec![selector]));
                }
                '[' => segments.push(Segment::Child(self.bracket()?)),
                found => {
                    return Err(PathError::UnexpectedChar {
                        position: self.pos,
                        found,
                    });
                }
            }
        }

        Ok(JsonPath { segments })
    }

    fn member_name(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        match self.peek() {
            Some(ch) if is_name_first(ch) => {
                self.bump();
            }
            Some(found) => {
                return Err(PathError::UnexpectedChar {
                    position: self.pos,
                    found,
                });
            }
            None => return Err(PathError::UnexpectedEnd),
        }
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn bracket(&mut self) -> Result<Vec<Selector>, PathError> {
        self.expect('[')?;
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            let selector = match self.peek() {
                Some('\'') | Some('"') => Selector::Name(self.quoted()?),
                Some('*') => {
                    self.bump();
                    Selector::Wildcard
                }
                Some('?') => {
                    self.bump();
                    Selector::Filter(self.filter_or()?)
                }
                Some('(') => {
                    return Err(PathError::Unsupported {
                        position: self.pos,
                        feature: "script expressions",
                    });
                }
                Some(_) => self.index_or_slice()?,
                None => return Err(PathError::UnexpectedEnd),
            };
            selectors.push(selector);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => break,
                Some(found) => {
                    return Err(PathError::UnexpectedChar {
                        position: self.pos - found.len_utf8(),
                        found,
                    });
                }
                None => return Err(PathError::UnexpectedEnd),
            }
        }
        Ok(selectors)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn filter_or(&mut self) -> Result<FilterExpr, PathError> {
        let mut expr = self.filter_and()?;
        loop {
            self.skip_whitespace();
            if !self.eat("||") {
                return Ok(expr);
            }
            let right = self.filter_and()?;
            expr = FilterExpr::Or(Box::new(expr), Box::new(right));
        }
    }

    fn filter_and(&mut self) -> Result<FilterExpr, PathError> {
        let mut expr = self.filter_unary()?;
        loop {
            self.skip_whitespace();
            if !self.eat("&&") {
                return Ok(expr);
            }
            let right = self.filter_unary()?;
            expr = FilterExpr::And(Box::new(expr), Box::new(right));
        }
    }

    fn filter_unary(&mut self) -> Result<FilterExpr, PathError> {
        self.skip_whitespace();
        if self.peek() == Some('!') && self.peek_at(1) != Some('=') {
            self.bump();
            return Ok(FilterExpr::Not(Box::new(self.filter_unary()?)));
        }
        if self.peek() == Some('(') {
            self.bump();
            let expr = self.filter_or()?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(expr);
        }

        let left = self.operand()?;
        self.skip_whitespace();
        let Some(op) = self.comparison_op() else {
            return match (left, self.peek()) {
                (Operand::Current(steps), _) => Ok(FilterExpr::Truthy(steps)),
                (Operand::Literal(_), Some(found)) => Err(PathError::UnexpectedChar {
                    position: self.pos,
                    found,
                }),
                (Operand::Literal(_), None) => Err(PathError::UnexpectedEnd),
            };
        };
        self.skip_whitespace();
        let right = self.operand()?;
        Ok(FilterExpr::Compare { left, op, right })
    }

    fn comparison_op(&mut self) -> Option<CompareOp> {
        const OPERATORS: [(&str, CompareOp); 6] = [
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            ("<=", CompareOp::Le),
            (">=", CompareOp::Ge),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
        ];
        OPERATORS
            .iter()
            .find(|(token, _)| self.eat(token))
            .map(|(_, op)| *op)
    }

    fn operand(&mut self) -> Result<Operand, PathError> {
        let position = self.pos;
        match self.peek() {
            Some('@') => {
                self.bump();
                self.relative_steps().map(Operand::Current)
            }
            Some('$') => Err(PathError::Unsupported {
                position,
                feature: "root queries in filter expressions",
            }),
            Some('\'') | Some('"') => self
                .quoted()
                .map(|text| Operand::Literal(Value::String(text))),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.number().map(Operand::Literal),
            Some(ch) if ch.is_ascii_alphabetic() => {
                while self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
                    self.bump();
                }
                let literal = match &self.input[position..self.pos] {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" => Value::Null,
                    _ => return Err(PathError::InvalidLiteral { position }),
                };
                Ok(Operand::Literal(literal))
            }
            Some(found) => Err(PathError::UnexpectedChar { position, found }),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn relative_steps(&mut self) -> Result<Vec<Step>, PathError> {
        let mut steps = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    steps.push(Step::Name(self.member_name()?));
                }
                Some('[') => {
                    self.bump();
                    self.skip_whitespace();
                    let step = match self.peek() {
                        Some('\'') | Some('"') => Step::Name(self.quoted()?),
                        _ => {
                            let position = self.pos;
                            self.integer()?
                                .map(Step::Index)
                                .ok_or(PathError::InvalidIndex { position })?
                        }
                    };
                    self.skip_whitespace();
                    self.expect(']')?;
                    steps.push(step);
                }
                _ => return Ok(steps),
            }
        }
    }

    fn number(&mut self) -> Result<Value, PathError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
        {
            self.bump();
        }
        self.input[start..self.pos]
            .parse::<serde_json::Number>()
            .map(Value::Number)
            .map_err(|_| PathError::InvalidLiteral { position: start })
    }

    fn quoted(&mut self) -> Result<String, PathError> {
        let Some(quote) = self.bump() else {
            return Err(PathError::UnexpectedEnd);
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(PathError::UnexpectedEnd),
                },
                Some(ch) if ch == quote => return Ok(out),
                Some(ch) => out.push(ch),
                None => return Err(PathError::UnexpectedEnd),
            }
        }
    }

    fn index_or_slice(&mut self) -> Result<Selector, PathError> {
        let position = self.pos;
        let start = self.integer()?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            return start
                .map(Selector::Index)
                .ok_or(PathError::InvalidIndex { position });
        }
        self.bump();
        self.skip_whitespace();
        let end = self.integer()?;
        self.skip_whitespace();
        let mut step = 1;
        if self.peek() == Some(':') {
            let step_position = self.pos;
            self.bump();
            self.skip_whitespace();
            step = self.integer()?.unwrap_or(1);
            if step <= 0 {
                return Err(PathError::InvalidSlice {
                    position: step_position,
                });
            }
        }
        Ok(Selector::Slice { start, end, step })
    }

    fn integer(&mut self) -> Result<Option<i64>, PathError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.input[start..self.pos];
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<i64>()
            .map(Some)
            .map_err(|_| PathError::InvalidIndex { position: start })
    }
}
