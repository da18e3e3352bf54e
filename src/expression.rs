//! Rule expressions: `"required|min:3|one_of:a,b"`.
//!
//! An expression is a `|`-separated list of segments. Each segment is a rule
//! name, optionally followed by `:` and a `,`-separated argument list.
//! Everything after the first `:` belongs to the arguments, so arguments may
//! themselves contain `:`.

use crate::error::RuleError;
use std::fmt;
use std::str::FromStr;

/// One rule invocation: a name and its arguments.
///
/// # Examples
///
/// ```
/// use rulebook::RuleCall;
///
/// let call: RuleCall = "between:1,10".parse().unwrap();
/// assert_eq!(call.name, "between");
/// assert_eq!(call.args, vec!["1", "10"]);
/// assert_eq!(call.to_string(), "between:1,10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCall {
    /// Registered rule name.
    pub name: String,
    /// Arguments as written.
    pub args: Vec<String>,
}

impl RuleCall {
    /// A call without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        RuleCall {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Replace the arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl FromStr for RuleCall {
    type Err = RuleError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if segment.contains('|') {
            return Err(RuleError::InvalidExpression {
                expression: segment.to_string(),
                reason: "expected a single rule".to_string(),
            });
        }
        parse_segment(segment, segment)
    }
}

impl fmt::Display for RuleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.args.join(","))
        }
    }
}

/// Parse a full rule expression.
///
/// A blank expression yields no rules. Empty segments (`"a||b"`) and
/// segments without a name (`":3"`) are rejected.
///
/// # Examples
///
/// ```
/// use rulebook::expression::parse;
/// use rulebook::RuleCall;
///
/// let calls = parse("required|min:3").unwrap();
/// assert_eq!(
///     calls,
///     vec![RuleCall::new("required"), RuleCall::new("min").with_args(["3"])]
/// );
///
/// assert!(parse("required||min:3").is_err());
/// ```
pub fn parse(expression: &str) -> Result<Vec<RuleCall>, RuleError> {
    if expression.trim().is_empty() {
        return Ok(Vec::new());
    }

    expression
        .split('|')
        .map(|segment| parse_segment(expression, segment))
        .collect()
}

fn parse_segment(expression: &str, segment: &str) -> Result<RuleCall, RuleError> {
    let invalid = |reason: &str| RuleError::InvalidExpression {
        expression: expression.to_string(),
        reason: reason.to_string(),
    };

    let segment = segment.trim();
    if segment.is_empty() {
        return Err(invalid("empty rule segment"));
    }

    let (name, args) = match segment.split_once(':') {
        Some((name, raw)) => (name.trim(), split_args(raw)),
        None => (segment, Vec::new()),
    };

    if name.is_empty() {
        return Err(invalid("missing rule name"));
    }

    Ok(RuleCall {
        name: name.to_string(),
        args,
    })
}

fn split_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|arg| arg.trim().to_string()).collect()
}
