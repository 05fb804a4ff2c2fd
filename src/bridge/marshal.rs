//! # Argument Marshaling
//!
//! Converts Rust values into Python source literals for the `run(...)`
//! invocation. The set of supported kinds is closed on purpose: strings,
//! integers and floats. Anything richer (the hangman game state, for
//! instance) travels as a JSON string and is decoded by the script itself.
//!
//! | Kind | Example value | Emitted literal |
//! |------|---------------|-----------------|
//! | `Str` | `say "hi"` | `"say \"hi\""` |
//! | `Int` | `-7` | `-7` |
//! | `Float` | `42.0` | `42` |
//! | `Float` | `0.5` | `0.5` |
//! | `Float` | `NaN` | `float('nan')` |

use std::fmt::Write as _;

/// Triple-quote sequence stripped from string arguments before quoting.
const TRIPLE_QUOTE: &str = "\"\"\"";

/// Floats with a magnitude below this print without a fractional part.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e15;

/// A single positional argument for a script's `run` entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for ScriptArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ScriptArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ScriptArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ScriptArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl ScriptArg {
    /// Render this argument as a Python literal.
    pub fn to_python_literal(&self) -> String {
        match self {
            Self::Str(s) => quote_str(s),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => float_literal(*f),
        }
    }
}

fn quote_str(value: &str) -> String {
    let stripped = value.replace(TRIPLE_QUOTE, "");
    let mut out = String::with_capacity(stripped.len() + 2);
    out.push('"');
    for c in stripped.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "float('nan')".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "float('inf')".to_string()
        } else {
            "float('-inf')".to_string()
        };
    }
    if value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
        // -0.0 prints as "0"
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

/// Join arguments into the text between the parentheses of `run(...)`.
pub fn marshal_args(args: &[ScriptArg]) -> String {
    args.iter()
        .map(ScriptArg::to_python_literal)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the complete program handed to the interpreter: the template
/// source followed by a call to `run` whose value is written to stdout.
pub fn build_program(script: &str, args: &[ScriptArg]) -> String {
    format!(
        "{script}\n\nimport sys as __gallery_sys\n__gallery_sys.stdout.write(str(run({})))\n",
        marshal_args(args)
    )
}
