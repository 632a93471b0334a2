//! Printf-style interpolation for plural patterns.
//!
//! Understands the subset of `printf`/`NSString` specifiers that localized
//! patterns use in practice: `%d`, `%ld`, `%@`, `%1$s`, `%.2f`, `%%` and
//! friends. A token that cannot be filled is copied to the output unchanged,
//! and so is a token whose width, precision or position exceeds [`MAX_FIELD`].

use std::fmt::Display;

/// A value passed to a plural pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Int(v) => write!(f, "{}", v),
            FormatArg::Float(v) => write!(f, "{}", v),
            FormatArg::Text(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FormatArg {
            fn from(value: $t) -> Self {
                FormatArg::Int(i64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        FormatArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u64> for FormatArg {
    fn from(value: u64) -> Self {
        FormatArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        FormatArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        FormatArg::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Text(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Text(value.to_string())
    }
}

/// Largest width or precision a token may ask for.
pub const MAX_FIELD: usize = u16::MAX as usize;

#[derive(Debug, Default)]
struct Spec {
    position: Option<usize>,
    left_align: bool,
    alternate: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
    end: usize,
}

enum Token {
    Percent { end: usize },
    Spec(Spec),
}

/// Fills `pattern` with `args`.
///
/// Non-positional specifiers consume arguments in order; `%n$` picks argument
/// `n` (1-based).
///
/// ```rust
/// use localizable::format::{format_printf, FormatArg};
///
/// let out = format_printf("%2$@ has %1$d new messages", &[FormatArg::from(3), FormatArg::from("Ana")]);
/// assert_eq!(out, "Ana has 3 new messages");
/// ```
pub fn format_printf(pattern: &str, args: &[FormatArg]) -> String {
    let bytes = pattern.as_bytes();
    let mut out = String::with_capacity(pattern.len());
    let mut next_arg = 0usize;
    let mut literal_start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        out.push_str(&pattern[literal_start..i]);

        match parse_token(bytes, i) {
            Some(Token::Percent { end }) => {
                out.push('%');
                i = end;
            }
            Some(Token::Spec(spec)) => {
                let arg = match spec.position {
                    Some(n) => n.checked_sub(1).and_then(|n| args.get(n)),
                    None => {
                        let arg = args.get(next_arg);
                        next_arg += 1;
                        arg
                    }
                };
                match arg.and_then(|arg| render(&spec, arg)) {
                    Some(text) => out.push_str(&pad(&spec, text)),
                    None => out.push_str(&pattern[i..spec.end]),
                }
                i = spec.end;
            }
            None => {
                out.push('%');
                i += 1;
            }
        }
        literal_start = i;
    }

    out.push_str(&pattern[literal_start..]);
    out
}

fn parse_token(bytes: &[u8], start: usize) -> Option<Token> {
    let mut j = start + 1;
    if j < bytes.len() && bytes[j] == b'%' {
        return Some(Token::Percent { end: j + 1 });
    }

    let mut spec = Spec::default();

    // Optional positional index: digits followed by '$'
    let digits_start = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j > digits_start && j < bytes.len() && bytes[j] == b'$' {
        spec.position = Some(parse_number(&bytes[digits_start..j])?);
        j += 1;
    } else {
        j = digits_start;
    }

    while j < bytes.len() {
        match bytes[j] {
            b'-' => spec.left_align = true,
            b'0' => spec.zero_pad = true,
            b'+' => spec.plus_sign = true,
            b'#' => spec.alternate = true,
            b' ' | b'\'' => {}
            _ => break,
        }
        j += 1;
    }

    let width_start = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j > width_start {
        spec.width = Some(parse_field(&bytes[width_start..j])?);
    }

    if j < bytes.len() && bytes[j] == b'.' {
        j += 1;
        let precision_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        spec.precision = Some(if j > precision_start {
            parse_field(&bytes[precision_start..j])?
        } else {
            0
        });
    }

    while j < bytes.len() && matches!(bytes[j], b'h' | b'l' | b'q' | b'z' | b'j' | b't' | b'L') {
        j += 1;
    }

    let conversion = *bytes.get(j)? as char;
    // `%#@name@` is a stringsdict variable reference, not an object specifier.
    if !"diuxXofFeEgG@sc".contains(conversion) || (spec.alternate && conversion == '@') {
        return None;
    }
    spec.conversion = conversion;
    spec.end = j + 1;
    Some(Token::Spec(spec))
}

fn parse_number(digits: &[u8]) -> Option<usize> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

fn parse_field(digits: &[u8]) -> Option<usize> {
    parse_number(digits).filter(|value| *value <= MAX_FIELD)
}

fn render(spec: &Spec, arg: &FormatArg) -> Option<String> {
    match spec.conversion {
        'd' | 'i' | 'u' => {
            let value = as_int(arg)?;
            Some(if spec.plus_sign && value >= 0 {
                format!("+{}", value)
            } else {
                value.to_string()
            })
        }
        'x' => Some(format!("{:x}", as_int(arg)? as u64)),
        'X' => Some(format!("{:X}", as_int(arg)? as u64)),
        'o' => Some(format!("{:o}", as_int(arg)? as u64)),
        'f' | 'F' => {
            let value = as_float(arg)?;
            let text = format!("{:.*}", spec.precision.unwrap_or(6), value);
            Some(if spec.plus_sign && value >= 0.0 {
                format!("+{}", text)
            } else {
                text
            })
        }
        'e' | 'E' => {
            let text = c_exponent(as_float(arg)?, spec.precision.unwrap_or(6));
            Some(if spec.conversion == 'E' {
                text.to_uppercase()
            } else {
                text
            })
        }
        'g' | 'G' => {
            let text = c_general(as_float(arg)?, spec.precision.unwrap_or(6), spec.alternate);
            Some(if spec.conversion == 'G' {
                text.to_uppercase()
            } else {
                text
            })
        }
        '@' | 's' => {
            let text = arg.to_string();
            Some(match spec.precision {
                Some(max) => text.chars().take(max).collect(),
                None => text,
            })
        }
        'c' => match arg {
            FormatArg::Int(v) => u32::try_from(*v)
                .ok()
                .and_then(char::from_u32)
                .map(String::from),
            FormatArg::Text(s) => s.chars().next().map(String::from),
            FormatArg::Float(_) => None,
        },
        _ => None,
    }
}

fn as_int(arg: &FormatArg) -> Option<i64> {
    match arg {
        FormatArg::Int(v) => Some(*v),
        FormatArg::Float(v) => Some(v.trunc() as i64),
        FormatArg::Text(s) => s.trim().parse().ok(),
    }
}

fn as_float(arg: &FormatArg) -> Option<f64> {
    match arg {
        FormatArg::Int(v) => Some(*v as f64),
        FormatArg::Float(v) => Some(*v),
        FormatArg::Text(s) => s.trim().parse().ok(),
    }
}

// Rust renders `1.5e2`; C renders `1.500000e+02`.
fn c_exponent(value: f64, precision: usize) -> String {
    let rendered = format!("{:.*e}", precision, value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

// `%g`: exponent form below 1e-4 or at/above 10^precision, trailing zeros dropped unless `#`.
fn c_general(value: f64, precision: usize, keep_zeros: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let exponent = if value == 0.0 {
        0
    } else {
        format!("{:.*e}", precision - 1, value)
            .rsplit_once('e')
            .and_then(|(_, exponent)| exponent.parse::<i64>().ok())
            .unwrap_or(0)
    };

    let text = if exponent < -4 || exponent >= precision as i64 {
        c_exponent(value, precision - 1)
    } else {
        let decimals = (precision as i64 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    };
    if keep_zeros {
        text
    } else {
        strip_trailing_zeros(&text)
    }
}

fn strip_trailing_zeros(text: &str) -> String {
    let (mantissa, exponent) = text.split_at(text.find('e').unwrap_or(text.len()));
    if !mantissa.contains('.') {
        return text.to_string();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", mantissa, exponent)
}

fn pad(spec: &Spec, text: String) -> String {
    let Some(width) = spec.width else {
        return text;
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = width - len;
    let numeric = "diuxXofFeEgG".contains(spec.conversion);

    if spec.left_align {
        format!("{}{}", text, " ".repeat(fill))
    } else if spec.zero_pad && numeric {
        match text.strip_prefix(['-', '+']) {
            Some(rest) => format!("{}{}{}", &text[..1], "0".repeat(fill), rest),
            None => format!("{}{}", "0".repeat(fill), text),
        }
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_specifiers() {
        assert_eq!(format_printf("%d hours", &[5.into()]), "5 hours");
        assert_eq!(format_printf("%ld / %lld / %lu", &[1.into(), 2.into(), 3u64.into()]), "1 / 2 / 3");
        assert_eq!(format_printf("%+d", &[4.into()]), "+4");
    }

    #[test]
    fn test_object_and_string_specifiers() {
        assert_eq!(format_printf("Hi %@, I am %s", &["Ana".into(), "Bo".into()]), "Hi Ana, I am Bo");
        assert_eq!(format_printf("%.3s", &["abcdef".into()]), "abc");
    }

    #[test]
    fn test_positional_arguments() {
        let args = [FormatArg::from("first"), FormatArg::from("second")];
        assert_eq!(format_printf("%2$@ then %1$@", &args), "second then first");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(format_printf("50%% off %d", &[3.into()]), "50% off 3");
    }

    #[test]
    fn test_float_specifiers() {
        assert_eq!(format_printf("%.2f", &[1.005_f64.into()]), "1.00");
        assert_eq!(format_printf("%f", &[2.into()]), "2.000000");
        assert_eq!(format_printf("%.1e", &[1500.0.into()]), "1.5e+03");
        assert_eq!(format_printf("%g", &[0.25.into()]), "0.25");
    }

    #[test]
    fn test_general_specifier() {
        assert_eq!(format_printf("%g", &[1e20.into()]), "1e+20");
        assert_eq!(format_printf("%G", &[1e-5.into()]), "1E-05");
        assert_eq!(format_printf("%g", &[100000.into()]), "100000");
        assert_eq!(format_printf("%g", &[1000000.into()]), "1e+06");
        assert_eq!(format_printf("%g", &[0.0001.into()]), "0.0001");
        assert_eq!(format_printf("%g", &[0.into()]), "0");
        assert_eq!(format_printf("%.3g", &[1.23456.into()]), "1.23");
        assert_eq!(format_printf("%#g", &[1.5.into()]), "1.50000");
    }

    #[test]
    fn test_oversized_field_is_verbatim() {
        assert_eq!(format_printf("%.70000f", &[1.5.into()]), "%.70000f");
        assert_eq!(format_printf("%18446744073709551615d", &[1.into()]), "%18446744073709551615d");
        assert_eq!(format_printf("%99999999999999999999999d", &[1.into()]), "%99999999999999999999999d");
        assert_eq!(format_printf("%.2f and %d", &[1.5.into(), 2.into()]), "1.50 and 2");
    }

    #[test]
    fn test_width_and_padding() {
        assert_eq!(format_printf("[%5d]", &[42.into()]), "[   42]");
        assert_eq!(format_printf("[%-5d]", &[42.into()]), "[42   ]");
        assert_eq!(format_printf("[%05d]", &[(-42).into()]), "[-0042]");
    }

    #[test]
    fn test_radix_and_char() {
        assert_eq!(format_printf("%x %X %o", &[255.into(), 255.into(), 8.into()]), "ff FF 10");
        assert_eq!(format_printf("%c%c", &[65.into(), "bee".into()]), "Ab");
    }

    #[test]
    fn test_missing_argument_is_verbatim() {
        assert_eq!(format_printf("%d of %d", &[1.into()]), "1 of %d");
        assert_eq!(format_printf("%3$@", &["a".into()]), "%3$@");
        assert_eq!(format_printf("%0$@", &["a".into()]), "%0$@");
    }

    #[test]
    fn test_unknown_or_truncated_specifier_is_verbatim() {
        assert_eq!(format_printf("100% sure", &[]), "100% sure");
        assert_eq!(format_printf("trailing %", &[]), "trailing %");
        assert_eq!(format_printf("%#@hours@", &[1.into()]), "%#@hours@");
    }

    #[test]
    fn test_text_that_is_not_a_number() {
        assert_eq!(format_printf("%d", &["many".into()]), "%d");
        assert_eq!(format_printf("%d", &["7".into()]), "7");
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        assert_eq!(format_printf("%d часов, ок ✓", &[5.into()]), "5 часов, ок ✓");
        assert_eq!(format_printf("日本 %@", &["語".into()]), "日本 語");
    }
}
