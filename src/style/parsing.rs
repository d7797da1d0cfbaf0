use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while_m_n};
use nom::character::complete::{char, digit0, digit1, space1};
use nom::combinator::{map_res, opt, verify};
use nom::multi::separated_list1;
use nom::sequence::tuple;
use nom::IResult;

use super::{ColorValue, Unit, Value};

/// Parses a complete style value, e.g. `20rpx`, `#f40` or
/// `5px solid #000`. Returns `None` on trailing garbage; the box report
/// treats that as an unusable value rather than an error.
pub fn parse_value(input: &str) -> Option<Value> {
    match value(input.trim()) {
        Ok(("", value)) => Some(value),
        _ => None,
    }
}

fn value(input: &str) -> IResult<&str, Value> {
    let (res, mut values) = separated_list1(space1, single_value)(input)?;
    if values.len() == 1 {
        Ok((res, values.remove(0)))
    } else {
        Ok((res, Value::Multiple(values)))
    }
}

fn single_value(input: &str) -> IResult<&str, Value> {
    if let Ok((res, color)) = parse_color(input) {
        return Ok((res, Value::Color(color)));
    }
    if let Ok((res, (value, unit))) = tuple((parse_number, opt(parse_unit)))(input) {
        let value = match unit {
            Some(unit) => Value::Length(value, unit),
            None => Value::Number(value),
        };
        return Ok((res, value));
    }
    let (res, ident) = parse_identifier(input)?;
    Ok((res, Value::Keyword(ident.to_string())))
}

/// '12' -> `12.0`
fn parse_integer_to_float(input: &str) -> IResult<&str, f64> {
    let (res, num) = digit1(input)?;
    Ok((res, num.parse().unwrap()))
}

/// '.5' -> `0.5`
/// '0.5' -> `0.5`
fn parse_float(input: &str) -> IResult<&str, f64> {
    let (res, num) = tuple((digit0, char('.'), digit1))(input)?;
    Ok((res, format!("{}.{}", num.0, num.2).parse().unwrap()))
}

fn parse_number(input: &str) -> IResult<&str, f64> {
    alt((parse_float, parse_integer_to_float))(input)
}

fn parse_unit(input: &str) -> IResult<&str, Unit> {
    let (res, unit) = alt((tag("rpx"), tag("px"), tag("rem"), tag("em")))(input)?;
    Ok((
        res,
        match unit {
            "rpx" => Unit::Rpx,
            "px" => Unit::Px,
            "rem" => Unit::Rem,
            "em" => Unit::Em,
            _ => unreachable!(),
        },
    ))
}

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn is_hex_digit(c: char) -> bool {
    c.is_digit(16)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex)(input)
}

/// Single hex digit of the short `#rgb` form: `f` -> `0xff`
fn hex_short(input: &str) -> IResult<&str, u8> {
    let (res, v) = map_res(take_while_m_n(1, 1, is_hex_digit), from_hex)(input)?;
    Ok((res, v * 0x11))
}

fn parse_color(input: &str) -> IResult<&str, ColorValue> {
    let (input, _) = tag("#")(input)?;
    if let Ok((input, (r, g, b, a))) = tuple((hex_pair, hex_pair, hex_pair, hex_pair))(input) {
        return Ok((input, ColorValue { r, g, b, a }));
    }
    if let Ok((input, (r, g, b))) = tuple((hex_pair, hex_pair, hex_pair))(input) {
        return Ok((input, ColorValue { r, g, b, a: 255 }));
    }
    let (input, (r, g, b)) = tuple((hex_short, hex_short, hex_short))(input)?;
    Ok((input, ColorValue { r, g, b, a: 255 }))
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    verify(is_not(" \t\r\n;:"), |s: &str| !s.starts_with("--"))(input)
}

#[cfg(test)]
#[test]
fn test_parse_lengths() {
    assert_eq!(parse_value("20rpx"), Some(Value::Length(20.0, Unit::Rpx)));
    assert_eq!(parse_value("12.5px"), Some(Value::Length(12.5, Unit::Px)));
    assert_eq!(parse_value(".5em"), Some(Value::Length(0.5, Unit::Em)));
    assert_eq!(parse_value("2rem"), Some(Value::Length(2.0, Unit::Rem)));
    assert_eq!(parse_value("100"), Some(Value::Number(100.0)));
}

#[cfg(test)]
#[test]
fn test_parse_color_forms() {
    let target = ColorValue {
        r: 0xff,
        g: 0x44,
        b: 0x00,
        a: 255,
    };
    assert_eq!(parse_value("#f40"), Some(Value::Color(target)));
    assert_eq!(parse_value("#ff4400"), Some(Value::Color(target)));
    assert_eq!(
        parse_value("#ff440080"),
        Some(Value::Color(ColorValue { a: 0x80, ..target }))
    );
    assert_eq!(
        parse_value("#999"),
        Some(Value::Color(ColorValue {
            r: 0x99,
            g: 0x99,
            b: 0x99,
            a: 255,
        }))
    );
}

#[cfg(test)]
#[test]
fn test_parse_border_shorthand() {
    let target = Value::Multiple(vec![
        Value::Length(5.0, Unit::Px),
        Value::Keyword("solid".to_string()),
        Value::Color(ColorValue {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }),
    ]);
    assert_eq!(parse_value("5px solid #000"), Some(target));
}

#[cfg(test)]
#[test]
fn test_parse_rejects_garbage() {
    assert_eq!(parse_value(""), None);
    assert_eq!(parse_value("--custom"), None);
    assert_eq!(parse_value("5px ;"), None);
    // A malformed color still passes through as an uninterpreted keyword
    assert_eq!(
        parse_value("#zz0011"),
        Some(Value::Keyword("#zz0011".to_string()))
    );
}
