//! Whitespace and comment recognition for definition sources. A whitespace
//! unit is a space, tab, carriage return, newline, a `/* ... */` comment, or
//! an end-of-line `--` or `#` comment.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_until};
use nom::character::complete::{line_ending, not_line_ending};
use nom::combinator::{map, value};
use nom::multi::{many0, many1};
use nom::sequence::delimited;
use nom::InputLength;

use crate::{DefResult, Span};

pub fn multiline_comment(input: Span) -> DefResult<&str> {
    map(
        delimited(tag("/*"), take_until("*/"), tag("*/")),
        |x: Span| *x,
    )(input)
}

pub fn eol_comment(tag: &'static str) -> impl Fn(Span) -> DefResult<&str> {
    move |input| {
        delimited(
            tag_no_case(tag),
            map(not_line_ending, |x: Span| *x),
            line_ending,
        )(input)
    }
}

pub fn whitespace(input: Span) -> DefResult<&str> {
    alt((
        multiline_comment,
        eol_comment("#"),
        eol_comment("--"),
        value(Default::default(), tag(" ")),
        value(Default::default(), tag("\t")),
        value(Default::default(), tag("\r")),
        value(Default::default(), tag("\n")),
    ))(input)
}

/// Zero or more whitespace units; comment contents are the output.
pub fn whitespace0(input: Span) -> DefResult<Vec<&str>> {
    many0(whitespace)(input).map(|(remaining, mut output)| {
        output.retain(|item| item.input_len() > 0);
        (remaining, output)
    })
}

/// One or more whitespace units.
pub fn whitespace1(input: Span) -> DefResult<Vec<&str>> {
    many1(whitespace)(input).map(|(remaining, mut output)| {
        output.retain(|item| item.input_len() > 0);
        (remaining, output)
    })
}
