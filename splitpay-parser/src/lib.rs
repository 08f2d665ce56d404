#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_till1},
    character::complete::{multispace1, u64},
    combinator::{opt, recognize},
    multi::many0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKeyword {
    Evenly,
    Contribution,
}

/// One form edit. Positions are 1-based as written; amounts and counts are
/// kept as the raw token so callers decide how lenient to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    TotalBill(&'a str),
    Tax(&'a str),
    People(&'a str),
    Mode(SplitKeyword),
    Name { person: u64, name: &'a str },
    Items { person: u64, count: &'a str },
    Cost { person: u64, item: u64, amount: &'a str },
    SharedAdd,
    SharedRemove { item: u64 },
    SharedName { item: u64, name: &'a str },
    SharedCost { item: u64, amount: &'a str },
    Share { item: u64, person: u64 },
    Calculate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

// Whitespace and `#` comments running to end of line
fn sp(input: &str) -> IResult<&str, &str> {
    fn comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("#"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((multispace1, comment)))).parse(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '#')(input)
}

fn text(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == '#' || c == '\n')
        .map(str::trim_end)
        .parse(input)
}

fn position(input: &str) -> IResult<&str, u64> {
    u64(input)
}

// Raw argument of a field edit; a missing argument clears the field.
fn optional_token(input: &str) -> IResult<&str, &str> {
    opt((multispace1, token))
        .map(|arg| arg.map_or("", |(_, value)| value))
        .parse(input)
}

fn optional_text(input: &str) -> IResult<&str, &str> {
    opt((multispace1, text))
        .map(|arg| arg.map_or("", |(_, value)| value))
        .parse(input)
}

fn bill_field(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        (tag_no_case("bill"), optional_token).map(|(_, amount)| Statement::TotalBill(amount)),
        (tag_no_case("tax"), optional_token).map(|(_, amount)| Statement::Tax(amount)),
        (tag_no_case("people"), optional_token).map(|(_, count)| Statement::People(count)),
    ))
    .parse(input)
}

fn split_keyword(input: &str) -> IResult<&str, SplitKeyword> {
    alt((
        tag_no_case("evenly").map(|_| SplitKeyword::Evenly),
        tag_no_case("even").map(|_| SplitKeyword::Evenly),
        tag_no_case("contribution").map(|_| SplitKeyword::Contribution),
        tag_no_case("contributed").map(|_| SplitKeyword::Contribution),
    ))
    .parse(input)
}

fn mode(input: &str) -> IResult<&str, Statement<'_>> {
    (tag_no_case("mode"), multispace1, split_keyword)
        .map(|(_, _, keyword)| Statement::Mode(keyword))
        .parse(input)
}

fn person_field(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        (tag_no_case("name"), multispace1, position, optional_text)
            .map(|(_, _, person, name)| Statement::Name { person, name }),
        (tag_no_case("items"), multispace1, position, optional_token)
            .map(|(_, _, person, count)| Statement::Items { person, count }),
        (
            tag_no_case("cost"),
            multispace1,
            position,
            multispace1,
            position,
            optional_token,
        )
            .map(|(_, _, person, _, item, amount)| Statement::Cost {
                person,
                item,
                amount,
            }),
    ))
    .parse(input)
}

// shared add | shared remove <n> | shared name <n> <text> | shared cost <n> <amount>
fn shared_item(input: &str) -> IResult<&str, Statement<'_>> {
    let (input, _) = (tag_no_case("shared"), multispace1).parse(input)?;
    alt((
        tag_no_case("add").map(|_| Statement::SharedAdd),
        (tag_no_case("remove"), multispace1, position)
            .map(|(_, _, item)| Statement::SharedRemove { item }),
        (tag_no_case("name"), multispace1, position, optional_text)
            .map(|(_, _, item, name)| Statement::SharedName { item, name }),
        (tag_no_case("cost"), multispace1, position, optional_token)
            .map(|(_, _, item, amount)| Statement::SharedCost { item, amount }),
    ))
    .parse(input)
}

fn share(input: &str) -> IResult<&str, Statement<'_>> {
    (
        tag_no_case("share"),
        multispace1,
        position,
        multispace1,
        position,
    )
        .map(|(_, _, item, _, person)| Statement::Share { item, person })
        .parse(input)
}

fn calculate(input: &str) -> IResult<&str, Statement<'_>> {
    alt((tag_no_case("calculate"), tag_no_case("calc")))
        .map(|_| Statement::Calculate)
        .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        shared_item,
        share,
        bill_field,
        mode,
        person_field,
        calculate,
    ))
    .parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

/// Parses a form script, one edit per line.
pub fn parse_script<'a>(input: &'a str) -> Result<Script<'a>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
            line: idx + 1,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement_with_sp(rest) {
            Ok((rest, stmt)) => {
                if !rest.trim().is_empty() {
                    return Err(ParseError::SyntaxError {
                        line: idx + 1,
                        detail: i18n::syntax_error_unparsed_detail(rest.trim()),
                    });
                }
                statements.push(StatementWithLine {
                    line: idx + 1,
                    statement: stmt,
                });
            }
            Err(e) => {
                return Err(ParseError::SyntaxError {
                    line: idx + 1,
                    detail: i18n::syntax_error_detail(e),
                });
            }
        }
    }

    Ok(Script { statements })
}
